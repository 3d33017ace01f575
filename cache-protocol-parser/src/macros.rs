/// Reads a little-endian u32 from the head of a buffer that may still be
/// growing. Yields `Error::Partial` so the caller can wait for more bytes.
macro_rules! read_prefix {
    ($bytes:ident) => {{
        if $bytes.len() < 4 {
            return Err(Error::Partial);
        }
        let (head, rest) = $bytes.split_at(4);
        (rest, LittleEndian::read_u32(head))
    }};
}

/// Takes `$len` bytes out of a complete frame. Running short inside a frame
/// whose total length was already validated is a hard error, not a partial
/// read.
macro_rules! read_len {
    ($bytes:ident, $len:expr) => {{
        let len = $len as usize;
        if $bytes.len() < len {
            return Err(Error::Truncated);
        }
        let (head, rest) = $bytes.split_at(len);
        (rest, head)
    }};
}

/// Reads a little-endian u32 field inside a complete frame.
macro_rules! read_u32 {
    ($bytes:ident) => {{
        let (rest, head) = read_len!($bytes, 4);
        (rest, LittleEndian::read_u32(head))
    }};
}

/// Takes the next byte out of a complete frame.
macro_rules! next {
    ($bytes:ident) => {{
        match $bytes.split_first() {
            Some((byte, rest)) => (rest, *byte),
            None => return Err(Error::Truncated),
        }
    }};
}

macro_rules! ret {
    ($bytes:ident, $value:expr) => {
        Ok(($bytes, $value))
    };
}
