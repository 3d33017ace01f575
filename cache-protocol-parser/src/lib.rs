//! Parsing routines for the length-prefixed binary protocol spoken between
//! the cache server and its clients.
//!
//! Everything in here is a pure function over byte slices. Parsers return
//! the unconsumed tail along with the parsed value so a streaming caller can
//! advance its buffer by the difference, and report [`Error::Partial`] when
//! a frame is not complete yet.
//!
//! All multi-byte integers on the wire are little-endian.
#[macro_use]
mod macros;

use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error as ThisError;

/// Maximum payload of a request frame (everything after the length prefix).
pub const MAX_REQUEST_SIZE: usize = 4096;

/// Maximum number of arguments a request frame may carry.
pub const MAX_REQUEST_ARGS: usize = 1024;

/// Largest reply a client will accept.
pub const MAX_REPLY_SIZE: usize = 10 * 1024 * 1024;

/// Reply tag for a byte string.
pub const TAG_STR: u8 = 0x00;
/// Reply tag for the nil value.
pub const TAG_NIL: u8 = 0x01;
/// Reply tag for a signed 64-bit integer.
pub const TAG_INT: u8 = 0x02;
/// Reply tag for an error message.
pub const TAG_ERR: u8 = 0x03;
/// Reply tag for an array of values.
pub const TAG_ARR: u8 = 0x04;
/// Reply tag for an IEEE-754 double.
pub const TAG_DBL: u8 = 0x05;

/// A reply value borrowed from the buffer it was parsed out of.
#[derive(Debug, PartialEq, Clone)]
pub enum Value<'a> {
    /// Byte string.
    Blob(&'a [u8]),
    /// Error message (usually UTF-8, not guaranteed).
    Error(&'a [u8]),
    /// Signed 64-bit integer.
    Integer(i64),
    /// IEEE-754 double.
    Float(f64),
    /// Array of values.
    Array(Vec<Value<'a>>),
    /// Nil.
    Null,
}

/// Wire-format violations.
///
/// `Partial` is the only recoverable variant; every other one means the
/// peer is not speaking the protocol and the connection must go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum Error {
    /// The frame is not complete yet, more bytes are expected.
    #[error("incomplete frame")]
    Partial,
    /// A request frame declared a payload over [`MAX_REQUEST_SIZE`].
    #[error("request frame of {0} bytes exceeds the frame cap")]
    FrameTooLarge(u32),
    /// A reply frame declared a payload over [`MAX_REPLY_SIZE`].
    #[error("reply frame of {0} bytes exceeds the reply cap")]
    ReplyTooLarge(u32),
    /// A request frame declared more than [`MAX_REQUEST_ARGS`] arguments.
    #[error("request declares {0} arguments, over the argument cap")]
    TooManyArgs(u32),
    /// A nested length field overran the frame it lives in.
    #[error("length field overruns its frame")]
    Truncated,
    /// Bytes were left over after the last argument or value.
    #[error("{0} trailing bytes after the end of the frame body")]
    TrailingBytes(usize),
    /// Unknown value tag byte.
    #[error("unknown value tag {0:#04x}")]
    InvalidTag(u8),
}

/// Parses a request frame: `total_len:u32 | argc:u32 | (arg_len:u32 |
/// arg_bytes)*`.
///
/// Returns the bytes following the frame and the argument list. The
/// `total_len` cap is enforced as soon as the prefix is readable, before
/// waiting for the rest of the frame, so an oversized frame is rejected
/// without buffering it.
pub fn parse_request(bytes: &[u8]) -> Result<(&[u8], Vec<&[u8]>), Error> {
    let (rest, total_len) = read_prefix!(bytes);
    if total_len as usize > MAX_REQUEST_SIZE {
        return Err(Error::FrameTooLarge(total_len));
    }
    if rest.len() < total_len as usize {
        return Err(Error::Partial);
    }

    let (frame, remaining) = rest.split_at(total_len as usize);
    let (mut frame, argc) = read_u32!(frame);
    if argc as usize > MAX_REQUEST_ARGS {
        return Err(Error::TooManyArgs(argc));
    }

    let mut args = Vec::with_capacity(argc as usize);
    for _ in 0..argc {
        let (rest, arg_len) = read_u32!(frame);
        let (rest, arg) = read_len!(rest, arg_len);
        args.push(arg);
        frame = rest;
    }

    if !frame.is_empty() {
        return Err(Error::TrailingBytes(frame.len()));
    }

    ret!(remaining, args)
}

/// Serializes an argument list into a request frame.
///
/// The same caps the server enforces while parsing are applied here, so a
/// client fails locally instead of having its connection dropped.
pub fn serialize_request<T: AsRef<[u8]>>(args: &[T]) -> Result<Vec<u8>, Error> {
    if args.len() > MAX_REQUEST_ARGS {
        return Err(Error::TooManyArgs(args.len() as u32));
    }

    let mut total_len = 4;
    for arg in args {
        total_len += 4 + arg.as_ref().len();
    }
    if total_len > MAX_REQUEST_SIZE {
        return Err(Error::FrameTooLarge(total_len as u32));
    }

    let mut out = Vec::with_capacity(4 + total_len);
    out.extend_from_slice(&(total_len as u32).to_le_bytes());
    out.extend_from_slice(&(args.len() as u32).to_le_bytes());
    for arg in args {
        let arg = arg.as_ref();
        out.extend_from_slice(&(arg.len() as u32).to_le_bytes());
        out.extend_from_slice(arg);
    }

    Ok(out)
}

/// Parses a reply frame: `reply_len:u32 | tagged body`.
///
/// Returns the bytes following the frame and the decoded value. The body
/// must hold exactly one value.
pub fn parse_reply(bytes: &[u8]) -> Result<(&[u8], Value), Error> {
    let (rest, reply_len) = read_prefix!(bytes);
    if reply_len as usize > MAX_REPLY_SIZE {
        return Err(Error::ReplyTooLarge(reply_len));
    }
    if rest.len() < reply_len as usize {
        return Err(Error::Partial);
    }

    let (body, remaining) = rest.split_at(reply_len as usize);
    let (body, value) = parse(body)?;
    if !body.is_empty() {
        return Err(Error::TrailingBytes(body.len()));
    }

    ret!(remaining, value)
}

/// Parses a single tagged value out of a complete frame body.
///
/// Arrays recurse; every other tag is flat.
pub fn parse(bytes: &[u8]) -> Result<(&[u8], Value), Error> {
    let (bytes, tag) = next!(bytes);
    match tag {
        TAG_STR => {
            let (bytes, len) = read_u32!(bytes);
            let (bytes, blob) = read_len!(bytes, len);
            ret!(bytes, Value::Blob(blob))
        }
        TAG_NIL => ret!(bytes, Value::Null),
        TAG_INT => {
            let (bytes, raw) = read_len!(bytes, 8);
            ret!(bytes, Value::Integer(LittleEndian::read_i64(raw)))
        }
        TAG_ERR => {
            let (bytes, len) = read_u32!(bytes);
            let (bytes, msg) = read_len!(bytes, len);
            ret!(bytes, Value::Error(msg))
        }
        TAG_ARR => {
            let (mut bytes, count) = read_u32!(bytes);
            let mut values = Vec::new();
            for _ in 0..count {
                let r = parse(bytes)?;
                bytes = r.0;
                values.push(r.1);
            }
            ret!(bytes, Value::Array(values))
        }
        TAG_DBL => {
            let (bytes, raw) = read_len!(bytes, 8);
            ret!(bytes, Value::Float(LittleEndian::read_f64(raw)))
        }
        tag => Err(Error::InvalidTag(tag)),
    }
}
