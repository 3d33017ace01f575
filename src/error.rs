//! # Command errors
//!
//! Everything that turns into an `ERR` reply on the wire is abstracted in
//! this mod. Wire-format violations never reach this type; they are handled
//! by tearing the connection down.
use crate::value::Value;

/// Command errors
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The request frame carried no arguments at all
    EmptyCommand,
    /// A command is not found
    CommandNotFound(String),
    /// Invalid number of arguments
    InvalidArgsCount(String),
    /// Byte string cannot be converted to a number
    NotANumber,
    /// Operation against an entry holding the other kind of value
    WrongType,
    /// Sorted set operation against a key that is absent or holds a string
    MissingKey,
    /// I/O error while binding or serving
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<Error> for Value {
    fn from(value: Error) -> Value {
        let err_msg = match value {
            Error::EmptyCommand => "Empty command".to_owned(),
            Error::CommandNotFound(_) => "Unknown command".to_owned(),
            Error::InvalidArgsCount(x) => {
                format!("Invalid number of arguments for '{}'", x)
            }
            Error::NotANumber => "value is not a valid number or out of range".to_owned(),
            Error::WrongType => "Wrong type".to_owned(),
            Error::MissingKey => "Wrong type or key does not exist".to_owned(),
            Error::Io(x) => format!("I/O error: {}", x),
        };

        Value::Err(err_msg)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn renders_wire_messages() {
        assert_eq!(
            Value::Err("Wrong type".to_owned()),
            Error::WrongType.into()
        );
        assert_eq!(
            Value::Err("Unknown command".to_owned()),
            Error::CommandNotFound("frobnicate".to_owned()).into()
        );
        assert_eq!(
            Value::Err("Invalid number of arguments for 'zadd'".to_owned()),
            Error::InvalidArgsCount("zadd".to_owned()).into()
        );
    }
}
