//! # Reply values
//!
//! Every reply the server emits is one of these tagged values. Encoding
//! appends to a caller-provided buffer so pipelined replies frame in place;
//! decoding (client side and tests) goes through the borrowed values of
//! `cache-protocol-parser`.
use crate::{error::Error, value_try_from};
use bytes::{BufMut, Bytes, BytesMut};
use cache_protocol_parser as parser;
use std::str::FromStr;

/// Reply value.
///
/// This enum represents every value the wire protocol can carry back to a
/// client.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    /// Bytes/Strings/Binary data
    Blob(Bytes),
    /// An error
    Err(String),
    /// Integer
    Integer(i64),
    /// Float number
    Float(f64),
    /// Vector/Array of values
    Array(Vec<Value>),
    /// Null
    Null,
    /// Ok, encoded as the string "OK"
    Ok,
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl Value {
    /// Creates a new value from a stream of bytes
    pub fn new(value: &[u8]) -> Self {
        Self::Blob(Bytes::copy_from_slice(value))
    }

    /// Appends the tagged encoding of this value to `dst`.
    ///
    /// All integer fields are little-endian. Arrays encode their length
    /// followed by each element recursively.
    pub fn serialize(&self, dst: &mut BytesMut) {
        match self {
            Value::Blob(x) => {
                dst.put_u8(parser::TAG_STR);
                dst.put_u32_le(x.len() as u32);
                dst.extend_from_slice(x);
            }
            Value::Ok => {
                dst.put_u8(parser::TAG_STR);
                dst.put_u32_le(2);
                dst.extend_from_slice(b"OK");
            }
            Value::Err(x) => {
                dst.put_u8(parser::TAG_ERR);
                dst.put_u32_le(x.len() as u32);
                dst.extend_from_slice(x.as_bytes());
            }
            Value::Integer(x) => {
                dst.put_u8(parser::TAG_INT);
                dst.put_i64_le(*x);
            }
            Value::Float(x) => {
                dst.put_u8(parser::TAG_DBL);
                dst.put_f64_le(*x);
            }
            Value::Array(x) => {
                dst.put_u8(parser::TAG_ARR);
                dst.put_u32_le(x.len() as u32);
                for value in x.iter() {
                    value.serialize(dst);
                }
            }
            Value::Null => {
                dst.put_u8(parser::TAG_NIL);
            }
        }
    }

    /// Is the current value an error?
    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err(..))
    }
}

impl<'a> From<&parser::Value<'a>> for Value {
    fn from(value: &parser::Value) -> Self {
        match value {
            parser::Value::Blob(x) => Self::new(x),
            parser::Value::Error(x) => Self::Err(String::from_utf8_lossy(x).to_string()),
            parser::Value::Integer(x) => Self::Integer(*x),
            parser::Value::Float(x) => Self::Float(*x),
            parser::Value::Array(x) => Self::Array(x.iter().map(|x| x.into()).collect()),
            parser::Value::Null => Self::Null,
        }
    }
}

/// Tries to convert bytes data into a number
///
/// If the conversion fails a Error::NotANumber error is returned.
#[inline]
pub fn bytes_to_number<T: FromStr>(bytes: &[u8]) -> Result<T, Error> {
    let x = String::from_utf8_lossy(bytes);
    x.parse::<T>().map_err(|_| Error::NotANumber)
}

value_try_from!(f64, Value::Float);
value_try_from!(i32, Value::Integer);
value_try_from!(i64, Value::Integer);

impl From<usize> for Value {
    fn from(value: usize) -> Value {
        Value::Integer(value as i64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::Blob(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Value {
        Value::Blob(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Value {
        Value::Array(value)
    }
}
