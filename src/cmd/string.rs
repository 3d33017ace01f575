//! # String command handlers
use crate::{connection::Connection, error::Error, value::Value};
use bytes::Bytes;
use std::collections::VecDeque;

/// Get the value of key. If the key does not exist the special value nil is
/// returned. A key holding a sorted set replies nil as well; get only
/// answers for string entries.
pub async fn get(conn: &Connection, args: VecDeque<Bytes>) -> Result<Value, Error> {
    Ok(conn.db().get(&args[0]))
}

/// Set key to hold the string value. If key already holds a string its
/// value is replaced; if it holds a sorted set the command fails with a
/// type error.
pub async fn set(conn: &Connection, args: VecDeque<Bytes>) -> Result<Value, Error> {
    conn.db().set(args[0].clone(), args[1].clone())
}
