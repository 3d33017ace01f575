//! # Sorted set command handlers
use crate::{
    connection::Connection,
    error::Error,
    value::{bytes_to_number, Value},
};
use bytes::Bytes;
use std::collections::VecDeque;

/// Parses a score. The score must be a double precision floating point
/// number; `inf` and `-inf` are valid, NaN is not.
fn parse_score(bytes: &Bytes) -> Result<f64, Error> {
    let score = bytes_to_number::<f64>(bytes)?;
    if score.is_nan() {
        return Err(Error::NotANumber);
    }

    Ok(score)
}

/// Adds the member with the given score to the sorted set stored at key. If
/// the member is already in the set its score is updated and the member is
/// reinserted at the right position to keep the ordering correct. If key
/// does not exist a new sorted set is created; if it holds a string the
/// command fails with a type error.
///
/// Replies 1 when the member was newly inserted, 0 on a score update.
pub async fn zadd(conn: &Connection, args: VecDeque<Bytes>) -> Result<Value, Error> {
    let score = parse_score(&args[1])?;

    conn.db().zadd(args[0].clone(), score, args[2].clone())
}

/// Removes the member from the sorted set stored at key. Replies 1 when the
/// member was removed, 0 when it was not in the set.
pub async fn zrem(conn: &Connection, args: VecDeque<Bytes>) -> Result<Value, Error> {
    conn.db().zrem(&args[0], &args[1])
}

/// Returns the score of the member in the sorted set stored at key, or nil
/// when the member is not in the set.
pub async fn zscore(conn: &Connection, args: VecDeque<Bytes>) -> Result<Value, Error> {
    conn.db().zscore(&args[0], &args[1])
}

/// Range-scans the sorted set stored at key starting at the pair
/// `(min_score, min_member)`, inclusive. After skipping `offset` qualifying
/// pairs, up to `limit` pairs are returned as a flat array interleaving
/// members and scores in `(score, member)` order.
pub async fn zquery(conn: &Connection, args: VecDeque<Bytes>) -> Result<Value, Error> {
    let min_score = parse_score(&args[1])?;
    let offset = bytes_to_number::<usize>(&args[3])?;
    let limit = bytes_to_number::<usize>(&args[4])?;

    conn.db().zquery(&args[0], min_score, &args[2], offset, limit)
}
