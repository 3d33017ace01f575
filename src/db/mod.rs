//! # In-memory keyspace
//!
//! This module is the core of the cache. All command handlers end up in
//! here; each public method owns the locking and the entry-type checking
//! for one command and returns a ready-to-encode reply value.
mod entry;
pub mod sorted_set;

use crate::{error::Error, option, value::Value};
use bytes::Bytes;
use entry::Entry;
use parking_lot::RwLock;
use sorted_set::SortedSet;
use std::collections::HashMap;

/// Keyspace structure
///
/// A single map from byte-string keys to entries. The map exclusively owns
/// its entries; removing a key drops the entry, sorted set and all.
///
/// All access happens from the event-loop thread; the lock is here because
/// connection tasks share the map through an `Arc`, and it is never
/// contended on the current-thread runtime.
#[derive(Debug, Default)]
pub struct Db {
    entries: RwLock<HashMap<Bytes, Entry>>,
}

impl Db {
    /// Creates a new keyspace instance
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true when the keyspace holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Gets the string value stored at a key. Missing keys and keys holding
    /// a sorted set reply nil.
    pub fn get(&self, key: &Bytes) -> Value {
        match self.entries.read().get(key) {
            Some(Entry::Blob(value)) => Value::Blob(value.clone()),
            _ => Value::Null,
        }
    }

    /// Upserts a string entry. The previous string value, if any, is
    /// dropped and replaced.
    pub fn set(&self, key: Bytes, value: Bytes) -> Result<Value, Error> {
        let mut entries = self.entries.write();
        match entries.get_mut(&key) {
            Some(Entry::Blob(slot)) => {
                *slot = value;
            }
            Some(_) => return Err(Error::WrongType),
            None => {
                entries.insert(key, value.into());
            }
        }

        Ok(Value::Ok)
    }

    /// Removes the entry stored at a key, whatever its type. Replies with
    /// the number of entries removed (1 or 0).
    pub fn del(&self, key: &Bytes) -> Value {
        let removed = self.entries.write().remove(key).is_some();
        (removed as i64).into()
    }

    /// Lists every key, in no particular order.
    pub fn keys(&self) -> Value {
        Value::Array(
            self.entries
                .read()
                .keys()
                .map(|key| Value::Blob(key.clone()))
                .collect(),
        )
    }

    /// Adds a member to the sorted set stored at a key, creating the set
    /// when the key is missing. Replies 1 when the member is new, 0 when an
    /// existing member's score was updated.
    pub fn zadd(&self, key: Bytes, score: f64, member: Bytes) -> Result<Value, Error> {
        let mut entries = self.entries.write();
        match entries.get_mut(&key) {
            Some(Entry::SortedSet(set)) => Ok((set.insert(score, member) as i64).into()),
            Some(_) => Err(Error::WrongType),
            None => {
                let mut set = SortedSet::new();
                set.insert(score, member);
                entries.insert(key, set.into());

                Ok(1.into())
            }
        }
    }

    /// Removes a member from the sorted set stored at a key. Replies 1 when
    /// the member was removed, 0 when it was not there.
    pub fn zrem(&self, key: &Bytes, member: &Bytes) -> Result<Value, Error> {
        match self.entries.write().get_mut(key) {
            Some(Entry::SortedSet(set)) => Ok((set.remove(member) as i64).into()),
            _ => Err(Error::MissingKey),
        }
    }

    /// Looks up a member's score in the sorted set stored at a key. A
    /// missing member replies nil.
    pub fn zscore(&self, key: &Bytes, member: &Bytes) -> Result<Value, Error> {
        match self.entries.read().get(key) {
            Some(Entry::SortedSet(set)) => Ok(option!(set.score(member))),
            _ => Err(Error::MissingKey),
        }
    }

    /// Range-scans the sorted set stored at a key. The reply is a flat
    /// array interleaving members and scores in `(score, member)` order.
    pub fn zquery(
        &self,
        key: &Bytes,
        min_score: f64,
        min_member: &Bytes,
        offset: usize,
        limit: usize,
    ) -> Result<Value, Error> {
        match self.entries.read().get(key) {
            Some(Entry::SortedSet(set)) => {
                let pairs = set.range(min_score, min_member, offset, limit);
                let mut flat = Vec::with_capacity(pairs.len() * 2);
                for (member, score) in pairs {
                    flat.push(Value::Blob(member));
                    flat.push(Value::Float(score));
                }

                Ok(Value::Array(flat))
            }
            _ => Err(Error::MissingKey),
        }
    }
}
