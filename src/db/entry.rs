use super::sorted_set::SortedSet;
use bytes::Bytes;

/// Keyspace entry
///
/// An entry holds either an opaque byte string or a sorted set. The variant
/// is fixed when the entry is created; a command of the other flavor fails
/// with a type error instead of converting the entry.
#[derive(Debug, PartialEq)]
pub enum Entry {
    /// Opaque byte string
    Blob(Bytes),
    /// Sorted set
    SortedSet(SortedSet),
}

impl From<Bytes> for Entry {
    fn from(value: Bytes) -> Entry {
        Entry::Blob(value)
    }
}

impl From<SortedSet> for Entry {
    fn from(value: SortedSet) -> Entry {
        Entry::SortedSet(value)
    }
}
