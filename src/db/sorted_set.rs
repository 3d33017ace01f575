//! # Sorted set
//!
//! Set of unique members ordered by `(score, member)`, score ascending with
//! a lexicographic member tiebreak. Two indices are kept in lockstep: an
//! ordered index over `(score, member)` pairs answering range scans, and a
//! by-member index answering score lookups in O(log n) or better.
use bytes::Bytes;
use float_ord::FloatOrd;
use std::collections::{BTreeSet, HashMap};

/// Collapses the two IEEE-754 zeros into `+0.0` so the member tiebreak
/// applies across both encodings.
#[inline]
fn canonical(score: f64) -> f64 {
    if score == 0.0 {
        0.0
    } else {
        score
    }
}

/// Sorted set structure
///
/// Every `(member, score)` pair present in `order` is present in `set` with
/// the same score, and vice versa. Scores are never NaN; callers reject NaN
/// before it gets here.
#[derive(Debug, Clone, Default)]
pub struct SortedSet {
    set: HashMap<Bytes, FloatOrd<f64>>,
    order: BTreeSet<(FloatOrd<f64>, Bytes)>,
}

impl PartialEq for SortedSet {
    fn eq(&self, other: &SortedSet) -> bool {
        self.order == other.order
    }
}

impl SortedSet {
    /// Creates a new instance
    pub fn new() -> Self {
        Self {
            set: HashMap::new(),
            order: BTreeSet::new(),
        }
    }

    /// Returns the number of members in the set
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns true when the set has no members
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Adds a member to the set, or updates its score if it is already
    /// present. An updated member is removed from its old position in the
    /// ordered index and reinserted at the position its new score dictates.
    ///
    /// Returns true when the member was newly inserted, false on a score
    /// update.
    pub fn insert(&mut self, score: f64, member: Bytes) -> bool {
        let score = FloatOrd(canonical(score));

        match self.set.insert(member.clone(), score) {
            Some(previous) => {
                if previous != score {
                    self.order.remove(&(previous, member.clone()));
                    self.order.insert((score, member));
                }
                false
            }
            None => {
                self.order.insert((score, member));
                true
            }
        }
    }

    /// Removes a member if present; returns whether it was removed.
    pub fn remove(&mut self, member: &Bytes) -> bool {
        match self.set.remove(member) {
            Some(score) => {
                self.order.remove(&(score, member.clone()));
                true
            }
            None => false,
        }
    }

    /// Returns the score of a member, if any.
    pub fn score(&self, member: &Bytes) -> Option<f64> {
        self.set.get(member).map(|score| score.0)
    }

    /// Range scan in `(score, member)` order.
    ///
    /// A pair qualifies when it is at or after `(min_score, min_member)` in
    /// the pair order. The first `offset` qualifying pairs are skipped, then
    /// up to `limit` pairs are returned.
    pub fn range(
        &self,
        min_score: f64,
        min_member: &Bytes,
        offset: usize,
        limit: usize,
    ) -> Vec<(Bytes, f64)> {
        let lower = (FloatOrd(canonical(min_score)), min_member.clone());

        self.order
            .range(lower..)
            .skip(offset)
            .take(limit)
            .map(|(score, member)| (member.clone(), score.0))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_indices_agree(set: &SortedSet) {
        assert_eq!(set.set.len(), set.order.len());
        for (score, member) in set.order.iter() {
            assert_eq!(Some(score), set.set.get(member));
        }
    }

    fn sample() -> SortedSet {
        let mut set = SortedSet::new();
        set.insert(1.0, "a".into());
        set.insert(1.0, "b".into());
        set.insert(2.0, "c".into());
        set.insert(3.0, "d".into());
        set
    }

    #[test]
    fn basic_usage() {
        let mut set = SortedSet::new();

        assert!(set.insert(1.0, "two".into()));
        assert!(set.insert(0.0, "three".into()));
        assert!(!set.insert(3.0, "two".into()));

        assert!(!set.is_empty());
        assert_eq!(2, set.len());
        assert_eq!(Some(3.0), set.score(&"two".into()));
        assert_eq!(Some(0.0), set.score(&"three".into()));
        assert_eq!(None, set.score(&"five".into()));
        assert_indices_agree(&set);
    }

    #[test]
    fn update_keeps_members_unique() {
        let mut set = SortedSet::new();
        assert!(set.insert(1.0, "a".into()));
        assert!(!set.insert(2.0, "a".into()));

        assert_eq!(1, set.len());
        assert_eq!(Some(2.0), set.score(&"a".into()));
        assert_eq!(
            vec![(Bytes::from("a"), 2.0)],
            set.range(f64::NEG_INFINITY, &Bytes::new(), 0, usize::MAX)
        );
        assert_indices_agree(&set);
    }

    #[test]
    fn remove_detaches_both_indices() {
        let mut set = sample();
        assert!(set.remove(&"b".into()));
        assert!(!set.remove(&"b".into()));

        assert_eq!(3, set.len());
        assert_eq!(None, set.score(&"b".into()));
        assert_indices_agree(&set);
    }

    #[test]
    fn full_scan_is_ordered() {
        let set = sample();
        let all = set.range(f64::NEG_INFINITY, &Bytes::new(), 0, set.len());
        assert_eq!(
            vec![
                (Bytes::from("a"), 1.0),
                (Bytes::from("b"), 1.0),
                (Bytes::from("c"), 2.0),
                (Bytes::from("d"), 3.0),
            ],
            all
        );
    }

    #[test]
    fn range_lower_bound_is_inclusive() {
        let set = sample();
        assert_eq!(
            vec![
                (Bytes::from("b"), 1.0),
                (Bytes::from("c"), 2.0),
                (Bytes::from("d"), 3.0),
            ],
            set.range(1.0, &"b".into(), 0, 3)
        );
    }

    #[test]
    fn range_offset_and_limit_page_through() {
        let set = sample();
        assert_eq!(
            vec![(Bytes::from("b"), 1.0), (Bytes::from("c"), 2.0)],
            set.range(f64::NEG_INFINITY, &Bytes::new(), 1, 2)
        );
        assert_eq!(
            vec![(Bytes::from("d"), 3.0)],
            set.range(f64::NEG_INFINITY, &Bytes::new(), 3, 10)
        );
        assert!(set.range(f64::NEG_INFINITY, &Bytes::new(), 4, 10).is_empty());
        assert!(set.range(f64::NEG_INFINITY, &Bytes::new(), 0, 0).is_empty());
    }

    #[test]
    fn range_matches_filter_sort_slice_model() {
        let mut set = SortedSet::new();
        let pairs: Vec<(f64, &str)> = vec![
            (5.0, "e"),
            (1.0, "m"),
            (3.0, "a"),
            (1.0, "a"),
            (3.0, "z"),
            (-2.0, "q"),
            (3.0, "b"),
        ];
        for (score, member) in pairs.iter() {
            set.insert(*score, Bytes::from(*member));
        }

        let mut model: Vec<(FloatOrd<f64>, Bytes)> = pairs
            .iter()
            .map(|(score, member)| (FloatOrd(*score), Bytes::from(*member)))
            .collect();
        model.sort();

        let bound = (FloatOrd(1.0), Bytes::from("b"));
        let expected: Vec<(Bytes, f64)> = model
            .iter()
            .filter(|pair| **pair >= bound)
            .skip(1)
            .take(3)
            .map(|(score, member)| (member.clone(), score.0))
            .collect();

        assert_eq!(expected, set.range(1.0, &"b".into(), 1, 3));
        assert_indices_agree(&set);
    }

    #[test]
    fn negative_zero_ties_with_positive_zero() {
        let mut set = SortedSet::new();
        set.insert(0.0, "b".into());
        set.insert(-0.0, "a".into());

        // members at the two zeros sort by member, not by zero sign
        assert_eq!(
            vec![(Bytes::from("a"), 0.0), (Bytes::from("b"), 0.0)],
            set.range(-0.0, &Bytes::new(), 0, 2)
        );
    }

    #[test]
    fn mixed_churn_keeps_invariant() {
        let mut set = SortedSet::new();
        for i in 0..64 {
            let member = Bytes::from(format!("m{}", i % 16));
            set.insert((i % 7) as f64 - 3.0, member);
            if i % 3 == 0 {
                set.remove(&Bytes::from(format!("m{}", (i + 5) % 16)));
            }
            assert_indices_agree(&set);
        }
        assert!(set.len() <= 16);
    }
}
