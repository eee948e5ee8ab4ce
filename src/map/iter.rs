//! Flattening iterator over a `MapById`.
//!
//! The iterator keeps two cursors, one over the trajectory table and one
//! over the current trajectory's entries, plus the entry it is parked on.
//! After every step it skips forward past trajectories with no entries
//! left, so `current` is either a live entry or the end sentinel.

use std::collections::btree_map;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::Trajectory;
use crate::id::CompositeId;

/// Iterator over `(id, &value)` pairs in trajectory-major, index-minor order.
///
/// Cloning an iterator yields an independent cursor at the same position.
pub struct Iter<'a, I, V> {
    trajectories: btree_map::Iter<'a, u32, Trajectory<V>>,
    trajectory_id: u32,
    entries: btree_map::Iter<'a, u32, V>,
    /// The entry the iterator is parked on; `None` is the end sentinel.
    current: Option<(u32, u32, &'a V)>,
    remaining: usize,
    marker: PhantomData<fn() -> I>,
}

impl<'a, I, V> Iter<'a, I, V> {
    pub(super) fn new(trajectories: &'a btree_map::BTreeMap<u32, Trajectory<V>>, len: usize) -> Iter<'a, I, V> {
        let mut iter = Iter {
            trajectories: trajectories.iter(),
            trajectory_id: 0,
            entries: btree_map::Iter::default(),
            current: None,
            remaining: len,
            marker: PhantomData,
        };
        iter.advance();
        return iter;
    }

    /// Move `current` to the next live entry, crossing into later
    /// trajectories while the current one is exhausted.
    fn advance(&mut self) {
        loop {
            if let Some((&index, value)) = self.entries.next() {
                self.current = Some((self.trajectory_id, index, value));
                return;
            }
            match self.trajectories.next() {
                Some((&trajectory_id, trajectory)) => {
                    self.trajectory_id = trajectory_id;
                    self.entries = trajectory.data.iter();
                }
                None => {
                    self.current = None;
                    return;
                }
            }
        }
    }

    /// Check if the iterator is at the end sentinel.
    #[inline]
    pub fn is_end(&self) -> bool {
        return self.current.is_none();
    }
}

impl<'a, I: CompositeId, V> Iter<'a, I, V> {
    /// The id the next call to `next` will yield, or `None` at the end.
    pub fn peek_id(&self) -> Option<I> {
        return self.current.map(|(t, i, _)| I::from_parts(t, i));
    }
}

impl<'a, I: CompositeId, V> Iterator for Iter<'a, I, V> {
    type Item = (I, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (trajectory_id, index, value) = self.current?;
        self.advance();
        self.remaining -= 1;
        return Some((I::from_parts(trajectory_id, index), value));
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<I: CompositeId, V> ExactSizeIterator for Iter<'_, I, V> {}

impl<I: CompositeId, V> FusedIterator for Iter<'_, I, V> {}

impl<I, V> Clone for Iter<'_, I, V> {
    fn clone(&self) -> Self {
        return Iter {
            trajectories: self.trajectories.clone(),
            trajectory_id: self.trajectory_id,
            entries: self.entries.clone(),
            current: self.current,
            remaining: self.remaining,
            marker: PhantomData,
        };
    }
}

/// Two positions are equal when both are at the end, or both are parked
/// on the same trajectory and index.
impl<I, V> PartialEq for Iter<'_, I, V> {
    fn eq(&self, other: &Self) -> bool {
        return match (self.current, other.current) {
            (None, None) => true,
            (Some((t1, i1, _)), Some((t2, i2, _))) => t1 == t2 && i1 == i2,
            _ => false,
        };
    }
}

impl<I, V> Eq for Iter<'_, I, V> {}

impl<I, V> fmt::Debug for Iter<'_, I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self.current {
            Some((t, i, _)) => write!(f, "Iter(({}, {}), remaining: {})", t, i, self.remaining),
            None => write!(f, "Iter(end)"),
        };
    }
}

/// Iterator over one trajectory of a `MapById`.
pub struct TrajectoryIter<'a, I, V> {
    pub(super) trajectory_id: u32,
    pub(super) entries: Option<btree_map::Iter<'a, u32, V>>,
    pub(super) marker: PhantomData<fn() -> I>,
}

impl<'a, I: CompositeId, V> Iterator for TrajectoryIter<'a, I, V> {
    type Item = (I, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (&index, value) = self.entries.as_mut()?.next()?;
        return Some((I::from_parts(self.trajectory_id, index), value));
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return match &self.entries {
            Some(entries) => entries.size_hint(),
            None => (0, Some(0)),
        };
    }
}

impl<'a, I: CompositeId, V> DoubleEndedIterator for TrajectoryIter<'a, I, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (&index, value) = self.entries.as_mut()?.next_back()?;
        return Some((I::from_parts(self.trajectory_id, index), value));
    }
}

impl<I: CompositeId, V> ExactSizeIterator for TrajectoryIter<'_, I, V> {}
