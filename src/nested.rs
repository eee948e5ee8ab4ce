//! Append-only storage with one dense vector per trajectory.
//!
//! Ids are handed out in order: the n-th value appended to a trajectory
//! gets local index n. Nothing is ever removed, so every id below the
//! trajectory's length stays valid for the life of the container.
//!
//! Trajectory slots are kept in a plain vector indexed by trajectory id.
//! Appending to trajectory 5 of an empty container allocates empty slots
//! for trajectories 0 through 4.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

use tracing::trace;

use crate::error::IdError;
use crate::error::IdResult;
use crate::error::fail;
use crate::id::CompositeId;

/// Dense per-trajectory storage addressed by `I`.
pub struct NestedVecs<I, V> {
    data: Vec<Vec<V>>,
    marker: PhantomData<fn() -> I>,
}

impl<I, V> Default for NestedVecs<I, V> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<I, V: Clone> Clone for NestedVecs<I, V> {
    fn clone(&self) -> Self {
        return NestedVecs {
            data: self.data.clone(),
            marker: PhantomData,
        };
    }
}

impl<I, V> NestedVecs<I, V> {
    /// Create an empty container.
    pub fn new() -> NestedVecs<I, V> {
        return NestedVecs {
            data: Vec::new(),
            marker: PhantomData,
        };
    }

    /// Number of trajectory slots, including empty padding slots.
    #[inline]
    pub fn num_trajectories(&self) -> usize {
        return self.data.len();
    }

    /// Total number of values across all trajectories.
    pub fn len(&self) -> usize {
        return self.data.iter().map(Vec::len).sum();
    }

    /// Check if no value has been appended yet.
    pub fn is_empty(&self) -> bool {
        return self.data.iter().all(Vec::is_empty);
    }

    /// The values of one trajectory in index order.
    ///
    /// Untouched trajectories, padding or beyond the last slot, are empty.
    pub fn trajectory(&self, trajectory_id: u32) -> &[V] {
        return match self.data.get(trajectory_id as usize) {
            Some(slot) => slot.as_slice(),
            None => &[],
        };
    }

    /// Number of values in a trajectory, or an error if no slot exists.
    pub fn try_num_indices(&self, trajectory_id: u32) -> IdResult<usize> {
        return match self.data.get(trajectory_id as usize) {
            Some(slot) => Ok(slot.len()),
            None => Err(IdError::TrajectoryOutOfRange {
                trajectory_id,
                num_trajectories: self.data.len(),
            }),
        };
    }

    /// Number of values in a trajectory.
    ///
    /// Panics if `trajectory_id` has no slot. Padding slots report zero.
    #[track_caller]
    pub fn num_indices(&self, trajectory_id: u32) -> usize {
        match self.try_num_indices(trajectory_id) {
            Ok(len) => return len,
            Err(err) => fail(err),
        }
    }
}

impl<I: CompositeId, V> NestedVecs<I, V> {
    /// Append a value to a trajectory, creating slots as needed.
    ///
    /// Returns the id of the new value, whose local index is the
    /// previous length of the trajectory.
    pub fn append(&mut self, trajectory_id: u32, value: V) -> I {
        let slot_idx = trajectory_id as usize;
        if slot_idx >= self.data.len() {
            trace!(trajectory_id, slots = slot_idx + 1, "growing trajectory table");
            self.data.resize_with(slot_idx + 1, Vec::new);
        }

        let slot = &mut self.data[slot_idx];
        assert!(
            slot.len() < u32::MAX as usize,
            "trajectory {trajectory_id} has no index left to append at",
        );
        let id = I::from_parts(trajectory_id, slot.len() as u32);
        slot.push(value);
        return id;
    }

    fn locate(&self, id: I) -> IdResult<(usize, usize)> {
        let trajectory_id = id.trajectory_id();
        let Some(slot) = self.data.get(trajectory_id as usize) else {
            return Err(IdError::TrajectoryOutOfRange {
                trajectory_id,
                num_trajectories: self.data.len(),
            });
        };
        let index = id.local_index();
        if index as usize >= slot.len() {
            return Err(IdError::IndexOutOfRange {
                trajectory_id,
                index,
                len: slot.len(),
            });
        }
        return Ok((trajectory_id as usize, index as usize));
    }

    /// Get the value for an id, if it was appended.
    pub fn get(&self, id: I) -> Option<&V> {
        return self
            .data
            .get(id.trajectory_id() as usize)
            .and_then(|slot| slot.get(id.local_index() as usize));
    }

    /// Get a mutable reference to the value for an id, if it was appended.
    pub fn get_mut(&mut self, id: I) -> Option<&mut V> {
        return self
            .data
            .get_mut(id.trajectory_id() as usize)
            .and_then(|slot| slot.get_mut(id.local_index() as usize));
    }

    /// Get the value for an id.
    ///
    /// Panics if the trajectory or the index is out of range.
    #[track_caller]
    pub fn at(&self, id: I) -> &V {
        match self.locate(id) {
            Ok((t, i)) => return &self.data[t][i],
            Err(err) => fail(err),
        }
    }

    /// Get a mutable reference to the value for an id.
    ///
    /// Panics if the trajectory or the index is out of range.
    #[track_caller]
    pub fn at_mut(&mut self, id: I) -> &mut V {
        match self.locate(id) {
            Ok((t, i)) => return &mut self.data[t][i],
            Err(err) => fail(err),
        }
    }

    /// Iterate all `(id, value)` pairs in trajectory-major order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &V)> {
        return self.data.iter().enumerate().flat_map(|(t, slot)| {
            slot.iter()
                .enumerate()
                .map(move |(i, value)| (I::from_parts(t as u32, i as u32), value))
        });
    }
}

impl<I: CompositeId, V> Index<I> for NestedVecs<I, V> {
    type Output = V;

    #[track_caller]
    fn index(&self, id: I) -> &V {
        return self.at(id);
    }
}

impl<I: CompositeId, V> IndexMut<I> for NestedVecs<I, V> {
    #[track_caller]
    fn index_mut(&mut self, id: I) -> &mut V {
        return self.at_mut(id);
    }
}

impl<I: CompositeId, V: fmt::Debug> fmt::Debug for NestedVecs<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_map().entries(self.iter()).finish();
    }
}
