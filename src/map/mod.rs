//! Sparse per-trajectory storage addressed by composite ids.
//!
//! `MapById` behaves like a `BTreeMap<I, V>` split by trajectory, with two
//! ways to add entries:
//!
//! - `append` picks the next index itself: 0 for an empty trajectory,
//!   otherwise one past the highest index present.
//! - `insert` stores at a caller-chosen index.
//!
//! Each trajectory carries an `appendable` gate. It starts open and is
//! closed for good by an `insert`, or by removing the trajectory's
//! highest index. Once closed, `append` on that trajectory fails; lookup,
//! removal and iteration keep working.
//!
//! # Complexity
//!
//! All operations are O(log t + log k) for t trajectories and k entries in
//! the addressed trajectory, except `len` and `is_empty` which are O(1).

mod iter;

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

use tracing::debug;
use tracing::trace;

pub use iter::Iter;
pub use iter::TrajectoryIter;

use crate::error::IdError;
use crate::error::IdResult;
use crate::error::fail;
use crate::id::CompositeId;

/// The entries of one trajectory and its append gate.
struct Trajectory<V> {
    can_append: bool,
    data: BTreeMap<u32, V>,
}

impl<V> Default for Trajectory<V> {
    fn default() -> Self {
        return Trajectory {
            can_append: true,
            data: BTreeMap::new(),
        };
    }
}

impl<V: Clone> Clone for Trajectory<V> {
    fn clone(&self) -> Self {
        return Trajectory {
            can_append: self.can_append,
            data: self.data.clone(),
        };
    }
}

/// An ordered map keyed by `I`, grouped by trajectory.
pub struct MapById<I, V> {
    trajectories: BTreeMap<u32, Trajectory<V>>,
    /// Live entries across all trajectories.
    len: usize,
    marker: PhantomData<fn() -> I>,
}

impl<I, V> Default for MapById<I, V> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<I, V: Clone> Clone for MapById<I, V> {
    fn clone(&self) -> Self {
        return MapById {
            trajectories: self.trajectories.clone(),
            len: self.len,
            marker: PhantomData,
        };
    }
}

impl<I, V> MapById<I, V> {
    /// Create an empty map.
    pub fn new() -> MapById<I, V> {
        return MapById {
            trajectories: BTreeMap::new(),
            len: 0,
            marker: PhantomData,
        };
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        return self.len;
    }

    /// Check if no trajectory holds any entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Check if `append` would be accepted for a trajectory.
    ///
    /// Trajectories that were never written to are appendable.
    pub fn is_appendable(&self, trajectory_id: u32) -> bool {
        return self
            .trajectories
            .get(&trajectory_id)
            .is_none_or(|trajectory| trajectory.can_append);
    }

    /// Ids of every trajectory with a record, in ascending order.
    ///
    /// A trajectory keeps its record after all its entries are removed.
    pub fn trajectory_ids(&self) -> impl DoubleEndedIterator<Item = u32> {
        return self.trajectories.keys().copied();
    }

    /// Number of entries in a trajectory, zero if it has no record.
    pub fn num_in_trajectory(&self, trajectory_id: u32) -> usize {
        return self
            .trajectories
            .get(&trajectory_id)
            .map_or(0, |trajectory| trajectory.data.len());
    }

    /// Iterate every entry in trajectory-major, index-minor order.
    pub fn iter(&self) -> Iter<'_, I, V> {
        return Iter::new(&self.trajectories, self.len);
    }
}

impl<I: CompositeId, V> MapById<I, V> {
    /// Append a value to a trajectory, creating it as needed.
    ///
    /// Fails if the trajectory has been closed for appending.
    pub fn try_append(&mut self, trajectory_id: u32, value: V) -> IdResult<I> {
        let trajectory = match self.trajectories.entry(trajectory_id) {
            btree_map::Entry::Occupied(entry) => entry.into_mut(),
            btree_map::Entry::Vacant(entry) => {
                trace!(trajectory_id, "creating trajectory");
                entry.insert(Trajectory::default())
            }
        };
        if !trajectory.can_append {
            return Err(IdError::NotAppendable { trajectory_id });
        }

        let index = match trajectory.data.last_key_value() {
            None => 0,
            Some((&last, _)) => match last.checked_add(1) {
                Some(next) => next,
                None => return Err(IdError::IndexOverflow { trajectory_id }),
            },
        };
        trajectory.data.insert(index, value);
        self.len += 1;
        return Ok(I::from_parts(trajectory_id, index));
    }

    /// Append a value to a trajectory, creating it as needed.
    ///
    /// Panics if the trajectory has been closed for appending.
    #[track_caller]
    pub fn append(&mut self, trajectory_id: u32, value: V) -> I {
        match self.try_append(trajectory_id, value) {
            Ok(id) => return id,
            Err(err) => fail(err),
        }
    }

    /// Insert a value at an id that must not be occupied yet.
    ///
    /// On success the trajectory is closed for appending. A duplicate id
    /// leaves the map untouched.
    pub fn try_insert(&mut self, id: I, value: V) -> IdResult<()> {
        let trajectory_id = id.trajectory_id();
        let trajectory = self.trajectories.entry(trajectory_id).or_default();
        match trajectory.data.entry(id.local_index()) {
            btree_map::Entry::Occupied(_) => return Err(IdError::duplicate(id)),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
        if trajectory.can_append {
            debug!(trajectory_id, %id, "trajectory closed by insert");
            trajectory.can_append = false;
        }
        self.len += 1;
        return Ok(());
    }

    /// Insert a value at an id that must not be occupied yet.
    ///
    /// Panics if the id is already present.
    #[track_caller]
    pub fn insert(&mut self, id: I, value: V) {
        if let Err(err) = self.try_insert(id, value) {
            fail(err);
        }
    }

    /// Remove and return the value at an id.
    ///
    /// Removing the highest index of a trajectory closes it for appending,
    /// since the next index could no longer be chosen safely. Removing
    /// any other index leaves a gap and keeps the gate as it was.
    pub fn try_remove(&mut self, id: I) -> IdResult<V> {
        let trajectory_id = id.trajectory_id();
        let Some(trajectory) = self.trajectories.get_mut(&trajectory_id) else {
            return Err(IdError::UnknownTrajectory { trajectory_id });
        };
        let index = id.local_index();
        let is_last = trajectory
            .data
            .last_key_value()
            .is_some_and(|(&last, _)| last == index);
        let Some(value) = trajectory.data.remove(&index) else {
            return Err(IdError::missing(id));
        };
        if is_last && trajectory.can_append {
            debug!(trajectory_id, %id, "trajectory closed by tail removal");
            trajectory.can_append = false;
        }
        self.len -= 1;
        return Ok(value);
    }

    /// Remove and return the value at an id.
    ///
    /// Panics if the id is not present.
    #[track_caller]
    pub fn remove(&mut self, id: I) -> V {
        match self.try_remove(id) {
            Ok(value) => return value,
            Err(err) => fail(err),
        }
    }

    /// Check if an entry exists at an id.
    pub fn contains(&self, id: I) -> bool {
        return self.get(id).is_some();
    }

    /// Get the value at an id.
    pub fn get(&self, id: I) -> Option<&V> {
        return self
            .trajectories
            .get(&id.trajectory_id())
            .and_then(|trajectory| trajectory.data.get(&id.local_index()));
    }

    /// Get a mutable reference to the value at an id.
    pub fn get_mut(&mut self, id: I) -> Option<&mut V> {
        return self
            .trajectories
            .get_mut(&id.trajectory_id())
            .and_then(|trajectory| trajectory.data.get_mut(&id.local_index()));
    }

    fn lookup_error(&self, id: I) -> IdError {
        let trajectory_id = id.trajectory_id();
        if self.trajectories.contains_key(&trajectory_id) {
            return IdError::missing(id);
        }
        return IdError::UnknownTrajectory { trajectory_id };
    }

    /// Get the value at an id.
    ///
    /// Panics if the trajectory or the index is absent.
    #[track_caller]
    pub fn at(&self, id: I) -> &V {
        match self.get(id) {
            Some(value) => return value,
            None => fail(self.lookup_error(id)),
        }
    }

    /// Get a mutable reference to the value at an id.
    ///
    /// Panics if the trajectory or the index is absent.
    #[track_caller]
    pub fn at_mut(&mut self, id: I) -> &mut V {
        if !self.contains(id) {
            fail(self.lookup_error(id));
        }
        match self.get_mut(id) {
            Some(value) => return value,
            None => unreachable!("presence checked above"),
        }
    }

    /// Id of the highest live index in a trajectory.
    pub fn last_id(&self, trajectory_id: u32) -> Option<I> {
        let trajectory = self.trajectories.get(&trajectory_id)?;
        let (&index, _) = trajectory.data.last_key_value()?;
        return Some(I::from_parts(trajectory_id, index));
    }

    /// Iterate the entries of one trajectory in index order.
    ///
    /// Unknown trajectories yield nothing.
    pub fn trajectory(&self, trajectory_id: u32) -> TrajectoryIter<'_, I, V> {
        return TrajectoryIter {
            trajectory_id,
            entries: self
                .trajectories
                .get(&trajectory_id)
                .map(|trajectory| trajectory.data.iter()),
            marker: PhantomData,
        };
    }
}

impl<'a, I: CompositeId, V> IntoIterator for &'a MapById<I, V> {
    type Item = (I, &'a V);
    type IntoIter = Iter<'a, I, V>;

    fn into_iter(self) -> Iter<'a, I, V> {
        return self.iter();
    }
}

impl<I: CompositeId, V> Index<I> for MapById<I, V> {
    type Output = V;

    #[track_caller]
    fn index(&self, id: I) -> &V {
        return self.at(id);
    }
}

impl<I: CompositeId, V> IndexMut<I> for MapById<I, V> {
    #[track_caller]
    fn index_mut(&mut self, id: I) -> &mut V {
        return self.at_mut(id);
    }
}

impl<I: CompositeId, V: fmt::Debug> fmt::Debug for MapById<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_map().entries(self.iter()).finish();
    }
}
