//! Errors raised when a container precondition does not hold.
//!
//! The panicking container methods format these same values, so a
//! failed `at` and a failed `try_*` call describe the fault identically.

use thiserror::Error;

use crate::id::CompositeId;

/// A violated container precondition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IdError {
    /// No record exists for the trajectory.
    #[error("trajectory {trajectory_id} does not exist")]
    UnknownTrajectory { trajectory_id: u32 },

    /// The trajectory exists but holds nothing at this index.
    #[error("no entry with id ({trajectory_id}, {index})")]
    MissingId { trajectory_id: u32, index: u32 },

    /// An entry already occupies this id.
    #[error("id ({trajectory_id}, {index}) already exists")]
    DuplicateId { trajectory_id: u32, index: u32 },

    /// The trajectory was closed by an insert or a tail removal.
    #[error("trajectory {trajectory_id} no longer accepts appends")]
    NotAppendable { trajectory_id: u32 },

    /// The next index would not fit in a `u32`.
    #[error("trajectory {trajectory_id} has no index left to append at")]
    IndexOverflow { trajectory_id: u32 },

    /// Dense lookup past the last trajectory slot.
    #[error("trajectory {trajectory_id} out of range for {num_trajectories} trajectories")]
    TrajectoryOutOfRange { trajectory_id: u32, num_trajectories: usize },

    /// Dense lookup past the end of a trajectory slot.
    #[error("index {index} out of range for trajectory {trajectory_id} of length {len}")]
    IndexOutOfRange { trajectory_id: u32, index: u32, len: usize },
}

impl IdError {
    pub(crate) fn missing<I: CompositeId>(id: I) -> IdError {
        return IdError::MissingId {
            trajectory_id: id.trajectory_id(),
            index: id.local_index(),
        };
    }

    pub(crate) fn duplicate<I: CompositeId>(id: I) -> IdError {
        return IdError::DuplicateId {
            trajectory_id: id.trajectory_id(),
            index: id.local_index(),
        };
    }
}

/// Result type for checked container operations.
pub type IdResult<T> = Result<T, IdError>;

/// Abort with the error's message, blaming the caller's caller.
#[track_caller]
pub(crate) fn fail(err: IdError) -> ! {
    panic!("{err}");
}
