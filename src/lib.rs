//! Trajectory-map - id containers for trajectory nodes and submaps.
//!
//! A mapping system names every node and submap by the trajectory it belongs
//! to plus a zero-based index inside that trajectory. This crate provides
//! the id types and the two containers that hand those ids out and store
//! data under them. It knows nothing about what the stored values mean.
//!
//! # Quick Start
//!
//! ```
//! use trajectory_map::MapById;
//! use trajectory_map::NodeId;
//!
//! let mut nodes: MapById<NodeId, &str> = MapById::new();
//! let a = nodes.append(2, "a");
//! let b = nodes.append(2, "b");
//! nodes.insert(NodeId::new(0, 0), "c");
//!
//! assert_eq!(a.to_string(), "(2, 0)");
//! assert_eq!(nodes[b], "b");
//!
//! let order: Vec<_> = nodes.iter().map(|(_, v)| *v).collect();
//! assert_eq!(order, ["c", "a", "b"]);
//!
//! // Removing the tail closes the trajectory for appending.
//! nodes.remove(b);
//! assert!(nodes.try_append(2, "d").is_err());
//! ```
//!
//! # Containers
//!
//! | Container | Removal | Append index | Trajectory table |
//! |-----------|---------|--------------|------------------|
//! | `NestedVecs` | never | previous length | dense, padded |
//! | `MapById` | any id | max + 1, until closed | sparse, ordered |
//!
//! Both enumerate in trajectory-major, index-minor order, which is the
//! order of the ids themselves.
//!
//! # Failure
//!
//! Missing ids, duplicate inserts and appends to a closed trajectory are
//! bugs in the caller. The plain methods panic on them; the `try_` methods
//! return an `IdError` and leave the container unchanged.
//!
//! # Threads
//!
//! Nothing here synchronizes. Shared readers are fine through `&`; any
//! writer needs the whole container behind one lock, held for as long as
//! an iterator over it is alive.

pub mod error;
pub mod id;
pub mod map;
pub mod nested;

pub use error::IdError;
pub use error::IdResult;
pub use id::CompositeId;
pub use id::NodeId;
pub use id::SubmapId;
pub use map::MapById;
pub use nested::NestedVecs;
