//! Composite identifiers for trajectory-scoped entities.
//!
//! # Identifier kinds
//!
//! - `NodeId`: a trajectory node, (trajectory, node index)
//! - `SubmapId`: a submap, (trajectory, submap index)
//!
//! Both kinds share one layout and one total order: trajectory first, then
//! the index inside the trajectory. They are still distinct types, so a node
//! index can never be used to look up a submap.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

/// An identifier made of a trajectory id and a zero-based local index.
///
/// Containers are generic over this trait so the same storage serves
/// nodes and submaps.
pub trait CompositeId: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display {
    /// Build an id from its two parts.
    fn from_parts(trajectory_id: u32, local_index: u32) -> Self;

    /// The trajectory this id belongs to.
    fn trajectory_id(&self) -> u32;

    /// The index of the entity inside its trajectory.
    fn local_index(&self) -> u32;
}

macro_rules! composite_id {
    ($(#[$meta:meta])* $name:ident, $index:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            /// The trajectory this entity belongs to.
            pub trajectory_id: u32,
            /// Zero-based index of the entity inside its trajectory.
            pub $index: u32,
        }

        impl $name {
            /// Create a new id.
            pub const fn new(trajectory_id: u32, $index: u32) -> $name {
                return $name { trajectory_id, $index };
            }
        }

        impl CompositeId for $name {
            #[inline]
            fn from_parts(trajectory_id: u32, local_index: u32) -> $name {
                return $name::new(trajectory_id, local_index);
            }

            #[inline]
            fn trajectory_id(&self) -> u32 {
                return self.trajectory_id;
            }

            #[inline]
            fn local_index(&self) -> u32 {
                return self.$index;
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                return Some(self.cmp(other));
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                match self.trajectory_id.cmp(&other.trajectory_id) {
                    Ordering::Equal => self.$index.cmp(&other.$index),
                    other => other,
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                return write!(f, "{}({}, {})", stringify!($name), self.trajectory_id, self.$index);
            }
        }

        /// Renders as `(trajectory_id, index)`. Logs depend on this exact form.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                return write!(f, "({}, {})", self.trajectory_id, self.$index);
            }
        }
    };
}

composite_id! {
    /// Identifies a trajectory node by its trajectory and its zero-based
    /// index inside that trajectory.
    NodeId, node_index
}

composite_id! {
    /// Identifies a submap by its trajectory and its zero-based index
    /// inside that trajectory.
    SubmapId, submap_index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_ordering() {
        assert!(NodeId::new(0, 1) < NodeId::new(1, 0));
        assert!(NodeId::new(2, 0) < NodeId::new(2, 1));
        assert_eq!(NodeId::new(0, 1), NodeId::new(0, 1));
        assert_ne!(NodeId::new(0, 1), NodeId::new(1, 0));
    }

    #[test]
    fn trajectory_dominates_index() {
        let a = SubmapId::new(0, u32::MAX);
        let b = SubmapId::new(1, 0);
        assert!(a < b);
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn sorting_is_trajectory_major() {
        let mut ids = vec![
            NodeId::new(2, 1),
            NodeId::new(0, 3),
            NodeId::new(2, 0),
            NodeId::new(0, 0),
        ];
        ids.sort();
        assert_eq!(ids, vec![
            NodeId::new(0, 0),
            NodeId::new(0, 3),
            NodeId::new(2, 0),
            NodeId::new(2, 1),
        ]);
    }

    #[test]
    fn display_matches_log_format() {
        assert_eq!(NodeId::new(3, 14).to_string(), "(3, 14)");
        assert_eq!(SubmapId::new(0, 0).to_string(), "(0, 0)");
    }

    #[test]
    fn debug_names_the_kind() {
        assert_eq!(format!("{:?}", NodeId::new(1, 2)), "NodeId(1, 2)");
        assert_eq!(format!("{:?}", SubmapId::new(1, 2)), "SubmapId(1, 2)");
    }

    #[test]
    fn trait_accessors() {
        let id = SubmapId::from_parts(4, 9);
        assert_eq!(id.submap_index, 9);
        assert_eq!(CompositeId::trajectory_id(&id), 4);
        assert_eq!(id.local_index(), 9);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_field_names() {
        let json = serde_json::to_string(&NodeId::new(1, 5)).unwrap();
        assert_eq!(json, r#"{"trajectory_id":1,"node_index":5}"#);
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeId::new(1, 5));
    }
}
