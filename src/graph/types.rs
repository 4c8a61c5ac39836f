//! Identifier and name types for the annotation graph

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            pub fn new(id: u64) -> Self {
                $name(id)
            }

            /// Slot in the store's arena
            pub(crate) fn index(&self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Identifier of a node inside a [`GraphStore`](super::GraphStore)
    NodeId,
    "n"
);

arena_id!(
    /// Identifier of an edge inside a [`GraphStore`](super::GraphStore)
    EdgeId,
    "e"
);

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                $name(name.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }
    };
}

name_type!(
    /// Node label (`Protein`, `BioProc`, `MolFunc`, `CellComp`)
    Label
);

name_type!(
    /// Relationship type (`SIMILARTO`, `HASBIOPROC`, ...)
    EdgeType
);
