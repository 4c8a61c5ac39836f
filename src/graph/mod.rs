//! In-memory property graph
//!
//! A small labelled property graph used as the embedded backend for the
//! annotation and similarity graph:
//! - Nodes with one label, identified by their `name` property
//! - Undirected, typed edges with properties
//! - Merge-by-identity for both nodes and edges

pub mod edge;
pub mod node;
pub mod property;
pub mod schema;
pub mod store;
pub mod types;

pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStore, Merged};
pub use types::{EdgeId, EdgeType, Label, NodeId};
