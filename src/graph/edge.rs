//! Undirected relationships of the annotation graph
//!
//! Edges are stored with the endpoints in creation order, but every
//! relationship in this graph is matched without regard to direction.

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeType, NodeId};

/// A typed relationship between two nodes
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: EdgeId,

    /// Endpoint the edge was first merged from
    pub source: NodeId,

    pub target: NodeId,

    pub edge_type: EdgeType,

    pub properties: PropertyMap,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, edge_type: impl Into<EdgeType>) -> Self {
        Edge {
            id,
            source,
            target,
            edge_type: edge_type.into(),
            properties: PropertyMap::new(),
        }
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// The endpoint opposite `node`, if `node` is an endpoint at all
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }
}

/// Order a pair of endpoints so that `(a, b)` and `(b, a)` collide.
pub fn undirected_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
