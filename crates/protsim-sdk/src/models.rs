//! Data models for the protsim SDK
//!
//! Write transactions and neighbour queries are described as data so the
//! same request can be rendered to Cypher for a server or applied to an
//! in-process store.

use protsim::graph::PropertyValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How a node in a transaction is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMode {
    /// Create the node if no node with this identity exists
    Merge,
    /// The node must already exist; the transaction fails otherwise
    Match,
}

/// A node addressed by `(label, name)`
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub label: String,
    pub name: String,
    pub mode: NodeMode,
    /// Properties set on the node after it is resolved, in order
    pub properties: Vec<(String, PropertyValue)>,
}

impl fmt::Display for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.name, self.label)
    }
}

/// Handle to a node previously added to a [`WriteTx`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub(crate) usize);

impl NodeHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An undirected relationship between two nodes of the same transaction
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    pub from: NodeHandle,
    pub to: NodeHandle,
    pub edge_type: String,
    /// Properties set on the relationship after it is merged
    pub properties: Vec<(String, PropertyValue)>,
}

/// One atomic write: either every element is applied or none is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteTx {
    nodes: Vec<NodeSpec>,
    edges: Vec<EdgeSpec>,
}

impl WriteTx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match-or-create `(label, name)` and set `properties` on it
    pub fn merge_node<I, K>(&mut self, label: &str, name: &str, properties: I) -> NodeHandle
    where
        I: IntoIterator<Item = (K, PropertyValue)>,
        K: Into<String>,
    {
        self.push_node(label, name, NodeMode::Merge, properties)
    }

    /// Require an existing `(label, name)`
    pub fn match_node(&mut self, label: &str, name: &str) -> NodeHandle {
        self.push_node(label, name, NodeMode::Match, Vec::<(String, PropertyValue)>::new())
    }

    fn push_node<I, K>(
        &mut self,
        label: &str,
        name: &str,
        mode: NodeMode,
        properties: I,
    ) -> NodeHandle
    where
        I: IntoIterator<Item = (K, PropertyValue)>,
        K: Into<String>,
    {
        self.nodes.push(NodeSpec {
            label: label.to_string(),
            name: name.to_string(),
            mode,
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        });
        NodeHandle(self.nodes.len() - 1)
    }

    /// Merge the undirected relationship `from -[edge_type]- to`
    pub fn merge_edge<I, K>(
        &mut self,
        from: NodeHandle,
        to: NodeHandle,
        edge_type: &str,
        properties: I,
    )
    where
        I: IntoIterator<Item = (K, PropertyValue)>,
        K: Into<String>,
    {
        self.edges.push(EdgeSpec {
            from,
            to,
            edge_type: edge_type.to_string(),
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        });
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeSpec] {
        &self.edges
    }

    pub fn node(&self, handle: NodeHandle) -> &NodeSpec {
        &self.nodes[handle.0]
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Short description for diagnostics: the first relationship, or the
    /// first node when there is none
    pub fn describe(&self) -> String {
        if let Some(edge) = self.edges.first() {
            format!(
                "{} -[{}]- {}",
                self.node(edge.from).name,
                edge.edge_type,
                self.node(edge.to).name
            )
        } else if let Some(node) = self.nodes.first() {
            node.to_string()
        } else {
            "empty transaction".to_string()
        }
    }
}

/// Neighbours of one node over one relationship type, best first
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborQuery {
    pub label: String,
    pub name: String,
    pub edge_type: String,
    pub neighbor_label: String,
    /// Numeric relationship property to sort by, descending
    pub rank_by: String,
    /// Neighbour properties to return
    pub properties: Vec<String>,
    pub limit: usize,
}

/// One row of a neighbour query
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub name: String,
    pub rank: f64,
    pub properties: HashMap<String, PropertyValue>,
}

impl Neighbor {
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(PropertyValue::as_string)
    }
}

/// Tabular result of a Cypher query as returned by `/api/query`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names
    #[serde(default)]
    pub columns: Vec<String>,
    /// Tabular result rows
    #[serde(default)]
    pub records: Vec<Vec<serde_json::Value>>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Server status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Server version
    pub version: String,
    /// Storage statistics
    pub storage: StorageStats,
}

/// Storage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageStats {
    pub nodes: u64,
    pub edges: u64,
}
