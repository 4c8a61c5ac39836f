//! In-memory graph storage with merge-by-identity semantics
//!
//! Nodes are identified by `(label, name)` and undirected edges by
//! `(type, lower endpoint, upper endpoint)`. Merging an existing identity
//! returns the stored element instead of inserting a duplicate, which is
//! what makes repeated loads of the same input idempotent.

use super::edge::{undirected_key, Edge};
use super::node::Node;
use super::property::PropertyValue;
use super::types::{EdgeId, EdgeType, Label, NodeId};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),

    #[error("Invalid edge: {0} cannot be related to itself")]
    SelfLoop(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Outcome of a merge: the element id and whether it was newly created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merged<T> {
    pub id: T,
    pub created: bool,
}

/// In-memory graph storage
///
/// - nodes / edges: arenas indexed by id
/// - adjacency: NodeId -> incident EdgeIds (direction is not tracked)
/// - node_identity / edge_identity: merge keys
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,

    edges: Vec<Edge>,

    adjacency: Vec<Vec<EdgeId>>,

    node_identity: FxHashMap<(Label, String), NodeId>,

    edge_identity: FxHashMap<(EdgeType, NodeId, NodeId), EdgeId>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match the node `(label, name)` or create it
    pub fn merge_node(&mut self, label: impl Into<Label>, name: &str) -> Merged<NodeId> {
        let label = label.into();
        if let Some(&id) = self.node_identity.get(&(label.clone(), name.to_string())) {
            return Merged { id, created: false };
        }

        let id = NodeId::new(self.nodes.len() as u64);
        self.nodes.push(Node::new(id, label.clone(), name));
        self.adjacency.push(Vec::new());
        self.node_identity.insert((label, name.to_string()), id);

        Merged { id, created: true }
    }

    /// Look up a node by identity without creating it
    pub fn find_node(&self, label: &Label, name: &str) -> Option<NodeId> {
        self.node_identity.get(&(label.clone(), name.to_string())).copied()
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Set a property on an existing node
    pub fn set_node_property(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        let node = self.get_node_mut(id).ok_or(GraphError::NodeNotFound(id))?;
        node.set_property(key, value);
        Ok(())
    }

    /// Match the undirected edge `a -[edge_type]- b` or create it.
    ///
    /// `(a, b)` and `(b, a)` resolve to the same edge.
    pub fn merge_undirected_edge(
        &mut self,
        a: NodeId,
        b: NodeId,
        edge_type: impl Into<EdgeType>,
    ) -> GraphResult<Merged<EdgeId>> {
        if !self.has_node(a) {
            return Err(GraphError::InvalidEdgeSource(a));
        }
        if !self.has_node(b) {
            return Err(GraphError::InvalidEdgeTarget(b));
        }
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }

        let edge_type = edge_type.into();
        let (lo, hi) = undirected_key(a, b);
        if let Some(&id) = self.edge_identity.get(&(edge_type.clone(), lo, hi)) {
            return Ok(Merged { id, created: false });
        }

        let id = EdgeId::new(self.edges.len() as u64);
        self.edges.push(Edge::new(id, a, b, edge_type.clone()));
        self.adjacency[a.index()].push(id);
        self.adjacency[b.index()].push(id);
        self.edge_identity.insert((edge_type, lo, hi), id);

        Ok(Merged { id, created: true })
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    fn get_edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.index())
    }

    /// Set a property on an existing edge
    pub fn set_edge_property(
        &mut self,
        id: EdgeId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        let edge = self.get_edge_mut(id).ok_or(GraphError::EdgeNotFound(id))?;
        edge.set_property(key, value);
        Ok(())
    }

    /// All edges incident to `node`
    pub fn edges_of(&self, node: NodeId) -> Vec<&Edge> {
        self.adjacency
            .get(node.index())
            .map(|ids| ids.iter().filter_map(|id| self.get_edge(*id)).collect())
            .unwrap_or_default()
    }

    /// Neighbours of `node` over edges of `edge_type`, paired with the edge
    pub fn neighbors(&self, node: NodeId, edge_type: &EdgeType) -> Vec<(&Edge, &Node)> {
        self.edges_of(node)
            .into_iter()
            .filter(|edge| &edge.edge_type == edge_type)
            .filter_map(|edge| {
                let other = edge.other(node)?;
                self.get_node(other).map(|n| (edge, n))
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
