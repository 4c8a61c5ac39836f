//! EmbeddedClient — in-process graph client
//!
//! Applies write transactions and neighbour queries directly to a
//! `GraphStore`, no network needed.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use protsim::graph::{EdgeType, GraphStore, Label, NodeId, PropertyValue};

use crate::client::GraphClient;
use crate::error::{SdkError, SdkResult};
use crate::models::{Neighbor, NeighborQuery, NodeMode, ServerStatus, StorageStats, WriteTx};

/// In-process client that wraps a GraphStore directly.
///
/// Ideal for tests and local runs without a graph server.
pub struct EmbeddedClient {
    pub(crate) store: Arc<RwLock<GraphStore>>,
}

impl EmbeddedClient {
    /// Create a new EmbeddedClient with a fresh empty graph store
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(GraphStore::new())),
        }
    }

    /// Create an EmbeddedClient wrapping an existing store
    pub fn with_store(store: Arc<RwLock<GraphStore>>) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store (for direct graph manipulation)
    pub fn store(&self) -> &Arc<RwLock<GraphStore>> {
        &self.store
    }

    /// Acquire a read lock on the store.
    pub async fn store_read(&self) -> tokio::sync::RwLockReadGuard<'_, GraphStore> {
        self.store.read().await
    }

    /// Acquire a write lock on the store.
    pub async fn store_write(&self) -> tokio::sync::RwLockWriteGuard<'_, GraphStore> {
        self.store.write().await
    }
}

impl Default for EmbeddedClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject the transaction before touching the store: every must-match node
/// has to exist and no relationship may join a node to itself.
fn validate(store: &GraphStore, tx: &WriteTx) -> SdkResult<()> {
    for node in tx.nodes() {
        if node.mode == NodeMode::Match
            && store.find_node(&Label::new(node.label.as_str()), &node.name).is_none()
        {
            return Err(SdkError::write(tx.describe(), format!("node {} not found", node)));
        }
    }
    for edge in tx.edges() {
        let (from, to) = (tx.node(edge.from), tx.node(edge.to));
        if from.label == to.label && from.name == to.name {
            return Err(SdkError::write(
                tx.describe(),
                format!("{} cannot be related to itself", from),
            ));
        }
    }
    Ok(())
}

fn apply(store: &mut GraphStore, tx: &WriteTx) -> SdkResult<()> {
    let mut ids: Vec<NodeId> = Vec::with_capacity(tx.nodes().len());
    for node in tx.nodes() {
        let label = Label::new(node.label.as_str());
        let id = match node.mode {
            NodeMode::Merge => store.merge_node(label, &node.name).id,
            NodeMode::Match => store
                .find_node(&label, &node.name)
                .ok_or_else(|| SdkError::write(tx.describe(), format!("node {} not found", node)))?,
        };
        for (key, value) in &node.properties {
            store.set_node_property(id, key.as_str(), value.clone())?;
        }
        ids.push(id);
    }

    for edge in tx.edges() {
        let merged = store.merge_undirected_edge(
            ids[edge.from.index()],
            ids[edge.to.index()],
            edge.edge_type.as_str(),
        )?;
        for (key, value) in &edge.properties {
            store.set_edge_property(merged.id, key.as_str(), value.clone())?;
        }
    }
    Ok(())
}

#[async_trait]
impl GraphClient for EmbeddedClient {
    async fn write(&self, tx: &WriteTx) -> SdkResult<()> {
        let mut store = self.store.write().await;
        validate(&store, tx)?;
        apply(&mut store, tx)
    }

    async fn top_neighbors(&self, query: &NeighborQuery) -> SdkResult<Vec<Neighbor>> {
        let store = self.store.read().await;
        let Some(id) = store.find_node(&Label::new(query.label.as_str()), &query.name) else {
            return Ok(Vec::new());
        };

        let neighbor_label = Label::new(query.neighbor_label.as_str());
        let mut neighbors: Vec<Neighbor> = store
            .neighbors(id, &EdgeType::new(query.edge_type.as_str()))
            .into_iter()
            .filter(|(_, node)| node.has_label(&neighbor_label))
            .filter_map(|(edge, node)| {
                let rank = edge.get_property(&query.rank_by)?.as_float()?;
                let properties: HashMap<String, PropertyValue> = query
                    .properties
                    .iter()
                    .map(|key| {
                        let value = node.get_property(key).cloned().unwrap_or(PropertyValue::Null);
                        (key.clone(), value)
                    })
                    .collect();
                Some(Neighbor {
                    name: node.name().to_string(),
                    rank,
                    properties,
                })
            })
            .collect();

        neighbors.sort_by(|a, b| match b.rank.total_cmp(&a.rank) {
            Ordering::Equal => a.name.cmp(&b.name),
            other => other,
        });
        neighbors.truncate(query.limit);
        Ok(neighbors)
    }

    async fn status(&self) -> SdkResult<ServerStatus> {
        let store = self.store.read().await;
        Ok(ServerStatus {
            status: "healthy".to_string(),
            version: protsim::VERSION.to_string(),
            storage: StorageStats {
                nodes: store.node_count() as u64,
                edges: store.edge_count() as u64,
            },
        })
    }

    async fn ping(&self) -> SdkResult<String> {
        Ok("PONG".to_string())
    }
}
