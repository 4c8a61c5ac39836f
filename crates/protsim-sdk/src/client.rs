//! GraphClient trait — the unified interface for embedded and remote modes

use async_trait::async_trait;
use crate::error::SdkResult;
use crate::models::{Neighbor, NeighborQuery, ServerStatus, WriteTx};

/// Logical operations the persistence adapter needs from a graph store.
///
/// Implemented by:
/// - `EmbeddedClient` — in-process `GraphStore` (tests, local runs)
/// - `RemoteClient` — Cypher over HTTP to a running graph server
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Apply one transaction atomically
    async fn write(&self, tx: &WriteTx) -> SdkResult<()>;

    /// Neighbours ranked by a relationship property, descending, limited
    async fn top_neighbors(&self, query: &NeighborQuery) -> SdkResult<Vec<Neighbor>>;

    /// Get server status
    async fn status(&self) -> SdkResult<ServerStatus>;

    /// Ping the server
    async fn ping(&self) -> SdkResult<String>;
}
