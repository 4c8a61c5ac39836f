//! Protsim SDK — graph persistence for the protein similarity batch
//!
//! Provides two client implementations:
//!
//! - **`EmbeddedClient`** — In-process, no network. Applies writes to a
//!   `GraphStore` directly. Ideal for tests and local runs.
//!
//! - **`RemoteClient`** — Connects to a running graph server via HTTP and
//!   speaks Cypher.
//!
//! Both implement the `GraphClient` trait; `GraphAdapter` builds the
//! annotation graph on top of either, and `Pipeline` runs a full batch.
//!
//! # Quick Start
//!
//! ```rust
//! use protsim_sdk::{EmbeddedClient, GraphAdapter, TruncatedRecord};
//!
//! #[tokio::main]
//! async fn main() {
//!     let adapter = GraphAdapter::new(EmbeddedClient::new());
//!
//!     let rows = vec![TruncatedRecord {
//!         protein_name: "ABC1".into(),
//!         sysname: "YGL119W".into(),
//!         description: "kinase".into(),
//!         bio_process: "GO:0006744".into(),
//!         mol_function: "GO:0004672".into(),
//!         cell_component: "GO:0005739".into(),
//!     }];
//!     adapter.load_naive(&rows).await.unwrap();
//!
//!     let status = adapter.status().await.unwrap();
//!     println!("{} nodes, {} edges", status.storage.nodes, status.storage.edges);
//! }
//! ```

pub mod adapter;
pub mod client;
pub mod cypher;
pub mod embedded;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod remote;

pub use adapter::{naive_transaction, GraphAdapter, LoadSummary, ScoreSummary, SimilarProtein};
pub use client::GraphClient;
pub use embedded::EmbeddedClient;
pub use error::{SdkError, SdkResult};
pub use models::{
    EdgeSpec, Neighbor, NeighborQuery, NodeHandle, NodeMode, NodeSpec, QueryResult, ServerStatus,
    StorageStats, WriteTx,
};
pub use pipeline::{Pipeline, RunReport};
pub use remote::RemoteClient;

// Re-exported from protsim core
pub use protsim::annotation::{AnnotationTable, CombinedTable, NameNormalizer, TruncatedRecord};
pub use protsim::config::{GraphConfig, PipelineConfig};
pub use protsim::graph::{GraphStore, PropertyValue};
pub use protsim::VERSION;
