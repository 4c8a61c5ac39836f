//! Graph persistence adapter
//!
//! Translates annotation tables and similarity scores into idempotent
//! writes against any [`GraphClient`]. Every write is one transaction;
//! nothing spans more than one row or one pair.

use std::path::Path;
use std::time::{Duration, Instant};

use protsim::annotation::{read_truncated, CombinedTable, TruncatedRecord};
use protsim::config::{validate_threshold, GraphConfig};
use protsim::graph::schema::{
    BIO_PROC, CELL_COMP, DESCRIPTION, HAS_BIO_PROC, HAS_MOL_FUNC, IN_CELL_COMP, MOL_FUNC, PROTEIN,
    SCORE, SIMILAR_TO, SYSNAME,
};
use protsim::graph::PropertyValue;
use protsim::similarity::SimilarityScorer;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::client::GraphClient;
use crate::error::{SdkError, SdkResult};
use crate::models::{NeighborQuery, ServerStatus, WriteTx};
use crate::remote::RemoteClient;

/// Result of a naive graph load
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub rows: usize,
    pub elapsed: Duration,
}

/// Result of a similarity population run
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummary {
    pub proteins: usize,
    pub pairs_compared: usize,
    pub qualifying: usize,
    pub written: usize,
    pub failed: usize,
    pub threshold: f64,
    pub elapsed: Duration,
}

/// One row of a top-k lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarProtein {
    pub name: String,
    pub sysname: Option<String>,
    pub description: Option<String>,
    pub score: f64,
}

/// Writes the annotation graph through a [`GraphClient`].
///
/// The client is acquired on construction and released by [`close`](Self::close)
/// or, on any other exit path, when the adapter is dropped.
pub struct GraphAdapter<C: GraphClient> {
    client: C,
}

impl GraphAdapter<RemoteClient> {
    /// Connect to the graph server described by `config`.
    ///
    /// The server is pinged once; an unreachable or unhealthy server is a
    /// [`SdkError::Connection`].
    pub async fn connect(config: &GraphConfig) -> SdkResult<Self> {
        let client = RemoteClient::from_config(config);
        match client.ping().await {
            Ok(_) => {
                info!(uri = %config.uri, user = %config.user, "connected to graph");
                Ok(Self { client })
            }
            Err(e) if e.is_connection() => Err(e),
            Err(e) => Err(SdkError::Connection(format!("{}: {}", config.uri, e))),
        }
    }
}

impl<C: GraphClient> GraphAdapter<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Load the naive graph from a truncated annotation CSV
    pub async fn initialize_naive(&self, path: impl AsRef<Path>) -> SdkResult<LoadSummary> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading naive graph");
        let records = read_truncated(path)?;
        self.load_naive(&records).await
    }

    /// Upsert every record as one transaction. The first failing row aborts
    /// the load; rows before it stay written.
    pub async fn load_naive(&self, records: &[TruncatedRecord]) -> SdkResult<LoadSummary> {
        let start = Instant::now();
        for record in records {
            self.client.write(&naive_transaction(record)).await?;
        }

        let summary = LoadSummary {
            rows: records.len(),
            elapsed: start.elapsed(),
        };
        info!(
            rows = summary.rows,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "naive graph loaded"
        );
        Ok(summary)
    }

    /// Merge the undirected `SIMILARTO` relationship between two existing
    /// proteins and set its score, replacing any previous score.
    ///
    /// A protein is never similar to itself: `a == b` fails without
    /// touching the store.
    pub async fn write_similarity(&self, a: &str, b: &str, score: f64) -> SdkResult<()> {
        if a == b {
            return Err(SdkError::write(
                format!("{} -[{}]- {}", a, SIMILAR_TO, b),
                "a protein cannot be related to itself",
            ));
        }
        let mut tx = WriteTx::new();
        let left = tx.match_node(PROTEIN, a);
        let right = tx.match_node(PROTEIN, b);
        tx.merge_edge(left, right, SIMILAR_TO, [(SCORE, PropertyValue::Float(score))]);
        self.client.write(&tx).await
    }

    /// Score every pair of `table` and persist the pairs strictly above
    /// `threshold`.
    ///
    /// A failed write is logged and skipped; losing the store altogether
    /// aborts the run.
    pub async fn initialize_scores(
        &self,
        table: &CombinedTable,
        threshold: f64,
    ) -> SdkResult<ScoreSummary> {
        validate_threshold(threshold)?;
        let start = Instant::now();

        let scorer = SimilarityScorer::new(table.texts());
        let pairs = scorer.qualifying_pairs(threshold);
        info!(
            proteins = scorer.len(),
            pairs = scorer.pair_count(),
            qualifying = pairs.len(),
            threshold,
            "scored protein pairs"
        );

        let mut written = 0;
        let mut failed = 0;
        let entries = table.entries();
        for pair in &pairs {
            let (a, b) = (&entries[pair.left].protein_name, &entries[pair.right].protein_name);
            match self.write_similarity(a, b, pair.score).await {
                Ok(()) => written += 1,
                Err(e) if e.is_connection() => return Err(e),
                Err(e) => {
                    warn!(
                        left = %a,
                        right = %b,
                        score = pair.score,
                        error = %e,
                        "skipping similarity write"
                    );
                    failed += 1;
                }
            }
        }

        let summary = ScoreSummary {
            proteins: scorer.len(),
            pairs_compared: scorer.pair_count(),
            qualifying: pairs.len(),
            written,
            failed,
            threshold,
            elapsed: start.elapsed(),
        };
        info!(
            written,
            failed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "similarity scores persisted"
        );
        Ok(summary)
    }

    /// Up to `k` proteins most similar to `name`, best first.
    ///
    /// Relationships without a score are ignored; equal scores are ordered
    /// by neighbour name.
    pub async fn most_similar(&self, name: &str, k: usize) -> SdkResult<Vec<SimilarProtein>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let query = NeighborQuery {
            label: PROTEIN.to_string(),
            name: name.to_string(),
            edge_type: SIMILAR_TO.to_string(),
            neighbor_label: PROTEIN.to_string(),
            rank_by: SCORE.to_string(),
            properties: vec![SYSNAME.to_string(), DESCRIPTION.to_string()],
            limit: k,
        };
        let neighbors = self.client.top_neighbors(&query).await?;
        debug!(%name, k, found = neighbors.len(), "top-k lookup");

        Ok(neighbors
            .into_iter()
            .map(|n| SimilarProtein {
                sysname: n.property_str(SYSNAME).map(str::to_string),
                description: n.property_str(DESCRIPTION).map(str::to_string),
                name: n.name,
                score: n.rank,
            })
            .collect())
    }

    pub async fn status(&self) -> SdkResult<ServerStatus> {
        self.client.status().await
    }

    /// Release the client
    pub fn close(self) {}
}

impl<C: GraphClient> Drop for GraphAdapter<C> {
    fn drop(&mut self) {
        debug!("graph adapter released");
    }
}

/// The write for one truncated row: the protein, its three category nodes
/// and the relationships to them. Empty category values are skipped.
pub fn naive_transaction(record: &TruncatedRecord) -> WriteTx {
    let mut tx = WriteTx::new();
    let protein = tx.merge_node(
        PROTEIN,
        &record.protein_name,
        [
            (SYSNAME, PropertyValue::from(record.sysname.as_str())),
            (DESCRIPTION, PropertyValue::from(record.description.as_str())),
        ],
    );

    let categories = [
        (BIO_PROC, HAS_BIO_PROC, &record.bio_process),
        (MOL_FUNC, HAS_MOL_FUNC, &record.mol_function),
        (CELL_COMP, IN_CELL_COMP, &record.cell_component),
    ];
    for (label, relationship, code) in categories {
        if code.is_empty() {
            continue;
        }
        let category = tx.merge_node(label, code, Vec::<(&str, PropertyValue)>::new());
        tx.merge_edge(protein, category, relationship, Vec::<(&str, PropertyValue)>::new());
    }
    tx
}
