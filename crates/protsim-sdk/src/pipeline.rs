//! End-to-end batch: table preparation followed by the enabled graph stages

use protsim::annotation::{AnnotationTable, CombinedTable, NameNormalizer};
use protsim::config::PipelineConfig;
use serde::Serialize;
use tracing::info;

use crate::adapter::{GraphAdapter, LoadSummary, ScoreSummary, SimilarProtein};
use crate::client::GraphClient;
use crate::error::SdkResult;

/// What a full run did, stage by stage. Disabled stages stay `None`.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub truncated_rows: Option<usize>,
    pub naive: Option<LoadSummary>,
    pub scores: Option<ScoreSummary>,
    pub similar: Option<Vec<SimilarProtein>>,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read the locus and annotation tables and join them
    pub fn prepare_tables(&self) -> SdkResult<AnnotationTable> {
        let inputs = &self.config.inputs;
        let names = NameNormalizer::from_path(&inputs.locus)?;
        let table = AnnotationTable::from_path(&inputs.annotations, &names)?;
        Ok(table)
    }

    /// Rewrite the truncated intermediate table; returns the row count
    pub fn regenerate_truncated(&self) -> SdkResult<usize> {
        let table = self.prepare_tables()?;
        self.write_truncated(&table)
    }

    fn write_truncated(&self, table: &AnnotationTable) -> SdkResult<usize> {
        let path = &self.config.inputs.truncated;
        let rows = table.write_truncated(path)?;
        info!(path = %path.display(), rows, "wrote truncated table");
        Ok(rows)
    }

    /// Run every enabled stage in order: truncated regeneration, naive
    /// load, similarity population, example lookup.
    pub async fn run<C: GraphClient>(&self, adapter: &GraphAdapter<C>) -> SdkResult<RunReport> {
        let stages = &self.config.stages;
        let mut report = RunReport::default();
        let mut table: Option<AnnotationTable> = None;

        if stages.regenerate_truncated {
            let prepared = self.prepare_tables()?;
            report.truncated_rows = Some(self.write_truncated(&prepared)?);
            table = Some(prepared);
        }

        if stages.load_naive {
            report.naive = Some(adapter.initialize_naive(&self.config.inputs.truncated).await?);
        }

        if stages.load_scores {
            let table = match table {
                Some(table) => table,
                None => self.prepare_tables()?,
            };
            let combined = CombinedTable::from_table(&table);
            let summary = adapter.initialize_scores(&combined, self.config.threshold).await?;
            report.scores = Some(summary);
        }

        if let Some(query) = &self.config.query {
            let similar = adapter.most_similar(&query.name, query.k).await?;
            for protein in &similar {
                info!(
                    name = %protein.name,
                    score = protein.score,
                    description = protein.description.as_deref().unwrap_or_default(),
                    "similar to {}",
                    query.name
                );
            }
            report.similar = Some(similar);
        }

        Ok(report)
    }
}
