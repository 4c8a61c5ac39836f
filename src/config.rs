//! Batch configuration
//!
//! Loaded from YAML; every section has defaults so a partial file (or no
//! file at all) is valid:
//!
//! ```yaml
//! graph:
//!   uri: http://localhost:8080
//!   user: neo4j
//!   password: secret
//! inputs:
//!   locus: archive/gene_data_locus.csv
//!   annotations: archive/gene_data_GO.csv
//!   truncated: archive/truncated.csv
//! stages:
//!   regenerate_truncated: false
//!   load_naive: true
//!   load_scores: true
//! threshold: 70
//! query:
//!   name: YHR045W
//!   k: 10
//! ```

use crate::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Connection target and credentials for the graph store
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
    /// Base URL of the graph server's HTTP API
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "http://localhost:8080".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
        }
    }
}

// Keeps the password out of logs.
impl fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphConfig")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Locations of the source and intermediate tables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputPaths {
    /// Standard/systematic name reference table (`stdname`, `sysname`)
    pub locus: PathBuf,
    /// Functional annotation table
    pub annotations: PathBuf,
    /// Intermediate table with truncated category codes
    pub truncated: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            locus: PathBuf::from("archive/gene_data_locus.csv"),
            annotations: PathBuf::from("archive/gene_data_GO.csv"),
            truncated: PathBuf::from("archive/truncated.csv"),
        }
    }
}

/// Which stages a full run executes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StageConfig {
    pub regenerate_truncated: bool,
    pub load_naive: bool,
    pub load_scores: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            regenerate_truncated: false,
            load_naive: true,
            load_scores: true,
        }
    }
}

/// Example top-k lookup run at the end of a batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryConfig {
    pub name: String,
    #[serde(default = "default_k")]
    pub k: usize,
}

fn default_k() -> usize {
    10
}

/// Top-level batch configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub graph: GraphConfig,
    pub inputs: InputPaths,
    pub stages: StageConfig,
    /// Pairs must score strictly above this to be persisted
    pub threshold: f64,
    pub query: Option<QueryConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            graph: GraphConfig::default(),
            inputs: InputPaths::default(),
            stages: StageConfig::default(),
            threshold: 70.0,
            query: None,
        }
    }
}

impl PipelineConfig {
    /// Load and validate a YAML configuration file
    pub fn from_path(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> PipelineResult<Self> {
        let config: PipelineConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        validate_threshold(self.threshold)?;
        if self.graph.uri.trim().is_empty() {
            return Err(PipelineError::InvalidConfig("graph.uri must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Scores live in [0, 100]; anything outside would keep all or no pairs.
pub fn validate_threshold(threshold: f64) -> PipelineResult<()> {
    if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
        return Err(PipelineError::InvalidConfig(format!(
            "threshold must be within [0, 100], got {}",
            threshold
        )));
    }
    Ok(())
}
