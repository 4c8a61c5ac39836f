//! Standard-name to systematic-name lookup
//!
//! Built from the locus reference table (`stdname`, `sysname`). Proteins
//! without a standard name are listed as `UNCHARACTERIZED`; for those the
//! systematic name is the only name and maps to itself.

use crate::error::{PipelineError, PipelineResult};
use indexmap::IndexMap;
use serde::Deserialize;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Placeholder used in the reference table when no standard name exists
pub const UNCHARACTERIZED: &str = "UNCHARACTERIZED";

/// One row of the locus reference table
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LocusRecord {
    #[serde(default)]
    pub stdname: Option<String>,
    #[serde(default)]
    pub sysname: Option<String>,
}

impl LocusRecord {
    pub fn new(stdname: &str, sysname: &str) -> Self {
        Self {
            stdname: Some(stdname.to_string()),
            sysname: Some(sysname.to_string()),
        }
    }
}

/// Uppercased standard name -> uppercased systematic name.
///
/// Keys are unique; when two rows produce the same key the later row
/// wins. That is an accepted limitation of the reference data, not
/// something this type tries to reconcile.
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    names: IndexMap<String, String>,
}

impl NameNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the reference table from a CSV file
    pub fn from_path(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let normalizer = Self::from_csv(csv::Reader::from_path(path)?)?;
        info!("Loaded {} protein names from {:?}", normalizer.len(), path);
        Ok(normalizer)
    }

    /// Read the reference table from any CSV source with a header row
    pub fn from_reader<R: io::Read>(reader: R) -> PipelineResult<Self> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> PipelineResult<Self> {
        let mut normalizer = Self::new();
        for (idx, result) in reader.deserialize::<LocusRecord>().enumerate() {
            let record = result?;
            normalizer.insert_record(idx + 2, &record)?;
        }
        Ok(normalizer)
    }

    /// Build from already-parsed rows, numbered as if read from a file
    pub fn from_records<I>(records: I) -> PipelineResult<Self>
    where
        I: IntoIterator<Item = LocusRecord>,
    {
        let mut normalizer = Self::new();
        for (idx, record) in records.into_iter().enumerate() {
            normalizer.insert_record(idx + 2, &record)?;
        }
        Ok(normalizer)
    }

    /// Add one reference row. `row` is only used for diagnostics.
    pub fn insert_record(&mut self, row: usize, record: &LocusRecord) -> PipelineResult<()> {
        let sysname = record
            .sysname
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(PipelineError::DataIntegrity { row, column: "sysname" })?
            .to_uppercase();

        let stdname = record
            .stdname
            .as_deref()
            .map(|s| s.trim().to_uppercase())
            .unwrap_or_default();

        let key = if stdname.is_empty() || stdname == UNCHARACTERIZED {
            sysname.clone()
        } else {
            stdname
        };

        if let Some(previous) = self.names.insert(key.clone(), sysname) {
            debug!("Row {}: '{}' overrides earlier mapping to '{}'", row, key, previous);
        }
        Ok(())
    }

    /// Systematic name for an uppercased standard (or systematic) name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Mappings in reference-table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
