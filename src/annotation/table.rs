//! Functional annotation table
//!
//! Loads the GO annotation CSV, normalizes protein names to the form used
//! by the locus table and joins in the systematic name. The same record
//! type, with categories cut down to their leading code, is the row
//! format of the intermediate `truncated.csv`.

use super::names::NameNormalizer;
use crate::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use tracing::info;

/// A raw row of the annotation CSV, before normalization
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnnotation {
    #[serde(default)]
    pub proteinname: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "go_BioProc", default)]
    pub go_bio_proc: Option<String>,
    #[serde(rename = "go_MolFunc", default)]
    pub go_mol_func: Option<String>,
    #[serde(rename = "go_CellComp", default)]
    pub go_cell_comp: Option<String>,
}

/// One protein with its joined systematic name and annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    #[serde(rename = "proteinname")]
    pub protein_name: String,
    #[serde(default)]
    pub sysname: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "go_BioProc", default)]
    pub bio_process: String,
    #[serde(rename = "go_MolFunc", default)]
    pub mol_function: String,
    #[serde(rename = "go_CellComp", default)]
    pub cell_component: String,
}

/// A record whose category fields hold only their leading code
pub type TruncatedRecord = AnnotationRecord;

impl AnnotationRecord {
    /// Copy with each category reduced to its leading code
    pub fn truncated(&self) -> TruncatedRecord {
        AnnotationRecord {
            protein_name: self.protein_name.clone(),
            sysname: self.sysname.clone(),
            description: self.description.clone(),
            bio_process: leading_code(&self.bio_process).to_string(),
            mol_function: leading_code(&self.mol_function).to_string(),
            cell_component: leading_code(&self.cell_component).to_string(),
        }
    }
}

/// Strip the trailing lowercase `p` ("protein product of") and uppercase.
///
/// `Abc1p` and `ABC1p` both become `ABC1`. An uppercase trailing `P` is
/// part of the gene name and is kept.
pub fn normalize_protein_name(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix('p').unwrap_or(trimmed).to_uppercase()
}

/// Canonical code of a compound category value.
///
/// The value is split on `:`. The first segment is the code, extended by
/// the second segment when that one is a numeric accession:
/// `GO:0005524:ATP binding` -> `GO:0005524`, `X:biological process` -> `X`.
pub fn leading_code(value: &str) -> &str {
    let mut segments = value.splitn(3, ':');
    let head = segments.next().unwrap_or_default();
    match segments.next() {
        Some(accession)
            if !accession.is_empty() && accession.bytes().all(|b| b.is_ascii_digit()) =>
        {
            &value[..head.len() + 1 + accession.len()]
        }
        _ => head,
    }
}

/// The joined annotation table, one record per input row in file order
#[derive(Debug, Clone, Default)]
pub struct AnnotationTable {
    records: Vec<AnnotationRecord>,
}

impl AnnotationTable {
    /// Load the annotation CSV and join systematic names
    pub fn from_path(path: impl AsRef<Path>, names: &NameNormalizer) -> PipelineResult<Self> {
        let path = path.as_ref();
        let table = Self::from_csv(csv::Reader::from_path(path)?, names)?;
        info!("Loaded {} annotated proteins from {:?}", table.len(), path);
        Ok(table)
    }

    /// Load from any CSV source with a header row
    pub fn build<R: io::Read>(reader: R, names: &NameNormalizer) -> PipelineResult<Self> {
        Self::from_csv(csv::Reader::from_reader(reader), names)
    }

    fn from_csv<R: io::Read>(
        mut reader: csv::Reader<R>,
        names: &NameNormalizer,
    ) -> PipelineResult<Self> {
        let mut raw = Vec::new();
        for result in reader.deserialize::<RawAnnotation>() {
            raw.push(result?);
        }
        Self::from_raw(raw, names)
    }

    /// Normalize and join already-parsed rows.
    ///
    /// Fails on the first row without a protein name or without a
    /// systematic name in `names`; the two tables must be consistent.
    pub fn from_raw<I>(rows: I, names: &NameNormalizer) -> PipelineResult<Self>
    where
        I: IntoIterator<Item = RawAnnotation>,
    {
        let mut records = Vec::new();
        for (idx, raw) in rows.into_iter().enumerate() {
            let row = idx + 2;
            let protein_name = raw
                .proteinname
                .as_deref()
                .map(normalize_protein_name)
                .filter(|name| !name.is_empty())
                .ok_or(PipelineError::DataIntegrity { row, column: "proteinname" })?;

            let sysname = names
                .get(&protein_name)
                .ok_or_else(|| PipelineError::Lookup { row, name: protein_name.clone() })?
                .to_string();

            records.push(AnnotationRecord {
                protein_name,
                sysname,
                description: raw.description.unwrap_or_default(),
                bio_process: raw.go_bio_proc.unwrap_or_default(),
                mol_function: raw.go_mol_func.unwrap_or_default(),
                cell_component: raw.go_cell_comp.unwrap_or_default(),
            });
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnnotationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record with truncated category codes
    pub fn truncated(&self) -> Vec<TruncatedRecord> {
        self.records.iter().map(AnnotationRecord::truncated).collect()
    }

    /// Write `truncated.csv`, returning the number of rows written
    pub fn write_truncated(&self, path: impl AsRef<Path>) -> PipelineResult<usize> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let written = self.write_truncated_to(std::fs::File::create(path)?)?;
        info!("Wrote {} truncated records to {:?}", written, path);
        Ok(written)
    }

    pub fn write_truncated_to<W: io::Write>(&self, writer: W) -> PipelineResult<usize> {
        let mut writer = csv::Writer::from_writer(writer);
        for record in &self.records {
            writer.serialize(record.truncated())?;
        }
        writer.flush()?;
        Ok(self.records.len())
    }
}

impl<'a> IntoIterator for &'a AnnotationTable {
    type Item = &'a AnnotationRecord;
    type IntoIter = std::slice::Iter<'a, AnnotationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Read `truncated.csv` back for the naive graph load
pub fn read_truncated(path: impl AsRef<Path>) -> PipelineResult<Vec<TruncatedRecord>> {
    read_truncated_from(std::fs::File::open(path)?)
}

pub fn read_truncated_from<R: io::Read>(reader: R) -> PipelineResult<Vec<TruncatedRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<TruncatedRecord>().enumerate() {
        let record = result?;
        if record.protein_name.trim().is_empty() {
            return Err(PipelineError::DataIntegrity { row: idx + 2, column: "proteinname" });
        }
        records.push(record);
    }
    Ok(records)
}
