//! Protsim — protein annotation similarity
//!
//! Batch building blocks for turning two gene-annotation tables into a
//! similarity graph:
//!
//! 1. [`annotation::NameNormalizer`] — standard name -> systematic name
//! 2. [`annotation::AnnotationTable`] — normalized, joined annotation rows
//! 3. [`annotation::CombinedTable`] — one comparison text per protein
//! 4. [`similarity::SimilarityScorer`] — all-pairs fuzzy ratio with a strict threshold
//! 5. [`graph::GraphStore`] — in-memory labelled graph with merge-by-identity
//!
//! Persistence to a graph server lives in the `protsim-sdk` crate.
//!
//! ## Example Usage
//!
//! ```rust
//! use protsim::annotation::{AnnotationTable, CombinedTable, LocusRecord, NameNormalizer};
//! use protsim::similarity::SimilarityScorer;
//!
//! let names = NameNormalizer::from_records(vec![
//!     LocusRecord::new("ABC1", "YGL119W"),
//!     LocusRecord::new("UNCHARACTERIZED", "YAL001C"),
//! ]).unwrap();
//!
//! let csv = "proteinname,description,go_BioProc,go_MolFunc,go_CellComp\n\
//!            Abc1p,kinase,GO:0006744,GO:0004672,GO:0005739\n\
//!            YAL001C,kinase,GO:0006744,GO:0004672,GO:0005634\n";
//! let table = AnnotationTable::build(csv.as_bytes(), &names).unwrap();
//! let combined = CombinedTable::from_table(&table);
//!
//! let scorer = SimilarityScorer::new(combined.texts());
//! let pairs = scorer.qualifying_pairs(70.0);
//! assert_eq!(pairs.len(), 1);
//! ```

#![warn(clippy::all)]

pub mod annotation;
pub mod config;
pub mod error;
pub mod graph;
pub mod similarity;

pub use annotation::{
    AnnotationRecord, AnnotationTable, CombinedTable, NameNormalizer, TruncatedRecord,
};
pub use config::{GraphConfig, PipelineConfig};
pub use error::{PipelineError, PipelineResult};
pub use graph::{
    Edge, EdgeId, EdgeType, GraphError, GraphResult, GraphStore, Label, Node, NodeId, PropertyMap,
    PropertyValue,
};
pub use similarity::{ScoredPair, SimilarityScorer};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
