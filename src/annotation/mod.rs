//! Annotation table preparation
//!
//! raw CSVs -> [`NameNormalizer`] -> [`AnnotationTable`] -> [`CombinedTable`]

pub mod combine;
pub mod names;
pub mod table;

pub use combine::{combine, CombinedTable, CombinedText};
pub use names::{LocusRecord, NameNormalizer, UNCHARACTERIZED};
pub use table::{
    leading_code, normalize_protein_name, read_truncated, read_truncated_from, AnnotationRecord,
    AnnotationTable, RawAnnotation, TruncatedRecord,
};
