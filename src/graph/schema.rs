//! Labels, relationship types and property keys of the annotation graph

/// Protein node, identified by its normalized protein name
pub const PROTEIN: &str = "Protein";
/// Biological-process category node
pub const BIO_PROC: &str = "BioProc";
/// Molecular-function category node
pub const MOL_FUNC: &str = "MolFunc";
/// Cellular-component category node
pub const CELL_COMP: &str = "CellComp";

pub const HAS_BIO_PROC: &str = "HASBIOPROC";
pub const HAS_MOL_FUNC: &str = "HASMOLFUNC";
pub const IN_CELL_COMP: &str = "INCELLCOMP";
pub const SIMILAR_TO: &str = "SIMILARTO";

/// Identity property shared by every node label
pub const NAME: &str = "name";
pub const SYSNAME: &str = "sysname";
pub const DESCRIPTION: &str = "description";
pub const SCORE: &str = "score";
