//! Fuzzy text similarity between proteins

pub mod ratio;
pub mod scorer;

pub use ratio::{normalized_similarity, ratio, TextPattern};
pub use scorer::{PairIter, ScoredPair, SimilarityScorer};
