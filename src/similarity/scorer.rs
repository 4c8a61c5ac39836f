//! All-pairs similarity over a dense list of texts

use super::ratio::TextPattern;
use rayon::prelude::*;
use serde::Serialize;

/// A pair of protein indices with their similarity score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredPair {
    /// Lower index
    pub left: usize,
    /// Higher index
    pub right: usize,
    pub score: f64,
}

/// Scores every unordered pair of a fixed set of texts.
///
/// Texts are addressed by their position in the input, so callers keep
/// their own index -> protein mapping and never re-resolve names.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    patterns: Vec<TextPattern>,
}

impl SimilarityScorer {
    pub fn new<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let texts: Vec<&str> = texts.into_iter().collect();
        let patterns = texts.par_iter().map(|t| TextPattern::new(t)).collect();
        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Similarity of texts `i` and `j`; panics if either is out of range
    pub fn score(&self, i: usize, j: usize) -> f64 {
        self.patterns[i].ratio(&self.patterns[j])
    }

    /// The combinatorial pair set `{(i, j) | i < j}` in row-major order
    pub fn pairs(&self) -> PairIter {
        PairIter::new(self.len())
    }

    /// `n * (n - 1) / 2`
    pub fn pair_count(&self) -> usize {
        let n = self.len();
        n * n.saturating_sub(1) / 2
    }

    /// Pairs scoring strictly above `threshold`, ordered by `(left, right)`.
    ///
    /// Rows are scored in parallel; the result is the same as scoring
    /// `pairs()` sequentially.
    pub fn qualifying_pairs(&self, threshold: f64) -> Vec<ScoredPair> {
        let n = self.len();
        let mut pairs: Vec<ScoredPair> = (0..n)
            .into_par_iter()
            .flat_map_iter(|left| {
                ((left + 1)..n).filter_map(move |right| {
                    let score = self.score(left, right);
                    (score > threshold).then_some(ScoredPair { left, right, score })
                })
            })
            .collect();
        pairs.sort_unstable_by_key(|p| (p.left, p.right));
        pairs
    }
}

/// Iterator over `(i, j)` with `i < j < n`
#[derive(Debug, Clone)]
pub struct PairIter {
    n: usize,
    i: usize,
    j: usize,
}

impl PairIter {
    pub fn new(n: usize) -> Self {
        Self { n, i: 0, j: 1 }
    }
}

impl Iterator for PairIter {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.i + 1 < self.n {
            if self.j < self.n {
                let pair = (self.i, self.j);
                self.j += 1;
                return Some(pair);
            }
            self.i += 1;
            self.j = self.i + 1;
        }
        None
    }
}
