//! Normalized Indel similarity
//!
//! `ratio = 100 * (1 - indel / (len_a + len_b))` where the Indel distance
//! (insertions and deletions only) is `len_a + len_b - 2 * lcs`. Lengths
//! count Unicode scalar values; comparison is case- and
//! whitespace-sensitive.
//!
//! The LCS length is computed with the bit-parallel algorithm of Hyyrö
//! (2004): one machine word covers 64 characters of the pattern text, so
//! a comparison costs `len_b * ceil(len_a / 64)` word operations.

use rustc_hash::FxHashMap;

const WORD_BITS: usize = u64::BITS as usize;

/// Position bit masks for one text, reusable against many others
#[derive(Debug, Clone)]
pub struct TextPattern {
    chars: Box<[char]>,
    words: usize,
    masks: FxHashMap<char, Vec<u64>>,
}

impl TextPattern {
    pub fn new(text: &str) -> Self {
        let chars: Box<[char]> = text.chars().collect();
        let words = (chars.len() + WORD_BITS - 1) / WORD_BITS;
        let mut masks: FxHashMap<char, Vec<u64>> = FxHashMap::default();
        for (pos, ch) in chars.iter().enumerate() {
            masks.entry(*ch).or_insert_with(|| vec![0; words])[pos / WORD_BITS] |=
                1u64 << (pos % WORD_BITS);
        }
        Self { chars, words, masks }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Length of the longest common subsequence with `other`
    pub fn lcs(&self, other: &[char]) -> usize {
        if self.chars.is_empty() || other.is_empty() {
            return 0;
        }

        // Zero bits in `v` mark pattern positions matched so far.
        let mut v = vec![u64::MAX; self.words];
        for ch in other {
            let Some(pm) = self.masks.get(ch) else {
                continue;
            };
            let mut carry = false;
            for (word, &m) in v.iter_mut().zip(pm.iter()) {
                let u = *word & m;
                let (sum, c1) = word.overflowing_add(u);
                let (sum, c2) = sum.overflowing_add(carry as u64);
                carry = c1 || c2;
                *word = sum | (*word - u);
            }
        }

        let len = self.chars.len();
        v.iter()
            .enumerate()
            .map(|(w, word)| {
                let bits = (len - w * WORD_BITS).min(WORD_BITS);
                let mask = if bits == WORD_BITS { u64::MAX } else { (1u64 << bits) - 1 };
                (!word & mask).count_ones() as usize
            })
            .sum()
    }

    /// Similarity in [0, 100] against another prepared text
    pub fn ratio(&self, other: &TextPattern) -> f64 {
        normalized_similarity(self.lcs(other.chars()), self.len(), other.len())
    }
}

/// Turn an LCS length into the 0-100 similarity.
///
/// Two empty strings are identical and score 100.
pub fn normalized_similarity(lcs: usize, len_a: usize, len_b: usize) -> f64 {
    let total = len_a + len_b;
    if total == 0 {
        return 100.0;
    }
    let indel = total - 2 * lcs;
    100.0 * (1.0 - indel as f64 / total as f64)
}

/// One-off similarity of two strings
pub fn ratio(a: &str, b: &str) -> f64 {
    TextPattern::new(a).ratio(&TextPattern::new(b))
}
