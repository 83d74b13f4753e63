//! Lexical similarity ratios used by job-role matching

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use strsim::{jaro_winkler, normalized_levenshtein};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityMetric {
    /// Ratcliff/Obershelp gestalt ratio, `2 * matches / total length`
    Sequence,
    JaroWinkler,
    /// `1 - levenshtein / max_len`
    Levenshtein,
}

impl SimilarityMetric {
    /// Similarity of `a` and `b` in `[0, 1]`
    pub fn ratio(&self, a: &str, b: &str) -> f64 {
        match self {
            SimilarityMetric::Sequence => sequence_ratio(a, b),
            SimilarityMetric::JaroWinkler => jaro_winkler(a, b),
            SimilarityMetric::Levenshtein => normalized_levenshtein(a, b),
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityMetric::Sequence => write!(f, "sequence"),
            SimilarityMetric::JaroWinkler => write!(f, "jaro-winkler"),
            SimilarityMetric::Levenshtein => write!(f, "levenshtein"),
        }
    }
}

/// Gestalt pattern matching ratio. Two empty strings are identical.
///
/// Frequent characters are never treated as junk, however long `b` is.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b_index.entry(*c).or_default().push(j);
    }

    let matches = matching_chars(&a, &b_index, (0, a.len()), (0, b.len()));
    2.0 * matches as f64 / total as f64
}

/// Total size of the matching blocks: take the longest common block, then
/// recurse on the pieces to its left and right.
fn matching_chars(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> usize {
    let (i, j, k) = longest_match(a, b_index, (alo, ahi), (blo, bhi));
    if k == 0 {
        return 0;
    }

    let mut total = k;
    if alo < i && blo < j {
        total += matching_chars(a, b_index, (alo, i), (blo, j));
    }
    if i + k < ahi && j + k < bhi {
        total += matching_chars(a, b_index, (i + k, ahi), (j + k, bhi));
    }
    total
}

/// Longest common block in `a[alo..ahi]` and `b[blo..bhi]`; ties go to the
/// block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut next_run_lengths = HashMap::new();
        if let Some(positions) = b_index.get(&a[i]) {
            for &j in positions.iter().filter(|&&j| j >= blo && j < bhi) {
                let k = if j > 0 { run_lengths.get(&(j - 1)).copied().unwrap_or(0) } else { 0 } + 1;
                next_run_lengths.insert(j, k);
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        run_lengths = next_run_lengths;
    }

    best
}
