//! Residue similarity space derived from a substitution matrix.
//!
//! Every alphabet symbol becomes a point: its row of substitution scores
//! against the whole alphabet. Distances between points (and between a
//! point and a real-valued centroid) are plain Euclidean distances.
//!
//! The half of the largest pairwise distance is precomputed once and used
//! to normalize conservation scores into `[0, 1]`.

use crate::error::{CscoreError, Result};
use crate::matrix::{byte_index_table, lookup_index, SubstitutionMatrix};

/// Wildcard / terminator symbol excluded from the space by default.
pub const DEFAULT_WILDCARD: u8 = b'*';

/// Immutable, shareable vector space over a substitution matrix alphabet.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSpace {
    symbols: Vec<u8>,
    /// `size × size` row-major score vectors.
    vectors: Vec<i32>,
    index: [i16; 256],
    half_max_distance: f64,
}

impl ScoreSpace {
    /// Build the space, dropping `wildcard` from the alphabet if present.
    ///
    /// # Errors
    ///
    /// [`CscoreError::EmptyAlphabet`] when no symbols remain.
    pub fn new(
        matrix: &SubstitutionMatrix,
        wildcard: Option<u8>,
    ) -> Result<Self> {
        let symbols: Vec<u8> = matrix
            .alphabet()
            .iter()
            .copied()
            .filter(|&symbol| Some(symbol) != wildcard)
            .collect();
        if symbols.is_empty() {
            return Err(CscoreError::EmptyAlphabet);
        }

        let mut vectors = Vec::with_capacity(symbols.len() * symbols.len());
        for &a in &symbols {
            for &b in &symbols {
                // Both symbols come from the matrix alphabet.
                vectors.push(matrix.lookup(a, b).unwrap_or_default());
            }
        }

        let mut space = Self {
            index: byte_index_table(&symbols),
            symbols,
            vectors,
            half_max_distance: 0.0,
        };
        space.half_max_distance = space.max_pairwise_distance() / 2.0;

        log::debug!(
            "score space from {}: {} symbols, half-max distance {:.3}",
            matrix.name(),
            space.size(),
            space.half_max_distance
        );
        Ok(space)
    }

    fn max_pairwise_distance(&self) -> f64 {
        let n = self.size();
        let mut max = 0.0_f64;
        for i in 0..n {
            for j in (i + 1)..n {
                max = max.max(self.distance(i, j));
            }
        }
        max
    }

    /// Number of symbols (and the length of every score vector).
    #[inline]
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// The filtered alphabet in index order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Whether `symbol` belongs to the alphabet.
    #[inline]
    pub fn has_symbol(&self, symbol: u8) -> bool {
        self.index_of(symbol).is_some()
    }

    /// Index of `symbol`, or `None` if it is not recognized.
    #[inline]
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        lookup_index(&self.index, symbol)
    }

    /// Substitution score between the symbols at `i` and `j`.
    #[inline]
    pub fn score(&self, i: usize, j: usize) -> i32 {
        self.vectors[i * self.size() + j]
    }

    /// Score vector of the symbol at index `i`.
    #[inline]
    pub fn score_vector(&self, i: usize) -> &[i32] {
        let n = self.size();
        &self.vectors[i * n..(i + 1) * n]
    }

    /// Distance between the score vectors at `i` and `j`.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        vector_distance(self.score_vector(i), self.score_vector(j))
    }

    /// Distance from the score vector at `i` to an arbitrary point.
    pub fn distance_to(&self, i: usize, point: &[f64]) -> f64 {
        point_distance(self.score_vector(i), point)
    }

    /// Half of the largest distance between any two score vectors.
    #[inline]
    pub fn half_max_distance(&self) -> f64 {
        self.half_max_distance
    }
}

/// Euclidean distance between two integer vectors of equal length.
pub fn vector_distance(a: &[i32], b: &[i32]) -> f64 {
    let sum: i64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| {
            let delta = i64::from(x) - i64::from(y);
            delta * delta
        })
        .sum();
    (sum as f64).sqrt()
}

/// Euclidean distance between an integer vector and a real-valued point.
pub fn point_distance(a: &[i32], point: &[f64]) -> f64 {
    a.iter()
        .zip(point)
        .map(|(&x, &y)| {
            let delta = f64::from(x) - y;
            delta * delta
        })
        .sum::<f64>()
        .sqrt()
}
