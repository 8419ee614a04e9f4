//! Substitution matrix lookup structure.
//!
//! A [`SubstitutionMatrix`] is the finished product of whatever loader the
//! host uses (built-in tables, matrix files): an ordered alphabet and a
//! square, row-major table of integer scores. Nothing here parses files.

use crate::error::{CscoreError, Result};

/// Sentinel stored in byte-indexed lookup tables for unmapped symbols.
pub(crate) const NOT_RECOGNIZED: i16 = -1;

/// Build a total byte → index table for `alphabet`.
pub(crate) fn byte_index_table(alphabet: &[u8]) -> [i16; 256] {
    let mut table = [NOT_RECOGNIZED; 256];
    for (i, &symbol) in alphabet.iter().enumerate() {
        table[usize::from(symbol)] = i as i16;
    }
    table
}

/// Read an index back out of a table built by [`byte_index_table`].
#[inline]
pub(crate) fn lookup_index(table: &[i16; 256], symbol: u8) -> Option<usize> {
    let index = table[usize::from(symbol)];
    (index != NOT_RECOGNIZED).then_some(index as usize)
}

/// Symbol × symbol integer score table over an ordered alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMatrix {
    name: String,
    alphabet: Vec<u8>,
    scores: Vec<i32>,
    index: [i16; 256],
}

impl SubstitutionMatrix {
    /// Wrap an alphabet and its row-major score table.
    ///
    /// # Errors
    ///
    /// [`CscoreError::MatrixShape`] if `scores` is not `alphabet.len()²`
    /// long, [`CscoreError::DuplicateSymbol`] if a symbol repeats.
    pub fn new(
        name: impl Into<String>,
        alphabet: impl Into<Vec<u8>>,
        scores: Vec<i32>,
    ) -> Result<Self> {
        let alphabet = alphabet.into();
        let n = alphabet.len();
        if n > i16::MAX as usize || scores.len() != n * n {
            return Err(CscoreError::MatrixShape {
                alphabet: n,
                scores: scores.len(),
            });
        }
        let mut seen = [false; 256];
        for &symbol in &alphabet {
            if std::mem::replace(&mut seen[usize::from(symbol)], true) {
                return Err(CscoreError::DuplicateSymbol(symbol));
            }
        }
        let index = byte_index_table(&alphabet);
        Ok(Self {
            name: name.into(),
            alphabet,
            scores,
            index,
        })
    }

    /// Matrix name, e.g. "BLOSUM62".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alphabet in table order.
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    /// Number of alphabet symbols.
    pub fn size(&self) -> usize {
        self.alphabet.len()
    }

    /// Position of `symbol` in the alphabet.
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        lookup_index(&self.index, symbol)
    }

    /// Score for substituting `a` with `b`; `None` if either is unknown.
    pub fn lookup(&self, a: u8, b: u8) -> Option<i32> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.scores[i * self.size() + j])
    }
}
