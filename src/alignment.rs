//! Whole-alignment scoring.
//!
//! Alignments are consumed column-major: the residues of position `p`
//! across all sequences are one contiguous run of `n_sequences` bytes.
//! Columns are independent, so they fan out across a rayon pool; each
//! worker owns a [`ColumnProcessor`] and a partial conformance vector, and
//! the partials are summed at the end.

use rayon::prelude::{
    IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator,
    ParallelSlice, ParallelSliceMut,
};

use crate::error::{check_len, CscoreError, Result};
use crate::gaps::GapSymbols;
use crate::options::ScoringOptions;
use crate::processor::ColumnProcessor;
use crate::score_space::ScoreSpace;

/// Read-only column-major view of an `n_positions × n_sequences` buffer.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentColumns<'a> {
    data: &'a [u8],
    n_sequences: usize,
    n_positions: usize,
}

impl<'a> AlignmentColumns<'a> {
    /// Wrap `data`, which must hold exactly `n_sequences × n_positions`
    /// bytes laid out one column after another.
    ///
    /// # Errors
    ///
    /// [`CscoreError::DimensionOverflow`] if the dimensions multiply past
    /// `usize::MAX`, [`CscoreError::ShapeMismatch`] on a length mismatch.
    pub fn new(
        data: &'a [u8],
        n_sequences: usize,
        n_positions: usize,
    ) -> Result<Self> {
        let expected = n_sequences.checked_mul(n_positions).ok_or(
            CscoreError::DimensionOverflow {
                n_sequences,
                n_positions,
            },
        )?;
        check_len("column buffer", expected, data.len())?;
        Ok(Self {
            data,
            n_sequences,
            n_positions,
        })
    }

    /// Number of aligned sequences (column height).
    pub fn n_sequences(&self) -> usize {
        self.n_sequences
    }

    /// Number of alignment positions (column count).
    pub fn n_positions(&self) -> usize {
        self.n_positions
    }

    /// Residues at `position` across every sequence.
    pub fn column(&self, position: usize) -> &'a [u8] {
        let start = position * self.n_sequences;
        &self.data[start..start + self.n_sequences]
    }

    /// Iterate columns in position order.
    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let n = self.n_sequences.max(1);
        self.data.chunks(n).take(self.n_positions)
    }

    /// The underlying column-major buffer.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

/// Transpose equal-length aligned rows into a column-major buffer.
///
/// # Errors
///
/// [`CscoreError::ShapeMismatch`] if the rows differ in length.
pub fn columns_from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Vec<u8>> {
    let n_sequences = rows.len();
    let n_positions = rows.first().map_or(0, |row| row.as_ref().len());
    let mut data = vec![0; n_sequences * n_positions];
    for (seq, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        check_len("aligned row", n_positions, row.len())?;
        for (pos, &symbol) in row.iter().enumerate() {
            data[pos * n_sequences + seq] = symbol;
        }
    }
    Ok(data)
}

/// Conservation results for a whole alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ConservationScores {
    n_sequences: usize,
    n_positions: usize,
    /// One cscore per position.
    pub cscores: Vec<f64>,
    /// Column-major per-residue divergences, same layout as the input.
    pub divergences: Vec<f64>,
    /// Per-sequence divergence sums over all positions.
    pub conformances: Vec<f64>,
}

impl ConservationScores {
    /// Number of sequences scored.
    pub fn n_sequences(&self) -> usize {
        self.n_sequences
    }

    /// Number of positions scored.
    pub fn n_positions(&self) -> usize {
        self.n_positions
    }

    /// Divergence of residue `position` in sequence `sequence`.
    pub fn divergence(&self, sequence: usize, position: usize) -> f64 {
        self.divergences[position * self.n_sequences + sequence]
    }

    /// Divergences of one column.
    pub fn column_divergences(&self, position: usize) -> &[f64] {
        let start = position * self.n_sequences;
        &self.divergences[start..start + self.n_sequences]
    }

    /// Divergences transposed to sequence-major rows, the layout of an
    /// `n_sequences`-high image.
    pub fn divergences_by_sequence(&self) -> Vec<f64> {
        let mut rows = vec![0.0; self.divergences.len()];
        for (pos, column) in self
            .divergences
            .chunks(self.n_sequences.max(1))
            .enumerate()
        {
            for (seq, &value) in column.iter().enumerate() {
                rows[seq * self.n_positions + pos] = value;
            }
        }
        rows
    }

    /// `1 - mean divergence` per sequence.
    pub fn sequence_cscores(&self) -> Vec<f64> {
        if self.n_positions == 0 {
            return vec![1.0; self.n_sequences];
        }
        let n = self.n_positions as f64;
        self.conformances.iter().map(|&sum| 1.0 - sum / n).collect()
    }
}

/// Score every column of `columns` under `options`.
///
/// Runs on the rayon pool when `options.parallel` is set. Parallel and
/// serial runs agree up to floating-point summation order in
/// `conformances`.
///
/// # Errors
///
/// [`CscoreError::InvalidOption`] if `options.gap_symbols` is not ASCII.
pub fn score_alignment(
    space: &ScoreSpace,
    columns: &AlignmentColumns<'_>,
    options: &ScoringOptions,
) -> Result<ConservationScores> {
    let gaps = options.gap_symbols()?;
    Ok(score_columns(space, columns, &gaps, options.parallel))
}

/// [`score_alignment`] with an already built gap set.
pub fn score_columns(
    space: &ScoreSpace,
    columns: &AlignmentColumns<'_>,
    gaps: &GapSymbols,
    parallel: bool,
) -> ConservationScores {
    let n_sequences = columns.n_sequences();
    let n_positions = columns.n_positions();
    log::debug!(
        "scoring {n_sequences} sequences x {n_positions} positions ({})",
        if parallel { "parallel" } else { "serial" }
    );

    let mut scores = ConservationScores {
        n_sequences,
        n_positions,
        cscores: vec![0.0; n_positions],
        divergences: vec![0.0; n_sequences * n_positions],
        conformances: vec![0.0; n_sequences],
    };
    if n_sequences == 0 || n_positions == 0 {
        return scores;
    }

    if parallel {
        scores.conformances = score_parallel(
            space,
            gaps,
            columns,
            &mut scores.cscores,
            &mut scores.divergences,
        );
    } else {
        let mut processor = ColumnProcessor::new(space, gaps);
        for ((cscore, divergences), column) in scores
            .cscores
            .iter_mut()
            .zip(scores.divergences.chunks_mut(n_sequences))
            .zip(columns.iter())
        {
            *cscore = processor.process(
                column,
                divergences,
                &mut scores.conformances,
            );
        }
    }
    scores
}

fn score_parallel(
    space: &ScoreSpace,
    gaps: &GapSymbols,
    columns: &AlignmentColumns<'_>,
    cscores: &mut [f64],
    divergences: &mut [f64],
) -> Vec<f64> {
    let n_sequences = columns.n_sequences();
    cscores
        .par_iter_mut()
        .zip(divergences.par_chunks_mut(n_sequences))
        .zip(columns.as_bytes().par_chunks(n_sequences))
        .fold(
            || (ColumnProcessor::new(space, gaps), vec![0.0; n_sequences]),
            |(mut processor, mut partial), ((cscore, divs), column)| {
                *cscore = processor.process(column, divs, &mut partial);
                (processor, partial)
            },
        )
        .map(|(_, partial)| partial)
        .reduce(
            || vec![0.0; n_sequences],
            |mut total, partial| {
                for (acc, value) in total.iter_mut().zip(partial) {
                    *acc += value;
                }
                total
            },
        )
}
