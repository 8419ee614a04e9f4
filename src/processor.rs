//! Column processor: one column in, cscore + per-residue divergences out.

use crate::column::ColumnStats;
use crate::error::{check_len, Result};
use crate::gaps::GapSymbols;
use crate::score_space::ScoreSpace;

/// Reusable per-worker state for scoring columns of one alignment.
///
/// All scratch is sized by the alphabet once, so processing a column does
/// not allocate.
#[derive(Debug, Clone)]
pub struct ColumnProcessor<'s> {
    stats: ColumnStats<'s>,
    gaps: &'s GapSymbols,
    centroid: Vec<f64>,
    distances: Vec<f64>,
    divergences: Vec<f64>,
}

impl<'s> ColumnProcessor<'s> {
    /// Create a processor for columns scored in `space`.
    pub fn new(space: &'s ScoreSpace, gaps: &'s GapSymbols) -> Self {
        let n = space.size();
        Self {
            stats: ColumnStats::new(space, &[], gaps),
            gaps,
            centroid: vec![0.0; n],
            distances: vec![0.0; n],
            divergences: vec![0.0; n + 1],
        }
    }

    /// Score `column`, writing one divergence per residue into
    /// `divergences` and adding it to the matching `conformance` entry.
    ///
    /// Both output slices must be `column.len()` long; callers validate
    /// shapes once per alignment. Returns the column's cscore.
    pub fn process(
        &mut self,
        column: &[u8],
        divergences: &mut [f64],
        conformance: &mut [f64],
    ) -> f64 {
        debug_assert_eq!(column.len(), divergences.len());
        debug_assert_eq!(column.len(), conformance.len());

        self.stats.reset(column, self.gaps);
        self.stats.distances_into(&mut self.centroid, &mut self.distances);
        let cscore = self.stats.cscore(&self.distances);
        self.stats.divergences_into(
            &self.distances,
            cscore,
            &mut self.divergences,
        );

        let space = self.stats.space();
        let unknown = self.divergences[self.stats.unknown_slot()];
        for ((&symbol, out), acc) in
            column.iter().zip(divergences.iter_mut()).zip(conformance)
        {
            *out = if self.gaps.is_gap(symbol) {
                cscore
            } else {
                space
                    .index_of(symbol)
                    .map_or(unknown, |index| self.divergences[index])
            };
            *acc += *out;
        }
        cscore
    }

    /// Statistics of the most recently processed column.
    pub fn stats(&self) -> &ColumnStats<'s> {
        &self.stats
    }
}

/// Score a single column into caller-owned buffers.
///
/// Writes the cscore into `cscore`, one divergence per residue into
/// `divergences`, and accumulates those into `conformance`.
///
/// # Errors
///
/// [`CscoreError::ShapeMismatch`](crate::CscoreError::ShapeMismatch) if
/// either output buffer is not `column.len()` long.
pub fn process_column(
    space: &ScoreSpace,
    gaps: &GapSymbols,
    column: &[u8],
    cscore: &mut f64,
    divergences: &mut [f64],
    conformance: &mut [f64],
) -> Result<()> {
    check_len("divergence buffer", column.len(), divergences.len())?;
    check_len("conformance buffer", column.len(), conformance.len())?;
    *cscore = ColumnProcessor::new(space, gaps).process(
        column,
        divergences,
        conformance,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::SubstitutionMatrix;
    use crate::score_space::tests::grouped_space;
    use crate::CscoreError;

    const EPS: f64 = 1e-12;

    #[test]
    fn two_symbol_uniform_column() {
        let m =
            SubstitutionMatrix::new("pair", "AB", vec![10, 0, 0, 10]).unwrap();
        let space = ScoreSpace::new(&m, None).unwrap();
        let gaps = GapSymbols::default();
        let mut cscore = f64::NAN;
        let mut divs = [f64::NAN; 5];
        let mut conformance = [0.0; 5];
        process_column(
            &space,
            &gaps,
            b"AAAAA",
            &mut cscore,
            &mut divs,
            &mut conformance,
        )
        .unwrap();
        assert_eq!(cscore, 1.0);
        // every residue sits on the centroid
        assert_eq!(divs, [0.0; 5]);
        assert_eq!(conformance, [0.0; 5]);
    }

    #[test]
    fn residues_route_to_gap_unknown_and_symbol_slots() {
        let space = grouped_space();
        let gaps = GapSymbols::default();
        let column = b"AAAS-X.";
        let mut proc = ColumnProcessor::new(&space, &gaps);
        let mut divs = [0.0; 7];
        let mut conformance = [0.0; 7];
        let cscore = proc.process(column, &mut divs, &mut conformance);

        let stats = ColumnStats::new(&space, column, &gaps);
        let d = stats.distances();
        let table = stats.divergences(&d, stats.cscore(&d));
        assert_eq!(cscore, stats.cscore(&d));

        assert_eq!(divs[0], table[0]);
        assert_eq!(divs[3], table[1]);
        assert_eq!(divs[4], cscore);
        assert_eq!(divs[5], table[4]);
        assert_eq!(divs[6], cscore);
        assert_eq!(divs, conformance);
    }

    #[test]
    fn residue_divergence_includes_unknown_fraction() {
        let space = grouped_space();
        let gaps = GapSymbols::default();
        let mut divs = [0.0; 4];
        let mut conformance = [0.0; 4];
        let cscore = ColumnProcessor::new(&space, &gaps).process(
            b"AASX",
            &mut divs,
            &mut conformance,
        );
        let halfmax = 92.0_f64.sqrt() / 2.0;
        let d_s = (80.0_f64 / 9.0).sqrt();
        assert!((divs[2] - (cscore * d_s / halfmax / 2.0 + 0.25)).abs() < EPS);
        assert!((divs[3] - (cscore + 0.25)).abs() < EPS);
        assert_eq!(divs[0], divs[1]);
    }

    #[test]
    fn conformance_accumulates_across_columns() {
        let space = grouped_space();
        let gaps = GapSymbols::default();
        let mut proc = ColumnProcessor::new(&space, &gaps);
        let mut conformance = [1.0; 3];
        let mut first = [0.0; 3];
        let mut second = [0.0; 3];
        let _ = proc.process(b"ASX", &mut first, &mut conformance);
        let _ = proc.process(b"L-I", &mut second, &mut conformance);
        for i in 0..3 {
            let expected = 1.0 + first[i] + second[i];
            assert!((conformance[i] - expected).abs() < EPS);
        }
    }

    #[test]
    fn processor_matches_one_shot_function() {
        let space = grouped_space();
        let gaps = GapSymbols::default();
        let mut proc = ColumnProcessor::new(&space, &gaps);
        let _ = proc.process(b"IIII", &mut [0.0; 4], &mut [0.0; 4]);

        let column = b"ASLI-";
        let mut a = [0.0; 5];
        let mut acc_a = [0.0; 5];
        let cscore_a = proc.process(column, &mut a, &mut acc_a);

        let mut cscore_b = 0.0;
        let mut b = [0.0; 5];
        let mut acc_b = [0.0; 5];
        process_column(&space, &gaps, column, &mut cscore_b, &mut b, &mut acc_b)
            .unwrap();
        assert_eq!(cscore_a, cscore_b);
        assert_eq!(a, b);
    }

    #[test]
    fn mismatched_buffers_are_rejected() {
        let space = grouped_space();
        let gaps = GapSymbols::default();
        let mut cscore = 0.0;
        let err = process_column(
            &space,
            &gaps,
            b"AAA",
            &mut cscore,
            &mut [0.0; 2],
            &mut [0.0; 3],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CscoreError::ShapeMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }
}
