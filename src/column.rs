//! Per-column statistics: histogram, centroid, distances, cscore and
//! per-symbol divergence.
//!
//! A column is one alignment position across every sequence. Each symbol
//! is tallied as known (in the alphabet), unknown (not in the alphabet) and,
//! independently, gapped (a gap marker). Gap markers are still looked up in
//! the alphabet, so a gap outside the alphabet counts as both gapped and
//! unknown.
//!
//! The conservation score is one minus the count-weighted mean distance to
//! the column centroid (normalized by the half-max distance of the space),
//! minus the fraction of unknown symbols among the other `N - 1`:
//!
//! ```text
//! cscore = 1 - Σ count[i]·d[i] / halfmax / N - unknown / (N - 1)
//! ```
//!
//! Divergence of a present symbol is `cscore · d[i] / halfmax / 2 +
//! unknown / N`. Both are clamped to `[0, 1]`.

use crate::gaps::GapSymbols;
use crate::score_space::ScoreSpace;

/// Histogram and derived statistics for one alignment column.
#[derive(Debug, Clone)]
pub struct ColumnStats<'s> {
    space: &'s ScoreSpace,
    counts: Vec<u32>,
    known: u32,
    unknown: u32,
    gapped: u32,
}

impl<'s> ColumnStats<'s> {
    /// Tally `column` against `space`.
    pub fn new(
        space: &'s ScoreSpace,
        column: &[u8],
        gaps: &GapSymbols,
    ) -> Self {
        let mut stats = Self {
            space,
            counts: vec![0; space.size()],
            known: 0,
            unknown: 0,
            gapped: 0,
        };
        stats.reset(column, gaps);
        stats
    }

    /// Re-tally for another column, reusing the histogram allocation.
    pub fn reset(&mut self, column: &[u8], gaps: &GapSymbols) {
        self.counts.fill(0);
        self.known = 0;
        self.unknown = 0;
        self.gapped = 0;
        for &symbol in column {
            if gaps.is_gap(symbol) {
                self.gapped += 1;
            }
            match self.space.index_of(symbol) {
                Some(index) => {
                    self.known += 1;
                    self.counts[index] += 1;
                }
                None => self.unknown += 1,
            }
        }
    }

    /// The score space this column is measured in.
    pub fn space(&self) -> &'s ScoreSpace {
        self.space
    }

    /// Occurrences of each alphabet symbol.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Symbols recognized by the alphabet.
    pub fn known(&self) -> u32 {
        self.known
    }

    /// Symbols not recognized by the alphabet (gap markers included).
    pub fn unknown(&self) -> u32 {
        self.unknown
    }

    /// Gap markers.
    pub fn gapped(&self) -> u32 {
        self.gapped
    }

    /// `known + unknown`, i.e. the column length.
    pub fn total(&self) -> u32 {
        self.known + self.unknown
    }

    /// Index of the reserved gap/unknown slot in a divergence table.
    pub fn unknown_slot(&self) -> usize {
        self.space.size()
    }

    /// Count-weighted mean score vector of the known symbols.
    ///
    /// Returns `None` for a column without known symbols.
    pub fn centroid(&self) -> Option<Vec<f64>> {
        let mut centroid = vec![0.0; self.space.size()];
        self.centroid_into(&mut centroid).then_some(centroid)
    }

    /// Write the centroid into `out`; `false` (and `out` untouched) when
    /// there are no known symbols.
    pub fn centroid_into(&self, out: &mut [f64]) -> bool {
        if self.known == 0 {
            return false;
        }
        out.fill(0.0);
        for (i, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let weight = f64::from(count);
            let vector = self.space.score_vector(i);
            for (acc, &score) in out.iter_mut().zip(vector) {
                *acc += weight * f64::from(score);
            }
        }
        let known = f64::from(self.known);
        for value in out.iter_mut() {
            *value /= known;
        }
        true
    }

    /// Distance from each present symbol to the centroid; zero elsewhere.
    pub fn distances(&self) -> Vec<f64> {
        let n = self.space.size();
        let mut centroid = vec![0.0; n];
        let mut distances = vec![0.0; n];
        self.distances_into(&mut centroid, &mut distances);
        distances
    }

    /// [`distances`](Self::distances) into caller scratch. `centroid` is
    /// overwritten with the column centroid when there are known symbols.
    pub fn distances_into(&self, centroid: &mut [f64], out: &mut [f64]) {
        out.fill(0.0);
        if !self.centroid_into(centroid) {
            return;
        }
        for (i, &count) in self.counts.iter().enumerate() {
            if count != 0 {
                out[i] = self.space.distance_to(i, centroid);
            }
        }
    }

    /// Conservation score of the column, in `[0, 1]`.
    ///
    /// Exactly `0.0` when the column has no known symbols.
    pub fn cscore(&self, distances: &[f64]) -> f64 {
        if self.known == 0 {
            return 0.0;
        }
        let sum_distance: f64 = self
            .counts
            .iter()
            .zip(distances)
            .map(|(&count, &d)| f64::from(count) * d)
            .sum();
        let n = f64::from(self.total());
        let halfmax = self.space.half_max_distance();
        let spread = if halfmax > 0.0 {
            sum_distance / halfmax / n
        } else {
            0.0
        };
        let penalty = if self.unknown == 0 {
            0.0
        } else {
            f64::from(self.unknown) / (n - 1.0)
        };
        (1.0 - spread - penalty).clamp(0.0, 1.0)
    }

    /// Per-symbol divergence table with the reserved unknown slot last.
    pub fn divergences(&self, distances: &[f64], cscore: f64) -> Vec<f64> {
        let mut table = vec![0.0; self.space.size() + 1];
        self.divergences_into(distances, cscore, &mut table);
        table
    }

    /// [`divergences`](Self::divergences) into a table of `size() + 1`
    /// entries. Symbols whose distance is zero keep a divergence of zero.
    pub fn divergences_into(
        &self,
        distances: &[f64],
        cscore: f64,
        out: &mut [f64],
    ) {
        out.fill(0.0);
        let total = self.total();
        let unknown_fraction = if total == 0 {
            0.0
        } else {
            f64::from(self.unknown) / f64::from(total)
        };
        let halfmax = self.space.half_max_distance();
        for (slot, &d) in out.iter_mut().zip(distances) {
            if d == 0.0 {
                continue;
            }
            let scaled = if halfmax > 0.0 {
                cscore * d / halfmax / 2.0
            } else {
                0.0
            };
            *slot = (scaled + unknown_fraction).clamp(0.0, 1.0);
        }
        out[self.unknown_slot()] = (cscore + unknown_fraction).clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::score_space::tests::grouped_space;

    const EPS: f64 = 1e-12;

    fn stats<'s>(space: &'s ScoreSpace, column: &[u8]) -> ColumnStats<'s> {
        ColumnStats::new(space, column, &GapSymbols::default())
    }

    #[test]
    fn histogram_classifies_symbols() {
        let space = grouped_space();
        let s = stats(&space, b"AAS-.X*L");
        assert_eq!(s.counts(), &[2, 1, 1, 0]);
        assert_eq!(s.known(), 4);
        // '-', '.', 'X' and the excluded wildcard
        assert_eq!(s.unknown(), 4);
        assert_eq!(s.gapped(), 2);
        assert_eq!(s.total(), 8);
    }

    #[test]
    fn gap_inside_alphabet_is_also_known() {
        let space = grouped_space();
        let s = ColumnStats::new(&space, b"AAS", &GapSymbols::new(b"S"));
        assert_eq!(s.gapped(), 1);
        assert_eq!(s.known(), 3);
        assert_eq!(s.unknown(), 0);
    }

    #[test]
    fn uniform_column_is_fully_conserved() {
        let space = grouped_space();
        let s = stats(&space, b"LLLLL");
        let d = s.distances();
        assert_eq!(d, vec![0.0; 4]);
        assert_eq!(s.centroid().unwrap(), vec![-1.0, -2.0, 4.0, 2.0]);
        let cscore = s.cscore(&d);
        assert_eq!(cscore, 1.0);
        let divs = s.divergences(&d, cscore);
        assert_eq!(&divs[..4], &[0.0; 4]);
        assert_eq!(divs[s.unknown_slot()], 1.0);
    }

    #[test]
    fn degenerate_column_scores_zero() {
        let space = grouped_space();
        for column in [&b"XXXX"[..], b"----", b"-.Z*", b""] {
            let s = stats(&space, column);
            assert_eq!(s.known(), 0);
            assert!(s.centroid().is_none());
            let d = s.distances();
            assert_eq!(d, vec![0.0; 4]);
            assert_eq!(s.cscore(&d), 0.0);
        }
    }

    #[test]
    fn degenerate_column_routes_unknowns_to_slot() {
        let space = grouped_space();
        let s = stats(&space, b"XX--");
        let d = s.distances();
        let divs = s.divergences(&d, s.cscore(&d));
        assert_eq!(divs[s.unknown_slot()], 1.0);
        assert_eq!(&divs[..4], &[0.0; 4]);
    }

    #[test]
    fn mixed_column_matches_hand_computation() {
        let space = grouped_space();
        let s = stats(&space, b"AASL");
        // centroid = (2A + S + L) / 4 = (2, 1, 0, -0.5)
        assert_eq!(s.centroid().unwrap(), vec![2.0, 1.0, 0.0, -0.5]);
        let d = s.distances();
        assert!((d[0] - 5.25_f64.sqrt()).abs() < EPS);
        assert!((d[1] - 16.25_f64.sqrt()).abs() < EPS);
        assert!((d[2] - 40.25_f64.sqrt()).abs() < EPS);
        assert_eq!(d[3], 0.0);

        let halfmax = 92.0_f64.sqrt() / 2.0;
        let sum = 2.0 * d[0] + d[1] + d[2];
        let expected = 1.0 - sum / halfmax / 4.0;
        let cscore = s.cscore(&d);
        assert!((cscore - expected).abs() < EPS);

        let divs = s.divergences(&d, cscore);
        for i in 0..3 {
            assert!((divs[i] - cscore * d[i] / halfmax / 2.0).abs() < EPS);
        }
        assert_eq!(divs[3], 0.0);
        assert!((divs[4] - cscore).abs() < EPS);
    }

    #[test]
    fn unknowns_penalize_cscore_and_divergence() {
        let space = grouped_space();
        let s = stats(&space, b"AAAX");
        let d = s.distances();
        let cscore = s.cscore(&d);
        // 1 - 0 - 1/(4-1)
        assert!((cscore - 2.0 / 3.0).abs() < EPS);
        let divs = s.divergences(&d, cscore);
        // A sits on the centroid and keeps zero divergence
        assert_eq!(divs[0], 0.0);
        // cscore + 1/4
        assert!((divs[4] - (2.0 / 3.0 + 0.25)).abs() < EPS);
    }

    #[test]
    fn present_symbols_carry_the_unknown_fraction() {
        let space = grouped_space();
        let s = stats(&space, b"AASX");
        // centroid = (2A + S) / 3 = (3, 2, -4/3, -4/3)
        let d = s.distances();
        let d_a = (20.0_f64 / 9.0).sqrt();
        let d_s = (80.0_f64 / 9.0).sqrt();
        assert!((d[0] - d_a).abs() < EPS);
        assert!((d[1] - d_s).abs() < EPS);

        let halfmax = 92.0_f64.sqrt() / 2.0;
        let expected = 1.0 - (2.0 * d_a + d_s) / halfmax / 4.0 - 1.0 / 3.0;
        let cscore = s.cscore(&d);
        assert!((cscore - expected).abs() < EPS);

        let divs = s.divergences(&d, cscore);
        let div_a = cscore * d_a / halfmax / 2.0 + 0.25;
        let div_s = cscore * d_s / halfmax / 2.0 + 0.25;
        assert!((divs[0] - div_a).abs() < EPS);
        assert!((divs[1] - div_s).abs() < EPS);
        assert!((divs[1] - 0.360_604_933_232_147).abs() < 1e-9);
        assert_eq!(&divs[2..4], &[0.0, 0.0]);
        assert!((divs[4] - (cscore + 0.25)).abs() < EPS);
    }

    #[test]
    fn symbol_divergence_clamps_at_one() {
        let space = grouped_space();
        // nine S, one I, two unknowns: I sits 0.9 of the S-I span from
        // the centroid, so 0.9 + 2/12 exceeds one at cscore 1
        let s = stats(&space, b"SSSSSSSSSIXX");
        let d = s.distances();
        let halfmax = space.half_max_distance();
        assert!((d[3] / halfmax / 2.0 - 0.9).abs() < EPS);

        let divs = s.divergences(&d, 1.0);
        assert_eq!(divs[3], 1.0);
        let div_s = d[1] / halfmax / 2.0 + 2.0 / 12.0;
        assert!((divs[1] - div_s).abs() < EPS);
        assert!(divs[1] < 1.0);
        assert_eq!(divs[s.unknown_slot()], 1.0);
    }

    #[test]
    fn gaps_count_as_unknown_for_the_penalty() {
        let space = grouped_space();
        let with_gap = stats(&space, b"AAA-");
        let with_x = stats(&space, b"AAAX");
        let d = with_gap.distances();
        assert_eq!(with_gap.cscore(&d), with_x.cscore(&with_x.distances()));
    }

    #[test]
    fn single_known_residue_is_not_nan() {
        let space = grouped_space();
        let s = stats(&space, b"S");
        let d = s.distances();
        assert_eq!(s.cscore(&d), 1.0);
    }

    #[test]
    fn reset_reuses_histogram() {
        let space = grouped_space();
        let gaps = GapSymbols::default();
        let mut s = ColumnStats::new(&space, b"AAAA", &gaps);
        s.reset(b"SL-", &gaps);
        assert_eq!(s.counts(), &[0, 1, 1, 0]);
        assert_eq!((s.known(), s.unknown(), s.gapped()), (2, 1, 1));
    }

    #[test]
    fn random_columns_stay_in_unit_interval() {
        let space = grouped_space();
        let symbols = b"ASLI-.X*";
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let len = rng.random_range(1..40);
            let column: Vec<u8> = (0..len)
                .map(|_| symbols[rng.random_range(0..symbols.len())])
                .collect();
            let s = stats(&space, &column);
            let d = s.distances();
            let cscore = s.cscore(&d);
            assert!((0.0..=1.0).contains(&cscore), "{cscore} for {column:?}");
            for div in s.divergences(&d, cscore) {
                assert!((0.0..=1.0).contains(&div), "{div} for {column:?}");
            }
        }
    }
}
