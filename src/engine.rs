//! High-level entry point tying a score space to options.
//!
//! [`ConservationEngine`] owns the [`ScoreSpace`] built from a substitution
//! matrix, scores alignments with the configured gap set, and paints the
//! results through the configured gradients.

use std::path::Path;

use crate::alignment::{score_columns, AlignmentColumns, ConservationScores};
use crate::color::Color;
use crate::error::Result;
use crate::gaps::GapSymbols;
use crate::gradient::Gradient;
use crate::matrix::SubstitutionMatrix;
use crate::options::Options;
use crate::score_space::ScoreSpace;

/// Score space + options, ready to score and render alignments.
#[derive(Debug, Clone)]
pub struct ConservationEngine {
    matrix: SubstitutionMatrix,
    space: ScoreSpace,
    gaps: GapSymbols,
    options: Options,
    active_preset: Option<String>,
}

impl ConservationEngine {
    /// Build the score space for `matrix` under `options`.
    ///
    /// # Errors
    ///
    /// [`CscoreError::InvalidOption`](crate::CscoreError::InvalidOption)
    /// for a malformed wildcard or gap set,
    /// [`CscoreError::EmptyAlphabet`](crate::CscoreError::EmptyAlphabet)
    /// if no symbols remain after removing the wildcard.
    pub fn new(matrix: SubstitutionMatrix, options: Options) -> Result<Self> {
        let gaps = options.scoring.gap_symbols()?;
        let space = ScoreSpace::new(&matrix, options.scoring.wildcard_byte()?)?;
        Ok(Self {
            matrix,
            space,
            gaps,
            options,
            active_preset: None,
        })
    }

    /// The score space in use.
    pub fn space(&self) -> &ScoreSpace {
        &self.space
    }

    /// The current options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Name of the preset last loaded or saved, if any.
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// Replace the options, rebuilding the score space if the wildcard
    /// changed.
    ///
    /// # Errors
    ///
    /// Fails like [`ConservationEngine::new`]; the previous state is kept.
    pub fn set_options(&mut self, options: Options) -> Result<()> {
        let gaps = options.scoring.gap_symbols()?;
        let wildcard = options.scoring.wildcard_byte()?;
        if options.scoring.wildcard != self.options.scoring.wildcard {
            self.space = ScoreSpace::new(&self.matrix, wildcard)?;
        }
        self.gaps = gaps;
        self.options = options;
        self.active_preset = None;
        Ok(())
    }

    /// Load a named options preset from `presets_dir`.
    /// Returns true on success.
    pub fn load_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match Options::load(&path).and_then(|opts| self.set_options(opts)) {
            Ok(()) => {
                log::info!("Loaded options preset '{name}'");
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to load options preset '{name}': {e}");
                false
            }
        }
    }

    /// Save the current options as a named preset.
    /// Returns true on success.
    pub fn save_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match self.options.save(&path) {
            Ok(()) => {
                log::info!("Saved options preset '{name}'");
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to save options preset '{name}': {e}");
                false
            }
        }
    }

    /// Score every column of `columns`.
    pub fn score(&self, columns: &AlignmentColumns<'_>) -> ConservationScores {
        score_columns(
            &self.space,
            columns,
            &self.gaps,
            self.options.scoring.parallel,
        )
    }

    /// Paint per-residue divergences into a sequence-major BGRA image of
    /// `n_sequences` rows by `n_positions` columns (4 bytes per pixel).
    ///
    /// # Errors
    ///
    /// [`CscoreError::ShapeMismatch`](crate::CscoreError::ShapeMismatch)
    /// if `pixels` is not exactly that size.
    pub fn render_divergences(
        &self,
        scores: &ConservationScores,
        pixels: &mut [u8],
    ) -> Result<()> {
        let rendering = &self.options.rendering;
        rendering.divergence_gradient.colorize_bytes(
            &scores.divergences_by_sequence(),
            pixels,
            rendering.parallel,
        )
    }

    /// One color per alignment position from the column cscores.
    ///
    /// # Errors
    ///
    /// [`CscoreError::ShapeMismatch`](crate::CscoreError::ShapeMismatch)
    /// if `colors` is not `n_positions` long.
    pub fn render_cscores(
        &self,
        scores: &ConservationScores,
        colors: &mut [Color],
    ) -> Result<()> {
        self.paint(
            &self.options.rendering.cscore_gradient,
            &scores.cscores,
            colors,
        )
    }

    /// One color per sequence from the sequence cscores.
    ///
    /// # Errors
    ///
    /// [`CscoreError::ShapeMismatch`](crate::CscoreError::ShapeMismatch)
    /// if `colors` is not `n_sequences` long.
    pub fn render_sequence_cscores(
        &self,
        scores: &ConservationScores,
        colors: &mut [Color],
    ) -> Result<()> {
        self.paint(
            &self.options.rendering.sequence_gradient,
            &scores.sequence_cscores(),
            colors,
        )
    }

    fn paint(
        &self,
        gradient: &Gradient,
        values: &[f64],
        colors: &mut [Color],
    ) -> Result<()> {
        if self.options.rendering.parallel {
            gradient.par_colorize(values, colors)
        } else {
            gradient.colorize(values, colors)
        }
    }
}
