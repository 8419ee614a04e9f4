// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Column conservation scores for multiple sequence alignments.
//!
//! Every symbol of a substitution matrix is treated as a point whose
//! coordinates are its row of scores. A column of an alignment is then a
//! weighted cloud of points; the tighter the cloud around its centroid, the
//! more conserved the column. The crate computes, per column, a cscore in
//! `[0, 1]` and a divergence for every residue, and sums divergences per
//! sequence so whole sequences can be ranked by how well they conform.
//!
//! # Key entry points
//!
//! - [`ScoreSpace`] - the substitution matrix as a metric space
//! - [`score_alignment`] - score every column of an [`AlignmentColumns`]
//! - [`Gradient`] - map scores to [`Color`]s for display
//! - [`ConservationEngine`] - score space, [`Options`] and gradients in one
//!   place, with TOML presets
//!
//! # Example
//!
//! ```
//! use msa_cscore::{
//!     columns_from_rows, AlignmentColumns, ConservationEngine, Options,
//!     SubstitutionMatrix,
//! };
//!
//! let matrix = SubstitutionMatrix::new(
//!     "toy",
//!     b"AL*".to_vec(),
//!     vec![4, -1, -4, -1, 4, -4, -4, -4, 1],
//! )?;
//! let engine = ConservationEngine::new(matrix, Options::default())?;
//!
//! let data = columns_from_rows(&["AL", "AA", "A-"])?;
//! let scores = engine.score(&AlignmentColumns::new(&data, 3, 2)?);
//! assert_eq!(scores.cscores[0], 1.0);
//! assert!(scores.cscores[1] < 1.0);
//! # Ok::<(), msa_cscore::CscoreError>(())
//! ```

pub mod alignment;
pub mod color;
pub mod column;
pub mod engine;
pub mod error;
pub mod gaps;
pub mod gradient;
pub mod matrix;
pub mod options;
pub mod processor;
pub mod score_space;

pub use alignment::{
    columns_from_rows, score_alignment, score_columns, AlignmentColumns,
    ConservationScores,
};
pub use color::Color;
pub use column::ColumnStats;
pub use engine::ConservationEngine;
pub use error::{CscoreError, Result};
pub use gaps::GapSymbols;
pub use gradient::{ColorStop, Gradient};
pub use matrix::SubstitutionMatrix;
pub use options::{Options, RenderOptions, ScoringOptions};
pub use processor::{process_column, ColumnProcessor};
pub use score_space::ScoreSpace;
