//! Crate-level error types.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CscoreError>;

/// Errors produced by the cscore crate.
///
/// Only configuration-time problems surface as errors. Per-column data
/// anomalies (unrecognized symbols, all-gap columns, out-of-range values)
/// are handled by fallback values and never reach this type.
#[derive(Debug)]
pub enum CscoreError {
    /// No symbols are left in the alphabet once the wildcard is removed.
    EmptyAlphabet,
    /// The score table is not `alphabet × alphabet` entries long.
    MatrixShape {
        /// Number of alphabet symbols.
        alphabet: usize,
        /// Number of entries in the score table.
        scores: usize,
    },
    /// The same symbol appears twice in a matrix alphabet.
    DuplicateSymbol(u8),
    /// `n_sequences × n_positions` does not fit in `usize`.
    DimensionOverflow {
        /// Declared number of sequences.
        n_sequences: usize,
        /// Declared number of positions.
        n_positions: usize,
    },
    /// A caller-supplied buffer disagrees with the declared dimensions.
    ShapeMismatch {
        /// Which buffer was inconsistent.
        what: &'static str,
        /// Length implied by the declared dimensions.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
    /// A gradient could not be built or parsed.
    InvalidGradient(String),
    /// A color string could not be parsed.
    InvalidColor(String),
    /// An option value is out of its accepted domain.
    InvalidOption {
        /// Dotted option path, e.g. `scoring.wildcard`.
        key: &'static str,
        /// The rejected value.
        value: String,
        /// What the value must look like.
        reason: &'static str,
    },
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for CscoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAlphabet => {
                write!(f, "substitution matrix has an empty alphabet")
            }
            Self::MatrixShape { alphabet, scores } => write!(
                f,
                "score table has {scores} entries, \
                 expected {alphabet}x{alphabet}"
            ),
            Self::DuplicateSymbol(symbol) => write!(
                f,
                "symbol '{}' appears more than once in the alphabet",
                symbol.escape_ascii()
            ),
            Self::DimensionOverflow {
                n_sequences,
                n_positions,
            } => write!(
                f,
                "{n_sequences} sequences x {n_positions} positions \
                 overflows the address space"
            ),
            Self::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "{what} has length {actual}, expected {expected}"
            ),
            Self::InvalidGradient(msg) => write!(f, "invalid gradient: {msg}"),
            Self::InvalidColor(msg) => write!(f, "invalid color: {msg}"),
            Self::InvalidOption { key, value, reason } => {
                write!(f, "invalid {key} {value:?}: {reason}")
            }
            Self::OptionsParse(msg) => write!(f, "options parse error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CscoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CscoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Fail with [`CscoreError::ShapeMismatch`] unless `actual == expected`.
pub(crate) fn check_len(
    what: &'static str,
    expected: usize,
    actual: usize,
) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CscoreError::ShapeMismatch {
            what,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_message_names_buffer() {
        let err = check_len("divergence buffer", 10, 8).unwrap_err();
        assert_eq!(
            err.to_string(),
            "divergence buffer has length 8, expected 10"
        );
    }

    #[test]
    fn overflow_names_both_dimensions() {
        let err = CscoreError::DimensionOverflow {
            n_sequences: usize::MAX,
            n_positions: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains(&usize::MAX.to_string()));
        assert!(msg.contains("2 positions"));
    }

    #[test]
    fn invalid_option_quotes_value() {
        let err = CscoreError::InvalidOption {
            key: "scoring.wildcard",
            value: "XY".to_owned(),
            reason: "must be at most one ASCII character",
        };
        assert_eq!(
            err.to_string(),
            "invalid scoring.wildcard \"XY\": \
             must be at most one ASCII character"
        );
    }

    #[test]
    fn duplicate_symbol_is_escaped() {
        let err = CscoreError::DuplicateSymbol(b'\t');
        assert!(err.to_string().contains("\\t"));
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error;
        let err: CscoreError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
    }
}
