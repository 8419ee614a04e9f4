use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CscoreError, Result};
use crate::gaps::{GapSymbols, DEFAULT_GAP_SYMBOLS};

/// How columns are classified and scored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Scoring", inline)]
#[serde(default)]
pub struct ScoringOptions {
    /// ASCII characters treated as alignment gaps.
    #[schemars(title = "Gap Symbols")]
    pub gap_symbols: String,
    /// Matrix symbol excluded from the score space: one ASCII character,
    /// or empty for none.
    #[schemars(title = "Wildcard", length(max = 1))]
    pub wildcard: String,
    /// Score columns on the rayon pool.
    #[schemars(title = "Parallel")]
    pub parallel: bool,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            gap_symbols: DEFAULT_GAP_SYMBOLS.to_owned(),
            wildcard: "*".to_owned(),
            parallel: true,
        }
    }
}

impl ScoringOptions {
    /// Check every value without building anything.
    ///
    /// # Errors
    ///
    /// [`CscoreError::InvalidOption`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        let _ = self.gap_symbols()?;
        let _ = self.wildcard_byte()?;
        Ok(())
    }

    /// Lookup table built from the `gap_symbols` string.
    ///
    /// # Errors
    ///
    /// [`CscoreError::InvalidOption`] if the string holds non-ASCII
    /// characters.
    pub fn gap_symbols(&self) -> Result<GapSymbols> {
        if !self.gap_symbols.is_ascii() {
            return Err(CscoreError::InvalidOption {
                key: "scoring.gap_symbols",
                value: self.gap_symbols.clone(),
                reason: "must contain only ASCII characters",
            });
        }
        Ok(GapSymbols::new(self.gap_symbols.as_bytes()))
    }

    /// The wildcard as a byte, `None` when it is empty.
    ///
    /// # Errors
    ///
    /// [`CscoreError::InvalidOption`] unless the wildcard is empty or a
    /// single ASCII character.
    pub fn wildcard_byte(&self) -> Result<Option<u8>> {
        match self.wildcard.as_bytes() {
            [] => Ok(None),
            [symbol] if symbol.is_ascii() => Ok(Some(*symbol)),
            _ => Err(CscoreError::InvalidOption {
                key: "scoring.wildcard",
                value: self.wildcard.clone(),
                reason: "must be empty or one ASCII character",
            }),
        }
    }
}
