//! Scoring and rendering options with TOML preset support.
//!
//! Options serialize to/from TOML so hosts can keep named presets on disk.
//! Gradients are written in their `offset:color/offset:color` string form.

mod rendering;
mod scoring;

use std::path::Path;

pub use rendering::RenderOptions;
use schemars::JsonSchema;
pub use scoring::ScoringOptions;
use serde::{Deserialize, Serialize};

use crate::error::CscoreError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[rendering]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Column classification and scoring.
    pub scoring: ScoringOptions,
    /// Gradients for the result images.
    pub rendering: RenderOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Check values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// [`CscoreError::InvalidOption`] naming the first bad value.
    pub fn validate(&self) -> Result<(), CscoreError> {
        self.scoring.validate()
    }

    /// Load and validate options from a TOML file. Missing fields use
    /// defaults.
    ///
    /// # Errors
    ///
    /// [`CscoreError::Io`] if the file cannot be read,
    /// [`CscoreError::OptionsParse`] if it is not valid options TOML,
    /// [`CscoreError::InvalidOption`] if a value is out of range.
    pub fn load(path: &Path) -> Result<Self, CscoreError> {
        let content = std::fs::read_to_string(path)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| CscoreError::OptionsParse(e.to_string()))?;
        options.validate()?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`CscoreError::OptionsParse`] on serialization failure,
    /// [`CscoreError::Io`] if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), CscoreError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CscoreError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(CscoreError::Io)
    }

    /// Names of the `*.toml` presets in `dir`, sorted. A missing or
    /// unreadable directory has no presets.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|path| {
                path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
            })
            .collect();
        names.sort_unstable();
        names
    }
}
