use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::gradient::Gradient;

fn preset(name: &str) -> Gradient {
    Gradient::preset(name).unwrap_or_default()
}

/// Gradients used to paint conservation results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Rendering", inline)]
#[serde(default)]
pub struct RenderOptions {
    /// Per-residue divergence image gradient.
    #[schemars(title = "Divergence Gradient", with = "String")]
    pub divergence_gradient: Gradient,
    /// Per-column cscore gradient.
    #[schemars(title = "CScore Gradient", with = "String")]
    pub cscore_gradient: Gradient,
    /// Per-sequence cscore gradient.
    #[schemars(title = "Sequence Gradient", with = "String")]
    pub sequence_gradient: Gradient,
    /// Colorize on the rayon pool.
    #[schemars(title = "Parallel")]
    pub parallel: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            divergence_gradient: preset("cscore_residue_divergences"),
            cscore_gradient: preset("cscore_default"),
            sequence_gradient: preset("seq_cscore"),
            parallel: true,
        }
    }
}
