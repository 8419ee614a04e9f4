//! Continuous value → color mapping through a piecewise-linear gradient.
//!
//! A [`Gradient`] is a list of color stops sorted by offset. Values below
//! the first stop take its color, values at or above the last stop take the
//! last color, and everything in between blends linearly between the two
//! bracketing stops.
//!
//! Built-in gradients used for conservation displays are available through
//! [`Gradient::preset`].

use std::fmt;
use std::str::FromStr;

use rayon::prelude::{
    IndexedParallelIterator, IntoParallelRefIterator,
    IntoParallelRefMutIterator, ParallelIterator,
};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{check_len, CscoreError, Result};

/// Below this many values `par_colorize` stays on the calling thread.
const PAR_MIN_LEN: usize = 4096;

/// A single `(offset, color)` gradient stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position of the stop on the input axis.
    pub offset: f64,
    /// Color at that position.
    pub color: Color,
}

impl ColorStop {
    /// Create a stop.
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Ordered color stops defining a piecewise-linear color ramp.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gradient {
    stops: Vec<ColorStop>,
}

impl Gradient {
    /// Names accepted by [`Gradient::preset`].
    pub const PRESETS: [&'static str; 5] = [
        "cscore_default",
        "cscore_residue_divergences",
        "seq_cscore",
        "jet",
        "ryg",
    ];

    /// Build a gradient, sorting stops by offset. Stops sharing an offset
    /// keep their relative order.
    ///
    /// # Errors
    ///
    /// [`CscoreError::InvalidGradient`] if any offset is not finite.
    pub fn new(stops: impl IntoIterator<Item = ColorStop>) -> Result<Self> {
        let mut stops: Vec<ColorStop> = stops.into_iter().collect();
        if let Some(bad) = stops.iter().find(|stop| !stop.offset.is_finite()) {
            return Err(CscoreError::InvalidGradient(format!(
                "stop offset {} is not finite",
                bad.offset
            )));
        }
        if !stops.windows(2).all(|w| w[0].offset <= w[1].offset) {
            log::warn!("gradient stops out of order, sorting by offset");
            stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        }
        Ok(Self { stops })
    }

    /// Insert one stop, keeping the stops sorted.
    ///
    /// # Errors
    ///
    /// [`CscoreError::InvalidGradient`] if `offset` is not finite.
    pub fn add_stop(&mut self, offset: f64, color: Color) -> Result<()> {
        if !offset.is_finite() {
            return Err(CscoreError::InvalidGradient(format!(
                "stop offset {offset} is not finite"
            )));
        }
        let at = self.stops.partition_point(|stop| stop.offset <= offset);
        self.stops.insert(at, ColorStop::new(offset, color));
        Ok(())
    }

    /// The stops in ascending offset order.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Whether the gradient has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Color for `value`, or `None` for an empty gradient.
    pub fn color_at(&self, value: f64) -> Option<Color> {
        (!self.stops.is_empty()).then(|| sample(&self.stops, value))
    }

    /// Paint one pixel per value. `image` is left untouched when the
    /// gradient is empty.
    ///
    /// # Errors
    ///
    /// [`CscoreError::ShapeMismatch`] if `image` and `values` differ in
    /// length.
    pub fn colorize(&self, values: &[f64], image: &mut [Color]) -> Result<()> {
        check_len("image buffer", values.len(), image.len())?;
        if self.stops.is_empty() {
            return Ok(());
        }
        for (&value, pixel) in values.iter().zip(image.iter_mut()) {
            *pixel = sample(&self.stops, value);
        }
        Ok(())
    }

    /// [`colorize`](Self::colorize) spread over the rayon pool.
    ///
    /// # Errors
    ///
    /// Same as [`colorize`](Self::colorize).
    pub fn par_colorize(
        &self,
        values: &[f64],
        image: &mut [Color],
    ) -> Result<()> {
        check_len("image buffer", values.len(), image.len())?;
        if self.stops.is_empty() {
            return Ok(());
        }
        let stops = self.stops.as_slice();
        values
            .par_iter()
            .zip(image.par_iter_mut())
            .with_min_len(PAR_MIN_LEN)
            .for_each(|(&value, pixel)| *pixel = sample(stops, value));
        Ok(())
    }

    /// Paint into a raw 4-bytes-per-pixel BGRA buffer.
    ///
    /// # Errors
    ///
    /// [`CscoreError::ShapeMismatch`] unless `pixels` holds exactly four
    /// bytes per value.
    pub fn colorize_bytes(
        &self,
        values: &[f64],
        pixels: &mut [u8],
        parallel: bool,
    ) -> Result<()> {
        let expected = values.len() * size_of::<Color>();
        let actual = pixels.len();
        check_len("pixel buffer", expected, actual)?;
        let image: &mut [Color] = bytemuck::try_cast_slice_mut(pixels)
            .map_err(|_| CscoreError::ShapeMismatch {
                what: "pixel buffer",
                expected,
                actual,
            })?;
        if parallel {
            self.par_colorize(values, image)
        } else {
            self.colorize(values, image)
        }
    }

    /// A built-in gradient by name (see [`Gradient::PRESETS`]).
    pub fn preset(name: &str) -> Option<Self> {
        let stops = match name {
            "cscore_default" => vec![
                ColorStop::new(0.0, Color::CLUSTALX_RED),
                ColorStop::new(1.0, Color::CLUSTALX_YELLOW),
                ColorStop::new(1.0, Color::rgb(138, 212, 0)),
            ],
            "cscore_residue_divergences" => vec![
                ColorStop::new(0.5, Color::CLUSTALX_RED.with_alpha(0.0)),
                ColorStop::new(1.0, Color::CLUSTALX_RED),
            ],
            "seq_cscore" => vec![
                ColorStop::new(0.6, Color::CLUSTALX_RED),
                ColorStop::new(0.9, Color::CLUSTALX_YELLOW),
            ],
            "jet" => vec![
                ColorStop::new(0.0, Color::rgb(0, 0, 255)),
                ColorStop::new(0.33, Color::rgb(0, 255, 255)),
                ColorStop::new(0.66, Color::rgb(255, 255, 0)),
                ColorStop::new(0.85, Color::rgb(255, 0, 0)),
                ColorStop::new(1.0, Color::rgb(139, 0, 0)),
            ],
            "ryg" => vec![
                ColorStop::new(0.0, Color::rgb(255, 0, 0)),
                ColorStop::new(0.5, Color::rgb(255, 255, 0)),
                ColorStop::new(1.0, Color::rgb(0, 255, 0)),
            ],
            _ => return None,
        };
        Some(Self { stops })
    }
}

/// Map `value` through non-empty, sorted `stops`.
///
/// NaN falls outside every bracket and takes the first stop's color.
#[inline]
fn sample(stops: &[ColorStop], value: f64) -> Color {
    let first = stops[0];
    let last = stops[stops.len() - 1];
    if value >= last.offset {
        return last.color;
    }
    if value < first.offset || value.is_nan() {
        return first.color;
    }
    for k in (0..stops.len() - 1).rev() {
        let low = stops[k];
        if low.offset > value {
            continue;
        }
        if low.offset == value {
            return low.color;
        }
        let high = stops[k + 1];
        let amount = (value - low.offset) / (high.offset - low.offset);
        return low.color.blend(high.color, amount);
    }
    first.color
}

impl FromStr for Gradient {
    type Err = CscoreError;

    /// Parse `offset:color/offset:color/...`. Empty input is the empty
    /// gradient; a bare preset name is also accepted.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        if let Some(preset) = Self::preset(s) {
            return Ok(preset);
        }
        let stops = s
            .split('/')
            .map(|part| {
                let (offset, color) = part.split_once(':').ok_or_else(|| {
                    CscoreError::InvalidGradient(format!(
                        "stop '{part}' is not offset:color"
                    ))
                })?;
                let offset = offset.trim().parse::<f64>().map_err(|e| {
                    CscoreError::InvalidGradient(format!(
                        "bad offset '{offset}': {e}"
                    ))
                })?;
                Ok(ColorStop::new(offset, color.parse()?))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(stops)
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stop) in self.stops.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{:?}:{}", stop.offset, stop.color)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Gradient {
    type Error = CscoreError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Gradient> for String {
    fn from(gradient: Gradient) -> Self {
        gradient.to_string()
    }
}
