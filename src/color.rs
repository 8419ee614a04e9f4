//! 4-channel byte colors laid out for ARGB32 pixel buffers.
//!
//! [`Color`] stores blue, green, red, alpha in that byte order, matching a
//! little-endian ARGB32 image row, so a caller's `&mut [u8]` pixel buffer
//! can be viewed as `&mut [Color]` through `bytemuck` without copying.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};

use crate::error::CscoreError;

/// A BGRA byte color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Color {
    /// Blue channel.
    pub b: u8,
    /// Green channel.
    pub g: u8,
    /// Red channel.
    pub r: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Neutral background gray.
    pub const BACKGROUND_GRAY: Color = Color::rgb(215, 215, 215);

    /// ClustalX hydrophobic blue.
    pub const CLUSTALX_BLUE: Color = Color::rgb(25, 127, 229);
    /// ClustalX aromatic cyan.
    pub const CLUSTALX_CYAN: Color = Color::rgb(25, 178, 178);
    /// ClustalX polar green.
    pub const CLUSTALX_GREEN: Color = Color::rgb(25, 204, 25);
    /// ClustalX acidic magenta.
    pub const CLUSTALX_MAGENTA: Color = Color::rgb(204, 76, 204);
    /// ClustalX glycine orange.
    pub const CLUSTALX_ORANGE: Color = Color::rgb(229, 153, 76);
    /// ClustalX cysteine pink.
    pub const CLUSTALX_PINK: Color = Color::rgb(229, 127, 127);
    /// ClustalX basic red.
    pub const CLUSTALX_RED: Color = Color::rgb(229, 51, 25);
    /// ClustalX proline yellow.
    pub const CLUSTALX_YELLOW: Color = Color::rgb(204, 204, 0);

    /// Opaque color from red, green, blue.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r, a: 255 }
    }

    /// Color from red, green, blue, alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Channels in memory order (blue, green, red, alpha).
    #[inline]
    pub const fn channels(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    /// Inverse of [`channels`](Self::channels).
    #[inline]
    pub const fn from_channels([b, g, r, a]: [u8; 4]) -> Self {
        Self { b, g, r, a }
    }

    /// Same color with alpha scaled by `factor` (clamped to `[0, 1]`).
    #[must_use]
    pub fn with_alpha(self, factor: f64) -> Self {
        Self {
            a: (f64::from(self.a) * factor.clamp(0.0, 1.0)) as u8,
            ..self
        }
    }

    /// Per-channel linear blend: `self · (1 - amount) + other · amount`,
    /// truncated to bytes.
    #[inline]
    #[must_use]
    pub fn blend(self, other: Color, amount: f64) -> Self {
        let keep = 1.0 - amount;
        let a = self.channels();
        let b = other.channels();
        let mut out = [0u8; 4];
        for ((o, &x), &y) in out.iter_mut().zip(&a).zip(&b) {
            *o = (f64::from(x) * keep + f64::from(y) * amount) as u8;
        }
        Self::from_channels(out)
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "red4" => Self::rgb(139, 0, 0),
            "green" => Self::rgb(0, 255, 0),
            "blue" => Self::rgb(0, 0, 255),
            "cyan" => Self::rgb(0, 255, 255),
            "magenta" => Self::rgb(255, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "gray" | "grey" => Self::rgb(190, 190, 190),
            "transparent" => Self::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }
}

/// Scale a `digits`-wide hex channel to 8 bits, rounding.
fn parse_channel(hex: &str, digits: u32) -> Option<u8> {
    let value = u32::from_str_radix(hex, 16).ok()?;
    let max = 16_u32.pow(digits) - 1;
    u8::try_from((value * 255 + max / 2) / max).ok()
}

fn parse_hex(body: &str, alpha: Option<&str>) -> Option<Color> {
    if !body.is_ascii()
        || body.is_empty()
        || body.len() % 3 != 0
        || body.len() > 12
    {
        return None;
    }
    let width = body.len() / 3;
    let digits = width as u32;
    let r = parse_channel(&body[..width], digits)?;
    let g = parse_channel(&body[width..2 * width], digits)?;
    let b = parse_channel(&body[2 * width..], digits)?;
    let a = match alpha {
        None => 255,
        Some(hex) if hex.len() == width && hex.is_ascii() => {
            parse_channel(hex, digits)?
        }
        Some(_) => return None,
    };
    Some(Color::rgba(r, g, b, a))
}

/// A color name, optionally followed by an alpha fraction in `[0, 1]`.
fn parse_named(name: &str, alpha: Option<&str>) -> Option<Color> {
    let base = Color::named(name)?;
    let Some(fraction) = alpha else {
        return Some(base);
    };
    let fraction = fraction.parse::<f64>().ok()?;
    Some(Color {
        a: (fraction.clamp(0.0, 1.0) * 255.0) as u8,
        ..base
    })
}

impl FromStr for Color {
    type Err = CscoreError;

    /// Parse `#rgb`, `#rrggbb`, `#rrrgggbbb` or `#rrrrggggbbbb`, optionally
    /// followed by `:alpha` in the same hex width, or a color name with an
    /// optional `:alpha` fraction.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (color, alpha) = match s.split_once(':') {
            Some((color, alpha)) => (color, Some(alpha)),
            None => (s, None),
        };
        let parsed = match color.strip_prefix('#') {
            Some(body) => parse_hex(body, alpha),
            None => parse_named(color, alpha),
        };
        parsed.ok_or_else(|| CscoreError::InvalidColor(s.to_owned()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, ":{:02x}", self.a)?;
        }
        Ok(())
    }
}
