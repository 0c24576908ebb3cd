//! Hex color parsing.

use crate::error::{ChromakopiaError, ChromakopiaResult};
use chromakopia_canvas2d::CanvasColor;
use serde::{Deserialize, Serialize};

/// The signature Chromakopia green, used as the default text color.
pub const AUTHENTIC_GREEN: &str = "#01823f";

/// Where a picked color came from.
///
/// Only the color picker is disabled by the authentic-green lock; presets and
/// the eyedropper still change the color while it is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSource {
    #[default]
    Picker,
    Preset,
    Eyedropper,
}

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// This color with a floating-point alpha, as a canvas color.
    pub fn with_alpha(self, alpha: f32) -> CanvasColor {
        CanvasColor::from_rgb8_alpha(self.r, self.g, self.b, alpha)
    }
}

/// Parse a `#rgb` or `#rrggbb` color. The leading `#` is optional.
///
/// Three-digit colors expand each nibble by duplication, so `#abc` is `#aabbcc`.
pub fn hex_to_rgb(hex: &str) -> ChromakopiaResult<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let invalid = || ChromakopiaError::InvalidColor(hex.to_string());

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };

    let num = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
    Ok(Rgb {
        r: ((num >> 16) & 0xff) as u8,
        g: ((num >> 8) & 0xff) as u8,
        b: (num & 0xff) as u8,
    })
}
