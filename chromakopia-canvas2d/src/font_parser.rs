//! CSS font shorthand parsing.
//!
//! Handles the strings the generator hands to the canvas, such as
//! `250px "ChromakopiaType1", sans-serif`, plus the usual optional
//! style and weight prefixes.

use crate::error::{Canvas2dError, Canvas2dResult};
use cosmic_text::{Style, Weight};

/// Parsed font description from a CSS font string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFont {
    /// Font style (normal, italic, oblique).
    pub style: Style,
    /// Font weight (100-900).
    pub weight: Weight,
    /// Font size in pixels.
    pub size_px: f32,
    /// Font families in order of preference.
    pub families: Vec<String>,
}

impl Default for ParsedFont {
    fn default() -> Self {
        Self {
            style: Style::Normal,
            weight: Weight::NORMAL,
            size_px: 10.0,
            families: vec!["sans-serif".to_string()],
        }
    }
}

/// Parse a CSS font string into components.
///
/// Format: `[style] [variant] [weight] size[/line-height] family[, family]*`.
/// An empty string yields the canvas default (`10px sans-serif`).
pub fn parse_font(font_str: &str) -> Canvas2dResult<ParsedFont> {
    let mut remaining = font_str.trim();
    if remaining.is_empty() {
        return Ok(ParsedFont::default());
    }

    let mut result = ParsedFont::default();

    while let Some((keyword, rest)) = next_word(remaining) {
        match keyword {
            "italic" => result.style = Style::Italic,
            "oblique" => result.style = Style::Oblique,
            // normal may be style, variant or weight; small-caps is accepted and ignored
            "normal" | "small-caps" => {}
            "bold" => result.weight = Weight::BOLD,
            "bolder" => result.weight = Weight::EXTRA_BOLD,
            "lighter" => result.weight = Weight::LIGHT,
            other => match parse_numeric_weight(other) {
                Some(weight) => result.weight = weight,
                None => break,
            },
        }
        remaining = rest;
    }

    let (size, rest) = parse_font_size(remaining.trim_start())?;
    result.size_px = size;
    remaining = rest;

    if let Some(rest) = remaining.strip_prefix('/') {
        // Line height has no effect on canvas text
        remaining = rest.trim_start_matches(|c: char| !c.is_whitespace());
    }

    let families = parse_font_families(remaining);
    if !families.is_empty() {
        result.families = families;
    }

    Ok(result)
}

/// Split off the first whitespace-delimited word.
fn next_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

/// Numeric weights are multiples of 100 between 100 and 900.
fn parse_numeric_weight(word: &str) -> Option<Weight> {
    let weight: u16 = word.parse().ok()?;
    ((100..=900).contains(&weight) && weight % 100 == 0).then_some(Weight(weight))
}

/// Parse the font size and its unit, returning the size in pixels.
fn parse_font_size(s: &str) -> Canvas2dResult<(f32, &str)> {
    let num_end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());

    if num_end == 0 {
        return Err(Canvas2dError::FontParseError(format!(
            "Expected font size, got: {}",
            s
        )));
    }

    let size: f32 = s[..num_end].parse().map_err(|_| {
        Canvas2dError::FontParseError(format!("Invalid font size number: {}", &s[..num_end]))
    })?;
    let rest = &s[num_end..];

    let units: [(&str, f32); 5] = [
        ("px", 1.0),
        ("pt", 4.0 / 3.0),
        ("rem", 16.0),
        ("em", 16.0),
        ("%", 0.16),
    ];
    for (unit, multiplier) in units {
        if let Some(after) = rest.strip_prefix(unit) {
            return Ok((size * multiplier, after));
        }
    }

    // Unitless sizes are treated as pixels
    Ok((size, rest))
}

/// Parse a comma-separated family list, honoring single or double quotes.
fn parse_font_families(s: &str) -> Vec<String> {
    s.split(',')
        .map(|family| {
            family
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .trim()
                .to_string()
        })
        .filter(|family| !family.is_empty())
        .collect()
}
