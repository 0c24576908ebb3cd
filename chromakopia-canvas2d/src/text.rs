//! Text shaping and measurement using cosmic-text.

use crate::font_config::database_has_family;
use crate::font_parser::ParsedFont;
use cosmic_text::{Attrs, Buffer, CacheKeyFlags, Family, FontSystem, Metrics, Shaping};

/// Text metrics returned by measureText().
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the shaped text in pixels.
    pub width: f32,
}

/// Pick the cosmic-text family for a CSS family list.
///
/// The first family present in the database wins; generic keywords always
/// match. Falls back to sans-serif so missing named fonts degrade the way a
/// browser does.
pub(crate) fn resolve_family<'a>(font_system: &FontSystem, families: &'a [String]) -> Family<'a> {
    for family in families {
        match family.to_ascii_lowercase().as_str() {
            "sans-serif" => return Family::SansSerif,
            "serif" => return Family::Serif,
            "monospace" => return Family::Monospace,
            "cursive" => return Family::Cursive,
            "fantasy" => return Family::Fantasy,
            _ if database_has_family(font_system.db(), family) => {
                return Family::Name(family.as_str())
            }
            _ => log::debug!(target: "canvas", "font family {family:?} not available"),
        }
    }
    Family::SansSerif
}

/// Shape `text` with `font` into a single-line buffer.
pub(crate) fn shape_text(
    font_system: &mut FontSystem,
    text: &str,
    font: &ParsedFont,
) -> Buffer {
    let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let family = resolve_family(font_system, &font.families);
    // Unhinted, so outlines scale uniformly with the transform
    let attrs = Attrs::new()
        .family(family)
        .weight(font.weight)
        .style(font.style)
        .cache_key_flags(CacheKeyFlags::DISABLE_HINTING);

    // Unbounded width keeps the text on one line
    buffer.set_size(font_system, None, None);
    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);
    buffer
}

/// Measure text using cosmic-text.
pub fn measure_text(font_system: &mut FontSystem, text: &str, font: &ParsedFont) -> TextMetrics {
    if !can_shape(font_system, text) {
        return TextMetrics::default();
    }
    let buffer = shape_text(font_system, text, font);
    let width = buffer
        .layout_runs()
        .map(|run| run.line_w)
        .fold(0.0, f32::max);
    TextMetrics { width }
}

/// Whether `text` can be shaped: it is non-empty and at least one face is registered.
pub(crate) fn can_shape(font_system: &FontSystem, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if font_system.db().len() == 0 {
        log::warn!(target: "canvas", "No fonts available, skipping text {:?}", text);
        return false;
    }
    true
}
