//! Drawing state that can be saved and restored.

use crate::font_parser::ParsedFont;
use crate::style::FillStyle;
use tiny_skia::Transform;

/// Drawing state that can be saved and restored.
#[derive(Debug, Clone)]
pub struct DrawingState {
    pub fill_style: FillStyle,
    pub font: ParsedFont,
    pub transform: Transform,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: FillStyle::default(),
            font: ParsedFont::default(),
            transform: Transform::identity(),
        }
    }
}
