//! Painting the three segments onto a surface.

use crate::layout::{split_segments, FontSizes, Segment, ThreeFontMetrics};
use chromakopia_canvas2d::Canvas2dContext;
use log::warn;

/// A surface that can fill left-aligned, alphabetic-baseline text.
pub trait TextPainter {
    fn fill_segment(&mut self, font: &str, text: &str, x: f32, y: f32);
}

impl TextPainter for Canvas2dContext {
    fn fill_segment(&mut self, font: &str, text: &str, x: f32, y: f32) {
        if let Err(err) = self.set_font(font) {
            warn!("Keeping previous font for painting: {}", err);
        }
        self.fill_text(text, x, y);
    }
}

/// Paint `text` left to right starting at `(start_x, baseline_y)`.
///
/// The cursor advances by `first_width + spacing_offset` after First and by
/// `middle_width` after Middle. The Last character is only painted when
/// `text` has more than one character, even though the layout measured it.
pub fn paint_three_font_text(
    painter: &mut impl TextPainter,
    text: &str,
    start_x: f32,
    baseline_y: f32,
    sizes: &FontSizes,
    metrics: &ThreeFontMetrics,
) {
    let Some((first, _, last)) = split_segments(text) else {
        return;
    };
    let mut x = start_x;

    painter.fill_segment(
        &Segment::First.font(sizes.first),
        first.encode_utf8(&mut [0; 4]),
        x,
        baseline_y,
    );
    x += metrics.first_width + metrics.spacing_offset;

    if !metrics.middle_text.is_empty() {
        painter.fill_segment(
            &Segment::Middle.font(sizes.middle),
            &metrics.middle_text,
            x,
            baseline_y,
        );
        x += metrics.middle_width;
    }

    if text.chars().nth(1).is_some() {
        painter.fill_segment(
            &Segment::Last.font(sizes.last),
            last.encode_utf8(&mut [0; 4]),
            x,
            baseline_y,
        );
    }
}
