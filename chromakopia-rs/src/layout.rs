//! Three-segment text layout.
//!
//! Text is split into a First character, a Middle run, and a Last character,
//! each set in its own typeface and size. Each segment is measured with the
//! real font, and the Middle run is measured as one string so the kerning
//! between its characters is preserved.

use chromakopia_canvas2d::Canvas2dContext;
use log::warn;

/// Smallest base font size accepted from the size control.
pub const MIN_FONT_SIZE: u32 = 24;
/// Largest base font size accepted from the size control.
pub const MAX_FONT_SIZE: u32 = 160;
/// First and Last letters are this many times larger than the Middle run.
pub const OUTER_SCALE: f32 = 2.5;

/// One of the three differently styled spans of the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    First,
    Middle,
    Last,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::First, Segment::Middle, Segment::Last];

    /// Font family registered for this segment.
    pub fn family(self) -> &'static str {
        match self {
            Segment::First => "ChromakopiaType1",
            Segment::Middle => "ChromakopiaType2",
            Segment::Last => "ChromakopiaType3",
        }
    }

    /// CSS font string for this segment at `size` pixels.
    pub fn font(self, size: u32) -> String {
        format!("{}px \"{}\", sans-serif", size, self.family())
    }
}

/// Pixel sizes of the three segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSizes {
    pub first: u32,
    pub middle: u32,
    pub last: u32,
}

impl FontSizes {
    /// Derive segment sizes from the base size control.
    ///
    /// The base is clamped to 24..=160 and becomes the Middle size; First and
    /// Last are 2.5 times that, rounded.
    pub fn from_base(base: u32) -> Self {
        let middle = base.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        let outer = (middle as f32 * OUTER_SCALE).round() as u32;
        Self {
            first: outer,
            middle,
            last: outer,
        }
    }

    pub fn get(&self, segment: Segment) -> u32 {
        match segment {
            Segment::First => self.first,
            Segment::Middle => self.middle,
            Segment::Last => self.last,
        }
    }

    /// Height of the tallest segment.
    pub fn text_height(&self) -> u32 {
        self.first.max(self.last)
    }
}

/// Measures the advance width of text in a given CSS font.
pub trait TextMeasurer {
    fn measure_width(&mut self, font: &str, text: &str) -> f32;
}

impl TextMeasurer for Canvas2dContext {
    fn measure_width(&mut self, font: &str, text: &str) -> f32 {
        if let Err(err) = self.set_font(font) {
            warn!("Keeping previous font for measurement: {}", err);
        }
        self.measure_text(text).width
    }
}

/// Widths of the three segments and the spacing between First and Middle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreeFontMetrics {
    pub first_width: f32,
    pub middle_width: f32,
    pub last_width: f32,
    pub spacing_offset: f32,
    pub total_width: f32,
    pub middle_text: String,
}

/// The First, Middle and Last parts of `text`, split on characters.
///
/// A single character is both First and Last with an empty Middle.
pub fn split_segments(text: &str) -> Option<(char, String, char)> {
    let mut chars = text.chars();
    let first = chars.next()?;
    let last = chars.next_back().unwrap_or(first);
    Some((first, chars.collect(), last))
}

/// Measure the three segments of `text` and the total width of the block.
///
/// `spacing_multiplier` scales the Middle size into the gap inserted after
/// First; there is no gap between Middle and Last. Empty text measures as
/// all zeros.
pub fn compute_layout(
    measurer: &mut impl TextMeasurer,
    text: &str,
    sizes: &FontSizes,
    spacing_multiplier: f32,
) -> ThreeFontMetrics {
    let Some((first, middle_text, last)) = split_segments(text) else {
        return ThreeFontMetrics::default();
    };

    let first_width = measurer.measure_width(
        &Segment::First.font(sizes.first),
        first.encode_utf8(&mut [0; 4]),
    );
    let middle_width = if middle_text.is_empty() {
        0.0
    } else {
        measurer.measure_width(&Segment::Middle.font(sizes.middle), &middle_text)
    };
    let last_width = measurer.measure_width(
        &Segment::Last.font(sizes.last),
        last.encode_utf8(&mut [0; 4]),
    );

    let spacing_offset = (sizes.middle as f32 * spacing_multiplier).round();
    ThreeFontMetrics {
        first_width,
        middle_width,
        last_width,
        spacing_offset,
        total_width: first_width + spacing_offset + middle_width + last_width,
        middle_text,
    }
}
