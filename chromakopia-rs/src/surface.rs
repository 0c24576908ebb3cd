//! Square surface sizing and text centering.

use crate::layout::{FontSizes, ThreeFontMetrics};

/// Smallest surface side in pixels.
pub const MIN_SURFACE_SIZE: u32 = 800;
/// Smallest padding on each side of the text block.
pub const MIN_PADDING: f32 = 64.0;
/// Baseline shift below the geometric center, as a fraction of the text height.
pub const BASELINE_OFFSET_RATIO: f32 = 0.15;

/// Placement of a text block on a square surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// Side of the square surface in pixels.
    pub side: u32,
    pub required_width: f32,
    pub required_height: f32,
    /// X of the first segment's origin.
    pub start_x: f32,
    /// Alphabetic baseline shared by all segments.
    pub baseline_y: f32,
}

impl SurfaceLayout {
    /// Size a square surface around the measured block and center the text on it.
    pub fn compute(metrics: &ThreeFontMetrics, sizes: &FontSizes, min_side: u32) -> Self {
        let horizontal_padding = MIN_PADDING.max((sizes.middle as f32).round());
        let vertical_padding = MIN_PADDING.max((sizes.first as f32 * 0.5).round());
        let text_height = sizes.text_height() as f32;

        let required_width = metrics.total_width + horizontal_padding * 2.0;
        let required_height = text_height + vertical_padding * 2.0;
        let side = required_width
            .max(required_height)
            .max(min_side as f32)
            .ceil() as u32;

        let side_f = side as f32;
        Self {
            side,
            required_width,
            required_height,
            start_x: ((side_f - metrics.total_width) / 2.0).round(),
            baseline_y: (side_f / 2.0 + text_height * BASELINE_OFFSET_RATIO).round(),
        }
    }

    /// Human-readable `WIDTH×HEIGHT` label.
    pub fn resolution_label(&self) -> String {
        resolution_label(self.side, self.side)
    }
}

pub fn resolution_label(width: u32, height: u32) -> String {
    format!("{}×{}", width, height)
}
