//! Linear gradients for Canvas 2D fills.

use crate::context::parse_color;
use crate::error::{Canvas2dError, Canvas2dResult};

/// A color stop in a gradient.
#[derive(Debug, Clone)]
pub struct GradientStop {
    /// Offset position (0.0 to 1.0).
    pub offset: f64,
    /// Color at this stop.
    pub color: tiny_skia::Color,
}

/// Linear canvas gradient from (x0, y0) to (x1, y1).
#[derive(Debug, Clone)]
pub struct CanvasGradient {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// Color stops, sorted by offset.
    pub stops: Vec<GradientStop>,
}

impl CanvasGradient {
    /// Create a new linear gradient with no stops.
    pub fn new_linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            stops: Vec::new(),
        }
    }

    /// Add a color stop from a CSS color string.
    ///
    /// Offsets outside 0.0-1.0 (or NaN) are rejected without modifying the gradient.
    pub fn add_color_stop(&mut self, offset: f64, color: &str) -> Canvas2dResult<()> {
        if !(0.0..=1.0).contains(&offset) {
            return Err(Canvas2dError::InvalidGradientStop(offset));
        }
        let color = parse_color(color)?;
        self.stops.push(GradientStop { offset, color });
        // Keep stops sorted by offset
        self.stops.sort_by(|a, b| {
            a.offset
                .partial_cmp(&b.offset)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_sorted_by_offset() {
        let mut gradient = CanvasGradient::new_linear(0.0, 0.0, 100.0, 100.0);
        gradient.add_color_stop(1.0, "#2d5016").unwrap();
        gradient.add_color_stop(0.0, "#01823f").unwrap();
        let offsets: Vec<f64> = gradient.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 1.0]);
    }

    #[test]
    fn test_invalid_offset_rejected() {
        let mut gradient = CanvasGradient::new_linear(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            gradient.add_color_stop(1.5, "#000"),
            Err(Canvas2dError::InvalidGradientStop(_))
        ));
        assert!(gradient.add_color_stop(f64::NAN, "#000").is_err());
        assert!(gradient.stops.is_empty());
    }

    #[test]
    fn test_invalid_color_rejected() {
        let mut gradient = CanvasGradient::new_linear(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            gradient.add_color_stop(0.5, "not-a-color"),
            Err(Canvas2dError::ColorParseError(_))
        ));
    }
}
