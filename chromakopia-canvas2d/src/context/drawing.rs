//! Rectangle fills and paint helpers for Canvas2dContext.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use crate::gradient::CanvasGradient;
use crate::style::FillStyle;

impl Canvas2dContext {
    /// Fill a rectangle with the current fill style.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", params.x, params.y, params.width, params.height);
        let Some(path) = rect_path(params) else {
            return;
        };
        let transform = self.state.transform;
        let style = self.state.fill_style.clone();
        let _ = self.with_paint_from_style(style, |ctx, paint| {
            ctx.pixmap
                .fill_path(&path, paint, tiny_skia::FillRule::Winding, transform, None);
        });
    }

    /// Clear a rectangle (set pixels to transparent).
    pub fn clear_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "clearRect {} {} {} {}", params.x, params.y, params.width, params.height);
        let Some(path) = rect_path(params) else {
            return;
        };
        let paint = tiny_skia::Paint {
            blend_mode: tiny_skia::BlendMode::Clear,
            ..Default::default()
        };
        self.pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            self.state.transform,
            None,
        );
    }

    // --- Paint helpers ---

    /// Build a tiny-skia paint for `style` and hand it to `draw`.
    ///
    /// Returns None when the style cannot produce a shader (e.g. a gradient
    /// without stops), in which case nothing is drawn.
    pub(crate) fn with_paint_from_style<R>(
        &mut self,
        style: FillStyle,
        draw: impl for<'a> FnOnce(&mut Self, &tiny_skia::Paint<'a>) -> R,
    ) -> Option<R> {
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };

        match style {
            FillStyle::Color(color) => paint.set_color(color),
            FillStyle::LinearGradient(gradient) => {
                paint.shader = self.create_gradient_shader(&gradient)?;
            }
        }
        Some(draw(self, &paint))
    }

    fn create_gradient_shader(
        &self,
        gradient: &CanvasGradient,
    ) -> Option<tiny_skia::Shader<'static>> {
        if gradient.stops.is_empty() {
            return None;
        }

        let stops: Vec<tiny_skia::GradientStop> = gradient
            .stops
            .iter()
            .map(|stop| tiny_skia::GradientStop::new(stop.offset as f32, stop.color))
            .collect();

        // Gradient coordinates are in user space; the shader maps them through the CTM
        tiny_skia::LinearGradient::new(
            tiny_skia::Point {
                x: gradient.x0,
                y: gradient.y0,
            },
            tiny_skia::Point {
                x: gradient.x1,
                y: gradient.y1,
            },
            stops,
            tiny_skia::SpreadMode::Pad,
            self.state.transform,
        )
    }
}

fn rect_path(params: &RectParams) -> Option<tiny_skia::Path> {
    let rect = tiny_skia::Rect::from_xywh(params.x, params.y, params.width, params.height)?;
    Some(tiny_skia::PathBuilder::from_rect(rect))
}
