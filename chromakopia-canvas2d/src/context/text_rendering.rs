//! Text operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use crate::font_parser::parse_font;
use crate::text::{can_shape, shape_text, TextMetrics};
use cosmic_text::Command;
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Set the font from a CSS font string.
    ///
    /// On a parse error the previous font is kept.
    pub fn set_font(&mut self, font: &str) -> Canvas2dResult<()> {
        self.state.font = parse_font(font)?;
        Ok(())
    }

    /// Measure text with the current font.
    ///
    /// Widths are in user space: the current transform does not affect them.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        crate::text::measure_text(&mut self.font_system, text, &self.state.font)
    }

    /// Fill text with its left edge at `x` and its alphabetic baseline at `y`.
    ///
    /// Glyphs are rendered as vector outlines, so a scaled transform yields
    /// sharp text at the higher resolution rather than an upscaled bitmap.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        if !can_shape(&self.font_system, text) {
            return;
        }

        let font = self.state.font.clone();
        let buffer = shape_text(&mut self.font_system, text, &font);
        let transform = self.state.transform;

        let style = self.state.fill_style.clone();
        let _ = self.with_paint_from_style(style, |ctx, paint| {
            for run in buffer.layout_runs() {
                for glyph in run.glyphs.iter() {
                    let physical_glyph = glyph.physical((x, y), 1.0);

                    // Floating-point glyph origin keeps sub-pixel precision
                    let glyph_x = x + glyph.x + glyph.font_size * glyph.x_offset;
                    let glyph_y = y + glyph.y - glyph.font_size * glyph.y_offset;

                    let Some(commands) = ctx
                        .swash_cache
                        .get_outline_commands(&mut ctx.font_system, physical_glyph.cache_key)
                    else {
                        continue;
                    };

                    // Font outlines are y-up; the canvas is y-down
                    let mut path_builder = tiny_skia::PathBuilder::new();
                    for cmd in commands {
                        match cmd {
                            Command::MoveTo(p) => path_builder.move_to(p.x, -p.y),
                            Command::LineTo(p) => path_builder.line_to(p.x, -p.y),
                            Command::QuadTo(ctrl, end) => {
                                path_builder.quad_to(ctrl.x, -ctrl.y, end.x, -end.y)
                            }
                            Command::CurveTo(c1, c2, end) => {
                                path_builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
                            }
                            Command::Close => path_builder.close(),
                        }
                    }

                    if let Some(path) = path_builder.finish() {
                        let glyph_transform =
                            Transform::from_translate(glyph_x, glyph_y).post_concat(transform);
                        ctx.pixmap.fill_path(
                            &path,
                            paint,
                            tiny_skia::FillRule::Winding,
                            glyph_transform,
                            None,
                        );
                    }
                }
            }
        });
    }
}
