//! Preview and export rendering.

use crate::background::paint_background;
use crate::config::GeneratorConfig;
use crate::error::ChromakopiaResult;
use crate::fonts::LoadedFonts;
use crate::layout::{compute_layout, FontSizes, ThreeFontMetrics};
use crate::paint::paint_three_font_text;
use crate::state::GeneratorState;
use crate::surface::{resolution_label, SurfaceLayout};
use chromakopia_canvas2d::{Canvas2dContext, ResolvedFontConfig};
use log::debug;

/// Layout of one rendered frame, in preview (logical) pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub sizes: FontSizes,
    pub metrics: ThreeFontMetrics,
    pub surface: SurfaceLayout,
}

/// Owns the preview surface and the font database shared with export surfaces.
pub struct Renderer {
    fonts: ResolvedFontConfig,
    preview: Canvas2dContext,
    min_side: u32,
    export_scale: u32,
    export_ppi: f32,
}

impl Renderer {
    pub fn new(config: &GeneratorConfig, fonts: &LoadedFonts) -> ChromakopiaResult<Self> {
        let side = config.min_surface_size.max(1);
        let preview = Canvas2dContext::with_resolved(side, side, &fonts.resolved)?;
        Ok(Self {
            fonts: fonts.resolved.clone(),
            preview,
            min_side: config.min_surface_size,
            export_scale: config.export_scale(),
            export_ppi: config.export_ppi,
        })
    }

    /// The preview surface as last rendered.
    pub fn preview(&self) -> &Canvas2dContext {
        &self.preview
    }

    /// `WIDTH×HEIGHT` of the preview surface.
    pub fn resolution_label(&self) -> String {
        resolution_label(self.preview.width(), self.preview.height())
    }

    /// Measure the current text and size the square surface around it.
    pub fn layout(&mut self, state: &GeneratorState) -> Frame {
        let sizes = state.font_sizes();
        let metrics = compute_layout(
            &mut self.preview,
            &state.layout_text(),
            &sizes,
            state.spacing_multiplier(),
        );
        let surface = SurfaceLayout::compute(&metrics, &sizes, self.min_side);
        Frame {
            sizes,
            metrics,
            surface,
        }
    }

    /// Re-render the preview, resizing it when the required side changed.
    pub fn render_preview(&mut self, state: &GeneratorState) -> ChromakopiaResult<Frame> {
        let frame = self.layout(state);
        let side = frame.surface.side;
        if side != self.preview.width() || side != self.preview.height() {
            self.preview.resize(side, side)?;
        }
        draw_frame(&mut self.preview, state, &frame)?;
        debug!("Rendered preview {}", self.resolution_label());
        Ok(frame)
    }

    /// PNG of the preview surface.
    pub fn preview_png(&self) -> ChromakopiaResult<Vec<u8>> {
        Ok(self.preview.to_png(Some(self.export_ppi))?)
    }

    /// Render the same frame onto a surface `export_scale` times larger and encode it.
    ///
    /// Layout stays in preview units; only the surface transform is scaled.
    pub fn export_png(&mut self, state: &GeneratorState) -> ChromakopiaResult<Vec<u8>> {
        let frame = self.layout(state);
        let scale = self.export_scale;
        // Saturating, so an overflowing scale is rejected as an invalid dimension
        let side = frame.surface.side.saturating_mul(scale);

        let mut ctx = Canvas2dContext::with_resolved(side, side, &self.fonts)?;
        ctx.scale(scale as f32, scale as f32);
        draw_frame(&mut ctx, state, &frame)?;
        debug!("Rendered export {}", resolution_label(side, side));
        Ok(ctx.to_png(Some(self.export_ppi))?)
    }
}

fn draw_frame(
    ctx: &mut Canvas2dContext,
    state: &GeneratorState,
    frame: &Frame,
) -> ChromakopiaResult<()> {
    let side = frame.surface.side as f32;
    paint_background(
        ctx,
        state.background(),
        state.uploaded_image(),
        state.rgb(),
        side,
    )?;

    ctx.set_fill_style_color(state.rgb().with_alpha(1.0));
    paint_three_font_text(
        ctx,
        &state.layout_text(),
        frame.surface.start_x,
        frame.surface.baseline_y,
        &frame.sizes,
        &frame.metrics,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChromakopiaError;
    use chromakopia_canvas2d::Canvas2dError;
    use rstest::rstest;

    fn setup() -> (GeneratorConfig, GeneratorState, Renderer) {
        let config = GeneratorConfig {
            recent_colors_path: None,
            load_system_fonts: false,
            ..GeneratorConfig::default()
        };
        let state = GeneratorState::new(&config);
        let renderer = Renderer::new(&config, &LoadedFonts::fallback(false)).unwrap();
        (config, state, renderer)
    }

    #[test]
    fn test_preview_is_at_least_min_side() {
        let (_, state, mut renderer) = setup();
        let frame = renderer.render_preview(&state).unwrap();
        assert!(frame.surface.side >= 800);
        assert_eq!(renderer.preview().width(), frame.surface.side);
        assert_eq!(
            renderer.resolution_label(),
            format!("{0}×{0}", frame.surface.side)
        );
    }

    #[test]
    fn test_solid_background_fills_preview() {
        let (_, mut state, mut renderer) = setup();
        state.select_background("#ffffff");
        renderer.render_preview(&state).unwrap();
        let corner = renderer.preview().get_image_data(0, 0, 1, 1);
        assert_eq!(corner, vec![255, 255, 255, 255]);
    }

    #[test]
    fn test_export_is_scaled_preview() {
        let (_, mut state, mut renderer) = setup();
        state.select_background("#ffffff");
        let frame = renderer.render_preview(&state).unwrap();
        let png_data = renderer.export_png(&state).unwrap();

        let decoder = png::Decoder::new(std::io::Cursor::new(png_data));
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, frame.surface.side * 4);
        assert_eq!(reader.info().height, frame.surface.side * 4);
        // Export does not disturb the preview
        assert_eq!(renderer.preview().width(), frame.surface.side);
    }

    #[rstest]
    #[case(41)]
    #[case(5_368_710)]
    #[case(u32::MAX)]
    fn test_oversized_export_is_rejected(#[case] export_scale: u32) {
        let config = GeneratorConfig {
            recent_colors_path: None,
            load_system_fonts: false,
            export_scale,
            ..GeneratorConfig::default()
        };
        let state = GeneratorState::new(&config);
        let mut renderer = Renderer::new(&config, &LoadedFonts::fallback(false)).unwrap();
        renderer.render_preview(&state).unwrap();

        assert!(matches!(
            renderer.export_png(&state),
            Err(ChromakopiaError::Canvas(Canvas2dError::InvalidDimensions { .. }))
        ));
        // The preview survives a rejected export
        assert_eq!(renderer.preview().width(), 800);
    }
}
