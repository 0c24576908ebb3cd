//! Headless Canvas 2D subset using tiny-skia and cosmic-text.
//!
//! This crate provides the part of the Canvas 2D API the Chromakopia generator
//! draws with, usable without a browser. It uses:
//! - `tiny-skia` for rasterization
//! - `cosmic-text` for text shaping, measurement, and glyph outlines
//! - `fontdb` for the font database (shared between preview and export surfaces)
//!
//! # Example
//!
//! ```rust,ignore
//! use chromakopia_canvas2d::{Canvas2dContext, FontConfig, RectParams};
//!
//! let mut ctx = Canvas2dContext::with_config(400, 300, FontConfig::default())?;
//! ctx.set_fill_style("#01823f")?;
//! ctx.fill_rect(&RectParams { x: 10.0, y: 10.0, width: 100.0, height: 50.0 });
//! let png_data = ctx.to_png(None)?;
//! ```

mod context;
mod drawing_state;
mod error;
mod font_config;
mod font_parser;
mod geometry;
mod gradient;
mod style;
mod text;

// Re-export public API
pub use context::Canvas2dContext;
pub use drawing_state::DrawingState;
pub use error::{Canvas2dError, Canvas2dResult};
pub use font_config::{font_config_to_fontdb, CustomFont, FontConfig, GenericFamilyMap, ResolvedFontConfig};
pub use font_parser::{parse_font, ParsedFont};
pub use geometry::{CanvasColor, CanvasImageDataRef, ImageCropParams, RectParams};
pub use gradient::{CanvasGradient, GradientStop};
pub use style::FillStyle;
pub use text::TextMetrics;
