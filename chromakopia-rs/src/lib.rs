#![allow(clippy::uninlined_format_args)]
#![doc = include_str!("../README.md")]

pub mod background;
pub mod color;
pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod fonts;
pub mod layout;
pub mod paint;
pub mod recent_colors;
pub mod render;
pub mod session;
pub mod state;
pub mod surface;

pub use background::{Background, GradientPreset, UploadedImage};
pub use color::{hex_to_rgb, ColorSource, Rgb, AUTHENTIC_GREEN};
pub use config::GeneratorConfig;
pub use error::{ChromakopiaError, ChromakopiaResult};
pub use events::{ConfigEvent, InputSource, JsonLinesSource};
pub use fonts::{load_fonts, FontFiles, LoadedFonts};
pub use layout::{compute_layout, FontSizes, Segment, TextMeasurer, ThreeFontMetrics};
pub use paint::{paint_three_font_text, TextPainter};
pub use recent_colors::RecentColors;
pub use render::{Frame, Renderer};
pub use session::{LogNotifier, Notifier, Session};
pub use state::GeneratorState;
pub use surface::SurfaceLayout;
pub use chromakopia_canvas2d;
