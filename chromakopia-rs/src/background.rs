//! Backgrounds: transparent, solid, gradient presets and uploaded images.

use crate::color::{Rgb, AUTHENTIC_GREEN};
use crate::error::{ChromakopiaError, ChromakopiaResult};
use chromakopia_canvas2d::{Canvas2dContext, CanvasImageDataRef, ImageCropParams, RectParams};
use log::{debug, warn};
use std::path::Path;

/// Uploads larger than this are rejected.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Opacity of the text-colored tint laid over uploaded images.
pub const IMAGE_TINT_ALPHA: f32 = 0.7;

/// Named two-stop gradients offered as background options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientPreset {
    Green,
    Dark,
}

impl GradientPreset {
    /// Start and end colors, painted from the top-left to the bottom-right corner.
    pub fn stops(self) -> (&'static str, &'static str) {
        match self {
            GradientPreset::Green => (AUTHENTIC_GREEN, "#2d5016"),
            GradientPreset::Dark => ("#1a1a1a", "#0a0a0a"),
        }
    }
}

/// The selected background.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Background {
    #[default]
    Transparent,
    Solid(String),
    Gradient(GradientPreset),
    /// An uploaded image is shown.
    Image,
}

impl Background {
    /// Interpret a background option value.
    ///
    /// Values are `transparent`, a `#` hex color, or a CSS `linear-gradient(...)`
    /// whose preset is picked by whether it mentions the authentic green.
    /// Anything else is transparent.
    pub fn from_option(value: &str) -> Self {
        let value = value.trim();
        if value == "transparent" {
            Background::Transparent
        } else if value.starts_with("linear-gradient") {
            if value.contains(AUTHENTIC_GREEN) {
                Background::Gradient(GradientPreset::Green)
            } else {
                Background::Gradient(GradientPreset::Dark)
            }
        } else if value.starts_with('#') {
            Background::Solid(value.to_string())
        } else if value == "image" {
            Background::Image
        } else {
            debug!("Unknown background option {:?}, using transparent", value);
            Background::Transparent
        }
    }
}

/// A decoded uploaded image in straight-alpha RGBA.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl UploadedImage {
    /// Decode image bytes in any enabled format.
    pub fn decode(bytes: &[u8]) -> ChromakopiaResult<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }

    /// Centered square crop `(sx, sy, side)` for cover-style drawing.
    pub fn cover_crop(&self) -> (u32, u32, u32) {
        let side = self.width.min(self.height);
        ((self.width - side) / 2, (self.height - side) / 2, side)
    }

    fn as_image_data(&self) -> CanvasImageDataRef<'_> {
        CanvasImageDataRef {
            data: &self.rgba,
            width: self.width,
            height: self.height,
        }
    }
}

/// MIME type guessed from the file extension.
pub fn guess_mime(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

/// Check an upload's size, then its MIME type.
pub fn validate_upload(size: u64, mime: &str) -> ChromakopiaResult<()> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ChromakopiaError::ImageTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    if !mime.starts_with("image/") {
        return Err(ChromakopiaError::NotAnImage(mime.to_string()));
    }
    Ok(())
}

/// Validate, read and decode an uploaded background image.
///
/// `mime` overrides the type guessed from the extension.
pub async fn load_upload(path: &Path, mime: Option<&str>) -> ChromakopiaResult<UploadedImage> {
    let size = tokio::fs::metadata(path).await?.len();
    let mime = mime.unwrap_or_else(|| guess_mime(path));
    validate_upload(size, mime)?;

    let bytes = tokio::fs::read(path).await?;
    let image = UploadedImage::decode(&bytes)?;
    debug!(
        "Loaded background image {} ({}x{})",
        path.display(),
        image.width,
        image.height
    );
    Ok(image)
}

/// Paint the background onto a `side`×`side` surface in user space.
///
/// An uploaded image takes precedence over the selected option and is
/// covered by a tint of `text_color`.
pub fn paint_background(
    ctx: &mut Canvas2dContext,
    background: &Background,
    image: Option<&UploadedImage>,
    text_color: Rgb,
    side: f32,
) -> ChromakopiaResult<()> {
    let full = RectParams::from_size(side, side);
    ctx.clear_rect(&full);

    if let Some(image) = image {
        let (sx, sy, s) = image.cover_crop();
        ctx.draw_image_data_cropped(
            &image.as_image_data(),
            &ImageCropParams {
                sx: sx as f32,
                sy: sy as f32,
                sw: s as f32,
                sh: s as f32,
                dx: 0.0,
                dy: 0.0,
                dw: side,
                dh: side,
            },
        )?;

        ctx.save();
        ctx.set_fill_style_color(text_color.with_alpha(IMAGE_TINT_ALPHA));
        ctx.fill_rect(&full);
        ctx.restore();
        return Ok(());
    }

    match background {
        Background::Transparent | Background::Image => {}
        Background::Solid(color) => {
            ctx.save();
            match ctx.set_fill_style(color) {
                Ok(()) => ctx.fill_rect(&full),
                Err(err) => warn!("Leaving background transparent: {}", err),
            }
            ctx.restore();
        }
        Background::Gradient(preset) => {
            let (start, end) = preset.stops();
            let mut gradient = ctx.create_linear_gradient(0.0, 0.0, side, side);
            gradient.add_color_stop(0.0, start)?;
            gradient.add_color_stop(1.0, end)?;
            ctx.save();
            ctx.set_fill_style_gradient(gradient);
            ctx.fill_rect(&full);
            ctx.restore();
        }
    }
    Ok(())
}
