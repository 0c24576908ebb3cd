//! Error types for chromakopia-rs.

use chromakopia_canvas2d::Canvas2dError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ChromakopiaError.
pub type ChromakopiaResult<T> = Result<T, ChromakopiaError>;

/// Errors produced while configuring, rendering, or exporting.
#[derive(Debug, Error)]
pub enum ChromakopiaError {
    /// A color string is not a 3 or 6 digit hex color.
    #[error("Invalid hex color: {0:?}")]
    InvalidColor(String),

    /// An uploaded background image exceeds the size limit.
    #[error("File size must be less than 5MB (got {size} bytes)")]
    ImageTooLarge { size: u64, limit: u64 },

    /// An uploaded file does not have an image MIME type.
    #[error("Please select a valid image file (got {0})")]
    NotAnImage(String),

    /// An uploaded file could not be decoded as an image.
    #[error("Failed to load image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// A font file could not be loaded.
    #[error("Failed to load font {family} from {}: {message}", path.display())]
    FontLoad {
        family: String,
        path: PathBuf,
        message: String,
    },

    /// Canvas operation failed.
    #[error(transparent)]
    Canvas(#[from] Canvas2dError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
