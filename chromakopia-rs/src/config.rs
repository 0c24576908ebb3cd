//! Generator configuration.

use crate::color::AUTHENTIC_GREEN;
use crate::error::ChromakopiaResult;
use crate::fonts::FontFiles;
use crate::recent_colors::default_recent_colors_path;
use crate::surface::MIN_SURFACE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TEXT: &str = "CHROMAKOPIA";
pub const DEFAULT_FONT_SIZE: u32 = 100;
pub const DEFAULT_LETTER_SPACING: u32 = 62;
pub const DEFAULT_EXPORT_SCALE: u32 = 4;

/// Construction-time settings for a generator.
///
/// Every field has a default, so a JSON file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Text shown when the input is empty or whitespace.
    pub default_text: String,
    /// Initial text color.
    pub color: String,
    /// Initial base font size (clamped to 24..=160).
    pub font_size: u32,
    /// Gap between First and Middle as a percentage of the Middle size (20..=100).
    pub letter_spacing: u32,
    /// Export pixel scale relative to the preview.
    pub export_scale: u32,
    /// Smallest surface side.
    pub min_surface_size: u32,
    /// Quiet period before a burst of resizes re-renders.
    pub resize_debounce_ms: u64,
    /// Time allowed for loading the three font files.
    pub font_load_timeout_ms: u64,
    pub fonts: FontFiles,
    /// Also register system fonts (fallback family lookup).
    pub load_system_fonts: bool,
    /// Where recent colors are stored; None keeps them in memory only.
    pub recent_colors_path: Option<PathBuf>,
    /// Directory that exported PNGs are written to.
    pub export_dir: PathBuf,
    /// Pixel density written to exported PNGs.
    pub export_ppi: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_text: DEFAULT_TEXT.to_string(),
            color: AUTHENTIC_GREEN.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            letter_spacing: DEFAULT_LETTER_SPACING,
            export_scale: DEFAULT_EXPORT_SCALE,
            min_surface_size: MIN_SURFACE_SIZE,
            resize_debounce_ms: 250,
            font_load_timeout_ms: 3000,
            fonts: FontFiles::default(),
            load_system_fonts: true,
            recent_colors_path: default_recent_colors_path(),
            export_dir: PathBuf::from("."),
            export_ppi: 72.0,
        }
    }
}

impl GeneratorConfig {
    /// Read a JSON configuration file.
    pub fn from_file(path: &Path) -> ChromakopiaResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Letter spacing as a multiplier, clamped to 0.2..=1.0.
    pub fn spacing_multiplier(&self) -> f32 {
        self.letter_spacing.clamp(20, 100) as f32 / 100.0
    }

    /// Export scale, at least 1.
    pub fn export_scale(&self) -> u32 {
        self.export_scale.max(1)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn font_load_timeout(&self) -> Duration {
        Duration::from_millis(self.font_load_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.default_text, "CHROMAKOPIA");
        assert_eq!(config.color, "#01823f");
        assert_eq!(config.font_size, 100);
        assert_eq!(config.spacing_multiplier(), 0.62);
        assert_eq!(config.export_scale(), 4);
        assert_eq!(config.resize_debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"font_size": 140, "export_scale": 2, "fonts": {{"first": "a.ttf"}}}}"#
        )
        .unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.font_size, 140);
        assert_eq!(config.export_scale(), 2);
        assert_eq!(config.fonts.first, Some(PathBuf::from("a.ttf")));
        assert_eq!(config.color, "#01823f");
    }

    #[test]
    fn test_malformed_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"font_size\": \"big\"}}").unwrap();
        assert!(GeneratorConfig::from_file(file.path()).is_err());
    }

    #[rstest]
    #[case(0, 0.2)]
    #[case(20, 0.2)]
    #[case(62, 0.62)]
    #[case(250, 1.0)]
    fn test_spacing_multiplier_clamped(#[case] percent: u32, #[case] expected: f32) {
        let config = GeneratorConfig {
            letter_spacing: percent,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.spacing_multiplier(), expected);
    }
}
