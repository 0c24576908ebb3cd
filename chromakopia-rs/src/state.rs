//! The generator's explicit state record.

use crate::background::{Background, UploadedImage};
use crate::color::{hex_to_rgb, ColorSource, Rgb, AUTHENTIC_GREEN};
use crate::config::GeneratorConfig;
use crate::error::ChromakopiaResult;
use crate::layout::FontSizes;
use crate::recent_colors::RecentColors;
use log::{debug, warn};

/// Everything the renderer needs to draw a frame, plus UI toggles.
#[derive(Debug, Clone)]
pub struct GeneratorState {
    text: String,
    default_text: String,
    color: String,
    rgb: Rgb,
    font_size: u32,
    background: Background,
    uploaded_image: Option<UploadedImage>,
    authentic_green: bool,
    recent_colors: RecentColors,
    spacing_multiplier: f32,
    downloading: bool,
}

impl GeneratorState {
    /// Initial state from configuration, loading persisted recent colors.
    pub fn new(config: &GeneratorConfig) -> Self {
        let recent_colors = match &config.recent_colors_path {
            Some(path) => RecentColors::load(path),
            None => RecentColors::new(),
        };
        Self::with_recent_colors(config, recent_colors)
    }

    pub fn with_recent_colors(config: &GeneratorConfig, recent_colors: RecentColors) -> Self {
        let (color, rgb) = match hex_to_rgb(&config.color) {
            Ok(rgb) => (config.color.clone(), rgb),
            Err(err) => {
                warn!("{}; using {}", err, AUTHENTIC_GREEN);
                (AUTHENTIC_GREEN.to_string(), Rgb { r: 0x01, g: 0x82, b: 0x3f })
            }
        };
        let default_text = if config.default_text.trim().is_empty() {
            crate::config::DEFAULT_TEXT.to_string()
        } else {
            config.default_text.clone()
        };
        Self {
            text: default_text.clone(),
            default_text,
            color,
            rgb,
            font_size: FontSizes::from_base(config.font_size).middle,
            background: Background::default(),
            uploaded_image: None,
            authentic_green: false,
            recent_colors,
            spacing_multiplier: config.spacing_multiplier(),
            downloading: false,
        }
    }

    /// Text as entered (not uppercased).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text as laid out and painted.
    pub fn layout_text(&self) -> String {
        self.text.to_uppercase()
    }

    /// Set the text; empty or whitespace-only input falls back to the default text.
    pub fn set_text(&mut self, text: &str) {
        self.text = if text.trim().is_empty() {
            self.default_text.clone()
        } else {
            text.to_string()
        };
        debug!("Text updated: {}", self.text);
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Pick a new color and remember it in the recent colors.
    ///
    /// Returns Ok(false) when the color came from the picker while the
    /// authentic-green lock is on, in which case nothing changes. The recent
    /// list is updated in memory; persist it with [`RecentColors::save`].
    pub fn set_color(&mut self, color: &str, source: ColorSource) -> ChromakopiaResult<bool> {
        if self.authentic_green && source == ColorSource::Picker {
            debug!("Color picker is locked to authentic green, ignoring {}", color);
            return Ok(false);
        }
        self.apply_color(color)?;
        self.recent_colors.add(color);
        Ok(true)
    }

    /// Re-apply a color from the recent list without reordering it.
    pub fn use_recent_color(&mut self, color: &str) -> ChromakopiaResult<()> {
        self.apply_color(color)
    }

    fn apply_color(&mut self, color: &str) -> ChromakopiaResult<()> {
        self.rgb = hex_to_rgb(color)?;
        self.color = color.to_string();
        debug!("Color updated: {}", self.color);
        Ok(())
    }

    pub fn recent_colors(&self) -> &RecentColors {
        &self.recent_colors
    }

    pub fn authentic_green(&self) -> bool {
        self.authentic_green
    }

    /// Turning the lock on forces the authentic green; turning it off keeps the color.
    pub fn set_authentic_green(&mut self, locked: bool) {
        if locked {
            self.color = AUTHENTIC_GREEN.to_string();
            self.rgb = Rgb {
                r: 0x01,
                g: 0x82,
                b: 0x3f,
            };
        }
        self.authentic_green = locked;
    }

    /// Base (Middle) font size.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Set the base font size, clamped to 24..=160.
    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = FontSizes::from_base(size).middle;
        debug!("Font size updated: {}", self.font_size);
    }

    pub fn font_sizes(&self) -> FontSizes {
        FontSizes::from_base(self.font_size)
    }

    pub fn spacing_multiplier(&self) -> f32 {
        self.spacing_multiplier
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Select a background option. Any option other than `image` drops the uploaded image.
    pub fn select_background(&mut self, value: &str) {
        self.background = Background::from_option(value);
        if self.background != Background::Image {
            self.uploaded_image = None;
        }
        debug!("Background option selected: {:?}", self.background);
    }

    pub fn uploaded_image(&self) -> Option<&UploadedImage> {
        self.uploaded_image.as_ref()
    }

    /// Show a successfully loaded upload as the background.
    pub fn set_uploaded_image(&mut self, image: UploadedImage) {
        self.uploaded_image = Some(image);
        self.background = Background::Image;
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading
    }

    pub(crate) fn set_downloading(&mut self, downloading: bool) {
        self.downloading = downloading;
    }
}
