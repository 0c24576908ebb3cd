//! Event-driven generator session.
//!
//! A session applies configuration events to the state and re-renders the
//! preview after each one. Resizes are debounced; downloads export a scaled
//! PNG. Upload and export failures are reported once through the
//! [`Notifier`] and leave the previous state in place.

use crate::background::load_upload;
use crate::color::ColorSource;
use crate::config::GeneratorConfig;
use crate::error::{ChromakopiaError, ChromakopiaResult};
use crate::events::{ConfigEvent, InputSource};
use crate::export::{export_date, export_file_name, write_export};
use crate::fonts::load_fonts;
use crate::render::{Frame, Renderer};
use crate::state::GeneratorState;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;

/// Receives user-facing failure messages.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Sends notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        error!("{}", message);
    }
}

impl Notifier for Vec<String> {
    fn notify(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Message shown for a failed upload.
pub fn upload_failure_message(err: &ChromakopiaError) -> &'static str {
    match err {
        ChromakopiaError::ImageTooLarge { .. } => "File size must be less than 5MB",
        ChromakopiaError::NotAnImage(_) => "Please select a valid image file",
        ChromakopiaError::ImageDecode(_) => "Failed to load image. Please try another file.",
        _ => "Failed to read file. Please try again.",
    }
}

pub const DOWNLOAD_FAILURE_MESSAGE: &str = "Download failed. Please try again.";

enum Next {
    Event(Option<ConfigEvent>),
    ResizeSettled,
}

pub struct Session<N> {
    state: GeneratorState,
    renderer: Renderer,
    notifier: N,
    export_dir: PathBuf,
    resize_debounce: Duration,
    last_frame: Option<Frame>,
    render_count: usize,
    exports: Vec<PathBuf>,
}

impl<N: Notifier> Session<N> {
    pub fn new(
        config: &GeneratorConfig,
        state: GeneratorState,
        renderer: Renderer,
        notifier: N,
    ) -> Self {
        Self {
            state,
            renderer,
            notifier,
            export_dir: config.export_dir.clone(),
            resize_debounce: config.resize_debounce(),
            last_frame: None,
            render_count: 0,
            exports: Vec::new(),
        }
    }

    /// Load fonts (bounded by the configured timeout), build state and renderer,
    /// and render the first preview.
    pub async fn start(config: &GeneratorConfig, notifier: N) -> ChromakopiaResult<Self> {
        let fonts = load_fonts(
            &config.fonts,
            config.font_load_timeout(),
            config.load_system_fonts,
        )
        .await;
        let renderer = Renderer::new(config, &fonts)?;
        let mut session = Self::new(config, GeneratorState::new(config), renderer, notifier);
        session.render();
        Ok(session)
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Frame of the most recent successful preview render.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Number of preview renders so far.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Files written by downloads, oldest first.
    pub fn exports(&self) -> &[PathBuf] {
        &self.exports
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Consume events until the source is exhausted.
    ///
    /// A burst of resize events renders once, after the debounce period has
    /// passed without another resize. A resize still pending when the source
    /// ends is rendered before returning.
    pub async fn run(&mut self, source: &mut impl InputSource) {
        let mut resize_deadline: Option<Instant> = None;
        loop {
            let next = match resize_deadline {
                Some(deadline) => tokio::select! {
                    event = source.next_event() => Next::Event(event),
                    _ = tokio::time::sleep_until(deadline) => Next::ResizeSettled,
                },
                None => Next::Event(source.next_event().await),
            };

            match next {
                Next::ResizeSettled => {
                    resize_deadline = None;
                    self.render();
                }
                Next::Event(Some(ConfigEvent::Resize)) => {
                    resize_deadline = Some(Instant::now() + self.resize_debounce);
                }
                Next::Event(Some(event)) => self.apply(event).await,
                Next::Event(None) => break,
            }
        }
        if resize_deadline.is_some() {
            self.render();
        }
    }

    /// Apply one event immediately, re-rendering when it changed anything.
    pub async fn apply(&mut self, event: ConfigEvent) {
        debug!("Applying {:?}", event);
        let changed = match event {
            ConfigEvent::Text { value } => {
                self.state.set_text(&value);
                true
            }
            ConfigEvent::Color { value, source } => self.pick_color(&value, source).await,
            ConfigEvent::RecentColor { value } => match self.state.use_recent_color(&value) {
                Ok(()) => true,
                Err(err) => {
                    error!("{}", err);
                    false
                }
            },
            ConfigEvent::FontSize { value } => {
                self.state.set_font_size(value);
                true
            }
            ConfigEvent::AuthenticGreen { enabled } => {
                self.state.set_authentic_green(enabled);
                true
            }
            ConfigEvent::Background { value } => {
                self.state.select_background(&value);
                true
            }
            ConfigEvent::Upload { path, mime } => self.upload(&path, mime.as_deref()).await,
            ConfigEvent::Resize => true,
            ConfigEvent::Download => {
                self.download().await;
                false
            }
        };
        if changed {
            self.render();
        }
    }

    /// Returns whether the color changed; invalid colors are logged.
    async fn pick_color(&mut self, value: &str, source: ColorSource) -> bool {
        match self.state.set_color(value, source) {
            Ok(true) => {
                self.state.recent_colors().save().await;
                true
            }
            Ok(false) => false,
            Err(err) => {
                error!("{}", err);
                false
            }
        }
    }

    async fn upload(&mut self, path: &Path, mime: Option<&str>) -> bool {
        match load_upload(path, mime).await {
            Ok(image) => {
                self.state.set_uploaded_image(image);
                true
            }
            Err(err) => {
                error!("Rejected background upload {}: {}", path.display(), err);
                self.notifier.notify(upload_failure_message(&err));
                false
            }
        }
    }

    /// Export the current frame as a PNG into the export directory.
    pub async fn download(&mut self) -> Option<PathBuf> {
        self.state.set_downloading(true);
        let result = self.export().await;
        self.state.set_downloading(false);
        match result {
            Ok(path) => {
                self.exports.push(path.clone());
                Some(path)
            }
            Err(err) => {
                error!("Download failed: {}", err);
                self.notifier.notify(DOWNLOAD_FAILURE_MESSAGE);
                None
            }
        }
    }

    async fn export(&mut self) -> ChromakopiaResult<PathBuf> {
        let png = self.renderer.export_png(&self.state)?;
        let file_name = export_file_name(self.state.text(), export_date());
        write_export(&self.export_dir, &file_name, &png).await
    }

    /// Re-render the preview. Failures are logged and leave the previous frame.
    pub fn render(&mut self) {
        match self.renderer.render_preview(&self.state) {
            Ok(frame) => {
                self.render_count += 1;
                info!("Preview {}", self.renderer.resolution_label());
                self.last_frame = Some(frame);
            }
            Err(err) => error!("Render failed: {}", err),
        }
    }
}
