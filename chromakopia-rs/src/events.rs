//! Configuration-change events and the sources that produce them.

use crate::color::ColorSource;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;

/// A change requested by whatever surface hosts the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfigEvent {
    /// Text input changed.
    Text { value: String },
    /// A color was picked and should be remembered. While the authentic-green
    /// lock is on, colors from the picker are ignored.
    Color {
        value: String,
        #[serde(default)]
        source: ColorSource,
    },
    /// A color was chosen from the recent list. The lock does not apply.
    RecentColor { value: String },
    /// The size control moved.
    FontSize { value: u32 },
    /// The authentic-green lock was toggled.
    AuthenticGreen { enabled: bool },
    /// A background option was chosen.
    Background { value: String },
    /// A background image was uploaded.
    Upload {
        path: PathBuf,
        #[serde(default)]
        mime: Option<String>,
    },
    /// The host surface was resized.
    Resize,
    /// The user asked for the high-resolution PNG.
    Download,
}

/// A stream of configuration events. `None` means the source is exhausted.
#[allow(async_fn_in_trait)]
pub trait InputSource {
    async fn next_event(&mut self) -> Option<ConfigEvent>;
}

impl InputSource for mpsc::Receiver<ConfigEvent> {
    async fn next_event(&mut self) -> Option<ConfigEvent> {
        self.recv().await
    }
}

impl InputSource for mpsc::UnboundedReceiver<ConfigEvent> {
    async fn next_event(&mut self) -> Option<ConfigEvent> {
        self.recv().await
    }
}

/// Events read as one JSON object per line.
///
/// Blank lines are ignored; malformed lines are logged and skipped. A read
/// error ends the stream.
pub struct JsonLinesSource<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: AsyncBufRead + Unpin> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl<R: AsyncBufRead + Unpin> InputSource for JsonLinesSource<R> {
    async fn next_event(&mut self) -> Option<ConfigEvent> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(err) => {
                    error!("Failed to read event input: {}", err);
                    return None;
                }
            };
            self.line_number += 1;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(event) => return Some(event),
                Err(err) => warn!("Skipping event on line {}: {}", self.line_number, err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event: ConfigEvent =
            serde_json::from_str(r#"{"type": "font_size", "value": 120}"#).unwrap();
        assert_eq!(event, ConfigEvent::FontSize { value: 120 });

        let event: ConfigEvent = serde_json::from_str(r#"{"type": "download"}"#).unwrap();
        assert_eq!(event, ConfigEvent::Download);

        let event: ConfigEvent =
            serde_json::from_str(r#"{"type": "upload", "path": "bg.png"}"#).unwrap();
        assert_eq!(
            event,
            ConfigEvent::Upload {
                path: "bg.png".into(),
                mime: None
            }
        );

        let event: ConfigEvent =
            serde_json::from_str(r##"{"type": "color", "value": "#abc"}"##).unwrap();
        assert_eq!(
            event,
            ConfigEvent::Color {
                value: "#abc".into(),
                source: ColorSource::Picker
            }
        );
        let event: ConfigEvent = serde_json::from_str(
            r##"{"type": "color", "value": "#abc", "source": "eyedropper"}"##,
        )
        .unwrap();
        assert!(matches!(
            event,
            ConfigEvent::Color {
                source: ColorSource::Eyedropper,
                ..
            }
        ));

        assert_eq!(
            serde_json::to_string(&ConfigEvent::AuthenticGreen { enabled: true }).unwrap(),
            r#"{"type":"authentic_green","enabled":true}"#
        );
    }

    #[tokio::test]
    async fn test_json_lines_skip_bad_lines() {
        let input: &[u8] = b"{\"type\": \"text\", \"value\": \"AB\"}\n\nnot json\n{\"type\": \"nope\"}\n{\"type\": \"resize\"}\n";
        let mut source = JsonLinesSource::new(input);

        assert_eq!(
            source.next_event().await,
            Some(ConfigEvent::Text { value: "AB".into() })
        );
        assert_eq!(source.next_event().await, Some(ConfigEvent::Resize));
        assert_eq!(source.next_event().await, None);
    }

    #[tokio::test]
    async fn test_channel_source() {
        let (tx, mut rx) = mpsc::channel(4);
        tx.send(ConfigEvent::Download).await.unwrap();
        drop(tx);
        assert_eq!(rx.next_event().await, Some(ConfigEvent::Download));
        assert_eq!(rx.next_event().await, None);
    }
}
