//! Loading the three segment typefaces.

use crate::error::{ChromakopiaError, ChromakopiaResult};
use crate::layout::Segment;
use chromakopia_canvas2d::{CustomFont, FontConfig, ResolvedFontConfig};
use futures::future::join_all;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Font file for each segment. Segments without a file use the fallback family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontFiles {
    pub first: Option<PathBuf>,
    pub middle: Option<PathBuf>,
    pub last: Option<PathBuf>,
}

impl FontFiles {
    pub fn get(&self, segment: Segment) -> Option<&PathBuf> {
        match segment {
            Segment::First => self.first.as_ref(),
            Segment::Middle => self.middle.as_ref(),
            Segment::Last => self.last.as_ref(),
        }
    }
}

/// Fonts ready for rendering, plus which segment faces are missing.
#[derive(Clone)]
pub struct LoadedFonts {
    pub resolved: ResolvedFontConfig,
    pub missing: Vec<Segment>,
}

impl LoadedFonts {
    /// Whether all three segment faces were registered.
    pub fn all_loaded(&self) -> bool {
        self.missing.is_empty()
    }

    /// Fallback fonts only.
    pub fn fallback(load_system_fonts: bool) -> Self {
        Self::register(Vec::new(), load_system_fonts)
    }

    fn register(custom_fonts: Vec<CustomFont>, load_system_fonts: bool) -> Self {
        let config = FontConfig {
            custom_fonts,
            load_system_fonts,
            ..FontConfig::default()
        };
        let resolved = config.resolve();
        let missing = Segment::ALL
            .into_iter()
            .filter(|segment| !resolved.has_family(segment.family()))
            .collect();
        Self { resolved, missing }
    }
}

/// Read the configured font files concurrently and register them under the
/// segment family names.
///
/// Read failures and the timeout are logged; rendering then proceeds with
/// whatever loaded, falling back to sans-serif for the rest.
pub async fn load_fonts(files: &FontFiles, timeout: Duration, load_system_fonts: bool) -> LoadedFonts {
    load_fonts_with(files, timeout, load_system_fonts, |path| async move {
        tokio::fs::read(&path).await
    })
    .await
}

pub(crate) async fn load_fonts_with<F, Fut>(
    files: &FontFiles,
    timeout: Duration,
    load_system_fonts: bool,
    read: F,
) -> LoadedFonts
where
    F: Fn(PathBuf) -> Fut,
    Fut: Future<Output = std::io::Result<Vec<u8>>>,
{
    let reads = Segment::ALL.into_iter().filter_map(|segment| {
        let path = files.get(segment)?.clone();
        let read = read(path.clone());
        Some(async move {
            read.await
                .map(|data| CustomFont {
                    data: Arc::new(data),
                    family_name: Some(segment.family().to_string()),
                })
                .map_err(|err| ChromakopiaError::FontLoad {
                    family: segment.family().to_string(),
                    path,
                    message: err.to_string(),
                })
        })
    });

    let custom_fonts = match tokio::time::timeout(timeout, join_all(reads)).await {
        Ok(results) => results
            .into_iter()
            .filter_map(|result: ChromakopiaResult<CustomFont>| match result {
                Ok(font) => Some(font),
                Err(err) => {
                    warn!("{}", err);
                    None
                }
            })
            .collect(),
        Err(_) => {
            warn!(
                "Font loading timed out after {} ms, rendering with fallback fonts",
                timeout.as_millis()
            );
            Vec::new()
        }
    };

    let loaded = LoadedFonts::register(custom_fonts, load_system_fonts);
    if loaded.all_loaded() {
        info!("Loaded all three Chromakopia typefaces");
    } else {
        warn!("Using fallback fonts for {:?}", loaded.missing);
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> FontFiles {
        FontFiles {
            first: Some("one.ttf".into()),
            middle: Some("two.ttf".into()),
            last: Some("three.ttf".into()),
        }
    }

    #[tokio::test]
    async fn test_missing_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let files = FontFiles {
            first: Some(dir.path().join("missing-1.ttf")),
            middle: None,
            last: Some(dir.path().join("missing-3.ttf")),
        };
        let loaded = load_fonts(&files, Duration::from_millis(3000), false).await;
        assert!(!loaded.all_loaded());
        assert_eq!(loaded.missing, Segment::ALL.to_vec());
        assert_eq!(loaded.resolved.face_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_font_data_is_not_registered() {
        let loaded = load_fonts_with(&files(), Duration::from_secs(3), false, |_| async {
            Ok(b"not a font".to_vec())
        })
        .await;
        assert_eq!(loaded.missing.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_uses_fallback() {
        let start = tokio::time::Instant::now();
        let loaded = load_fonts_with(&files(), Duration::from_millis(3000), false, |_| {
            std::future::pending::<std::io::Result<Vec<u8>>>()
        })
        .await;
        assert!(!loaded.all_loaded());
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[test]
    fn test_font_files_from_json() {
        let files: FontFiles = serde_json::from_str(r#"{"middle": "fonts/type2.otf"}"#).unwrap();
        assert_eq!(files.get(Segment::Middle), Some(&PathBuf::from("fonts/type2.otf")));
        assert_eq!(files.get(Segment::First), None);
    }
}
