//! Most-recently-used color list with JSON persistence.

use log::{debug, error};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Maximum number of remembered colors.
pub const MAX_RECENT_COLORS: usize = 8;

/// File name used for the persisted list.
pub const RECENT_COLORS_FILE: &str = "chromakopia-recent-colors.json";

/// Default location of the persisted list, under the platform data directory.
pub fn default_recent_colors_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("chromakopia").join(RECENT_COLORS_FILE))
}

/// Colors the user picked recently, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentColors {
    colors: VecDeque<String>,
    path: Option<PathBuf>,
}

impl RecentColors {
    /// An empty, unpersisted list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the list stored at `path`.
    ///
    /// A missing or malformed file yields an empty list; [`save`](Self::save)
    /// still writes back to `path`.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let colors = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<String>>(&contents) {
                Ok(mut colors) => {
                    colors.truncate(MAX_RECENT_COLORS);
                    colors.into()
                }
                Err(err) => {
                    error!("Failed to load recent colors from {}: {}", path.display(), err);
                    VecDeque::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No recent colors stored at {}", path.display());
                VecDeque::new()
            }
            Err(err) => {
                error!("Failed to load recent colors from {}: {}", path.display(), err);
                VecDeque::new()
            }
        };
        Self {
            colors,
            path: Some(path),
        }
    }

    /// Record `color` as the most recent, in memory.
    ///
    /// Returns false (and changes nothing) when `color` is empty or already
    /// at the front. An existing entry moves to the front instead of being
    /// duplicated.
    pub fn add(&mut self, color: &str) -> bool {
        if color.is_empty() || self.front() == Some(color) {
            return false;
        }
        if let Some(index) = self.colors.iter().position(|c| c == color) {
            self.colors.remove(index);
        }
        self.colors.push_front(color.to_string());
        self.colors.truncate(MAX_RECENT_COLORS);
        true
    }

    /// The most recently added color.
    pub fn front(&self) -> Option<&str> {
        self.colors.front().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the list to its file. Failures are logged; an unpersisted list does nothing.
    pub async fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(err) = write_colors(path, &self.colors).await {
            error!("Failed to save recent colors to {}: {}", path.display(), err);
        }
    }
}

async fn write_colors(path: &Path, colors: &VecDeque<String>) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let json = serde_json::to_string(colors).map_err(std::io::Error::other)?;
    tokio::fs::write(path, json).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(recent: &RecentColors) -> Vec<&str> {
        recent.iter().collect()
    }

    #[test]
    fn test_add_moves_existing_to_front() {
        let mut recent = RecentColors::new();
        recent.add("#111111");
        recent.add("#222222");
        recent.add("#333333");
        assert!(recent.add("#111111"));
        assert_eq!(list(&recent), vec!["#111111", "#333333", "#222222"]);
    }

    #[test]
    fn test_add_front_or_empty_is_noop() {
        let mut recent = RecentColors::new();
        assert!(!recent.add(""));
        assert!(recent.add("#01823f"));
        assert!(!recent.add("#01823f"));
        assert_eq!(list(&recent), vec!["#01823f"]);
    }

    #[test]
    fn test_capacity() {
        let mut recent = RecentColors::new();
        for i in 0..12 {
            recent.add(&format!("#00000{:x}", i));
        }
        assert_eq!(recent.len(), MAX_RECENT_COLORS);
        assert_eq!(recent.front(), Some("#00000b"));
        assert_eq!(recent.iter().last(), Some("#000004"));
    }

    #[tokio::test]
    async fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(RECENT_COLORS_FILE);

        let mut recent = RecentColors::load(&path);
        assert!(recent.is_empty());
        recent.add("#ff0000");
        recent.add("#00ff00");
        assert!(!path.exists());
        recent.save().await;

        let reloaded = RecentColors::load(&path);
        assert_eq!(list(&reloaded), vec!["#00ff00", "#ff0000"]);
    }

    #[tokio::test]
    async fn test_malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RECENT_COLORS_FILE);
        std::fs::write(&path, "{not json").unwrap();

        let mut recent = RecentColors::load(&path);
        assert!(recent.is_empty());
        recent.add("#abcdef");
        recent.save().await;
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r##"["#abcdef"]"##);
    }

    #[tokio::test]
    async fn test_save_failure_is_logged_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let mut recent = RecentColors::load(blocker.join(RECENT_COLORS_FILE));
        recent.add("#abcdef");
        recent.save().await;
        assert_eq!(recent.front(), Some("#abcdef"));
    }
}
