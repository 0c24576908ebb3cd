//! Export file naming and writing.

use crate::error::ChromakopiaResult;
use chrono::NaiveDate;
use log::info;
use std::path::{Path, PathBuf};

/// Longest text fragment kept in an export file name.
pub const MAX_NAME_CHARS: usize = 10;

/// `chromakopia-<text>-<YYYY-MM-DD>.png`, keeping only the first ten ASCII
/// letters and digits of `text`.
pub fn export_file_name(text: &str, date: NaiveDate) -> String {
    let clean: String = text
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_NAME_CHARS)
        .collect();
    format!("chromakopia-{}-{}.png", clean, date.format("%Y-%m-%d"))
}

/// Today's date for export names, as in an ISO-8601 UTC timestamp.
pub fn export_date() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Write `png` to `dir/file_name`, creating `dir` if needed.
pub async fn write_export(dir: &Path, file_name: &str, png: &[u8]) -> ChromakopiaResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, png).await?;
    info!("Exported {} ({} bytes)", path.display(), png.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    #[rstest]
    #[case("CHROMAKOPIA", "chromakopia-CHROMAKOPIA-2026-03-09.png")]
    #[case("Tyler, the Creator!", "chromakopia-TylertheCr-2026-03-09.png")]
    #[case("Café 42", "chromakopia-Caf42-2026-03-09.png")]
    #[case("!!!", "chromakopia--2026-03-09.png")]
    fn test_export_file_name(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(export_file_name(text, date()), expected);
    }

    #[tokio::test]
    async fn test_write_export_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");
        let path = write_export(&out, "a.png", b"png").await.unwrap();
        assert_eq!(path, out.join("a.png"));
        assert_eq!(std::fs::read(path).unwrap(), b"png");
    }
}
