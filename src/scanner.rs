use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::naming;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read local directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returns the most recent date stamped on any flat file directly in
/// `dir`, or `None` when no file name carries a valid stamp. Names that
/// fail the naming contract are ignored, never errors. A missing or
/// unreadable directory is fatal so that an empty directory and an
/// inaccessible one stay distinguishable.
pub fn latest_local_date(dir: &Path) -> Result<Option<NaiveDate>, ScanError> {
    let entries = fs::read_dir(dir).map_err(|source| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut latest: Option<NaiveDate> = None;
    for entry in entries {
        let entry = entry.map_err(|source| ScanError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        if let Some(date) = name.to_str().and_then(naming::date_stamp) {
            latest = latest.max(Some(date));
        }
    }

    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), b"x").unwrap();
    }

    #[test]
    fn empty_directory_has_no_watermark() {
        let dir = TempDir::new().unwrap();
        assert_eq!(latest_local_date(dir.path()).unwrap(), None);
    }

    #[test]
    fn picks_the_maximum_valid_date() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "2024-01-03.csv.gz");
        touch(&dir, "2024-02-01.csv.gz");
        touch(&dir, "2023-12-31.csv.gz");
        assert_eq!(
            latest_local_date(dir.path()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
    }

    #[test]
    fn invalid_names_never_influence_the_watermark() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "2024-01-03.csv.gz");
        touch(&dir, "summary.csv.gz");
        touch(&dir, "2024-13-01.csv.gz");
        touch(&dir, "2025-01-01.csv");
        touch(&dir, "notes.txt");
        assert_eq!(
            latest_local_date(dir.path()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3)
        );
    }

    #[test]
    fn only_invalid_names_means_no_watermark() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "readme.md");
        touch(&dir, "2024-1-2.csv.gz");
        assert_eq!(latest_local_date(dir.path()).unwrap(), None);
    }

    #[test]
    fn subdirectories_are_not_considered() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("2030-01-01.csv.gz")).unwrap();
        touch(&dir, "2024-01-03.csv.gz");
        assert_eq!(
            latest_local_date(dir.path()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3)
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = latest_local_date(&missing).unwrap_err();
        assert!(matches!(err, ScanError::ReadDir { .. }));
    }
}
