use crate::domain::ports::Storage;
use crate::utils::error::{Result, WaybackError};
use std::fs;
use std::path::PathBuf;

/// 將報告寫入本機目錄
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = self.base_path.join(path);
        let display = full_path.display().to_string();

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| WaybackError::ReportWriteError {
                path: display.clone(),
                source,
            })?;
        }

        fs::write(&full_path, data).map_err(|source| WaybackError::ReportWriteError {
            path: display.clone(),
            source,
        })?;
        Ok(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("reports"));

        let written = tokio_test::block_on(storage.write_file("wayback-example.com.html", b"<html>"))
            .unwrap();

        assert!(written.ends_with("wayback-example.com.html"));
        let content = std::fs::read(temp_dir.path().join("reports/wayback-example.com.html")).unwrap();
        assert_eq!(content, b"<html>");
    }

    #[test]
    fn test_write_failure_is_report_write_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        let storage = LocalStorage::new(blocker.clone());

        let err = tokio_test::block_on(storage.write_file("report.html", b"x")).unwrap_err();
        assert!(matches!(err, WaybackError::ReportWriteError { .. }));
    }
}
