use std::io::ErrorKind;
use std::path::PathBuf;

use crate::sources::{FetchError, Page, PageSource};

/// Reads pages from `<dir>/<index>.json`, the same layout the HTTP listing serves.
pub struct DirectoryPageSource {
    directory: PathBuf
}

impl DirectoryPageSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into()
        }
    }
}

impl PageSource for DirectoryPageSource {
    async fn fetch_page(&self, index: u32) -> Result<Page, FetchError> {
        let path = self.directory.join(format!("{index}.json"));

        let contents = tokio::fs::read(&path).await.map_err(|source| match source.kind() {
            ErrorKind::NotFound => FetchError::NotFound { page: index },
            _ => FetchError::Io { page: index, source }
        })?;

        serde_json::from_slice(&contents).map_err(|source| FetchError::Decode { page: index, source })
    }
}
