use std::path::PathBuf;

use thiserror::Error;

pub mod client;
pub mod config;
pub mod destinations;
pub mod download;
pub mod scrape;

// Re-export for convenience
pub use client::GmeClient;
pub use config::ClientConfig;
pub use destinations::{DestinationResolver, SystemDestinations};

/// Anything the picker can show: a display label plus an opaque locator.
pub trait Labeled {
    fn label(&self) -> &str;
    fn locator(&self) -> &str;
}

/// One product listed on the vendor catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    /// URL of the product's detail page.
    pub detail_url: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail_url: detail_url.into(),
        }
    }
}

impl Labeled for CatalogEntry {
    fn label(&self) -> &str {
        &self.name
    }

    fn locator(&self) -> &str {
        &self.detail_url
    }
}

/// A downloadable `.gme` file found on a product detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCandidate {
    pub name: String,
    pub file_url: String,
}

impl AudioCandidate {
    pub fn new(name: impl Into<String>, file_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_url: file_url.into(),
        }
    }
}

impl Labeled for AudioCandidate {
    fn label(&self) -> &str {
        &self.name
    }

    fn locator(&self) -> &str {
        &self.file_url
    }
}

/// Where a destination directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    /// Mount point of a removable volume (typically the pen itself).
    RemovableVolume,
    /// The user's downloads folder, always offered last.
    Downloads,
}

/// A directory the selected audio file can be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationOption {
    pub name: String,
    pub path: String,
    pub kind: DestinationKind,
}

impl DestinationOption {
    pub fn volume(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: DestinationKind::RemovableVolume,
        }
    }

    pub fn downloads(path: impl Into<String>) -> Self {
        Self {
            name: "Downloads".to_string(),
            path: path.into(),
            kind: DestinationKind::Downloads,
        }
    }
}

impl Labeled for DestinationOption {
    fn label(&self) -> &str {
        &self.name
    }

    fn locator(&self) -> &str {
        &self.path
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to GET {url} - {status}")]
    Status { url: String, status: u16 },
    #[error("invalid locator: {0}")]
    InvalidLocator(String),
    #[error("no candidates found")]
    NoCandidates,
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("background task failed: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_items_expose_label_and_locator() {
        let entry = CatalogEntry::new("Game A", "/a");
        assert_eq!(entry.label(), "Game A");
        assert_eq!(entry.locator(), "/a");

        let audio = AudioCandidate::new("file1.gme", "/a/1");
        assert_eq!(audio.label(), "file1.gme");
        assert_eq!(audio.locator(), "/a/1");

        let dest = DestinationOption::downloads("/home/u/Downloads");
        assert_eq!(dest.label(), "Downloads");
        assert_eq!(dest.locator(), "/home/u/Downloads");
        assert_eq!(dest.kind, DestinationKind::Downloads);
    }

    #[test]
    fn status_error_matches_vendor_wording() {
        let err = FetchError::Status {
            url: "https://example.test/x".into(),
            status: 404,
        };
        assert_eq!(err.to_string(), "Failed to GET https://example.test/x - 404");
    }
}
