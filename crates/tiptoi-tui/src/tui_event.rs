use std::path::PathBuf;

use ratatui::crossterm::event::Event;
use tiptoi_core::{AudioCandidate, CatalogEntry};

/// The kind of background operation, used to pair completions with requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Catalog,
    AudioLinks,
    Download,
}

/// Operations the controller asks the launcher to run in the background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchCatalog,
    FetchAudioLinks { detail_url: String },
    Download { file_url: String, destination: PathBuf },
}

impl BackendCommand {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::FetchCatalog => OperationKind::Catalog,
            Self::FetchAudioLinks { .. } => OperationKind::AudioLinks,
            Self::Download { .. } => OperationKind::Download,
        }
    }
}

/// Outcome of a background operation. Exactly one is delivered per command.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    CatalogLoaded(Vec<CatalogEntry>),
    AudioLinksLoaded(Vec<AudioCandidate>),
    DownloadComplete { path: PathBuf },
    Failed { kind: OperationKind, error: String },
}

impl BackendEvent {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::CatalogLoaded(_) => OperationKind::Catalog,
            Self::AudioLinksLoaded(_) => OperationKind::AudioLinks,
            Self::DownloadComplete { .. } => OperationKind::Download,
            Self::Failed { kind, .. } => *kind,
        }
    }
}

/// Everything that enters the controller's single event queue.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Input(Event),
    Backend(BackendEvent),
}
