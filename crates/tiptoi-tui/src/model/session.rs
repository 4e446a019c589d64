use std::path::PathBuf;

use tiptoi_core::{AudioCandidate, CatalogEntry};

use crate::tui_event::OperationKind;

/// Pipeline stage, derived from which session fields are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingCatalog,
    BrowsingCatalog,
    AwaitingAudioLinks,
    BrowsingAudioLinks,
    BrowsingDestinations,
    ReadyToDownload,
    Downloading,
    Done,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Self::AwaitingCatalog => "Loading catalog",
            Self::BrowsingCatalog => "Select product",
            Self::AwaitingAudioLinks => "Loading audio files",
            Self::BrowsingAudioLinks => "Select audio file",
            Self::BrowsingDestinations => "Select destination",
            Self::ReadyToDownload => "Ready to download",
            Self::Downloading => "Downloading",
            Self::Done => "Done",
        }
    }

    /// Whether the shared list accepts a selection in this stage.
    pub fn is_browsing(self) -> bool {
        matches!(
            self,
            Self::BrowsingCatalog | Self::BrowsingAudioLinks | Self::BrowsingDestinations
        )
    }
}

/// Download progress. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum DownloadProgress {
    #[default]
    NotStarted,
    InFlight,
    Done,
}

impl DownloadProgress {
    /// The 0 / 1 / 100 encoding shown in the status line.
    pub fn as_percent(self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::InFlight => 1,
            Self::Done => 100,
        }
    }
}

/// A recoverable error shown below the list until something else replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub stage: Stage,
    pub message: String,
}

/// All selection state of one run. Owned by the controller only.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// `None` until the catalog fetch has completed.
    pub catalog: Option<Vec<CatalogEntry>>,
    pub selected_product: Option<CatalogEntry>,
    pub selected_audio: Option<AudioCandidate>,
    pub destination_path: Option<String>,
    pub download_progress: DownloadProgress,
    pub downloaded_path: Option<PathBuf>,
    pub last_error: Option<ErrorInfo>,
    /// The single outstanding background operation, if any.
    pub in_flight: Option<OperationKind>,
}

impl SessionState {
    pub fn catalog_count(&self) -> usize {
        self.catalog.as_ref().map_or(0, Vec::len)
    }

    pub fn stage(&self) -> Stage {
        match self.download_progress {
            DownloadProgress::Done => return Stage::Done,
            DownloadProgress::InFlight => return Stage::Downloading,
            DownloadProgress::NotStarted => {}
        }
        if self.destination_path.as_deref().is_some_and(|p| !p.is_empty()) {
            return Stage::ReadyToDownload;
        }
        if self.selected_audio.is_some() {
            return Stage::BrowsingDestinations;
        }
        if self.selected_product.is_some() {
            return if self.in_flight == Some(OperationKind::AudioLinks) {
                Stage::AwaitingAudioLinks
            } else {
                Stage::BrowsingAudioLinks
            };
        }
        if self.catalog.is_some() {
            Stage::BrowsingCatalog
        } else {
            Stage::AwaitingCatalog
        }
    }

    /// Audio chosen, destination non-empty, nothing started yet.
    pub fn can_start_download(&self) -> bool {
        self.selected_audio.is_some()
            && self.destination_path.as_deref().is_some_and(|p| !p.is_empty())
            && self.download_progress == DownloadProgress::NotStarted
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        let stage = self.stage();
        self.last_error = Some(ErrorInfo {
            stage,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_follows_populated_fields() {
        let mut s = SessionState::default();
        assert_eq!(s.stage(), Stage::AwaitingCatalog);

        s.catalog = Some(vec![CatalogEntry::new("Game A", "/a")]);
        assert_eq!(s.stage(), Stage::BrowsingCatalog);

        s.selected_product = Some(CatalogEntry::new("Game A", "/a"));
        s.in_flight = Some(OperationKind::AudioLinks);
        assert_eq!(s.stage(), Stage::AwaitingAudioLinks);

        s.in_flight = None;
        assert_eq!(s.stage(), Stage::BrowsingAudioLinks);

        s.selected_audio = Some(AudioCandidate::new("a.gme", "/a/1"));
        assert_eq!(s.stage(), Stage::BrowsingDestinations);

        s.destination_path = Some(String::new());
        assert_eq!(s.stage(), Stage::BrowsingDestinations);

        s.destination_path = Some("/media/pen".into());
        assert_eq!(s.stage(), Stage::ReadyToDownload);
        assert!(s.can_start_download());

        s.download_progress = DownloadProgress::InFlight;
        assert_eq!(s.stage(), Stage::Downloading);
        assert!(!s.can_start_download());

        s.download_progress = DownloadProgress::Done;
        assert_eq!(s.stage(), Stage::Done);
    }

    #[test]
    fn progress_orders_forward() {
        assert!(DownloadProgress::NotStarted < DownloadProgress::InFlight);
        assert!(DownloadProgress::InFlight < DownloadProgress::Done);
        assert_eq!(DownloadProgress::InFlight.as_percent(), 1);
        assert_eq!(DownloadProgress::Done.as_percent(), 100);
    }
}
