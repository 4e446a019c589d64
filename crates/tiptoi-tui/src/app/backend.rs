use super::App;
use crate::model::session::DownloadProgress;
use crate::tui_event::{BackendCommand, BackendEvent, OperationKind};

impl App {
    /// Process a background completion and update model state.
    ///
    /// May return a follow-up command (e.g. a single catalog entry is
    /// auto-selected and its detail page fetched straight away).
    pub fn handle_backend_event(&mut self, event: BackendEvent) -> Option<BackendCommand> {
        let kind = event.kind();
        if self.session.in_flight != Some(kind) {
            tracing::warn!(?kind, "ignoring completion without a matching request");
            return None;
        }
        self.session.in_flight = None;

        match event {
            BackendEvent::CatalogLoaded(entries) => self.apply_catalog(entries),
            BackendEvent::AudioLinksLoaded(links) => {
                self.apply_audio_links(links);
                None
            }
            BackendEvent::DownloadComplete { path } => {
                tracing::info!(path = %path.display(), "download complete");
                self.session.download_progress = DownloadProgress::Done;
                self.session.downloaded_path = Some(path);
                self.should_quit = true;
                None
            }
            BackendEvent::Failed { kind, error } => {
                match kind {
                    OperationKind::Catalog => {
                        tracing::warn!(%error, "catalog unavailable, giving up");
                        self.session.set_error(error.clone());
                        self.fatal_error = Some(error);
                        self.should_quit = true;
                    }
                    OperationKind::AudioLinks => self.reject_audio_links(error),
                    // Progress stays in flight: a failed download is not retried.
                    OperationKind::Download => self.session.set_error(error),
                }
                None
            }
        }
    }
}
