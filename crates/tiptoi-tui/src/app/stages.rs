use std::path::PathBuf;

use tiptoi_core::{AudioCandidate, CatalogEntry, DestinationOption, Labeled};

use super::{App, InputMode};
use crate::model::picker::PickerItem;
use crate::model::session::{DownloadProgress, Stage};
use crate::tui_event::{BackendCommand, OperationKind};

const NO_CANDIDATES: &str = "no candidates found";

impl App {
    /// Kick off the catalog fetch. Only the first call returns a command.
    pub fn start(&mut self) -> Option<BackendCommand> {
        if self.session.in_flight.is_some() || self.session.catalog.is_some() {
            return None;
        }
        self.session.in_flight = Some(OperationKind::Catalog);
        Some(BackendCommand::FetchCatalog)
    }

    /// Confirm the highlighted item, or start the download when ready.
    pub(super) fn confirm(&mut self) -> Option<BackendCommand> {
        if self.session.in_flight.is_some() {
            return None;
        }
        let stage = self.stage();
        match stage {
            Stage::ReadyToDownload => self.start_download(),
            Stage::BrowsingCatalog => match self.picker.selected().cloned() {
                Some(PickerItem::Product(product)) => self.choose_product(product),
                Some(other) => self.reject_selection(stage, &other),
                None => None,
            },
            Stage::BrowsingAudioLinks => match self.picker.selected().cloned() {
                Some(PickerItem::Audio(audio)) => {
                    self.choose_audio(audio);
                    None
                }
                Some(other) => self.reject_selection(stage, &other),
                None => None,
            },
            Stage::BrowsingDestinations => match self.picker.selected().cloned() {
                Some(PickerItem::Destination(dest)) => {
                    self.choose_destination(dest);
                    None
                }
                Some(other) => self.reject_selection(stage, &other),
                None => None,
            },
            Stage::AwaitingCatalog
            | Stage::AwaitingAudioLinks
            | Stage::Downloading
            | Stage::Done => None,
        }
    }

    /// Catalog arrived: zero is an error, one is auto-selected, more are listed.
    pub(super) fn apply_catalog(&mut self, entries: Vec<CatalogEntry>) -> Option<BackendCommand> {
        self.session.catalog = Some(entries.clone());
        match entries.len() {
            0 => {
                self.show(Vec::new());
                self.session.set_error(NO_CANDIDATES);
                None
            }
            1 => {
                let only = entries.into_iter().next()?;
                tracing::debug!(product = %only.name, "single product, auto-selecting");
                self.choose_product(only)
            }
            _ => {
                self.session.last_error = None;
                self.show(entries.into_iter().map(PickerItem::Product).collect());
                None
            }
        }
    }

    /// Detail page scraped: zero is an error, one is auto-selected, more are listed.
    pub(super) fn apply_audio_links(&mut self, links: Vec<AudioCandidate>) {
        match links.len() {
            0 => self.reject_audio_links(NO_CANDIDATES),
            1 => {
                if let Some(only) = links.into_iter().next() {
                    tracing::debug!(file = %only.name, "single audio file, auto-selecting");
                    self.choose_audio(only);
                }
            }
            _ => {
                self.session.last_error = None;
                self.show(links.into_iter().map(PickerItem::Audio).collect());
            }
        }
    }

    /// Return to the product list with the failed product highlighted.
    pub(super) fn reject_audio_links(&mut self, message: impl Into<String>) {
        let failed = self.session.selected_product.take();
        let products = self.session.catalog.clone().unwrap_or_default();
        self.show(products.into_iter().map(PickerItem::Product).collect());
        if let Some(failed) = failed {
            self.picker.select_where(
                |item| matches!(item, PickerItem::Product(p) if p.detail_url == failed.detail_url),
            );
        }
        self.session.set_error(message);
    }

    fn choose_product(&mut self, product: CatalogEntry) -> Option<BackendCommand> {
        tracing::info!(product = %product.name, url = %product.detail_url, "product selected");
        let detail_url = product.detail_url.clone();
        self.session.last_error = None;
        self.session.selected_product = Some(product);
        self.session.in_flight = Some(OperationKind::AudioLinks);
        self.show(Vec::new());
        Some(BackendCommand::FetchAudioLinks { detail_url })
    }

    /// Record the audio file and move on to destinations, which are resolved
    /// synchronously from the mount table.
    fn choose_audio(&mut self, audio: AudioCandidate) {
        tracing::info!(file = %audio.name, url = %audio.file_url, "audio file selected");
        self.session.last_error = None;
        self.session.selected_audio = Some(audio);

        let options = self.destinations.resolve();
        self.show(
            options
                .iter()
                .cloned()
                .map(PickerItem::Destination)
                .collect(),
        );
        match options.len() {
            0 => self.session.set_error(NO_CANDIDATES),
            1 => {
                if let Some(only) = options.into_iter().next() {
                    self.choose_destination(only);
                }
            }
            _ => {}
        }
    }

    fn choose_destination(&mut self, dest: DestinationOption) {
        if dest.path.is_empty() {
            self.session.set_error("destination path is empty");
            return;
        }
        tracing::info!(destination = %dest.path, "destination selected");
        self.session.last_error = None;
        self.session.destination_path = Some(dest.path);
        self.show(Vec::new());
    }

    fn start_download(&mut self) -> Option<BackendCommand> {
        if !self.session.can_start_download() {
            return None;
        }
        let file_url = self.session.selected_audio.as_ref()?.file_url.clone();
        let destination = PathBuf::from(self.session.destination_path.as_deref()?);
        tracing::info!(url = %file_url, destination = %destination.display(), "starting download");
        self.session.last_error = None;
        self.session.download_progress = DownloadProgress::InFlight;
        self.session.in_flight = Some(OperationKind::Download);
        Some(BackendCommand::Download {
            file_url,
            destination,
        })
    }

    /// The highlighted item is not what this stage expects; stay put.
    fn reject_selection(&mut self, stage: Stage, item: &PickerItem) -> Option<BackendCommand> {
        tracing::warn!(?stage, item = item.label(), "unexpected item in list");
        self.session
            .set_error(format!("unexpected selection: {}", item.label()));
        None
    }

    /// Repurpose the list for the next stage's candidates.
    fn show(&mut self, items: Vec<PickerItem>) {
        self.picker.set_items(items);
        self.input_mode = InputMode::Normal;
    }
}
