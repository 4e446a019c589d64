mod backend;
mod stages;
mod update;

use ratatui::layout::{Constraint, Layout};

use tiptoi_core::DestinationResolver;

use crate::input;
use crate::model::picker::{Picker, PickerItem};
use crate::model::session::{SessionState, Stage};
use crate::theme::Theme;
use crate::tui_event::{AppEvent, BackendCommand};

/// Rows taken by everything except the list body: header, breadcrumb,
/// error line, footer and the list's two border rows.
const CHROME_ROWS: u16 = 6;

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typed characters edit the list filter.
    Filter,
}

/// The session controller: selection state plus the list widget showing the
/// current stage's candidates.
pub struct App {
    pub session: SessionState,
    pub picker: Picker<PickerItem>,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub tick: usize,
    pub should_quit: bool,
    /// Set when the catalog could not be loaded; the binary exits non-zero.
    pub fatal_error: Option<String>,
    destinations: Box<dyn DestinationResolver>,
}

impl App {
    pub fn new(theme: Theme, destinations: Box<dyn DestinationResolver>) -> Self {
        Self {
            session: SessionState::default(),
            picker: Picker::new(),
            input_mode: InputMode::Normal,
            theme,
            tick: 0,
            should_quit: false,
            fatal_error: None,
            destinations,
        }
    }

    pub fn stage(&self) -> Stage {
        self.session.stage()
    }

    /// Feed one event through the state machine.
    ///
    /// Returns the background operation to launch next, if any.
    pub fn dispatch(&mut self, event: AppEvent) -> Option<BackendCommand> {
        match event {
            AppEvent::Input(evt) => {
                let action = input::map_event(&evt, &self.input_mode);
                self.update(action)
            }
            AppEvent::Backend(evt) => self.handle_backend_event(evt),
        }
    }

    // update() is in update.rs
    // start(), confirm() and the stage transitions are in stages.rs
    // handle_backend_event() is in backend.rs

    /// Render the current stage.
    pub fn view(&self, f: &mut ratatui::Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // header
            Constraint::Length(1), // breadcrumb
            Constraint::Min(3),    // body
            Constraint::Length(1), // error
            Constraint::Length(1), // footer
        ])
        .split(f.area());

        crate::view::bar::render_header(f, self, chunks[0]);
        crate::view::bar::render_breadcrumb(f, self, chunks[1]);

        match self.stage() {
            Stage::BrowsingCatalog | Stage::BrowsingAudioLinks | Stage::BrowsingDestinations => {
                crate::view::picker::render_in(f, self, chunks[2])
            }
            Stage::AwaitingCatalog | Stage::AwaitingAudioLinks | Stage::Downloading => {
                crate::view::status::render_waiting(f, self, chunks[2])
            }
            Stage::ReadyToDownload => crate::view::status::render_ready(f, self, chunks[2]),
            Stage::Done => crate::view::status::render_done(f, self, chunks[2]),
        }

        crate::view::bar::render_error(f, self, chunks[3]);
        crate::view::bar::render_footer(f, self, chunks[4]);
    }
}

/// List rows available for a terminal of height `h`.
fn list_rows(h: u16) -> u16 {
    h.saturating_sub(CHROME_ROWS)
}
