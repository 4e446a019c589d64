use super::{App, InputMode, list_rows};
use crate::action::Action;
use crate::tui_event::BackendCommand;

impl App {
    /// Process a user action and update state.
    ///
    /// Returns the background operation to launch, if the action started one.
    pub fn update(&mut self, action: Action) -> Option<BackendCommand> {
        match action {
            // Accepted in every stage and mode; in-flight work is abandoned.
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::Resize(w, h) => {
                self.picker.resize(w, list_rows(h));
                None
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                None
            }
            Action::None => None,
            _ if self.input_mode == InputMode::Filter => {
                self.handle_filter_action(action);
                None
            }
            Action::MoveDown => {
                self.picker.move_down();
                None
            }
            Action::MoveUp => {
                self.picker.move_up();
                None
            }
            Action::PageDown => {
                self.picker.page_down();
                None
            }
            Action::PageUp => {
                self.picker.page_up();
                None
            }
            Action::GoTop => {
                self.picker.go_top();
                None
            }
            Action::GoBottom => {
                self.picker.go_bottom();
                None
            }
            Action::StartFilter => {
                if self.stage().is_browsing() && !self.picker.is_empty() {
                    self.input_mode = InputMode::Filter;
                }
                None
            }
            Action::Confirm => self.confirm(),
            Action::FilterInput(_)
            | Action::FilterBackspace
            | Action::FilterConfirm
            | Action::FilterCancel => None,
        }
    }

    fn handle_filter_action(&mut self, action: Action) {
        match action {
            Action::FilterInput(c) => self.picker.push_filter_char(c),
            Action::FilterBackspace => self.picker.pop_filter_char(),
            Action::FilterConfirm => self.input_mode = InputMode::Normal,
            Action::FilterCancel => {
                self.picker.clear_filter();
                self.input_mode = InputMode::Normal;
            }
            Action::MoveDown => self.picker.move_down(),
            Action::MoveUp => self.picker.move_up(),
            _ => {}
        }
    }
}
