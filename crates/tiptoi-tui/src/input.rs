use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::Filter => map_key_filter(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Char('/') => Action::StartFilter,
        KeyCode::Char('g') | KeyCode::Home => Action::GoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoBottom,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        _ => Action::None,
    }
}

fn map_key_filter(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::FilterCancel,
        KeyCode::Enter => Action::FilterConfirm,
        KeyCode::Backspace => Action::FilterBackspace,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Up => Action::MoveUp,
        KeyCode::Char(c) => Action::FilterInput(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        assert_eq!(map_event(&ctrl('c'), &InputMode::Normal), Action::Quit);
        assert_eq!(map_event(&ctrl('c'), &InputMode::Filter), Action::Quit);
    }

    #[test]
    fn q_quits_only_outside_filter_mode() {
        let q = key(KeyCode::Char('q'));
        assert_eq!(map_event(&q, &InputMode::Normal), Action::Quit);
        assert_eq!(map_event(&q, &InputMode::Filter), Action::FilterInput('q'));
    }

    #[test]
    fn enter_confirms_in_normal_mode() {
        assert_eq!(
            map_event(&key(KeyCode::Enter), &InputMode::Normal),
            Action::Confirm
        );
        assert_eq!(
            map_event(&key(KeyCode::Enter), &InputMode::Filter),
            Action::FilterConfirm
        );
    }

    #[test]
    fn resize_is_forwarded() {
        assert_eq!(
            map_event(&Event::Resize(120, 40), &InputMode::Normal),
            Action::Resize(120, 40)
        );
    }
}
