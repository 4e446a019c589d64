use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::model::session::Stage;
use crate::view::spinner_char;

/// Spinner panel while a background operation runs.
pub fn render_waiting(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let session = &app.session;

    let message = match app.stage() {
        Stage::AwaitingCatalog => "Fetching product catalog\u{2026}".to_string(),
        Stage::AwaitingAudioLinks => format!(
            "Looking for audio files of {}\u{2026}",
            session
                .selected_product
                .as_ref()
                .map_or("product", |p| p.name.as_str())
        ),
        _ => format!(
            "Downloading {} ({}%)",
            session
                .selected_audio
                .as_ref()
                .map_or("file", |a| a.name.as_str()),
            session.download_progress.as_percent()
        ),
    };

    // A failed download leaves progress in flight; stop the spinner then.
    let failed = app.stage() == Stage::Downloading && session.last_error.is_some();
    let (marker, color) = if failed {
        ('\u{2717}', theme.error)
    } else {
        (spinner_char(app.tick), theme.spinner)
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {} ", marker),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(message, Style::default().fg(theme.text)),
        ]),
    ];
    render_panel(f, app, area, lines);
}

/// Summary of the chosen file and destination, waiting for confirmation.
pub fn render_ready(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let session = &app.session;
    let label = Style::default().fg(theme.dim);
    let value = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Product:     ", label),
            Span::styled(
                session
                    .selected_product
                    .as_ref()
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled("  Audio file:  ", label),
            Span::styled(
                session
                    .selected_audio
                    .as_ref()
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled("  Destination: ", label),
            Span::styled(session.destination_path.clone().unwrap_or_default(), value),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to download",
            Style::default().fg(theme.warning),
        )),
    ];
    render_panel(f, app, area, lines);
}

pub fn render_done(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let path = app
        .session
        .downloaded_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  \u{2713} Saved to {}", path),
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    render_panel(f, app, area, lines);
}

fn render_panel(f: &mut Frame, app: &App, area: Rect, lines: Vec<Line<'_>>) {
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.border_style()),
    );
    f.render_widget(paragraph, area);
}
