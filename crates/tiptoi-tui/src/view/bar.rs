use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, InputMode};
use crate::model::session::Stage;

/// Title bar with the current stage.
pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let stage = app.stage();
    let mut spans = vec![
        Span::styled(" tiptoi ", theme.header_style()),
        Span::styled(
            format!(" > {}", stage.label()),
            Style::default()
                .fg(theme.stage_color(stage))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if app.session.catalog.is_some() {
        spans.push(Span::styled(
            format!("  {} products", app.session.catalog_count()),
            Style::default().fg(theme.dim),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// What has been chosen so far: product › audio file › destination.
pub fn render_breadcrumb(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let session = &app.session;
    let sep = Span::styled(" \u{203A} ", Style::default().fg(theme.dim));

    let mut spans = vec![Span::raw(" ")];
    let chosen = [
        session.selected_product.as_ref().map(|p| p.name.as_str()),
        session.selected_audio.as_ref().map(|a| a.name.as_str()),
        session.destination_path.as_deref(),
    ];
    for (i, part) in chosen.iter().flatten().enumerate() {
        if i > 0 {
            spans.push(sep.clone());
        }
        spans.push(Span::styled(part.to_string(), Style::default().fg(theme.text)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_error(f: &mut Frame, app: &App, area: Rect) {
    let Some(err) = &app.session.last_error else {
        return;
    };
    let prefix = format!(" \u{2717} {}: ", err.stage.label());
    let width = (area.width as usize).saturating_sub(prefix.chars().count());
    let line = Line::from(vec![
        Span::styled(prefix, app.theme.error_style()),
        Span::styled(super::truncate(&err.message, width), app.theme.error_style()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Key hints, or the filter prompt while filtering.
pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = if app.input_mode == InputMode::Filter {
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(theme.active)),
            Span::styled(app.picker.filter().to_string(), Style::default().fg(theme.text)),
            Span::styled("\u{2588}", Style::default().fg(theme.active)),
            Span::styled(
                "   Enter:keep  Esc:clear",
                Style::default().fg(theme.footer_fg),
            ),
        ])
    } else {
        let hints = match app.stage() {
            Stage::BrowsingCatalog | Stage::BrowsingAudioLinks | Stage::BrowsingDestinations => {
                " j/k:move  Enter:select  /:filter  q:quit"
            }
            Stage::ReadyToDownload => " Enter:download  q:quit",
            Stage::AwaitingCatalog
            | Stage::AwaitingAudioLinks
            | Stage::Downloading
            | Stage::Done => " q:quit",
        };
        Line::from(Span::styled(hints, theme.footer_style()))
    };
    f.render_widget(Paragraph::new(line), area);
}
