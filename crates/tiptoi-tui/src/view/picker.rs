use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use tiptoi_core::{DestinationKind, Labeled};

use crate::app::App;
use crate::model::picker::PickerItem;
use crate::model::session::Stage;
use crate::view::truncate;

/// Render the shared selection list for the current stage.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let picker = &app.picker;

    let title = match app.stage() {
        Stage::BrowsingAudioLinks => " Audio files ",
        Stage::BrowsingDestinations => " Destinations ",
        _ => " Products ",
    };
    let count = if picker.filter().is_empty() {
        format!(" {} ", picker.visible_len())
    } else {
        format!(" {}/{} ", picker.visible_len(), picker.items().len())
    };

    let visible_height = area.height.saturating_sub(2) as usize; // borders
    let scroll_offset = picker.scroll_offset(visible_height);
    let (width, _) = picker.size();
    let label_width = width.min(area.width).saturating_sub(6) as usize;

    let items: Vec<ListItem> = picker
        .visible_items()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|item| {
            let (icon, color) = match item {
                PickerItem::Product(_) => ("\u{25B8} ", theme.text),
                PickerItem::Audio(_) => ("\u{266A} ", theme.text),
                PickerItem::Destination(d) if d.kind == DestinationKind::RemovableVolume => {
                    ("\u{25C9} ", theme.success)
                }
                PickerItem::Destination(_) => ("\u{2193} ", theme.active),
            };
            let mut spans = vec![
                Span::styled(icon, Style::default().fg(color)),
                Span::styled(
                    truncate(item.label(), label_width),
                    Style::default().fg(theme.text),
                ),
            ];
            if let PickerItem::Destination(d) = item {
                spans.push(Span::styled(
                    format!("  {}", d.path),
                    Style::default().fg(theme.dim),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(title)
                .title_bottom(Line::from(count).right_aligned()),
        )
        .highlight_style(theme.highlight_style())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if picker.selected().is_some() {
        state.select(Some(picker.cursor().saturating_sub(scroll_offset)));
    }
    f.render_stateful_widget(list, area, &mut state);
}
