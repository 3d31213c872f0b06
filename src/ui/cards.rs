use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::catalog::{Catalog, Field, Track};

use super::visible_window;

/// Borders plus one line per entry of `card_lines`.
pub const CARD_HEIGHT: u16 = 5;

/// Card heading: `#<numero> <titulo>`.
pub fn card_title(track: &Track) -> String {
    format!("#{} {}", track.numero, track.titulo)
}

/// Labelled body lines of a card. Empty values stay empty.
pub fn card_lines(track: &Track) -> [(&'static str, &str); 3] {
    [Field::Artista, Field::Album, Field::Duracao].map(|f| (f.label(), track.get(f)))
}

fn card(track: &Track, selected: bool) -> Paragraph<'_> {
    let border_style = if selected {
        Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default()
    };

    let lines: Vec<Line> = card_lines(track)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(value),
            ])
        })
        .collect();

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(card_title(track)),
    )
}

/// Render the filtered rows as a vertical stack of cards around the selection.
pub fn render_cards(frame: &mut Frame, area: Rect, app: &App, catalog: &Catalog) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!(" cards {}/{} ", app.view.len(), catalog.len()));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let capacity = (inner.height / CARD_HEIGHT) as usize;
    let (start, end, _) = visible_window(app.view.len(), capacity, app.selected);
    if start == end {
        return;
    }

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); end - start])
        .flex(Flex::Start)
        .split(inner);

    for (slot, pos) in slots.iter().zip(start..end) {
        if let Some(track) = app.view.rows.get(pos).and_then(|&i| catalog.tracks.get(i)) {
            frame.render_widget(card(track, pos == app.selected), *slot);
        }
    }
}
