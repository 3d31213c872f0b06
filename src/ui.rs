//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. Drawing
//! reads the `App` and never mutates it.

mod cards;
mod table;

pub use cards::{card_lines, card_title};
pub use table::table_cells;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Focus, NoticeLevel, ViewMode};
use crate::catalog::Field;
use crate::config::UiSettings;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("tab".to_string(), "next panel".to_string());
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("enter".to_string(), "open catalog".to_string());
    map.insert("/".to_string(), "filter".to_string());
    map.insert("esc".to_string(), "leave filter".to_string());
    map.insert("ctrl-u".to_string(), "clear input".to_string());
    map.insert("c".to_string(), "clear filters".to_string());
    map.insert("v".to_string(), "table/cards".to_string());
    map.insert("r".to_string(), "reload".to_string());
    map.insert("e".to_string(), "export".to_string());
    map.insert("d".to_string(), "save copy".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "tab", "j/k", "gg/G", "enter", "/", "esc", "ctrl-u", "c", "v", "r", "e", "d", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Window `[start, end)` of at most `height` items keeping `selected` centered
/// when possible, plus the selected position inside the window.
pub(crate) fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if height == 0 || total == 0 {
        return (0, 0, 0);
    }
    let selected = selected.min(total - 1);
    if total <= height {
        return (0, total, selected);
    }

    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn focused_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

/// Status line text: source, result count, view mode, warnings and notice.
pub fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(path) = app.current_source() {
        parts.push(format!(" Catalog: {}", App::source_name(path)));
    }

    match app.catalog.as_deref() {
        Some(catalog) => parts.push(format!(
            "Tracks found: {} of {}",
            app.view.len(),
            catalog.len()
        )),
        None => parts.push("Tracks found: 0".to_string()),
    }

    parts.push(format!("View: {}", app.view_mode.label()));

    if !app.criteria.is_empty() {
        let active: Vec<String> = app
            .criteria
            .active()
            .map(|(field, pattern)| format!("{}~{pattern}", field.label().to_lowercase()))
            .collect();
        parts.push(format!("Filters: {}", active.join(", ")));
    }

    for warning in &app.view.warnings {
        parts.push(format!("Warning: {warning}"));
    }

    if let Some(notice) = &app.notice {
        let tag = match notice.level {
            NoticeLevel::Info => "OK",
            NoticeLevel::Warning => "Warning",
            NoticeLevel::Error => "Error",
        };
        parts.push(format!("{tag}: {}", notice.text));
    }

    parts.join(" • ")
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Min(3)];
    constraints.extend(Field::FILTERABLE.iter().map(|_| Constraint::Length(3)));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let items: Vec<ListItem> = app
        .sources
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let marker = if i == app.source_index { "● " } else { "  " };
            ListItem::new(format!("{marker}{}", App::source_name(p)))
        })
        .collect();
    let list = List::new(items)
        .block(focused_block(
            " catalogs ".to_string(),
            app.focus == Focus::Sources,
        ))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if app.has_sources() {
        state.select(Some(app.source_cursor));
    }
    frame.render_stateful_widget(list, chunks[0], &mut state);

    for (field, chunk) in Field::FILTERABLE.iter().zip(chunks.iter().skip(1)) {
        let focused = app.focus == Focus::Filter(*field);
        let skipped = app.view.warnings.iter().any(|w| w.field() == *field);
        let mut text = app.criteria.get(*field).to_string();
        if focused {
            text.push('▏');
        }
        let mut title = format!(" {} ", field.label().to_lowercase());
        if skipped {
            title.push_str("(skipped) ");
        }
        let mut block = focused_block(title, focused);
        if skipped {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }
        frame.render_widget(Paragraph::new(text).block(block), *chunk);
    }
}

fn draw_results(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Results;

    if let Some(err) = &app.load_error {
        let paragraph = Paragraph::new(err.as_str())
            .style(Style::default().fg(Color::Red))
            .block(focused_block(" tracks ".to_string(), focused))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let Some(catalog) = app.catalog.as_deref() else {
        let paragraph = Paragraph::new("No catalog loaded")
            .block(focused_block(" tracks ".to_string(), focused));
        frame.render_widget(paragraph, area);
        return;
    };

    match app.view_mode {
        ViewMode::Table => table::render_table(frame, area, app, catalog),
        ViewMode::Cards => cards::render_cards(frame, area, app, catalog),
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" catalogo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(20)])
        .split(chunks[1]);
    draw_sidebar(frame, body[0], app);
    draw_results(frame, body[1], app);

    let status_style = match app.notice.as_ref().map(|n| n.level) {
        Some(NoticeLevel::Error) => Style::default().fg(Color::Red),
        Some(NoticeLevel::Warning) => Style::default().fg(Color::Yellow),
        _ if !app.view.warnings.is_empty() => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    };
    let status_par = Paragraph::new(status_text(app))
        .style(status_style)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[2]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests;
