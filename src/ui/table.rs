use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::app::App;
use crate::catalog::{Catalog, Column, Field, Track};

use super::visible_window;

/// Cell texts of `track` in the column order of `catalog`.
pub fn table_cells<'a>(catalog: &'a Catalog, track: &'a Track) -> Vec<&'a str> {
    catalog.columns.iter().map(|c| track.cell(c)).collect()
}

fn column_width(column: &Column) -> Constraint {
    match column {
        Column::Known(Field::Numero) => Constraint::Length(7),
        Column::Known(Field::Duracao) => Constraint::Length(8),
        _ => Constraint::Fill(1),
    }
}

/// Render every column of the filtered rows as a table.
pub fn render_table(frame: &mut Frame, area: Rect, app: &App, catalog: &Catalog) {
    let header = Row::new(catalog.header().into_iter().map(Cell::from))
        .style(Style::default().add_modifier(Modifier::BOLD));
    let widths: Vec<Constraint> = catalog.columns.iter().map(column_width).collect();

    // Borders and the header row take three lines.
    let body_height = area.height.saturating_sub(3) as usize;
    let (start, end, selected_in_window) =
        visible_window(app.view.len(), body_height, app.selected);

    let rows: Vec<Row> = app.view.rows[start..end]
        .iter()
        .filter_map(|&i| catalog.tracks.get(i))
        .map(|track| Row::new(table_cells(catalog, track).into_iter().map(Cell::from)))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    if !app.view.is_empty() {
        state.select(Some(selected_in_window));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
