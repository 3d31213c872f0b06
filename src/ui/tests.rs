use super::*;
use super::cards::CARD_HEIGHT;
use crate::app::{Action, AppOptions};
use crate::catalog::{Track, parse};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use std::fs;
use tempfile::{TempDir, tempdir};

const BEATLES_LENNON: &str = "numero|titulo|artista|album|duracao\n\
1|Let It Be|The Beatles|Let It Be|3:50\n\
2|Imagine|John Lennon|Imagine|3:03\n";

fn app_over(body: &str) -> (TempDir, App) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalogo.csv");
    fs::write(&path, body).unwrap();
    let app = App::new(
        vec![path],
        AppOptions {
            export_path: dir.path().join("resultados_filtrados.csv"),
            download_dir: None,
            view_mode: ViewMode::Table,
        },
    );
    (dir, app)
}

fn render_buffer(app: &App) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal
        .draw(|f| draw(f, app, &UiSettings::default()))
        .unwrap();
    terminal.backend().buffer().clone()
}

fn render(app: &App) -> String {
    let buffer = render_buffer(app);
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn filter_artist(app: &mut App, text: &str) {
    app.dispatch(Action::Focus(Focus::Filter(Field::Artista)));
    for c in text.chars() {
        app.dispatch(Action::PushChar(c));
    }
}

#[test]
fn visible_window_centers_selection() {
    assert_eq!(visible_window(0, 10, 0), (0, 0, 0));
    assert_eq!(visible_window(5, 0, 2), (0, 0, 0));
    assert_eq!(visible_window(5, 10, 3), (0, 5, 3));
    assert_eq!(visible_window(100, 10, 50), (45, 55, 5));
    assert_eq!(visible_window(100, 10, 2), (0, 10, 2));
    assert_eq!(visible_window(100, 10, 99), (90, 100, 9));
}

#[test]
fn card_helpers_render_blank_for_empty_fields() {
    let track = Track {
        numero: "7".into(),
        titulo: "Untitled".into(),
        ..Track::default()
    };
    assert_eq!(card_title(&track), "#7 Untitled");
    assert_eq!(
        card_lines(&track),
        [("Artist", ""), ("Album", ""), ("Duration", "")]
    );
}

#[test]
fn table_cells_follow_file_column_order() {
    let catalog = parse("titulo|numero|extra\nSong|1|x\n".as_bytes()).unwrap();
    assert_eq!(table_cells(&catalog, &catalog.tracks[0]), vec!["Song", "1", "x"]);
}

#[test]
fn table_shows_only_filtered_rows() {
    let (_dir, mut app) = app_over(BEATLES_LENNON);
    let screen = render(&app);
    assert!(screen.contains("The Beatles"));
    assert!(screen.contains("John Lennon"));
    assert!(screen.contains("Tracks found: 2 of 2"));

    filter_artist(&mut app, "lennon");
    let screen = render(&app);
    assert!(screen.contains("John Lennon"));
    assert!(!screen.contains("The Beatles"));
    assert!(screen.contains("Tracks found: 1 of 2"));
    assert!(screen.contains("artista"));
}

#[test]
fn cards_show_only_filtered_rows() {
    let (_dir, mut app) = app_over(BEATLES_LENNON);
    app.dispatch(Action::ToggleView);
    filter_artist(&mut app, "lennon");

    let screen = render(&app);
    assert!(screen.contains("#2 Imagine"));
    assert!(screen.contains("Artist: John Lennon"));
    assert!(screen.contains("Duration: 3:03"));
    assert!(!screen.contains("Let It Be"));
    assert!(screen.contains("View: Cards"));
}

#[test]
fn missing_cells_render_blank_in_both_modes() {
    let (_dir, mut app) = app_over("numero|titulo|artista|album|duracao\n5|Lonely Title\n");
    let screen = render(&app);
    assert!(screen.contains("Lonely Title"));
    assert!(!screen.contains("None"));
    assert!(!screen.contains("undefined"));

    app.dispatch(Action::ToggleView);
    let screen = render(&app);
    assert!(screen.contains("#5 Lonely Title"));
    assert!(screen.contains("Album: "));
    assert!(!screen.contains("None"));
}

#[test]
fn load_error_replaces_results() {
    let (_dir, app) = app_over("numero|titulo\n1|A|B|C\n");
    let screen = render(&app);
    assert!(screen.contains("Failed to load catalogo.csv"));
    assert!(screen.contains("Tracks found: 0"));
}

#[test]
fn status_lists_filter_warnings() {
    let (_dir, mut app) = app_over("numero|titulo|artista\n1|Song|Band\n");
    app.dispatch(Action::Focus(Focus::Filter(Field::Album)));
    app.dispatch(Action::PushChar('x'));

    let status = status_text(&app);
    assert!(status.contains("Warning: cannot filter by album"));
    assert!(status.contains("Tracks found: 1 of 1"));
    assert!(status.contains("Filters: album~x"));

    let screen = render(&app);
    assert!(screen.contains(" album (skipped) "));
    assert!(!screen.contains(" artist (skipped) "));
}

#[test]
fn cards_keep_their_height_when_few_rows_match() {
    let (_dir, mut app) = app_over(BEATLES_LENNON);
    app.dispatch(Action::ToggleView);
    filter_artist(&mut app, "lennon");

    // Results start at column 30, row 3; the outer block border takes one cell.
    let buffer = render_buffer(&app);
    let (x, top) = (31, 4);
    assert_eq!(buffer[(x, top)].symbol(), "┌");
    assert_eq!(buffer[(x, top + CARD_HEIGHT - 1)].symbol(), "└");
    assert_eq!(buffer[(x, top + CARD_HEIGHT)].symbol(), " ");
}
