use std::env;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    match logging::init_logging(&settings.logging) {
        Ok(Some(path)) => tracing::info!(log = %path.display(), "catalogo starting"),
        Ok(None) => {}
        Err(e) => eprintln!("catalogo: logging disabled: {e}"),
    }

    let dir = startup::resolve_catalog_dir(env::args().nth(1), &settings.catalog);
    let sources = startup::discover_sources(&dir, &settings.catalog)?;
    let mut app = App::new(sources, startup::app_options(&dir, &settings));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("catalogo exiting");
    run_result
}
