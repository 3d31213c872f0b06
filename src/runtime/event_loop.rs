use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{Action, App, Focus};
use crate::catalog::Field;
use crate::config;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// What a key press asks the loop to do.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Quit,
    Dispatch(Action),
    Ignore,
}

/// Main terminal event loop: draws the UI and turns key presses into
/// actions. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key_event(key, app.focus, state) {
                    KeyOutcome::Quit => break,
                    KeyOutcome::Dispatch(action) => {
                        tracing::trace!(?action, "dispatch");
                        app.dispatch(action);
                    }
                    KeyOutcome::Ignore => {}
                }
            }
        }
    }

    Ok(())
}

/// Map a key press to an outcome given the focused panel.
pub fn handle_key_event(key: KeyEvent, focus: Focus, state: &mut EventLoopState) -> KeyOutcome {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyOutcome::Quit;
    }

    match key.code {
        KeyCode::Tab => {
            state.pending_gg = false;
            return KeyOutcome::Dispatch(Action::FocusNext);
        }
        KeyCode::BackTab => {
            state.pending_gg = false;
            return KeyOutcome::Dispatch(Action::FocusPrev);
        }
        _ => {}
    }

    if focus.is_text_input() {
        state.pending_gg = false;
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => KeyOutcome::Dispatch(Action::Focus(Focus::Results)),
            KeyCode::Backspace => KeyOutcome::Dispatch(Action::PopChar),
            KeyCode::Up => KeyOutcome::Dispatch(Action::FocusPrev),
            KeyCode::Down => KeyOutcome::Dispatch(Action::FocusNext),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyOutcome::Dispatch(Action::ClearInput)
            }
            KeyCode::Char(c) if !c.is_control() && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyOutcome::Dispatch(Action::PushChar(c))
            }
            _ => KeyOutcome::Ignore,
        };
    }

    let in_sources = focus == Focus::Sources;
    let outcome = match key.code {
        KeyCode::Char('q') => KeyOutcome::Quit,
        KeyCode::Char('/') => KeyOutcome::Dispatch(Action::Focus(Focus::Filter(Field::Numero))),
        KeyCode::Char('v') => KeyOutcome::Dispatch(Action::ToggleView),
        KeyCode::Char('c') => KeyOutcome::Dispatch(Action::ClearCriteria),
        KeyCode::Char('r') => KeyOutcome::Dispatch(Action::ReloadSource),
        KeyCode::Char('e') => KeyOutcome::Dispatch(Action::Export),
        KeyCode::Char('d') => KeyOutcome::Dispatch(Action::Deliver),
        KeyCode::Char('j') | KeyCode::Down if in_sources => {
            KeyOutcome::Dispatch(Action::NextSource)
        }
        KeyCode::Char('k') | KeyCode::Up if in_sources => KeyOutcome::Dispatch(Action::PrevSource),
        KeyCode::Enter if in_sources => KeyOutcome::Dispatch(Action::OpenHighlightedSource),
        KeyCode::Char('j') | KeyCode::Down => KeyOutcome::Dispatch(Action::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => KeyOutcome::Dispatch(Action::SelectPrev),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                return KeyOutcome::Dispatch(Action::SelectFirst);
            }
            state.pending_gg = true;
            return KeyOutcome::Ignore;
        }
        KeyCode::Home => KeyOutcome::Dispatch(Action::SelectFirst),
        KeyCode::Char('G') | KeyCode::End => KeyOutcome::Dispatch(Action::SelectLast),
        KeyCode::Esc => KeyOutcome::Dispatch(Action::Focus(Focus::Results)),
        _ => KeyOutcome::Ignore,
    };

    // g pending should clear on any other key
    state.pending_gg = false;
    outcome
}
