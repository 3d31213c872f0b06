use std::process::ExitCode;

mod app;
mod catalog;
mod config;
mod export;
mod filter;
mod runtime;
mod ui;

fn main() -> ExitCode {
    match runtime::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("catalogo: {e}");
            ExitCode::FAILURE
        }
    }
}
