//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the loaded catalog,
//! filter criteria, view mode and selection.

mod model;

pub use model::*;
