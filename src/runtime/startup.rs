use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::app::{AppOptions, ViewMode};
use crate::catalog::list_sources;
use crate::config;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no catalog found in {}", .dir.display())]
    NoCatalogs { dir: PathBuf },
}

/// Catalog directory: command-line argument, then config, then the working directory.
pub fn resolve_catalog_dir(arg: Option<String>, settings: &config::CatalogSettings) -> PathBuf {
    arg.map(PathBuf::from)
        .or_else(|| settings.dir.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// List the catalogs in `dir`, failing when there are none.
pub fn discover_sources(
    dir: &Path,
    settings: &config::CatalogSettings,
) -> Result<Vec<PathBuf>, StartupError> {
    let sources = list_sources(dir, settings);
    if sources.is_empty() {
        tracing::error!(dir = %dir.display(), "no catalog found");
        return Err(StartupError::NoCatalogs {
            dir: dir.to_path_buf(),
        });
    }
    tracing::info!(dir = %dir.display(), count = sources.len(), "catalogs discovered");
    Ok(sources)
}

pub fn app_options(dir: &Path, settings: &config::Settings) -> AppOptions {
    AppOptions {
        export_path: dir.join(settings.export.file_name.trim()),
        download_dir: settings
            .export
            .download_dir
            .clone()
            .or_else(config::default_download_dir),
        view_mode: match settings.ui.default_view {
            config::ViewModeSetting::Table => ViewMode::Table,
            config::ViewModeSetting::Cards => ViewMode::Cards,
        },
    }
}
