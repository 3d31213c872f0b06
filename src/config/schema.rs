use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/catalogo/config.toml` or `~/.config/catalogo/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CATALOGO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub export: ExportSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Directory scanned for catalogs. The command-line argument wins over
    /// this; the working directory is used when neither is given.
    pub dir: Option<PathBuf>,
    /// File name suffix of catalog files, without the dot.
    pub extension: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            dir: None,
            extension: "csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Name of the export file, written into the catalog directory.
    pub file_name: String,
    /// Where `d` copies the last export. Falls back to `$XDG_DOWNLOAD_DIR`
    /// or `~/Downloads`.
    pub download_dir: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: "resultados_filtrados.csv".to_string(),
            download_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// View used when the app starts.
    pub default_view: ViewModeSetting,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ music catalog ~ ".to_string(),
            default_view: ViewModeSetting::Table,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewModeSetting {
    #[serde(alias = "tabela", alias = "tabular")]
    Table,
    #[serde(alias = "card", alias = "grid")]
    Cards,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file path. Defaults to `$XDG_STATE_HOME/catalogo/catalogo.log`.
    pub file: Option<PathBuf>,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: "catalogo=info".to_string(),
        }
    }
}
