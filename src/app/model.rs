//! Application model types: `App`, `Action` and the view/focus enums.
//!
//! `App` is the whole interactive state. It only changes through
//! [`App::dispatch`]; the filtered view is recomputed after every change to
//! the catalog or the criteria, so rendering can read it directly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::{Catalog, CatalogCache, Field};
use crate::export::{self, ExportError};
use crate::filter::{Criteria, FilteredView, apply_all};

/// How results are presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Table => ViewMode::Cards,
            ViewMode::Cards => ViewMode::Table,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Table => "Table",
            ViewMode::Cards => "Cards",
        }
    }
}

/// Which panel receives key input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Sources,
    Filter(Field),
    Results,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Sources,
        Focus::Filter(Field::Numero),
        Focus::Filter(Field::Artista),
        Focus::Filter(Field::Titulo),
        Focus::Filter(Field::Album),
        Focus::Results,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    pub fn is_text_input(self) -> bool {
        matches!(self, Focus::Filter(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A one-line message shown in the status box until replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// A discrete user intent. Key handling maps input to these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SelectSource(usize),
    NextSource,
    PrevSource,
    OpenHighlightedSource,
    ReloadSource,
    Focus(Focus),
    FocusNext,
    FocusPrev,
    PushChar(char),
    PopChar,
    /// Empty the focused filter input.
    ClearInput,
    ClearCriteria,
    ToggleView,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    Export,
    Deliver,
}

/// Paths and defaults the app needs from the runtime.
#[derive(Clone, Debug)]
pub struct AppOptions {
    pub export_path: PathBuf,
    pub download_dir: Option<PathBuf>,
    pub view_mode: ViewMode,
}

/// The main application model.
pub struct App {
    pub sources: Vec<PathBuf>,
    /// Source currently loaded (or that failed to load).
    pub source_index: usize,
    /// Source highlighted in the selector.
    pub source_cursor: usize,

    cache: CatalogCache,
    pub catalog: Option<Arc<Catalog>>,
    pub load_error: Option<String>,

    pub criteria: Criteria,
    pub view: FilteredView,
    pub view_mode: ViewMode,
    pub focus: Focus,
    /// Position of the selected row inside `view.rows`.
    pub selected: usize,

    pub notice: Option<Notice>,
    pub last_export: Option<PathBuf>,

    export_path: PathBuf,
    download_dir: Option<PathBuf>,
}

impl App {
    /// Create a new `App` over `sources` and load the first one.
    pub fn new(sources: Vec<PathBuf>, options: AppOptions) -> Self {
        let mut app = Self {
            sources,
            source_index: 0,
            source_cursor: 0,
            cache: CatalogCache::new(),
            catalog: None,
            load_error: None,
            criteria: Criteria::default(),
            view: FilteredView::default(),
            view_mode: options.view_mode,
            focus: Focus::Filter(Field::Numero),
            selected: 0,
            notice: None,
            last_export: None,
            export_path: options.export_path,
            download_dir: options.download_dir,
        };
        if app.has_sources() {
            app.select_source(0);
        }
        app
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn current_source(&self) -> Option<&Path> {
        self.sources.get(self.source_index).map(PathBuf::as_path)
    }

    /// Short display name of a source path.
    pub fn source_name(path: &Path) -> String {
        path.file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string())
    }

    /// Apply one action and bring derived state up to date.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SelectSource(i) => self.select_source(i),
            Action::NextSource => {
                if self.has_sources() {
                    self.source_cursor = (self.source_cursor + 1) % self.sources.len();
                }
            }
            Action::PrevSource => {
                if self.has_sources() {
                    let len = self.sources.len();
                    self.source_cursor = (self.source_cursor + len - 1) % len;
                }
            }
            Action::OpenHighlightedSource => self.select_source(self.source_cursor),
            Action::ReloadSource => {
                if let Some(path) = self.current_source().map(Path::to_path_buf) {
                    self.cache.invalidate(&path);
                    self.select_source(self.source_index);
                }
            }
            Action::Focus(f) => self.focus = f,
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::PushChar(c) => {
                if let Focus::Filter(field) = self.focus {
                    self.criteria.push_char(field, c);
                    self.refresh();
                }
            }
            Action::PopChar => {
                if let Focus::Filter(field) = self.focus {
                    self.criteria.pop_char(field);
                    self.refresh();
                }
            }
            Action::ClearInput => {
                if let Focus::Filter(field) = self.focus {
                    self.criteria.set(field, "");
                    self.refresh();
                }
            }
            Action::ClearCriteria => {
                self.criteria.clear();
                self.refresh();
            }
            Action::ToggleView => self.view_mode = self.view_mode.toggled(),
            Action::SelectNext => self.next(),
            Action::SelectPrev => self.prev(),
            Action::SelectFirst => self.selected = 0,
            Action::SelectLast => self.selected = self.view.len().saturating_sub(1),
            Action::Export => self.export(),
            Action::Deliver => self.deliver(),
        }
    }

    fn select_source(&mut self, index: usize) {
        let Some(path) = self.sources.get(index).cloned() else {
            return;
        };
        self.source_index = index;
        self.source_cursor = index;
        self.selected = 0;

        match self.cache.get_or_load(&path) {
            Ok(catalog) => {
                self.catalog = Some(catalog);
                self.load_error = None;
                self.notice = None;
            }
            Err(e) => {
                let message = format!("Failed to load {}: {e}", Self::source_name(&path));
                tracing::error!(path = %path.display(), error = %e, "catalog load failed");
                self.catalog = None;
                self.load_error = Some(message.clone());
                self.notice = Some(Notice::error(message));
            }
        }
        self.refresh();
    }

    /// Recompute the filtered view and keep the selection inside it.
    fn refresh(&mut self) {
        self.view = match self.catalog.as_deref() {
            Some(catalog) => apply_all(catalog, &self.criteria),
            None => FilteredView::default(),
        };
        if self.selected >= self.view.len() {
            self.selected = self.view.len().saturating_sub(1);
        }
    }

    /// Move selection to the next visible row, wrapping to the first.
    fn next(&mut self) {
        if !self.view.is_empty() {
            self.selected = (self.selected + 1) % self.view.len();
        }
    }

    /// Move selection to the previous visible row, wrapping to the last.
    fn prev(&mut self) {
        if !self.view.is_empty() {
            let len = self.view.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    fn export(&mut self) {
        let Some(catalog) = self.catalog.clone() else {
            self.notice = Some(Notice::error("Nothing to export: no catalog loaded"));
            return;
        };

        match export::export_filtered(&catalog, &self.view.rows, &self.export_path) {
            Ok(report) => {
                let name = Self::source_name(&report.path);
                self.last_export = Some(report.path);
                self.notice = Some(Notice::info(format!(
                    "File '{name}' written with {} rows. Press d to save a copy.",
                    report.rows
                )));
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.last_export = None;
                self.notice = Some(Notice::error(format!("Export failed: {e}")));
            }
        }
    }

    fn deliver(&mut self) {
        let Some(exported) = self.last_export.clone() else {
            self.notice = Some(Notice::warning(format!(
                "Cannot save a copy: {}",
                ExportError::NothingToDeliver
            )));
            return;
        };
        let Some(dir) = self.download_dir.clone() else {
            self.notice = Some(Notice::error("Cannot save a copy: no download directory"));
            return;
        };

        self.notice = Some(match export::deliver(&exported, &dir) {
            Ok(dest) => Notice::info(format!("Saved a copy to {}", dest.display())),
            Err(e) => {
                tracing::error!(error = %e, "delivery failed");
                Notice::error(format!("Cannot save a copy: {e}"))
            }
        });
    }
}
