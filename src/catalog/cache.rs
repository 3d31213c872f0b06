use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::load::{LoadError, parse, read};
use super::model::Catalog;

struct CacheEntry {
    fingerprint: blake3::Hash,
    catalog: Arc<Catalog>,
}

/// Parsed catalogs keyed by path, reused while the file content is unchanged.
#[derive(Default)]
pub struct CatalogCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the catalog at `path`, parsing it only when its content changed
    /// since the last successful load.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Catalog>, LoadError> {
        let bytes = match read(path) {
            Ok(b) => b,
            Err(e) => {
                self.entries.remove(path);
                return Err(e);
            }
        };
        let fingerprint = blake3::hash(&bytes);

        if let Some(entry) = self.entries.get(path) {
            if entry.fingerprint == fingerprint {
                tracing::debug!(path = %path.display(), "catalog cache hit");
                return Ok(Arc::clone(&entry.catalog));
            }
        }

        match parse(&bytes) {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                tracing::info!(
                    path = %path.display(),
                    rows = catalog.len(),
                    columns = catalog.columns.len(),
                    "catalog loaded"
                );
                self.entries.insert(
                    path.to_path_buf(),
                    CacheEntry {
                        fingerprint,
                        catalog: Arc::clone(&catalog),
                    },
                );
                Ok(catalog)
            }
            Err(e) => {
                self.entries.remove(path);
                Err(e)
            }
        }
    }

    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }
}
