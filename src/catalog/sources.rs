use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::CatalogSettings;

fn is_catalog_file(path: &Path, extension: &str) -> bool {
    let suffix = format!(".{}", extension.trim().trim_start_matches('.'));
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.ends_with(&suffix))
        .unwrap_or(false)
}

/// List catalog files directly inside `dir`, sorted by file name.
///
/// Unreadable entries are skipped; an empty result means there is nothing to
/// show.
pub fn list_sources(dir: &Path, settings: &CatalogSettings) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_catalog_file(p, &settings.extension))
        .collect();

    sources.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(dir = %dir.display(), count = sources.len(), "listed catalog sources");
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_catalog_file_matches_suffix_case_sensitively() {
        assert!(is_catalog_file(Path::new("/tmp/a.csv"), "csv"));
        assert!(is_catalog_file(Path::new("/tmp/a.csv"), ".csv"));
        assert!(!is_catalog_file(Path::new("/tmp/a.CSV"), "csv"));
        assert!(!is_catalog_file(Path::new("/tmp/a.tsv"), "csv"));
        assert!(!is_catalog_file(Path::new("/tmp/csv"), "csv"));
    }

    #[test]
    fn list_sources_ignores_other_files_and_subdirectories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("rock.csv"), b"numero|titulo\n").unwrap();
        fs::write(dir.path().join("jazz.csv"), b"numero|titulo\n").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();
        let sub = dir.path().join("nested.csv");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("deep.csv"), b"numero\n").unwrap();

        let sources = list_sources(dir.path(), &CatalogSettings::default());
        let names: Vec<_> = sources
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["jazz.csv", "rock.csv"]);
    }

    #[test]
    fn list_sources_is_empty_without_catalogs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), b"# nothing").unwrap();
        assert!(list_sources(dir.path(), &CatalogSettings::default()).is_empty());
    }
}
