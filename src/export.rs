//! Writing filtered rows back out as a catalog file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use thiserror::Error;

use crate::catalog::{Catalog, DELIMITER};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot encode {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} is not a file path", .0.display())]
    InvalidPath(PathBuf),
    #[error("row {0} does not belong to the catalog")]
    RowOutOfRange(usize),
    #[error("nothing exported yet")]
    NothingToDeliver,
}

/// Outcome of a successful export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub rows: usize,
}

fn temp_sibling(path: &Path) -> Result<PathBuf, ExportError> {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ExportError::InvalidPath(path.to_path_buf()))?;
    Ok(path.with_file_name(format!(".{name}.tmp")))
}

/// Run `write` against a temporary sibling of `dest`, then move it into place.
/// `dest` is only ever replaced by a complete file.
fn write_atomically<F>(dest: &Path, write: F) -> Result<(), ExportError>
where
    F: FnOnce(&Path) -> Result<(), ExportError>,
{
    let tmp = temp_sibling(dest)?;
    let result = write(&tmp).and_then(|()| {
        fs::rename(&tmp, dest).map_err(|source| ExportError::Io {
            path: dest.to_path_buf(),
            source,
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Write the header and the given `rows` of `catalog` to `out_path`, keeping
/// the column order of the source file.
pub fn export_filtered(
    catalog: &Catalog,
    rows: &[usize],
    out_path: &Path,
) -> Result<ExportReport, ExportError> {
    write_atomically(out_path, |tmp| {
        let csv_err = |source: csv::Error| ExportError::Csv {
            path: tmp.to_path_buf(),
            source,
        };

        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_path(tmp)
            .map_err(csv_err)?;
        writer.write_record(catalog.header()).map_err(csv_err)?;

        for &row in rows {
            let track = catalog
                .tracks
                .get(row)
                .ok_or(ExportError::RowOutOfRange(row))?;
            writer
                .write_record(catalog.columns.iter().map(|c| track.cell(c)))
                .map_err(csv_err)?;
        }

        writer.flush().map_err(|source| ExportError::Io {
            path: tmp.to_path_buf(),
            source,
        })?;
        let file = writer.into_inner().map_err(|e| ExportError::Io {
            path: tmp.to_path_buf(),
            source: io::Error::other(e.to_string()),
        })?;
        file.sync_all().map_err(|source| ExportError::Io {
            path: tmp.to_path_buf(),
            source,
        })
    })?;

    tracing::info!(path = %out_path.display(), rows = rows.len(), "filtered rows exported");
    Ok(ExportReport {
        path: out_path.to_path_buf(),
        rows: rows.len(),
    })
}

/// Copy a finished export into `download_dir`, creating the directory if
/// needed. Returns the path of the delivered copy.
pub fn deliver(export_path: &Path, download_dir: &Path) -> Result<PathBuf, ExportError> {
    let name = export_path
        .file_name()
        .ok_or_else(|| ExportError::InvalidPath(export_path.to_path_buf()))?;
    if !export_path.is_file() {
        return Err(ExportError::NothingToDeliver);
    }

    fs::create_dir_all(download_dir).map_err(|source| ExportError::Io {
        path: download_dir.to_path_buf(),
        source,
    })?;
    let dest = download_dir.join(name);

    write_atomically(&dest, |tmp| {
        fs::copy(export_path, tmp)
            .map(|_| ())
            .map_err(|source| ExportError::Io {
                path: tmp.to_path_buf(),
                source,
            })
    })?;

    tracing::info!(from = %export_path.display(), to = %dest.display(), "export delivered");
    Ok(dest)
}
