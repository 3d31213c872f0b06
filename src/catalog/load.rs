use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use super::model::{Catalog, Column, Field, Track};

/// Cell delimiter of catalog files.
pub const DELIMITER: u8 = b'|';

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("file is not valid UTF-8{}", at_line(.line))]
    Encoding { line: Option<u64> },
    #[error("file has no header row")]
    MissingHeader,
    #[error("line {line}: expected at most {expected} cells, found {found}")]
    Malformed {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("cannot parse catalog: {0}")]
    Parse(#[source] csv::Error),
}

fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        if let csv::ErrorKind::Utf8 { pos, .. } = err.kind() {
            return LoadError::Encoding {
                line: pos.as_ref().map(|p| p.line()),
            };
        }
        LoadError::Parse(err)
    }
}

/// Read the raw bytes of the catalog at `path`.
pub fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse the catalog at `path`. The app goes through
/// [`CatalogCache`](super::CatalogCache), which fingerprints the bytes first.
#[cfg(test)]
pub fn load(path: &Path) -> Result<Catalog, LoadError> {
    parse(&read(path)?)
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum CellState {
    Start,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Drop the ASCII spaces that open a cell, so that `a | "b|c"` reads the
/// second cell as a quoted field. Spaces inside quotes or after the first
/// character of a cell are kept.
fn skip_initial_spaces(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = CellState::Start;
    for &b in bytes {
        let ends_cell = b == DELIMITER || b == b'\n' || b == b'\r';
        state = match state {
            CellState::Start if b == b' ' => continue,
            CellState::Start if b == b'"' => CellState::Quoted,
            CellState::Quoted if b == b'"' => CellState::QuoteInQuoted,
            CellState::Quoted => CellState::Quoted,
            CellState::QuoteInQuoted if b == b'"' => CellState::Quoted,
            _ if ends_cell => CellState::Start,
            _ => CellState::Unquoted,
        };
        out.push(b);
    }
    out
}

/// Parse catalog text. Spaces opening a cell are skipped; short rows are
/// padded with empty strings; rows wider than the header are rejected.
pub fn parse(bytes: &[u8]) -> Result<Catalog, LoadError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = skip_initial_spaces(bytes);
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_slice());

    let header = reader.headers()?.clone();
    let columns = columns_from_header(&header);
    if columns.is_empty() {
        return Err(LoadError::MissingHeader);
    }
    let extra_count = columns
        .iter()
        .filter(|c| matches!(c, Column::Extra { .. }))
        .count();

    let mut tracks = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > columns.len() {
            return Err(LoadError::Malformed {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: columns.len(),
                found: record.len(),
            });
        }

        let mut track = Track {
            extra: vec![String::new(); extra_count],
            ..Track::default()
        };
        for (column, value) in columns.iter().zip(record.iter()) {
            let value = value.to_string();
            match column {
                Column::Known(f) => track.set(*f, value),
                Column::Extra { slot, .. } => track.extra[*slot] = value,
            }
        }
        tracks.push(track);
    }

    Ok(Catalog { columns, tracks })
}

fn columns_from_header(header: &StringRecord) -> Vec<Column> {
    if header.len() == 1 && header[0].trim().is_empty() {
        return Vec::new();
    }

    let mut columns: Vec<Column> = Vec::with_capacity(header.len());
    let mut slot = 0;
    for name in header.iter() {
        // A repeated known header is kept as an uninterpreted column.
        let known = Field::from_column_name(name).filter(|f| !columns.contains(&Column::Known(*f)));
        match known {
            Some(f) => columns.push(Column::Known(f)),
            None => {
                columns.push(Column::Extra {
                    name: name.to_string(),
                    slot,
                });
                slot += 1;
            }
        }
    }
    columns
}
