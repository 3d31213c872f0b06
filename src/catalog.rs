//! Catalog discovery, parsing and caching.
//!
//! A catalog is a `|`-delimited UTF-8 file with a header row naming at least
//! `numero`, `titulo`, `artista`, `album` and `duracao`. Every cell is kept as
//! text; other columns are carried along untouched.

mod cache;
mod load;
mod model;
mod sources;

pub use cache::CatalogCache;
pub use load::{DELIMITER, LoadError, parse};
#[cfg(test)]
pub use load::load;
pub use model::{Catalog, Column, Field, Track};
pub use sources::list_sources;
