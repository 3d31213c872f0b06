//! Substring filtering over catalog rows.
//!
//! Each criterion narrows the row set independently; a criterion that cannot
//! be evaluated is skipped with a [`FilterWarning`] instead of failing the
//! whole view.

use std::fmt;

use crate::catalog::{Catalog, Field};

/// One substring pattern per filterable field. Empty means unconstrained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Criteria {
    numero: String,
    artista: String,
    titulo: String,
    album: String,
}

impl Criteria {
    fn slot(&self, field: Field) -> Option<&String> {
        match field {
            Field::Numero => Some(&self.numero),
            Field::Artista => Some(&self.artista),
            Field::Titulo => Some(&self.titulo),
            Field::Album => Some(&self.album),
            Field::Duracao => None,
        }
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Numero => Some(&mut self.numero),
            Field::Artista => Some(&mut self.artista),
            Field::Titulo => Some(&mut self.titulo),
            Field::Album => Some(&mut self.album),
            Field::Duracao => None,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        self.slot(field).map(String::as_str).unwrap_or("")
    }

    /// Set the pattern for `field`. Fields that are not filterable are ignored.
    pub fn set(&mut self, field: Field, pattern: impl Into<String>) {
        if let Some(s) = self.slot_mut(field) {
            *s = pattern.into();
        }
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        if let Some(s) = self.slot_mut(field) {
            s.push(c);
        }
    }

    pub fn pop_char(&mut self, field: Field) {
        if let Some(s) = self.slot_mut(field) {
            s.pop();
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Non-empty criteria in application order.
    pub fn active(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::FILTERABLE
            .into_iter()
            .map(|f| (f, self.get(f)))
            .filter(|(_, p)| !p.is_empty())
    }
}

/// A criterion that was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterWarning {
    /// The catalog has no column for the field.
    MissingColumn(Field),
    /// A row index does not belong to the catalog.
    RowOutOfRange { field: Field, row: usize },
}

impl FilterWarning {
    pub fn field(&self) -> Field {
        match self {
            FilterWarning::MissingColumn(f) => *f,
            FilterWarning::RowOutOfRange { field, .. } => *field,
        }
    }
}

impl fmt::Display for FilterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterWarning::MissingColumn(field) => {
                write!(f, "cannot filter by {field}: column not in catalog")
            }
            FilterWarning::RowOutOfRange { field, row } => {
                write!(f, "cannot filter by {field}: row {row} is out of range")
            }
        }
    }
}

/// Rows of a catalog that satisfy all applicable criteria.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilteredView {
    /// Indices into `Catalog::tracks`, ascending.
    pub rows: Vec<usize>,
    pub warnings: Vec<FilterWarning>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Keep the rows whose `field` contains `pattern`, ignoring case.
///
/// An empty pattern returns `rows` unchanged. On a warning the caller is
/// expected to keep its input as is.
pub fn apply_filter(
    catalog: &Catalog,
    rows: &[usize],
    field: Field,
    pattern: &str,
) -> Result<Vec<usize>, FilterWarning> {
    if pattern.is_empty() {
        return Ok(rows.to_vec());
    }
    if !catalog.has_field(field) {
        return Err(FilterWarning::MissingColumn(field));
    }

    let needle = pattern.to_lowercase();
    let mut kept = Vec::with_capacity(rows.len());
    for &row in rows {
        let track = catalog
            .tracks
            .get(row)
            .ok_or(FilterWarning::RowOutOfRange { field, row })?;
        if track.get(field).to_lowercase().contains(&needle) {
            kept.push(row);
        }
    }
    Ok(kept)
}

/// Apply every criterion in turn, starting from all rows of `catalog`.
pub fn apply_all(catalog: &Catalog, criteria: &Criteria) -> FilteredView {
    let mut view = FilteredView {
        rows: (0..catalog.len()).collect(),
        warnings: Vec::new(),
    };

    for (field, pattern) in criteria.active() {
        match apply_filter(catalog, &view.rows, field, pattern) {
            Ok(rows) => view.rows = rows,
            Err(warning) => {
                tracing::warn!(%field, %warning, "filter skipped");
                view.warnings.push(warning);
            }
        }
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse;
    use pretty_assertions::assert_eq;

    fn sample() -> Catalog {
        parse(
            "numero|titulo|artista|album|duracao\n\
1|Let It Be|The Beatles|Let It Be|3:50\n\
2|Imagine|John Lennon|Imagine|3:03\n\
03|Something|The Beatles|Abbey Road|3:03\n\
4|Jealous Guy|John Lennon|Imagine|4:14\n\
5|Ação|Caetano Veloso|Transa|\n"
                .as_bytes(),
        )
        .unwrap()
    }

    fn titles(catalog: &Catalog, rows: &[usize]) -> Vec<String> {
        rows.iter()
            .map(|&i| catalog.tracks[i].titulo.clone())
            .collect()
    }

    #[test]
    fn empty_pattern_is_a_no_op() {
        let catalog = sample();
        for row in 0..catalog.len() {
            for field in Field::ALL {
                assert_eq!(apply_filter(&catalog, &[row], field, ""), Ok(vec![row]));
            }
        }
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let catalog = sample();
        let all: Vec<usize> = (0..catalog.len()).collect();
        let rows = apply_filter(&catalog, &all, Field::Artista, "bee").unwrap();
        assert_eq!(titles(&catalog, &rows), vec!["Let It Be", "Something"]);

        let rows = apply_filter(&catalog, &all, Field::Titulo, "AÇÃO").unwrap();
        assert_eq!(titles(&catalog, &rows), vec!["Ação"]);
    }

    #[test]
    fn pattern_is_matched_literally() {
        let catalog = sample();
        let all: Vec<usize> = (0..catalog.len()).collect();
        assert_eq!(apply_filter(&catalog, &all, Field::Titulo, ".*"), Ok(vec![]));
    }

    #[test]
    fn numero_is_matched_as_text() {
        let catalog = sample();
        let all: Vec<usize> = (0..catalog.len()).collect();
        let rows = apply_filter(&catalog, &all, Field::Numero, "03").unwrap();
        assert_eq!(titles(&catalog, &rows), vec!["Something"]);
    }

    #[test]
    fn lennon_scenario_yields_second_row_only() {
        let catalog = parse(
            "numero|titulo|artista|album|duracao\n\
1|Let It Be|The Beatles|Let It Be|3:50\n\
2|Imagine|John Lennon|Imagine|3:03\n"
                .as_bytes(),
        )
        .unwrap();
        let mut criteria = Criteria::default();
        criteria.set(Field::Artista, "lennon");

        let view = apply_all(&catalog, &criteria);
        assert_eq!(view.rows, vec![1]);
        assert!(view.warnings.is_empty());
    }

    #[test]
    fn criteria_combine_with_and_in_any_order() {
        let catalog = sample();
        let mut criteria = Criteria::default();
        criteria.set(Field::Artista, "lennon");
        criteria.set(Field::Album, "imagine");
        criteria.set(Field::Titulo, "guy");
        let view = apply_all(&catalog, &criteria);
        assert_eq!(titles(&catalog, &view.rows), vec!["Jealous Guy"]);

        let all: Vec<usize> = (0..catalog.len()).collect();
        let a = apply_filter(&catalog, &all, Field::Titulo, "guy").unwrap();
        let a = apply_filter(&catalog, &a, Field::Album, "imagine").unwrap();
        let a = apply_filter(&catalog, &a, Field::Artista, "lennon").unwrap();
        assert_eq!(a, view.rows);
    }

    #[test]
    fn filtered_rows_are_an_ordered_subsequence() {
        let catalog = sample();
        for pattern in ["", "e", "the", "i", "zzz", "3"] {
            let mut criteria = Criteria::default();
            criteria.set(Field::Titulo, pattern);
            criteria.set(Field::Numero, if pattern == "3" { "3" } else { "" });
            let view = apply_all(&catalog, &criteria);
            assert!(view.rows.windows(2).all(|w| w[0] < w[1]));
            assert!(view.rows.iter().all(|&r| r < catalog.len()));
        }
    }

    #[test]
    fn missing_column_warns_and_keeps_other_filters() {
        let catalog = parse(
            "numero|titulo|artista|duracao\n\
1|Let It Be|The Beatles|3:50\n\
2|Imagine|John Lennon|3:03\n"
                .as_bytes(),
        )
        .unwrap();
        let mut criteria = Criteria::default();
        criteria.set(Field::Album, "imagine");
        criteria.set(Field::Artista, "beatles");

        let view = apply_all(&catalog, &criteria);
        assert_eq!(view.rows, vec![0]);
        assert_eq!(view.warnings, vec![FilterWarning::MissingColumn(Field::Album)]);
        assert_eq!(view.warnings[0].field(), Field::Album);
        assert!(view.warnings[0].to_string().contains("album"));
    }

    #[test]
    fn out_of_range_rows_are_reported_not_panicked() {
        let catalog = sample();
        let err = apply_filter(&catalog, &[0, 99], Field::Titulo, "let").unwrap_err();
        assert_eq!(
            err,
            FilterWarning::RowOutOfRange {
                field: Field::Titulo,
                row: 99
            }
        );
    }

    #[test]
    fn criteria_edit_helpers() {
        let mut criteria = Criteria::default();
        assert!(criteria.is_empty());
        criteria.push_char(Field::Album, 'a');
        criteria.push_char(Field::Album, 'b');
        assert_eq!(criteria.get(Field::Album), "ab");
        criteria.pop_char(Field::Album);
        assert_eq!(criteria.get(Field::Album), "a");

        criteria.set(Field::Duracao, "3:");
        assert_eq!(criteria.get(Field::Duracao), "");

        criteria.set(Field::Numero, "1");
        let active: Vec<Field> = criteria.active().map(|(f, _)| f).collect();
        assert_eq!(active, vec![Field::Numero, Field::Album]);

        criteria.clear();
        assert!(criteria.is_empty());
    }
}
