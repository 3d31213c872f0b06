use std::fmt;

/// The five known catalog fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Numero,
    Titulo,
    Artista,
    Album,
    Duracao,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Numero,
        Field::Titulo,
        Field::Artista,
        Field::Album,
        Field::Duracao,
    ];

    /// Fields the user can filter on, in the order filters are applied.
    pub const FILTERABLE: [Field; 4] = [Field::Numero, Field::Artista, Field::Titulo, Field::Album];

    /// Header name of the field in a catalog file.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Numero => "numero",
            Field::Titulo => "titulo",
            Field::Artista => "artista",
            Field::Album => "album",
            Field::Duracao => "duracao",
        }
    }

    /// Human-readable label used by the UI.
    pub fn label(self) -> &'static str {
        match self {
            Field::Numero => "Number",
            Field::Titulo => "Title",
            Field::Artista => "Artist",
            Field::Album => "Album",
            Field::Duracao => "Duration",
        }
    }

    pub fn from_column_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One column of a loaded catalog, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Known(Field),
    /// A column the viewer does not interpret. `slot` indexes `Track::extra`.
    Extra { name: String, slot: usize },
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Column::Known(f) => f.column_name(),
            Column::Extra { name, .. } => name,
        }
    }
}

/// A single catalog row. Every value is kept as text exactly as loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Track {
    pub numero: String,
    pub titulo: String,
    pub artista: String,
    pub album: String,
    pub duracao: String,
    pub extra: Vec<String>,
}

impl Track {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Numero => &self.numero,
            Field::Titulo => &self.titulo,
            Field::Artista => &self.artista,
            Field::Album => &self.album,
            Field::Duracao => &self.duracao,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Numero => self.numero = value,
            Field::Titulo => self.titulo = value,
            Field::Artista => self.artista = value,
            Field::Album => self.album = value,
            Field::Duracao => self.duracao = value,
        }
    }

    /// Value of `column` for this track; empty when the track has no such cell.
    pub fn cell(&self, column: &Column) -> &str {
        match column {
            Column::Known(f) => self.get(*f),
            Column::Extra { slot, .. } => self.extra.get(*slot).map(String::as_str).unwrap_or(""),
        }
    }
}

/// A parsed catalog file: its column layout and rows in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    pub columns: Vec<Column>,
    pub tracks: Vec<Track>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the source file had a header for `field`.
    pub fn has_field(&self, field: Field) -> bool {
        self.columns.contains(&Column::Known(field))
    }

    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }
}
