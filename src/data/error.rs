use std::path::PathBuf;

use thiserror::Error;

/// The dataset could not be read at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open workbook {}: {message}", path.display())]
    Workbook { path: PathBuf, message: String },

    #[error("sheet '{sheet}' not found in {} (available: {})", path.display(), available.join(", "))]
    MissingSheet {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("malformed data: {0}")]
    Malformed(String),
}

/// A cell that must hold a number could not be parsed as one.
#[derive(Debug, Error)]
#[error("row {row}: {column} value '{value}' is not a valid number")]
pub struct ParseError {
    /// 1-based data row (the header row is not counted).
    pub row: usize,
    pub column: String,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
