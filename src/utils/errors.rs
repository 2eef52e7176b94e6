use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a plotting run
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid trade event file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid candle file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Candle row at line {line} has {found} columns, expected {expected}")]
    RowWidth {
        line: u64,
        found: usize,
        expected: usize,
    },
    #[error("Candle row at line {line}: {message}")]
    Field { line: u64, message: String },
    #[error("Invalid timestamp '{value}': {message}")]
    Timestamp { value: String, message: String },
    #[error("Render failed: {0}")]
    Render(String),
}

impl PlotError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlotError::Io {
            path: path.into(),
            source,
        }
    }
}
