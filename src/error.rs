use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by dataset loading, transformation and persistence.
#[derive(Error, Debug)]
pub enum Error {
    /// Source unreadable or destination unwritable.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed row during load, or an unparsable value during
    /// timestamp reinterpretation.
    #[error("parse error: {0}")]
    Parse(String),

    /// A referenced column is missing, or an aggregation function is
    /// incompatible with the column's type.
    #[error("validation error: {0}")]
    Validation(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Self::Io(e),
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => Self::Parse(format!(
                "row at line {} has {len} fields, expected {expected_len}",
                pos.map_or(0, |p| p.line())
            )),
            other => Self::Parse(format!("{other:?}")),
        }
    }
}
