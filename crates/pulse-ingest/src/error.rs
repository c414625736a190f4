use thiserror::Error;

/// Errors raised while reading an uploaded CSV.
///
/// Any of these is fatal for the current upload: no partial table is produced.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The upload could not be parsed as CSV at all.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the header row.
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),
}
