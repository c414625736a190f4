use thiserror::Error;

/// Errors from the generation-endpoint client.
///
/// These stay internal to the crate: the public [`crate::InsightClient::generate`]
/// converts every failure into a displayable fallback string.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{0}'")]
    BaseUrl(String),

    /// The response body was not valid JSON.
    #[error("JSON deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The response parsed, but held no candidate text at the expected path.
    #[error("response contained no candidate text")]
    MissingText,
}
