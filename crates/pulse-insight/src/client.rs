//! HTTP client for the generation endpoint.
//!
//! Wraps `reqwest` with key handling and typed request/response shapes. The
//! public surface is deliberately total: [`InsightClient::generate`] always
//! returns displayable text, mapping every failure class to a fallback
//! message. One attempt per call — no retries, no backoff.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::InsightError;
use crate::types::{GenerateRequest, GenerateResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Fixed message returned when no API key is configured. Checked before any
/// network I/O happens.
pub const MISSING_KEY_MESSAGE: &str =
    "Insight unavailable: no generation API key is configured.";

/// Client for the hosted generation endpoint.
///
/// Use [`InsightClient::new`] for production or
/// [`InsightClient::with_base_url`] to point at a mock server in tests.
pub struct InsightClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    model: String,
}

impl InsightClient {
    /// Creates a client pointed at the production generation endpoint.
    ///
    /// `api_key` may be absent; the client then answers every prompt with
    /// [`MISSING_KEY_MESSAGE`] without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: Option<&str>, timeout_secs: u64) -> Result<Self, InsightError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL, DEFAULT_MODEL)
    }

    /// Creates a client with a custom base URL and model (for testing with
    /// wiremock, or proxied deployments).
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InsightError::BaseUrl`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
        model: &str,
    ) -> Result<Self, InsightError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pulse/0.1 (post-analytics)")
            .build()?;

        // Normalise: exactly one trailing slash so path joins land under the
        // root rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| InsightError::BaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.map(ToOwned::to_owned).filter(|k| !k.is_empty()),
            base_url,
            model: model.to_string(),
        })
    }

    /// Whether a credential is configured.
    #[must_use]
    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Asks the endpoint for commentary on `prompt`.
    ///
    /// Total function: the caller always receives displayable text. Without a
    /// key this is [`MISSING_KEY_MESSAGE`] and no request is sent; transport,
    /// HTTP, and response-shape failures are logged and mapped to descriptive
    /// fallback strings.
    pub async fn generate(&self, prompt: &str) -> String {
        let Some(key) = self.api_key.as_deref() else {
            return MISSING_KEY_MESSAGE.to_string();
        };

        match self.try_generate(key, prompt).await {
            Ok(text) => text,
            Err(e @ (InsightError::Deserialize(_) | InsightError::MissingText)) => {
                tracing::warn!(error = %e, "generation endpoint returned an unexpected response");
                "Insight unavailable: the generation endpoint returned an unexpected response."
                    .to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "generation request failed");
                format!("Insight unavailable: request to the generation endpoint failed ({e}).")
            }
        }
    }

    /// Single-attempt POST; surfaces every failure as [`InsightError`].
    async fn try_generate(&self, key: &str, prompt: &str) -> Result<String, InsightError> {
        let url = self.build_url(key)?;
        let body = GenerateRequest::user_turn(prompt);

        let response = self.client.post(url).json(&body).send().await?;
        let response = response.error_for_status()?;
        let text = response.text().await?;

        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        parsed.into_text().ok_or(InsightError::MissingText)
    }

    /// Builds `{base}/v1beta/models/{model}:generateContent?key={key}` with a
    /// percent-encoded key.
    fn build_url(&self, key: &str) -> Result<Url, InsightError> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|_| InsightError::BaseUrl(self.base_url.to_string()))?;
        url.query_pairs_mut().append_pair("key", key);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(key: Option<&str>) -> InsightClient {
        InsightClient::with_base_url(key, 30, "http://localhost:9", "test-model")
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_includes_model_path_and_key() {
        let client = test_client(Some("test-key"));
        let url = client.build_url("test-key").expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:9/v1beta/models/test-model:generateContent?key=test-key"
        );
    }

    #[test]
    fn build_url_strips_extra_trailing_slashes() {
        let client = InsightClient::with_base_url(Some("k"), 30, "http://localhost:9///", "m")
            .expect("client");
        let url = client.build_url("k").expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:9/v1beta/models/m:generateContent?key=k"
        );
    }

    #[test]
    fn empty_key_counts_as_absent() {
        assert!(!test_client(Some("")).has_key());
        assert!(!test_client(None).has_key());
        assert!(test_client(Some("k")).has_key());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = InsightClient::with_base_url(None, 30, "not a url", "m");
        assert!(matches!(result, Err(InsightError::BaseUrl(_))));
    }
}
