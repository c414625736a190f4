use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Credential for the insight generation endpoint. Optional: without it
    /// the dashboard still renders, with a fixed "key unavailable" message in
    /// place of generated commentary.
    pub insight_api_key: Option<String>,
    pub insight_base_url: String,
    pub insight_model: String,
    pub insight_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "insight_api_key",
                &self.insight_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("insight_base_url", &self.insight_base_url)
            .field("insight_model", &self.insight_model)
            .field("insight_timeout_secs", &self.insight_timeout_secs)
            .finish()
    }
}
