//! Client configuration.

/// Default base URL of a local accounting API.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to, e.g. `http://host/api`.
    pub api_url: String,
    /// Optional bearer token.
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Read `MOTOR_API_URL` and `MOTOR_AUTH_TOKEN`.
    pub fn from_env() -> Self {
        let api_url = std::env::var("MOTOR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let token = std::env::var("MOTOR_AUTH_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        Self { api_url, token }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
