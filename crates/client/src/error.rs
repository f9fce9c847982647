use thiserror::Error;

/// Transport-level failure of a remote call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx status. `message` is the server's text when it sent one.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    /// 2xx status with `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Human-readable message sent by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Api { message, .. } => message.as_deref(),
            ApiError::Rejected(message) => Some(message),
            ApiError::Network(_) | ApiError::Parse(_) => None,
        }
    }

    /// Text for a user notice: the server's message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Api {
            status: 422,
            message: Some("El periodo contable está cerrado".to_string()),
        };
        assert_eq!(err.user_message("could not save"), "El periodo contable está cerrado");
        assert_eq!(err.to_string(), "API error (422): El periodo contable está cerrado");
    }

    #[test]
    fn user_message_falls_back() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_message("could not save"), "could not save");

        let err = ApiError::Api { status: 500, message: Some(" ".to_string()) };
        assert_eq!(err.user_message("could not save"), "could not save");
    }
}
