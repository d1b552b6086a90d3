//! Model query error types

use thiserror::Error;

/// Errors raised by the remote responders
///
/// These never reach the caller of [`super::Responder::reply`]; they are
/// rendered into the reply text instead.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Proxy error: {status}")]
    ProxyStatus { status: u16 },

    #[error("Gemini: {status} {message}")]
    ApiError { status: u16, message: String },

    /// Transport failure; built from an error stripped of its URL
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AssistantError {
    /// Wrap a transport error without the request URL, which may carry the API key
    pub fn network(err: reqwest::Error) -> Self {
        AssistantError::Network(err.without_url())
    }

    /// Wrap a body that did not parse as the expected JSON
    pub fn invalid_response(err: serde_json::Error) -> Self {
        AssistantError::InvalidResponse(err.to_string())
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            AssistantError::ProxyStatus { status } => Some(*status),
            AssistantError::ApiError { status, .. } => Some(*status),
            AssistantError::Network(e) => e.status().map(|s| s.as_u16()),
            AssistantError::InvalidResponse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_user_text() {
        assert_eq!(AssistantError::ProxyStatus { status: 502 }.to_string(), "Proxy error: 502");
        assert_eq!(
            AssistantError::ApiError {
                status: 400,
                message: "API key not valid".to_string()
            }
            .to_string(),
            "Gemini: 400 API key not valid"
        );
    }

    #[test]
    fn test_status() {
        assert_eq!(AssistantError::ProxyStatus { status: 500 }.status(), Some(500));
        assert_eq!(
            AssistantError::ApiError {
                status: 403,
                message: String::new()
            }
            .status(),
            Some(403)
        );
        assert_eq!(AssistantError::InvalidResponse("x".to_string()).status(), None);
    }

    #[test]
    fn test_invalid_response_from_parse_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = AssistantError::invalid_response(parse_err);
        assert!(matches!(err, AssistantError::InvalidResponse(_)));
        assert!(err.to_string().starts_with("Invalid response: "));
    }
}
