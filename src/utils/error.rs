use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// A required credential or URL is missing. Raised before any network call.
    Configuration(String),
    /// The caller sent something we refuse to forward upstream.
    Validation(String),
    /// The upstream answered with a non-success status.
    Upstream {
        service: &'static str,
        status: u16,
        detail: String,
    },
    /// The upstream could not be reached at all (DNS, TLS, timeout...).
    Transport(String),
    /// The upstream answered 2xx but the payload lacks a required field.
    MalformedUpstream(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Configuration(msg) => write!(f, "{}", msg),
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::Upstream { service, status, detail } => {
                write!(f, "{} API returned {}: {}", service, status, detail)
            }
            AppError::Transport(msg) => write!(f, "Upstream request failed: {}", msg),
            AppError::MalformedUpstream(msg) => write!(f, "Malformed upstream response: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Message safe to hand back to the browser. Upstream diagnostics stay in the logs.
    pub fn public_message(&self, fallback: &str) -> String {
        match self {
            AppError::Configuration(msg) | AppError::Validation(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn to_response(&self, fallback: &str) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.public_message(fallback)
        }))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.to_response("Internal server error")
    }
}

// reqwest renders the request URL into its message, and ours carry API keys
// (query) or webhook tokens (path).
impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_decode() {
            AppError::MalformedUpstream(e.to_string())
        } else {
            AppError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let err = AppError::Validation("Name and message are required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message("ignored"), "Name and message are required");
    }

    #[test]
    fn test_upstream_detail_is_not_public() {
        let err = AppError::Upstream {
            service: "GitHub",
            status: 502,
            detail: "secret stack trace".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message("Failed to fetch GitHub data"), "Failed to fetch GitHub data");
        assert!(err.to_string().contains("secret stack trace"));
    }

    #[test]
    fn test_configuration_message_is_public() {
        let err = AppError::Configuration("GITHUB_TOKEN is not set".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message("generic"), "GITHUB_TOKEN is not set");
    }
}
