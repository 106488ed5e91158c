//! OpenAPI client error types.

use crate::core::FatturaError;
use crate::session::SessionError;

use super::config::ConfigError;

/// Errors from OpenAPI calls and the flows built on them.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OpenApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// 404: the company or configuration does not exist.
    #[error("{endpoint}: not found")]
    NotFound { endpoint: String },
    /// 409 / 410: the resource is already registered.
    #[error("{endpoint}: already exists ({status}): {message}")]
    AlreadyExists {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// 422: the API rejected the payload.
    #[error("{endpoint}: validation failed: {message}")]
    Unprocessable { endpoint: String, message: String },
    /// Any other non-2xx status.
    #[error("OpenAPI {endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The response parsed but lacks a field we need.
    #[error("unexpected response from {endpoint}: {reason}")]
    UnexpectedResponse { endpoint: String, reason: String },
    /// The VAT number does not pass the Partita IVA grammar; no request was sent.
    #[error("'{0}' is not a valid Partita IVA")]
    InvalidVatNumber(String),
    /// Local validation or store precondition failed.
    #[error(transparent)]
    Invalid(#[from] FatturaError),
    /// Session persistence failed.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl OpenApiError {
    /// Map a non-2xx status and its body to an error.
    ///
    /// The message is the `message` field of a JSON body when present,
    /// the raw body otherwise.
    pub(crate) fn from_status(endpoint: String, status: u16, body: &str) -> Self {
        let message = api_message(body);
        match status {
            404 => Self::NotFound { endpoint },
            409 | 410 => Self::AlreadyExists {
                endpoint,
                status,
                message,
            },
            422 => Self::Unprocessable { endpoint, message },
            _ => Self::Api {
                endpoint,
                status,
                message,
            },
        }
    }

    /// HTTP status carried by the error, if it came from the API.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Unprocessable { .. } => Some(422),
            Self::AlreadyExists { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Http { source, .. } | Self::Deserialization { source, .. } => {
                source.status().map(|s| s.as_u16())
            }
            _ => None,
        }
    }
}

fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
