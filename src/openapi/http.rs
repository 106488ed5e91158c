//! Request plumbing shared by the service clients.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::config::{ConfigError, OpenApiConfig};
use super::error::OpenApiError;

/// Request timeout for every OpenAPI call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// `{"data": ...}` wrapper used by every OpenAPI response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Build the shared HTTP client: JSON headers and bearer auth.
pub(crate) fn build_client(config: &OpenApiConfig) -> Result<reqwest::Client, OpenApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    match &config.api_token {
        Some(token) => {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ConfigError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        None => tracing::error!("OPENAPI_TOKEN is not configured, requests will be unauthenticated"),
    }

    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .default_headers(headers)
        .build()
        .map_err(|e| OpenApiError::Http {
            endpoint: "client_init".into(),
            source: e,
        })
}

/// Join `path` onto `base`, tolerating a base with or without trailing slash.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Send a request and decode a JSON body, mapping non-2xx statuses.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    endpoint: &str,
) -> Result<T, OpenApiError> {
    tracing::debug!(%endpoint, "OpenAPI request");

    let resp = request.send().await.map_err(|e| {
        tracing::warn!(%endpoint, error = %e, "OpenAPI transport error");
        OpenApiError::Http {
            endpoint: endpoint.into(),
            source: e,
        }
    })?;

    let status = resp.status();
    tracing::debug!(%endpoint, status = status.as_u16(), "OpenAPI response");

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let err = OpenApiError::from_status(endpoint.into(), status.as_u16(), &body);
        tracing::warn!(%endpoint, status = status.as_u16(), error = %err, "OpenAPI error");
        return Err(err);
    }

    resp.json().await.map_err(|e| OpenApiError::Deserialization {
        endpoint: endpoint.into(),
        source: e,
    })
}
