//! OpenAPI client configuration.
//!
//! Base URLs default to the OpenAPI sandbox endpoints. Override via
//! environment variables or explicit construction for production/testing.

use url::Url;

/// Default base URL of the company-registry service (sandbox).
pub const DEFAULT_COMPANY_URL: &str = "https://test.company.openapi.com";

/// Default base URL of the e-invoicing service (sandbox).
pub const DEFAULT_INVOICE_URL: &str = "https://test.invoice.openapi.com";

/// Configuration for connecting to the OpenAPI services.
///
/// Custom `Debug` implementation redacts the `api_token` field.
#[derive(Clone)]
pub struct OpenApiConfig {
    /// Base URL of the company-registry API (`/IT-advanced/...`).
    pub company_base_url: Url,
    /// Base URL of the e-invoicing API (`/IT-configurations`, `/IT-invoice`, ...).
    pub invoice_base_url: Url,
    /// Bearer token. Requests go out unauthenticated when absent.
    pub api_token: Option<String>,
}

impl std::fmt::Debug for OpenApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenApiConfig")
            .field("company_base_url", &self.company_base_url)
            .field("invoice_base_url", &self.invoice_base_url)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl OpenApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `OPENAPI_TOKEN` (bearer token, optional but required by the real API)
    /// - `OPENAPI_COMPANY_URL` (default: `https://test.company.openapi.com`)
    /// - `OPENAPI_INVOICE_URL` (default: `https://test.invoice.openapi.com`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = |var: &str, default: &str| -> Result<Url, ConfigError> {
            let raw = lookup(var).unwrap_or_else(|| default.to_string());
            Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
        };

        Ok(Self {
            company_base_url: url("OPENAPI_COMPANY_URL", DEFAULT_COMPANY_URL)?,
            invoice_base_url: url("OPENAPI_INVOICE_URL", DEFAULT_INVOICE_URL)?,
            api_token: lookup("OPENAPI_TOKEN").filter(|t| !t.trim().is_empty()),
        })
    }

    /// Both services on one local base URL (for mock servers).
    pub fn local(base_url: &str, token: Option<&str>) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?;
        Ok(Self {
            company_base_url: url.clone(),
            invoice_base_url: url,
            api_token: token.map(str::to_string),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("API token contains characters not allowed in an HTTP header")]
    InvalidToken,
}
