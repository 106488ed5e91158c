//! Async clients for the OpenAPI company-registry and e-invoicing services.
//!
//! Both services share one `reqwest::Client` carrying the JSON headers and
//! the bearer token. Every request is logged through `tracing`.
//!
//! # Example
//!
//! ```ignore
//! use fattura::openapi::*;
//!
//! let client = OpenApiClient::new(OpenApiConfig::from_env()?)?;
//!
//! // Look up a client by Partita IVA
//! if let Some(found) = client.company().lookup("12345678901").await? {
//!     for warning in &found.warnings {
//!         eprintln!("{warning}");
//!     }
//! }
//!
//! // Issue a receipt
//! let id = client.invoice().create_receipt(&receipt).await?;
//! ```

pub mod company;
pub mod config;
pub mod error;
mod http;
pub mod invoice;
mod onboarding;

pub use company::{CompanyClient, CompanyLookup, LookupWarning};
pub use config::{ConfigError, OpenApiConfig};
pub use error::OpenApiError;
pub use http::{ApiEnvelope, REQUEST_TIMEOUT};
pub use invoice::{Configuration, ConfigurationRequest, InvoiceClient};
pub use onboarding::CompanyConfigService;

/// Top-level OpenAPI client. Holds one sub-client per service.
#[derive(Debug, Clone)]
pub struct OpenApiClient {
    company: CompanyClient,
    invoice: InvoiceClient,
}

impl OpenApiClient {
    /// Create a new client from configuration.
    pub fn new(config: OpenApiConfig) -> Result<Self, OpenApiError> {
        let http = http::build_client(&config)?;
        Ok(Self {
            company: CompanyClient::new(http.clone(), config.company_base_url),
            invoice: InvoiceClient::new(http, config.invoice_base_url),
        })
    }

    /// Access the company-registry client.
    pub fn company(&self) -> &CompanyClient {
        &self.company
    }

    /// Access the e-invoicing client.
    pub fn invoice(&self) -> &InvoiceClient {
        &self.invoice
    }
}
