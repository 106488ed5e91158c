//! E-invoicing client (OpenAPI "Invoice" SDI gateway).
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/IT-configurations` | Register my company (signup) |
//! | GET    | `/IT-configurations/{id}` | Fetch my company's configuration (login) |
//! | POST   | `/IT-invoice` | Send an invoice to SDI |
//! | POST   | `/IT-receipts` | Issue a receipt (documento commerciale) |

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::{
    BillingStore, InvoiceLine, InvoicePayload, InvoicePayloadBuilder, InvoicePayment,
    ReceiptPayload,
};

use super::error::OpenApiError;
use super::http::{self, ApiEnvelope};

/// Body of `POST /IT-configurations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRequest {
    pub fiscal_id: String,
    pub name: String,
    pub email: String,
    /// Enable receipt issuance.
    pub receipts: bool,
    /// Enable invoices to customers.
    pub customer_invoice: bool,
}

impl ConfigurationRequest {
    /// Configuration with receipts and customer invoices enabled.
    pub fn new(
        fiscal_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            fiscal_id: fiscal_id.into(),
            name: name.into(),
            email: email.into(),
            receipts: true,
            customer_invoice: true,
        }
    }
}

/// A company configuration as stored by the e-invoicing API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub fiscal_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub receipts: Option<bool>,
    #[serde(default)]
    pub customer_invoice: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct SubmittedData {
    #[serde(default)]
    invoice_id: Option<serde_json::Value>,
    #[serde(default)]
    id: Option<serde_json::Value>,
}

/// Client for the e-invoicing API.
#[derive(Debug, Clone)]
pub struct InvoiceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl InvoiceClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Register a company configuration.
    ///
    /// Calls `POST {base_url}/IT-configurations`. 409/410 map to
    /// [`OpenApiError::AlreadyExists`].
    pub async fn create_configuration(
        &self,
        req: &ConfigurationRequest,
    ) -> Result<serde_json::Value, OpenApiError> {
        let endpoint = "POST /IT-configurations";
        let url = http::endpoint_url(&self.base_url, "IT-configurations");
        http::send_json(self.http.post(&url).json(req), endpoint).await
    }

    /// Fetch the configuration registered for `fiscal_id`.
    ///
    /// Calls `GET {base_url}/IT-configurations/{fiscal_id}`. Returns
    /// `Ok(None)` on 404.
    pub async fn get_configuration(
        &self,
        fiscal_id: &str,
    ) -> Result<Option<Configuration>, OpenApiError> {
        let endpoint = format!("GET /IT-configurations/{fiscal_id}");
        let url = http::endpoint_url(&self.base_url, &format!("IT-configurations/{fiscal_id}"));

        match http::send_json::<ApiEnvelope<Configuration>>(self.http.get(&url), &endpoint).await {
            Ok(env) => Ok(Some(env.data)),
            Err(OpenApiError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Send an invoice to SDI, returning the id assigned by the API.
    ///
    /// Calls `POST {base_url}/IT-invoice`.
    pub async fn send_invoice(&self, payload: &InvoicePayload) -> Result<String, OpenApiError> {
        let endpoint = "POST /IT-invoice";
        let url = http::endpoint_url(&self.base_url, "IT-invoice");

        let env: ApiEnvelope<SubmittedData> =
            http::send_json(self.http.post(&url).json(payload), endpoint).await?;

        env.data
            .invoice_id
            .or(env.data.id)
            .filter(|v| !v.is_null())
            .map(|v| match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .ok_or_else(|| OpenApiError::UnexpectedResponse {
                endpoint: endpoint.into(),
                reason: "neither data.invoice_id nor data.id present".into(),
            })
    }

    /// Invoice the client selected in `store` on behalf of my company.
    ///
    /// Refused locally, without any request, unless both companies are
    /// known and the client is ACTIVE.
    pub async fn submit_invoice(
        &self,
        store: &BillingStore,
        items: Vec<InvoiceLine>,
        payments: Vec<InvoicePayment>,
    ) -> Result<String, OpenApiError> {
        let mut builder = InvoicePayloadBuilder::from_store(store)?;
        for item in items {
            builder = builder.add_item(item);
        }
        for payment in payments {
            builder = builder.add_payment(payment);
        }
        let payload = builder.build()?;
        self.send_invoice(&payload).await
    }

    /// Issue a receipt.
    ///
    /// Calls `POST {base_url}/IT-receipts`; returns the `data` block of the
    /// response (or the whole body if there is none). 422 maps to
    /// [`OpenApiError::Unprocessable`].
    pub async fn create_receipt(
        &self,
        payload: &ReceiptPayload,
    ) -> Result<serde_json::Value, OpenApiError> {
        let endpoint = "POST /IT-receipts";
        let url = http::endpoint_url(&self.base_url, "IT-receipts");

        let mut body: serde_json::Value =
            http::send_json(self.http.post(&url).json(payload), endpoint).await?;
        if let Some(data) = body.get_mut("data") {
            return Ok(data.take());
        }
        Ok(body)
    }
}
