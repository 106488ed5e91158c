//! Company-registry client (OpenAPI "Company", IT-advanced package).
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/IT-advanced/{vat}` | Company details by Partita IVA |

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::{Address, CompanyData, CompanyStatus, is_partita_iva};

use super::error::OpenApiError;
use super::http::{self, ApiEnvelope};

/// Company as returned by `GET /IT-advanced/{vat}`.
///
/// Only the fields we map are modeled; unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryCompany {
    pub vat_code: String,
    #[serde(default)]
    pub tax_code: String,
    pub company_name: String,
    /// "ATTIVA", "CESSATA", "INATTIVA", ...
    #[serde(default)]
    pub activity_status: Option<String>,
    #[serde(default)]
    pub address: Option<RegistryAddress>,
    #[serde(default)]
    pub pec: Option<String>,
    #[serde(default)]
    pub sdi_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryAddress {
    #[serde(default)]
    pub registered_office: Option<RegisteredOffice>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredOffice {
    /// "VIA", "PIAZZA", ...
    #[serde(default)]
    pub toponym: Option<String>,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub town: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub province: String,
}

impl From<RegistryCompany> for CompanyData {
    fn from(api: RegistryCompany) -> Self {
        let office = api
            .address
            .and_then(|a| a.registered_office)
            .unwrap_or_default();
        let street = format!(
            "{} {} {}",
            office.toponym.as_deref().unwrap_or_default(),
            office.street,
            office.street_number.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string();

        CompanyData {
            vat_number: api.vat_code,
            fiscal_id: api.tax_code,
            name: api.company_name,
            email: None,
            address: Address {
                street,
                city: office.town,
                zip: office.zip_code,
                province: office.province,
                country: "IT".to_string(),
            },
            pec: api.pec,
            sdi_code: api.sdi_code,
            status: api
                .activity_status
                .as_deref()
                .map_or(CompanyStatus::Inactive, CompanyStatus::from_activity_status),
            financial_score: None,
        }
    }
}

/// Something the caller should see before invoicing this company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupWarning {
    /// The company is not active in the registry.
    NotActive(CompanyStatus),
    /// Financial score "D".
    HighFinancialRisk,
}

impl fmt::Display for LookupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotActive(status) => write!(
                f,
                "company is {}, invoicing is not recommended",
                status.code()
            ),
            Self::HighFinancialRisk => {
                write!(f, "high financial risk (score D), verify before proceeding")
            }
        }
    }
}

/// A company found in the registry, with the warnings that apply to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyLookup {
    pub company: CompanyData,
    pub warnings: Vec<LookupWarning>,
}

impl CompanyLookup {
    pub fn new(company: CompanyData) -> Self {
        let mut warnings = Vec::new();
        if !company.is_active() {
            warnings.push(LookupWarning::NotActive(company.status));
        }
        if company.is_high_risk() {
            warnings.push(LookupWarning::HighFinancialRisk);
        }
        Self { company, warnings }
    }
}

/// Client for the company-registry API.
#[derive(Debug, Clone)]
pub struct CompanyClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CompanyClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Look up a company by Partita IVA.
    ///
    /// Calls `GET {base_url}/IT-advanced/{vat_number}`. Returns `Ok(None)`
    /// when the registry has no such company (404 or empty result).
    /// `vat_number` must pass [`is_partita_iva`]; otherwise no request is
    /// made and [`OpenApiError::InvalidVatNumber`] is returned.
    pub async fn lookup(&self, vat_number: &str) -> Result<Option<CompanyLookup>, OpenApiError> {
        if !is_partita_iva(vat_number) {
            return Err(OpenApiError::InvalidVatNumber(vat_number.to_string()));
        }
        let endpoint = format!("GET /IT-advanced/{vat_number}");
        let url = http::endpoint_url(&self.base_url, &format!("IT-advanced/{vat_number}"));

        let envelope: ApiEnvelope<Vec<RegistryCompany>> =
            match http::send_json(self.http.get(&url), &endpoint).await {
                Ok(env) => env,
                Err(OpenApiError::NotFound { .. }) => return Ok(None),
                Err(e) => return Err(e),
            };

        Ok(envelope
            .data
            .into_iter()
            .next()
            .map(|c| CompanyLookup::new(c.into())))
    }
}
