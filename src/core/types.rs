use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A company as known to the application: my own company (the sender) or
/// the client selected as receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyData {
    /// Partita IVA (11 digits).
    pub vat_number: String,
    /// Codice Fiscale of the company or of its owner.
    pub fiscal_id: String,
    /// Registered company name (ragione sociale).
    pub name: String,
    /// Contact email, set for my own company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Registered office.
    pub address: Address,
    /// Certified email (posta elettronica certificata).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pec: Option<String>,
    /// SDI recipient code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdi_code: Option<String>,
    /// Activity status in the company registry.
    pub status: CompanyStatus,
    /// Credit rating such as "A-" or "D", when the registry provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_score: Option<String>,
}

impl CompanyData {
    pub fn is_active(&self) -> bool {
        self.status == CompanyStatus::Active
    }

    /// Credit rating "D": high financial risk.
    pub fn is_high_risk(&self) -> bool {
        self.financial_score.as_deref() == Some("D")
    }
}

/// Postal address of a company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Toponym, street and street number.
    pub street: String,
    pub city: String,
    /// CAP.
    pub zip: String,
    /// Two-letter province code.
    pub province: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

impl Address {
    /// Empty Italian address, used when a company signs up without one.
    pub fn empty_italian() -> Self {
        Self {
            country: "IT".to_string(),
            ..Self::default()
        }
    }
}

/// Activity status of a company in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyStatus {
    Active,
    Inactive,
    Ceased,
}

impl CompanyStatus {
    /// Wire value ("ACTIVE", "INACTIVE", "CEASED").
    pub fn code(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Ceased => "CEASED",
        }
    }

    /// Map the Italian registry activity status. Only "ATTIVA" and
    /// "CESSATA" are recognised; anything else counts as inactive.
    pub fn from_activity_status(status: &str) -> Self {
        match status {
            "ATTIVA" => Self::Active,
            "CESSATA" => Self::Ceased,
            _ => Self::Inactive,
        }
    }
}

/// Input collected by the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySignup {
    pub name: String,
    /// Partita IVA.
    pub vat_number: String,
    /// Codice Fiscale (or Partita IVA for companies without one).
    pub fiscal_id: String,
    pub email: String,
    #[serde(default)]
    pub pec: Option<String>,
    /// PIN of the Agenzia delle Entrate device.
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub sdi_code: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// A receipt (documento commerciale) line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// VAT rate code understood by the e-invoicing API (e.g. "22", "N2").
    pub vat_rate_code: String,
}

impl ReceiptItem {
    pub fn new(
        quantity: Decimal,
        description: impl Into<String>,
        unit_price: Decimal,
        vat_rate_code: impl Into<String>,
    ) -> Self {
        Self {
            quantity,
            description: description.into(),
            unit_price,
            vat_rate_code: vat_rate_code.into(),
        }
    }

    /// quantity * unit_price, rounded to cents.
    pub fn amount(&self) -> Decimal {
        (self.quantity * self.unit_price).round_dp(2)
    }
}

/// Body of `POST /IT-receipts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptPayload {
    pub fiscal_id: String,
    pub items: Vec<ReceiptItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_payment_amount: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub card_payment_amount: Option<Decimal>,
}

impl ReceiptPayload {
    /// Sum of all item amounts.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(ReceiptItem::amount).sum()
    }
}

/// Sender or receiver block of an invoice payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceParty {
    pub fiscal_id: String,
    pub vat_number: String,
    pub company_name: String,
    pub address: Address,
    /// Empty when unknown.
    pub sdi_code: String,
    /// Empty when unknown.
    pub pec: String,
}

impl From<&CompanyData> for InvoiceParty {
    fn from(company: &CompanyData) -> Self {
        Self {
            fiscal_id: company.fiscal_id.clone(),
            vat_number: company.vat_number.clone(),
            company_name: company.name.clone(),
            address: company.address.clone(),
            sdi_code: company.sdi_code.clone().unwrap_or_default(),
            pec: company.pec.clone().unwrap_or_default(),
        }
    }
}

/// Document header of an invoice payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    /// Document kind, "receipt" unless overridden.
    #[serde(rename = "type")]
    pub kind: String,
    /// Issue date, serialized as YYYY-MM-DD.
    pub date: NaiveDate,
    pub number: String,
    /// ISO 4217 currency, always "EUR" for SDI.
    pub currency: String,
}

/// Body of `POST /IT-invoice`. Items and payments are passed through to the
/// API untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayload {
    pub sender: InvoiceParty,
    pub receiver: InvoiceParty,
    pub document: InvoiceDocument,
    pub items: Vec<InvoiceLine>,
    pub payments: Vec<InvoicePayment>,
}

/// An invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// VAT rate percentage (e.g. 22).
    #[serde(with = "rust_decimal::serde::float")]
    pub vat_rate: Decimal,
}

/// A payment entry of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayment {
    /// FatturaPA payment method code (e.g. "MP05" bank transfer).
    pub method: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Due date, YYYY-MM-DD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}
