use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::error::FatturaError;
use super::store::BillingStore;
use super::types::*;
use super::validation;

/// Prefix of generated document numbers.
pub const DOCUMENT_NUMBER_PREFIX: &str = "SCT-";

/// Document number derived from a timestamp: `SCT-<unix millis>`.
pub fn document_number(at: DateTime<Utc>) -> String {
    format!("{DOCUMENT_NUMBER_PREFIX}{}", at.timestamp_millis())
}

/// Builder for the `POST /IT-invoice` payload.
///
/// ```
/// use fattura::core::*;
/// use rust_decimal_macros::dec;
///
/// let me = CompanyBuilder::new("Rossi SRL", "12345678901", "RSSMRA80A01H501U").build();
/// let client = CompanyBuilder::new("Bianchi SPA", "01234567890", "01234567890").build();
/// let mut store = BillingStore::with_my_company(me);
/// store.set_company(client);
///
/// let payload = InvoicePayloadBuilder::from_store(&store)
///     .unwrap()
///     .number("SCT-1")
///     .add_item(InvoiceLine {
///         description: "Consulenza".into(),
///         quantity: dec!(1),
///         unit_price: dec!(100),
///         vat_rate: dec!(22),
///     })
///     .build()
///     .unwrap();
/// assert_eq!(payload.document.currency, "EUR");
/// ```
pub struct InvoicePayloadBuilder {
    sender: InvoiceParty,
    receiver: InvoiceParty,
    kind: String,
    date: NaiveDate,
    number: Option<String>,
    items: Vec<InvoiceLine>,
    payments: Vec<InvoicePayment>,
}

impl InvoicePayloadBuilder {
    /// Start from the store: my company is the sender, the selected client
    /// the receiver. Fails unless the store allows invoicing.
    pub fn from_store(store: &BillingStore) -> Result<Self, FatturaError> {
        let (Some(sender), Some(receiver)) = (store.my_company(), store.selected_company()) else {
            return Err(FatturaError::NotAllowed(
                "configure your company and select a client first".into(),
            ));
        };
        if !store.can_invoice() {
            return Err(FatturaError::NotAllowed(format!(
                "client '{}' is {}, only ACTIVE companies can be invoiced",
                receiver.name,
                receiver.status.code()
            )));
        }
        Ok(Self::new(sender, receiver))
    }

    pub fn new(sender: &CompanyData, receiver: &CompanyData) -> Self {
        Self {
            sender: InvoiceParty::from(sender),
            receiver: InvoiceParty::from(receiver),
            kind: "receipt".to_string(),
            date: Utc::now().date_naive(),
            number: None,
            items: Vec::new(),
            payments: Vec::new(),
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn add_item(mut self, item: InvoiceLine) -> Self {
        self.items.push(item);
        self
    }

    pub fn add_payment(mut self, payment: InvoicePayment) -> Self {
        self.payments.push(payment);
        self
    }

    pub fn build(self) -> Result<InvoicePayload, FatturaError> {
        if self.items.is_empty() {
            return Err(FatturaError::Builder(
                "at least one invoice line is required".into(),
            ));
        }
        let number = match self.number {
            Some(n) if n.trim().is_empty() => {
                return Err(FatturaError::Builder(
                    "document number must not be empty".into(),
                ));
            }
            Some(n) => n,
            None => document_number(Utc::now()),
        };

        Ok(InvoicePayload {
            sender: self.sender,
            receiver: self.receiver,
            document: InvoiceDocument {
                kind: self.kind,
                date: self.date,
                number,
                currency: "EUR".to_string(),
            },
            items: self.items,
            payments: self.payments,
        })
    }
}

/// Builder for the `POST /IT-receipts` payload.
pub struct ReceiptBuilder {
    fiscal_id: String,
    items: Vec<ReceiptItem>,
    cash_payment_amount: Decimal,
    card_payment_amount: Option<Decimal>,
}

impl ReceiptBuilder {
    pub fn new(fiscal_id: impl Into<String>) -> Self {
        Self {
            fiscal_id: fiscal_id.into(),
            items: Vec::new(),
            cash_payment_amount: Decimal::ZERO,
            card_payment_amount: None,
        }
    }

    /// Receipt issued by my company. Fails when no company is configured.
    pub fn from_store(store: &BillingStore) -> Result<Self, FatturaError> {
        match store.my_company() {
            Some(company) if !company.fiscal_id.is_empty() => Ok(Self::new(&company.fiscal_id)),
            _ => Err(FatturaError::NotAllowed(
                "company not configured, fiscal id missing".into(),
            )),
        }
    }

    /// Add a line; the description is trimmed.
    pub fn add_item(mut self, item: ReceiptItem) -> Self {
        self.items.push(ReceiptItem {
            description: item.description.trim().to_string(),
            ..item
        });
        self
    }

    pub fn cash_payment(mut self, amount: Decimal) -> Self {
        self.cash_payment_amount = amount;
        self
    }

    /// Card amount; zero is treated as no card payment.
    pub fn card_payment(mut self, amount: Decimal) -> Self {
        self.card_payment_amount = (!amount.is_zero()).then_some(amount);
        self
    }

    pub fn build(self) -> Result<ReceiptPayload, FatturaError> {
        let errors = validation::validate_receipt_items(&self.items);
        if !errors.is_empty() {
            return Err(FatturaError::from_validation(&errors));
        }
        if self.cash_payment_amount < Decimal::ZERO
            || self.card_payment_amount.is_some_and(|a| a < Decimal::ZERO)
        {
            return Err(FatturaError::Builder(
                "payment amounts must not be negative".into(),
            ));
        }

        Ok(ReceiptPayload {
            fiscal_id: self.fiscal_id,
            items: self.items,
            cash_payment_amount: self.cash_payment_amount,
            card_payment_amount: self.card_payment_amount,
        })
    }
}

/// Builder for [`CompanyData`].
pub struct CompanyBuilder {
    name: String,
    vat_number: String,
    fiscal_id: String,
    email: Option<String>,
    address: Address,
    pec: Option<String>,
    sdi_code: Option<String>,
    status: CompanyStatus,
    financial_score: Option<String>,
}

impl CompanyBuilder {
    /// Active company with an empty Italian address.
    pub fn new(
        name: impl Into<String>,
        vat_number: impl Into<String>,
        fiscal_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vat_number: vat_number.into(),
            fiscal_id: fiscal_id.into(),
            email: None,
            address: Address::empty_italian(),
            pec: None,
            sdi_code: None,
            status: CompanyStatus::Active,
            financial_score: None,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    pub fn pec(mut self, pec: impl Into<String>) -> Self {
        self.pec = Some(pec.into());
        self
    }

    pub fn sdi_code(mut self, code: impl Into<String>) -> Self {
        self.sdi_code = Some(code.into());
        self
    }

    pub fn status(mut self, status: CompanyStatus) -> Self {
        self.status = status;
        self
    }

    pub fn financial_score(mut self, score: impl Into<String>) -> Self {
        self.financial_score = Some(score.into());
        self
    }

    pub fn build(self) -> CompanyData {
        CompanyData {
            vat_number: self.vat_number,
            fiscal_id: self.fiscal_id,
            name: self.name,
            email: self.email,
            address: self.address,
            pec: self.pec,
            sdi_code: self.sdi_code,
            status: self.status,
            financial_score: self.financial_score,
        }
    }
}

/// Builder for [`Address`]; the country defaults to "IT".
pub struct AddressBuilder {
    street: String,
    city: String,
    zip: String,
    province: String,
    country: String,
}

impl AddressBuilder {
    pub fn new(city: impl Into<String>, zip: impl Into<String>, province: impl Into<String>) -> Self {
        Self {
            street: String::new(),
            city: city.into(),
            zip: zip.into(),
            province: province.into(),
            country: "IT".to_string(),
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = street.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn build(self) -> Address {
        Address {
            street: self.street,
            city: self.city,
            zip: self.zip,
            province: self.province,
            country: self.country,
        }
    }
}
