use rust_decimal::Decimal;

use super::error::ValidationError;
use super::fiscal::*;
use super::types::*;

/// Trim and uppercase a form value, the way the onboarding forms do before
/// running the grammars (which are case-sensitive).
pub fn normalize_upper(s: &str) -> String {
    s.trim().to_ascii_uppercase()
}

/// Validate the login form: a Codice Fiscale or a Partita IVA.
pub fn validate_login(fiscal_id: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if fiscal_id.trim().is_empty() {
        errors.push(ValidationError::new(
            "fiscal_id",
            "Codice Fiscale or Partita IVA is required",
        ));
    } else if !is_fiscal_id(fiscal_id) {
        errors.push(ValidationError::with_rule(
            "fiscal_id",
            format!("'{fiscal_id}' is neither a Codice Fiscale (16 characters) nor a Partita IVA (11 digits)"),
            "fiscal-id",
        ));
    }
    errors
}

/// Validate the signup form.
/// Returns all validation errors found (not just the first).
pub fn validate_signup(form: &CompanySignup) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "company name is required"));
    }

    required(
        &form.vat_number,
        "vat_number",
        "Partita IVA",
        is_partita_iva,
        "partita-iva",
        "must be exactly 11 digits",
        &mut errors,
    );
    required(
        &form.fiscal_id,
        "fiscal_id",
        "Codice Fiscale",
        is_fiscal_id,
        "fiscal-id",
        "must be a 16-character Codice Fiscale or an 11-digit Partita IVA",
        &mut errors,
    );
    required(
        &form.email,
        "email",
        "email",
        is_email,
        "email",
        "is not a valid email address",
        &mut errors,
    );

    optional(
        form.pec.as_deref(),
        "pec",
        is_email,
        "email",
        "is not a valid PEC address",
        &mut errors,
    );
    optional(
        form.pin.as_deref(),
        "pin",
        is_device_pin,
        "device-pin",
        "must be exactly 8 digits",
        &mut errors,
    );
    optional(
        form.sdi_code.as_deref(),
        "sdi_code",
        is_sdi_code,
        "sdi-code",
        "must be 7 uppercase letters or digits",
        &mut errors,
    );

    if let Some(address) = &form.address {
        optional(
            Some(address.zip.as_str()),
            "address.zip",
            is_postal_code,
            "cap",
            "must be exactly 5 digits",
            &mut errors,
        );
        optional(
            Some(address.province.as_str()),
            "address.province",
            is_province_code,
            "provincia",
            "must be 2 uppercase letters",
            &mut errors,
        );
    }

    errors
}

/// Validate receipt lines before they are sent.
pub fn validate_receipt_items(items: &[ReceiptItem]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if items.is_empty() {
        errors.push(ValidationError::new(
            "items",
            "receipt must have at least one item",
        ));
    }

    for (i, item) in items.iter().enumerate() {
        let prefix = format!("items[{i}]");
        if item.description.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("{prefix}.description"),
                "description must not be empty",
            ));
        }
        if item.quantity <= Decimal::ZERO {
            errors.push(ValidationError::new(
                format!("{prefix}.quantity"),
                format!("quantity must be positive, got {}", item.quantity),
            ));
        }
        if item.unit_price < Decimal::ZERO {
            errors.push(ValidationError::new(
                format!("{prefix}.unit_price"),
                format!("unit price must not be negative, got {}", item.unit_price),
            ));
        }
        if item.vat_rate_code.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("{prefix}.vat_rate_code"),
                "VAT rate code must not be empty",
            ));
        }
    }

    errors
}

fn required(
    value: &str,
    field: &str,
    label: &str,
    check: fn(&str) -> bool,
    rule: &str,
    message: &str,
    errors: &mut Vec<ValidationError>,
) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, format!("{label} is required")));
    } else if !check(value) {
        errors.push(ValidationError::with_rule(field, message, rule));
    }
}

// Optional fields are only checked when filled in.
fn optional(
    value: Option<&str>,
    field: &str,
    check: fn(&str) -> bool,
    rule: &str,
    message: &str,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
        if !check(v) {
            errors.push(ValidationError::with_rule(field, message, rule));
        }
    }
}
