//! Core types, fiscal identifier grammars, form validation and payloads.
//!
//! This module provides the Italian fiscal identifier checks (Codice
//! Fiscale with omocodia, Partita IVA, SDI code, ...), the company model,
//! the billing store and the builders for invoice and receipt payloads.

mod builder;
mod error;
pub mod fiscal;
mod store;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use fiscal::{
    FiscalIdKind, FiscalIdentifier, is_codice_fiscale, is_device_pin, is_email, is_fiscal_id,
    is_partita_iva, is_postal_code, is_province_code, is_sdi_code,
};
pub use store::*;
pub use types::*;
pub use validation::*;
