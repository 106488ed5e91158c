//! # fattura
//!
//! Italian e-invoicing toolkit: fiscal identifier validation, company
//! onboarding, company-registry lookups and invoice / receipt submission
//! through the OpenAPI SDI gateway.
//!
//! Amounts are [`rust_decimal::Decimal`] in memory and JSON numbers on the
//! wire, which is what the OpenAPI services expect.
//!
//! ## Quick Start
//!
//! ```rust
//! use fattura::core::*;
//!
//! assert!(is_fiscal_id("RSSMRA80A01H501U"));
//! assert!(is_fiscal_id("RSSMRATLALMARRLU")); // omocodia on all seven digits
//! assert!(is_partita_iva("00000000000"));
//! assert!(!is_province_code("rm"));
//!
//! let id: FiscalIdentifier = "12345678901".parse().unwrap();
//! assert!(id.is_partita_iva());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Fiscal identifier grammars, company model, form validation, billing store, payload builders |
//! | `session` | Key-value session store, persisted company session |
//! | `openapi` | Async clients for the OpenAPI company and invoice services, signup / login |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "session")]
pub mod session;

#[cfg(feature = "openapi")]
pub mod openapi;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
