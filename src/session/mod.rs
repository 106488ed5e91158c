//! Session persistence for the configured company.
//!
//! A flat key-value store (in memory or a JSON file) holding one serialized
//! company under [`SESSION_KEY`], loaded at startup and cleared on logout.
//!
//! # Example
//!
//! ```
//! use fattura::core::CompanyBuilder;
//! use fattura::session::*;
//!
//! let mut session = CompanySession::new(MemorySessionStore::new());
//! let me = CompanyBuilder::new("Rossi SRL", "12345678901", "RSSMRA80A01H501U").build();
//! session.save(&me).unwrap();
//! assert_eq!(session.load().unwrap().name, "Rossi SRL");
//! ```

mod company;
mod store;

pub use company::{CompanySession, SESSION_KEY};
pub use store::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
