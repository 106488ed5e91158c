//! My company, persisted across restarts.

use crate::core::CompanyData;

use super::store::{SessionError, SessionStore};

/// Key under which my company is stored.
pub const SESSION_KEY: &str = "my_company_session";

/// Serialized [`CompanyData`] session on top of any [`SessionStore`].
#[derive(Debug, Clone)]
pub struct CompanySession<S> {
    store: S,
}

impl<S: SessionStore> CompanySession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load the saved company.
    ///
    /// A missing entry and an unreadable one both yield `None`; the latter
    /// is logged so a corrupt blob does not block startup.
    pub fn load(&self) -> Option<CompanyData> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session");
                return None;
            }
        };
        match serde_json::from_str::<CompanyData>(&raw) {
            Ok(company) => {
                tracing::info!(company = %company.name, "session loaded");
                Some(company)
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session");
                None
            }
        }
    }

    pub fn save(&mut self, company: &CompanyData) -> Result<(), SessionError> {
        let raw = serde_json::to_string(company)?;
        self.store.set(SESSION_KEY, raw)?;
        tracing::info!(company = %company.name, "session saved");
        Ok(())
    }

    /// Forget the saved company.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.store.remove(SESSION_KEY)?;
        tracing::info!("session cleared");
        Ok(())
    }
}
