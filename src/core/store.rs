use super::types::CompanyData;

/// In-memory billing state: my company (the sender) and the client
/// currently selected as receiver.
#[derive(Debug, Clone, Default)]
pub struct BillingStore {
    my_company: Option<CompanyData>,
    selected_company: Option<CompanyData>,
}

impl BillingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a company restored from the session.
    pub fn with_my_company(company: CompanyData) -> Self {
        Self {
            my_company: Some(company),
            selected_company: None,
        }
    }

    pub fn my_company(&self) -> Option<&CompanyData> {
        self.my_company.as_ref()
    }

    pub fn selected_company(&self) -> Option<&CompanyData> {
        self.selected_company.as_ref()
    }

    pub fn set_my_company(&mut self, company: CompanyData) {
        self.my_company = Some(company);
    }

    /// Select the client to invoice.
    pub fn set_company(&mut self, company: CompanyData) {
        self.selected_company = Some(company);
    }

    /// Drop the selected client, keep my company.
    pub fn clear_store(&mut self) {
        self.selected_company = None;
    }

    /// Drop everything.
    pub fn logout(&mut self) {
        self.my_company = None;
        self.selected_company = None;
    }

    /// My company has been set up.
    pub fn is_configured(&self) -> bool {
        self.my_company.is_some()
    }

    /// Both parties are known and the selected client is active.
    pub fn can_invoice(&self) -> bool {
        self.my_company.is_some()
            && self
                .selected_company
                .as_ref()
                .is_some_and(CompanyData::is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Address, CompanyStatus};

    fn company(name: &str, status: CompanyStatus) -> CompanyData {
        CompanyData {
            vat_number: "12345678901".into(),
            fiscal_id: "12345678901".into(),
            name: name.into(),
            email: None,
            address: Address::empty_italian(),
            pec: None,
            sdi_code: None,
            status,
            financial_score: None,
        }
    }

    #[test]
    fn empty_store() {
        let store = BillingStore::new();
        assert!(!store.is_configured());
        assert!(!store.can_invoice());
    }

    #[test]
    fn can_invoice_needs_active_client() {
        let mut store = BillingStore::with_my_company(company("Me", CompanyStatus::Active));
        assert!(store.is_configured());
        assert!(!store.can_invoice());

        store.set_company(company("Client", CompanyStatus::Ceased));
        assert!(!store.can_invoice());

        store.set_company(company("Client", CompanyStatus::Active));
        assert!(store.can_invoice());
    }

    #[test]
    fn clear_keeps_my_company() {
        let mut store = BillingStore::new();
        store.set_my_company(company("Me", CompanyStatus::Active));
        store.set_company(company("Client", CompanyStatus::Active));
        store.clear_store();
        assert!(store.is_configured());
        assert!(store.selected_company().is_none());
        assert!(!store.can_invoice());
    }

    #[test]
    fn logout_clears_both() {
        let mut store = BillingStore::new();
        store.set_my_company(company("Me", CompanyStatus::Active));
        store.set_company(company("Client", CompanyStatus::Active));
        store.logout();
        assert!(store.my_company().is_none());
        assert!(store.selected_company().is_none());
    }
}
