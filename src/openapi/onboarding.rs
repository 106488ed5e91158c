//! Signup, login and logout of my company.

use crate::core::{
    Address, CompanyData, CompanySignup, CompanyStatus, FatturaError, validate_login,
    validate_signup,
};
use crate::session::{CompanySession, SessionStore};

use super::error::OpenApiError;
use super::invoice::{ConfigurationRequest, InvoiceClient};

/// Keeps my company in sync between the e-invoicing API and the session.
#[derive(Debug)]
pub struct CompanyConfigService<S> {
    client: InvoiceClient,
    session: CompanySession<S>,
    my_company: Option<CompanyData>,
}

impl<S: SessionStore> CompanyConfigService<S> {
    /// Create the service, restoring any saved session.
    pub fn new(client: InvoiceClient, store: S) -> Self {
        let session = CompanySession::new(store);
        let my_company = session.load();
        Self {
            client,
            session,
            my_company,
        }
    }

    pub fn my_company(&self) -> Option<&CompanyData> {
        self.my_company.as_ref()
    }

    pub fn session(&self) -> &CompanySession<S> {
        &self.session
    }

    /// Register my company with the e-invoicing API and save the session.
    ///
    /// The form is validated first; nothing is sent if it has errors.
    pub async fn signup(&mut self, form: &CompanySignup) -> Result<CompanyData, OpenApiError> {
        let errors = validate_signup(form);
        if !errors.is_empty() {
            return Err(FatturaError::from_validation(&errors).into());
        }

        let req = ConfigurationRequest::new(&form.fiscal_id, &form.name, &form.email);
        self.client.create_configuration(&req).await?;
        tracing::info!(company = %form.name, "company configuration created");

        let company = CompanyData {
            vat_number: form.vat_number.clone(),
            fiscal_id: form.fiscal_id.clone(),
            name: form.name.clone(),
            email: Some(form.email.clone()),
            address: form.address.clone().unwrap_or_else(Address::empty_italian),
            pec: non_empty(form.pec.as_deref()),
            sdi_code: non_empty(form.sdi_code.as_deref()),
            status: CompanyStatus::Active,
            financial_score: None,
        };
        self.remember(company.clone());
        Ok(company)
    }

    /// Log in with a Codice Fiscale or Partita IVA already registered.
    ///
    /// Returns [`OpenApiError::NotFound`] when no configuration exists; the
    /// caller should offer signup.
    pub async fn login(&mut self, fiscal_id: &str) -> Result<CompanyData, OpenApiError> {
        let errors = validate_login(fiscal_id);
        if !errors.is_empty() {
            return Err(FatturaError::from_validation(&errors).into());
        }

        let config = self
            .client
            .get_configuration(fiscal_id)
            .await?
            .ok_or_else(|| OpenApiError::NotFound {
                endpoint: format!("GET /IT-configurations/{fiscal_id}"),
            })?;
        tracing::info!(company = %config.name, "login succeeded");

        let company = CompanyData {
            vat_number: fiscal_id.to_string(),
            fiscal_id: config.fiscal_id,
            name: config.name,
            email: config.email,
            address: Address::empty_italian(),
            pec: None,
            sdi_code: None,
            status: CompanyStatus::Active,
            financial_score: None,
        };
        self.remember(company.clone());
        Ok(company)
    }

    /// Forget my company, locally and in the session.
    pub fn logout(&mut self) -> Result<(), OpenApiError> {
        self.my_company = None;
        self.session.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    // A failed session write must not undo a successful signup/login.
    fn remember(&mut self, company: CompanyData) {
        if let Err(e) = self.session.save(&company) {
            tracing::error!(error = %e, "failed to save session");
        }
        self.my_company = Some(company);
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
