use fattura::core::*;
use fattura::openapi::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let vat = std::env::args().nth(1).unwrap_or_else(|| "12345678901".into());

    // OPENAPI_TOKEN, OPENAPI_COMPANY_URL, OPENAPI_INVOICE_URL
    let client = OpenApiClient::new(OpenApiConfig::from_env()?)?;

    match client.company().lookup(&vat).await {
        Ok(Some(found)) => {
            let company = &found.company;
            println!("{} ({})", company.name, company.status.code());
            println!("  P.IVA: {}", company.vat_number);
            println!("  CF:    {}", company.fiscal_id);
            println!(
                "  Sede:  {}, {} {} ({})",
                company.address.street,
                company.address.zip,
                company.address.city,
                company.address.province
            );
            for warning in &found.warnings {
                println!("  WARNING: {warning}");
            }

            let mut store = BillingStore::new();
            store.set_company(found.company);
            println!("  selected, can invoice: {}", store.can_invoice());
        }
        Ok(None) => println!("no company registered with P.IVA {vat}"),
        Err(OpenApiError::InvalidVatNumber(v)) => println!("'{v}' is not 11 digits"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
