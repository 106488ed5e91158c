use fattura::core::*;
use fattura::openapi::*;
use fattura::session::FileSessionStore;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = OpenApiClient::new(OpenApiConfig::from_env()?)?;

    let session_path = std::env::temp_dir().join("fattura-session.json");
    let mut service =
        CompanyConfigService::new(client.invoice().clone(), FileSessionStore::new(session_path));

    let me = match service.my_company() {
        Some(company) => company.clone(),
        None => match service.login("RSSMRA80A01H501U").await {
            Ok(company) => company,
            Err(OpenApiError::NotFound { .. }) => {
                let form = CompanySignup {
                    name: "Bar Rossi".into(),
                    vat_number: "12345678901".into(),
                    fiscal_id: "RSSMRA80A01H501U".into(),
                    email: "cassa@barrossi.it".into(),
                    pec: None,
                    pin: Some("12345678".into()),
                    sdi_code: None,
                    address: None,
                };
                service.signup(&form).await?
            }
            Err(e) => return Err(e.into()),
        },
    };
    println!("issuing as {} ({})", me.name, me.fiscal_id);

    let store = BillingStore::with_my_company(me);
    let receipt = ReceiptBuilder::from_store(&store)?
        .add_item(ReceiptItem::new(dec!(2), "Caffe", dec!(1.20), "22"))
        .add_item(ReceiptItem::new(dec!(1), "Cornetto", dec!(1.50), "10"))
        .cash_payment(dec!(3.90))
        .build()?;
    println!("total: {} EUR", receipt.total());

    let data = client.invoice().create_receipt(&receipt).await?;
    println!("receipt accepted: {data}");
    Ok(())
}
