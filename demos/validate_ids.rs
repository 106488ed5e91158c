use fattura::core::*;

fn main() {
    println!("=== Login: Codice Fiscale or Partita IVA ===\n");

    let ids = [
        "RSSMRA80A01H501U",
        "RSSMRA67B8N5458J", // omocodic
        "12345678901",
        "rssmra80a01h501u", // lowercase, rejected as typed
        "RSSMRAW0A01H501U", // W is not an omocodia letter
        "1234567890",
    ];

    for id in &ids {
        match FiscalIdentifier::parse(id) {
            Ok(fid) if fid.is_codice_fiscale() => println!(
                "  {id} => Codice Fiscale (omocodia level {}, base {})",
                fid.omocodia_level(),
                fid.without_omocodia()
            ),
            Ok(_) => println!("  {id} => Partita IVA"),
            Err(e) => println!("  {id} => INVALID: {e}"),
        }
    }

    println!("\n=== Normalized input ===\n");
    let typed = " rssmra80a01h501u ";
    let normalized = normalize_upper(typed.trim());
    println!("  {typed:?} => {normalized} valid={}", is_fiscal_id(&normalized));

    println!("\n=== Signup form ===\n");
    let form = CompanySignup {
        name: "Rossi SRL".into(),
        vat_number: "12345678901".into(),
        fiscal_id: "RSSMRA80A01H501U".into(),
        email: "info@rossi".into(),
        pec: Some("rossi@pec.it".into()),
        pin: Some("1234".into()),
        sdi_code: Some("abc1234".into()),
        address: Some(AddressBuilder::new("Roma", "0010", "Rm").build()),
    };

    let errors = validate_signup(&form);
    if errors.is_empty() {
        println!("  form is valid");
    }
    for error in &errors {
        println!("  {error}");
    }
}
