#![no_main]

use fattura::core::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let cf = is_codice_fiscale(s);
        let piva = is_partita_iva(s);
        assert_eq!(is_fiscal_id(s), cf || piva);
        assert!(!(cf && piva));

        let _ = is_email(s);
        let _ = is_postal_code(s);
        let _ = is_province_code(s);
        let _ = is_sdi_code(s);
        let _ = is_device_pin(s);

        match FiscalIdentifier::parse(s) {
            Ok(id) => {
                assert_eq!(id.as_str(), s);
                assert!(is_codice_fiscale(&id.without_omocodia()) == cf);
            }
            Err(_) => assert!(!cf && !piva),
        }
    }
});
