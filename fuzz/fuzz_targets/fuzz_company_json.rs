#![no_main]

use fattura::core::CompanyData;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Session blobs come from disk; parsing must not panic.
    if let Ok(company) = serde_json::from_slice::<CompanyData>(data) {
        let json = serde_json::to_string(&company).unwrap();
        let _ = serde_json::from_str::<CompanyData>(&json);
    }
});
