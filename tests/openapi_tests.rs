//! Contract tests for the OpenAPI clients.
//!
//! wiremock stands in for both the company-registry and the e-invoicing
//! service.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/IT-advanced/{vat}` | `lookup_*` |
//! | POST   | `/IT-configurations` | `signup_*` |
//! | GET    | `/IT-configurations/{id}` | `login_*` |
//! | POST   | `/IT-invoice` | `send_invoice_*`, `submit_invoice_*` |
//! | POST   | `/IT-receipts` | `create_receipt_*` |

#![cfg(feature = "openapi")]

use fattura::core::*;
use fattura::openapi::*;
use fattura::session::{
    CompanySession, FileSessionStore, MemorySessionStore, SESSION_KEY, SessionStore,
};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build an OpenApiClient with both services pointed at a wiremock server.
fn test_client(server: &MockServer) -> OpenApiClient {
    let config = OpenApiConfig::local(&server.uri(), Some("test-token")).unwrap();
    OpenApiClient::new(config).unwrap()
}

fn registry_company(status: &str) -> serde_json::Value {
    json!({
        "vatCode": "12345678901",
        "taxCode": "12345678901",
        "companyName": "BIANCHI SPA",
        "activityStatus": status,
        "address": {
            "registeredOffice": {
                "toponym": "PIAZZA",
                "street": "DUOMO",
                "streetNumber": "2",
                "town": "MILANO",
                "zipCode": "20121",
                "province": "MI"
            }
        },
        "pec": "bianchi@pec.it",
        "sdiCode": "M5UXCR1"
    })
}

fn signup_form() -> CompanySignup {
    CompanySignup {
        name: "Rossi SRL".into(),
        vat_number: "12345678901".into(),
        fiscal_id: "RSSMRA80A01H501U".into(),
        email: "info@rossi.it".into(),
        pec: Some("rossi@pec.it".into()),
        pin: Some("12345678".into()),
        sdi_code: Some(String::new()),
        address: None,
    }
}

// ── GET /IT-advanced/{vat} ───────────────────────────────────────────

#[tokio::test]
async fn lookup_sends_bearer_and_maps_company() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IT-advanced/12345678901"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [registry_company("ATTIVA")],
            "success": true,
            "message": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let found = client.company().lookup("12345678901").await.unwrap().unwrap();
    assert_eq!(found.company.name, "BIANCHI SPA");
    assert_eq!(found.company.address.street, "PIAZZA DUOMO 2");
    assert_eq!(found.company.address.province, "MI");
    assert_eq!(found.company.status, CompanyStatus::Active);
    assert!(found.warnings.is_empty());
}

#[tokio::test]
async fn lookup_warns_on_ceased_company() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IT-advanced/12345678901"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [registry_company("CESSATA")] })),
        )
        .mount(&server)
        .await;

    let found = test_client(&server)
        .company()
        .lookup("12345678901")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.company.status, CompanyStatus::Ceased);
    assert_eq!(
        found.warnings,
        vec![LookupWarning::NotActive(CompanyStatus::Ceased)]
    );
}

#[tokio::test]
async fn lookup_empty_data_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IT-advanced/00000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let result = test_client(&server).company().lookup("00000000000").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn lookup_404_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IT-advanced/00000000000"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .mount(&server)
        .await;

    let result = test_client(&server).company().lookup("00000000000").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn lookup_rejects_invalid_vat_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .company()
        .lookup("IT12345678901")
        .await
        .unwrap_err();
    assert!(matches!(err, OpenApiError::InvalidVatNumber(ref v) if v == "IT12345678901"));
}

#[tokio::test]
async fn lookup_server_error_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IT-advanced/12345678901"))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(json!({ "message": "credito esaurito" })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server)
        .company()
        .lookup("12345678901")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(402));
    assert!(err.to_string().contains("credito esaurito"));
}

// ── POST /IT-configurations ──────────────────────────────────────────

#[tokio::test]
async fn signup_posts_configuration_and_saves_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/IT-configurations"))
        .and(body_json(json!({
            "fiscal_id": "RSSMRA80A01H501U",
            "name": "Rossi SRL",
            "email": "info@rossi.it",
            "receipts": true,
            "customer_invoice": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "cfg-1", "fiscal_id": "RSSMRA80A01H501U" },
            "success": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut service = CompanyConfigService::new(client.invoice().clone(), MemorySessionStore::new());
    assert!(service.my_company().is_none());

    let company = service.signup(&signup_form()).await.unwrap();
    assert_eq!(company.status, CompanyStatus::Active);
    assert_eq!(company.address, Address::empty_italian());
    assert_eq!(company.pec.as_deref(), Some("rossi@pec.it"));
    assert_eq!(company.sdi_code, None);
    assert_eq!(service.my_company(), Some(&company));
    assert_eq!(service.session().load(), Some(company));
}

#[tokio::test]
async fn signup_conflict_is_already_exists() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/IT-configurations"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "configuration exists" })),
        )
        .mount(&server)
        .await;

    let mut service =
        CompanyConfigService::new(test_client(&server).invoice().clone(), MemorySessionStore::new());
    let err = service.signup(&signup_form()).await.unwrap_err();
    assert!(matches!(err, OpenApiError::AlreadyExists { ref message, .. } if message == "configuration exists"));
    assert_eq!(err.status(), Some(409));
    assert!(service.my_company().is_none());
    assert!(service.session().store().is_empty());
}

#[tokio::test]
async fn signup_invalid_form_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut service =
        CompanyConfigService::new(test_client(&server).invoice().clone(), MemorySessionStore::new());
    let form = CompanySignup {
        vat_number: "1234567890".into(),
        ..signup_form()
    };
    let err = service.signup(&form).await.unwrap_err();
    assert!(matches!(err, OpenApiError::Invalid(FatturaError::Validation(_))));
    assert!(err.to_string().contains("vat_number"));
}

// ── GET /IT-configurations/{id} ──────────────────────────────────────

#[tokio::test]
async fn login_fetches_configuration() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IT-configurations/12345678901"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "fiscal_id": "12345678901",
                "name": "Rossi SRL",
                "email": "info@rossi.it",
                "receipts": true
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut service =
        CompanyConfigService::new(test_client(&server).invoice().clone(), MemorySessionStore::new());
    let company = service.login("12345678901").await.unwrap();
    assert_eq!(company.vat_number, "12345678901");
    assert_eq!(company.name, "Rossi SRL");
    assert_eq!(company.email.as_deref(), Some("info@rossi.it"));
    assert_eq!(company.address.country, "IT");
    assert!(service.session().load().is_some());
}

#[tokio::test]
async fn login_unknown_company_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IT-configurations/RSSMRA80A01H501U"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut service =
        CompanyConfigService::new(test_client(&server).invoice().clone(), MemorySessionStore::new());
    let err = service.login("RSSMRA80A01H501U").await.unwrap_err();
    assert!(matches!(err, OpenApiError::NotFound { .. }));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn login_rejects_lowercase_id() {
    let server = MockServer::start().await;
    let mut service =
        CompanyConfigService::new(test_client(&server).invoice().clone(), MemorySessionStore::new());
    let err = service.login("rssmra80a01h501u").await.unwrap_err();
    assert!(matches!(err, OpenApiError::Invalid(_)));
}

#[tokio::test]
async fn saved_session_is_restored_and_logout_clears_it() {
    let server = MockServer::start().await;

    let me = CompanyBuilder::new("Rossi SRL", "12345678901", "RSSMRA80A01H501U").build();
    let mut session = CompanySession::new(MemorySessionStore::new());
    session.save(&me).unwrap();
    let store = session.into_inner();
    assert!(store.get(SESSION_KEY).unwrap().is_some());

    let mut service = CompanyConfigService::new(test_client(&server).invoice().clone(), store);
    assert_eq!(service.my_company(), Some(&me));

    service.logout().unwrap();
    assert!(service.my_company().is_none());
    assert!(service.session().load().is_none());
}

#[tokio::test]
async fn logout_recovers_from_corrupt_session_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{\"my_company_session\": ").unwrap();

    let mut service = CompanyConfigService::new(
        test_client(&server).invoice().clone(),
        FileSessionStore::new(&path),
    );
    assert!(service.my_company().is_none());

    service.logout().unwrap();
    assert!(service.session().load().is_none());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
}

// ── POST /IT-invoice ─────────────────────────────────────────────────

fn store_with_client(status: CompanyStatus) -> BillingStore {
    let mut store = BillingStore::with_my_company(
        CompanyBuilder::new("Rossi SRL", "12345678901", "RSSMRA80A01H501U")
            .sdi_code("ABC1234")
            .build(),
    );
    store.set_company(
        CompanyBuilder::new("Bianchi SPA", "01234567890", "01234567890")
            .status(status)
            .build(),
    );
    store
}

fn line() -> InvoiceLine {
    InvoiceLine {
        description: "Consulenza".into(),
        quantity: dec!(1),
        unit_price: dec!(100),
        vat_rate: dec!(22),
    }
}

#[tokio::test]
async fn send_invoice_returns_invoice_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/IT-invoice"))
        .and(body_partial_json(json!({
            "sender": { "company_name": "Rossi SRL", "sdi_code": "ABC1234", "pec": "" },
            "receiver": { "company_name": "Bianchi SPA" },
            "document": { "type": "receipt", "currency": "EUR", "number": "SCT-42" }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "invoice_id": "inv-7" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = store_with_client(CompanyStatus::Active);
    let payload = InvoicePayloadBuilder::from_store(&store)
        .unwrap()
        .number("SCT-42")
        .add_item(line())
        .build()
        .unwrap();
    let id = test_client(&server).invoice().send_invoice(&payload).await.unwrap();
    assert_eq!(id, "inv-7");
}

#[tokio::test]
async fn send_invoice_falls_back_to_numeric_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/IT-invoice"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": 981 } })))
        .mount(&server)
        .await;

    let id = test_client(&server)
        .invoice()
        .submit_invoice(&store_with_client(CompanyStatus::Active), vec![line()], vec![])
        .await
        .unwrap();
    assert_eq!(id, "981");
}

#[tokio::test]
async fn send_invoice_without_id_is_unexpected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/IT-invoice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .invoice()
        .submit_invoice(&store_with_client(CompanyStatus::Active), vec![line()], vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, OpenApiError::UnexpectedResponse { .. }));
}

#[tokio::test]
async fn submit_invoice_refuses_inactive_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .invoice()
        .submit_invoice(&store_with_client(CompanyStatus::Inactive), vec![line()], vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, OpenApiError::Invalid(FatturaError::NotAllowed(_))));
}

// ── POST /IT-receipts ────────────────────────────────────────────────

#[tokio::test]
async fn create_receipt_posts_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/IT-receipts"))
        .and(body_json(json!({
            "fiscal_id": "RSSMRA80A01H501U",
            "items": [
                { "quantity": 2.0, "description": "Caffe", "unit_price": 1.2, "vat_rate_code": "22" }
            ],
            "cash_payment_amount": 2.4
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "rcpt-1" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let receipt = ReceiptBuilder::new("RSSMRA80A01H501U")
        .add_item(ReceiptItem::new(dec!(2), "Caffe", dec!(1.20), "22"))
        .cash_payment(dec!(2.40))
        .build()
        .unwrap();
    let data = test_client(&server).invoice().create_receipt(&receipt).await.unwrap();
    assert_eq!(data["id"], "rcpt-1");
}

#[tokio::test]
async fn create_receipt_422_is_unprocessable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/IT-receipts"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "vat_rate_code not valid" })),
        )
        .mount(&server)
        .await;

    let receipt = ReceiptBuilder::new("RSSMRA80A01H501U")
        .add_item(ReceiptItem::new(dec!(1), "Pane", dec!(2), "99"))
        .build()
        .unwrap();
    let err = test_client(&server).invoice().create_receipt(&receipt).await.unwrap_err();
    assert!(
        matches!(err, OpenApiError::Unprocessable { ref message, .. } if message == "vat_rate_code not valid")
    );
}
