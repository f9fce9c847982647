use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use motor_client::{AccountingApi, ApiError, ClientConfig, HttpAccountingClient};
use motor_core::{AccountId, Amount, VoucherId};
use motor_vouchers::{VoucherLinePayload, VoucherPayload, VoucherType};
use serde_json::{Value, json};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Clone, Default)]
struct Recorded {
    vouchers: Arc<Mutex<Vec<Value>>>,
    posted: Arc<Mutex<Vec<i64>>>,
    auth: Arc<Mutex<Vec<Option<String>>>>,
}

fn accounting_api(recorded: Recorded) -> Router {
    Router::new()
        .route("/api/accounts", get(list_accounts))
        .route("/api/third-parties", get(list_third_parties))
        .route("/api/vouchers", post(create_voucher))
        .route("/api/vouchers/:id/post", post(post_voucher))
        .with_state(recorded)
}

async fn list_accounts(State(rec): State<Recorded>, headers: HeaderMap) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    rec.auth.lock().unwrap().push(auth);
    Json(json!({
        "success": true,
        "data": { "accounts": [
            { "id": 1, "code": "130505", "name": "Clientes nacionales" },
            { "id": 2, "code": "413524", "name": "Venta de mercancías" },
            { "id": 3, "code": "240805", "name": "IVA generado" }
        ]}
    }))
}

async fn list_third_parties() -> impl IntoResponse {
    Json(json!({
        "data": { "third_parties": [
            { "id": 10, "name": "Comercializadora Andina", "document": "900123456" },
            { "id": 11, "name": "Ana Gómez" }
        ]}
    }))
}

async fn create_voucher(State(rec): State<Recorded>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut vouchers = rec.vouchers.lock().unwrap();
    vouchers.push(body);
    let id = vouchers.len() as i64;
    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Comprobante creado",
            "data": { "id": id, "number": format!("CV-{id:04}") }
        })),
    )
}

async fn post_voucher(State(rec): State<Recorded>, Path(id): Path<i64>) -> axum::response::Response {
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": "Comprobante no encontrado" })),
        )
            .into_response();
    }
    rec.posted.lock().unwrap().push(id);
    Json(json!({
        "success": true,
        "message": "Comprobante contabilizado",
        "data": { "journal_entry": { "id": 70, "lines": 3 } }
    }))
    .into_response()
}

fn sale_payload() -> VoucherPayload {
    VoucherPayload {
        voucher_type: VoucherType::Sale,
        date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        description: "Venta de contado".to_string(),
        reference: "FV-100".to_string(),
        third_party_id: None,
        voucher_lines: vec![
            VoucherLinePayload {
                account_id: AccountId::new(1),
                description: String::new(),
                debit_amount: Amount::from_units(100_000),
                credit_amount: Amount::ZERO,
                third_party_id: None,
            },
            VoucherLinePayload {
                account_id: AccountId::new(2),
                description: String::new(),
                debit_amount: Amount::ZERO,
                credit_amount: Amount::from_units(100_000),
                third_party_id: None,
            },
        ],
    }
}

#[tokio::test]
async fn lists_reference_data() {
    let recorded = Recorded::default();
    let server = TestServer::spawn(accounting_api(recorded.clone())).await;
    let client = HttpAccountingClient::new(server.base_url.clone());

    let accounts = client.list_accounts().await.unwrap();
    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[2].code, "240805");

    let parties = client.list_third_parties().await.unwrap();
    assert_eq!(parties.len(), 2);
    assert_eq!(parties[0].label(), "Comercializadora Andina (900123456)");
    assert_eq!(parties[1].document, None);

    assert_eq!(recorded.auth.lock().unwrap().as_slice(), &[None]);
}

#[tokio::test]
async fn sends_bearer_token_when_configured() {
    let recorded = Recorded::default();
    let server = TestServer::spawn(accounting_api(recorded.clone())).await;
    let config = ClientConfig::new(format!("{}/", server.base_url)).with_token("s3cret");
    let client = HttpAccountingClient::from_config(&config);

    client.list_accounts().await.unwrap();
    assert_eq!(
        recorded.auth.lock().unwrap().as_slice(),
        &[Some("Bearer s3cret".to_string())]
    );
}

#[tokio::test]
async fn creates_and_posts_voucher() {
    let recorded = Recorded::default();
    let server = TestServer::spawn(accounting_api(recorded.clone())).await;
    let client = HttpAccountingClient::new(server.base_url.clone());

    let created = client.create_voucher(&sale_payload()).await.unwrap();
    assert_eq!(created.id, VoucherId::new(1));
    assert_eq!(created.number, "CV-0001");

    let body = recorded.vouchers.lock().unwrap()[0].clone();
    assert_eq!(body["voucher_type"], json!("sale"));
    assert_eq!(body["date"], json!("2024-05-02"));
    assert_eq!(body["third_party_id"], Value::Null);
    assert_eq!(body["voucher_lines"].as_array().map(Vec::len), Some(2));

    let posted = client.post_voucher(created.id).await.unwrap();
    assert_eq!(posted.message.as_deref(), Some("Comprobante contabilizado"));
    assert_eq!(posted.data.unwrap()["journal_entry"]["lines"], json!(3));
    assert_eq!(recorded.posted.lock().unwrap().as_slice(), &[1]);
}

#[tokio::test]
async fn surfaces_server_error_message() {
    let server = TestServer::spawn(accounting_api(Recorded::default())).await;
    let client = HttpAccountingClient::new(server.base_url.clone());

    let err = client.post_voucher(VoucherId::new(404)).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Api {
            status: 404,
            message: Some("Comprobante no encontrado".to_string())
        }
    );
}

#[tokio::test]
async fn unreachable_api_is_a_network_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpAccountingClient::new(format!("http://{addr}/api"));
    let err = client.list_accounts().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
    assert_eq!(err.user_message("could not load accounts"), "could not load accounts");
}
