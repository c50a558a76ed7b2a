//! Integration tests for the assembled client stack.
//!
//! These exercise the full flow - login, authenticated calls with the
//! 401 refresh-and-retry protocol, settings bulk updates, logout -
//! against a scripted transport and real file-backed token storage.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tempfile::tempdir;

use greentek_application::{
    ApiCall, ApiClient, ClientConfig, Clock, HttpRequest, HttpTransport, RawResponse,
    RequestBody, TokenStorage, TransportError,
};
use greentek_infrastructure::FileTokenStorage;

const NOW: i64 = 1_700_000_000;

type ResponseFuture = Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + Send>>;
type Handler = Box<dyn Fn(HttpRequest) -> ResponseFuture + Send + Sync>;

struct ScriptedTransport {
    handler: Handler,
    bodies: Mutex<Vec<(String, serde_json::Value)>>,
}

impl ScriptedTransport {
    fn new(handler: Handler) -> Arc<Self> {
        Arc::new(Self {
            handler,
            bodies: Mutex::new(Vec::new()),
        })
    }

    fn body_sent_to(&self, path: &str) -> Option<serde_json::Value> {
        self.bodies
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        if let RequestBody::Json(body) = &request.body {
            self.bodies
                .lock()
                .unwrap()
                .push((request.url.path().to_string(), body.clone()));
        }
        (self.handler)(request).await
    }
}

struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp(NOW, 0).unwrap()
    }
}

fn token(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(serde_json::json!({ "exp": exp }).to_string().as_bytes());
    format!("{header}.{body}.sig")
}

fn json(status: u16, body: serde_json::Value) -> RawResponse {
    RawResponse {
        status,
        content_type: Some("application/json".to_string()),
        body: body.to_string().into_bytes(),
    }
}

fn client_with(
    transport: Arc<ScriptedTransport>,
    storage: Arc<FileTokenStorage>,
) -> ApiClient {
    ApiClient::new(
        ClientConfig::new("http://127.0.0.1:8000/api"),
        transport,
        storage,
        Arc::new(FixedClock),
    )
    .expect("valid base URL")
}

#[tokio::test]
async fn test_login_persists_tokens_across_reopen() {
    let dir = tempdir().expect("temp dir");
    let token_path = dir.path().join("tokens.json");
    let access = token(NOW + 3_600);
    let access_clone = access.clone();

    let transport = ScriptedTransport::new(Box::new(move |request| {
        let access = access_clone.clone();
        let is_login = request.url.path() == "/api/token/";
        Box::pin(async move {
            assert!(is_login, "only the login endpoint should be called");
            Ok(json(
                200,
                serde_json::json!({ "access": access, "refresh": "r1" }),
            ))
        })
    }));
    let storage = Arc::new(FileTokenStorage::new(&token_path));
    let client = client_with(transport, storage);

    client.login("admin", "secret").await.expect("login");

    // A brand-new storage over the same file sees the session.
    let reopened = FileTokenStorage::new(&token_path);
    assert_eq!(reopened.access_token().await, Some(access));
    assert_eq!(reopened.refresh_token().await.as_deref(), Some("r1"));
}

#[tokio::test]
async fn test_expired_session_refreshes_and_persists_new_token() {
    let dir = tempdir().expect("temp dir");
    let token_path = dir.path().join("tokens.json");
    // Within the 60s skew: triggers the proactive refresh path.
    let stale = token(NOW + 30);
    let renewed = token(NOW + 7_200);
    let renewed_clone = renewed.clone();
    let refresh_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&refresh_calls);

    let transport = ScriptedTransport::new(Box::new(move |request| {
        let renewed = renewed_clone.clone();
        let counter = Arc::clone(&counter);
        let path = request.url.path().to_string();
        Box::pin(async move {
            match path.as_str() {
                "/api/auth/token/refresh/" => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(json(200, serde_json::json!({ "access": renewed })))
                }
                "/api/products/" => Ok(json(200, serde_json::json!([]))),
                other => panic!("unexpected path {other}"),
            }
        })
    }));
    let storage = Arc::new(FileTokenStorage::new(&token_path));
    storage.set_access_token(&stale).await;
    storage.set_refresh_token("r1").await;
    let client = client_with(transport, Arc::clone(&storage));

    let products = client.products().list_active().await.expect("list");
    assert!(products.is_empty());
    assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(storage.access_token().await, Some(renewed));
}

#[tokio::test]
async fn test_failed_refresh_clears_persisted_tokens() {
    let dir = tempdir().expect("temp dir");
    let token_path = dir.path().join("tokens.json");

    let transport = ScriptedTransport::new(Box::new(|request| {
        let is_refresh = request.url.path() == "/api/auth/token/refresh/";
        Box::pin(async move {
            if is_refresh {
                Ok(json(401, serde_json::json!({ "detail": "revoked" })))
            } else {
                Ok(json(401, serde_json::json!({ "detail": "expired" })))
            }
        })
    }));
    let storage = Arc::new(FileTokenStorage::new(&token_path));
    storage.set_access_token(&token(NOW + 3_600)).await;
    storage.set_refresh_token("r1").await;
    let client = client_with(transport, Arc::clone(&storage));

    let result = client.contacts().list().await;
    assert!(result.is_err());
    assert!(client.session_expired());

    // Both tokens are gone from disk, not just from memory.
    let reopened = FileTokenStorage::new(&token_path);
    assert!(reopened.access_token().await.is_none());
    assert!(reopened.refresh_token().await.is_none());
}

#[tokio::test]
async fn test_settings_update_sends_flattened_document() {
    let dir = tempdir().expect("temp dir");
    let storage = Arc::new(FileTokenStorage::new(dir.path().join("tokens.json")));
    storage.set_access_token(&token(NOW + 3_600)).await;
    storage.set_refresh_token("r1").await;

    let transport = ScriptedTransport::new(Box::new(|_request| {
        Box::pin(async {
            Ok(json(
                200,
                serde_json::json!({ "message": "Updated 3 settings", "updated": [] }),
            ))
        })
    }));
    let client = client_with(Arc::clone(&transport), storage);

    let document = serde_json::json!({
        "general": { "site_name": "Greentek", "fax": null },
        "hero": { "slides": ["a.jpg", "b.jpg"], "interval": 5 }
    });
    let result = client.settings().bulk_update(&document).await.expect("update");
    assert_eq!(result.message, "Updated 3 settings");

    let body = transport
        .body_sent_to("/api/settings/bulk_update/")
        .expect("bulk update body");
    let settings = &body["settings"];
    assert_eq!(settings["general.site_name"], "Greentek");
    assert_eq!(settings["hero.slides"], r#"["a.jpg","b.jpg"]"#);
    assert_eq!(settings["hero.interval"], "5");
    // Null leaves are dropped rather than sent as blanks.
    assert!(settings.get("general.fax").is_none());
}

#[tokio::test]
async fn test_logout_clears_persisted_session() {
    let dir = tempdir().expect("temp dir");
    let token_path = dir.path().join("tokens.json");
    let transport = ScriptedTransport::new(Box::new(|_request| {
        Box::pin(async { Ok(json(200, serde_json::json!({}))) })
    }));
    let storage = Arc::new(FileTokenStorage::new(&token_path));
    storage.set_access_token(&token(NOW + 3_600)).await;
    storage.set_refresh_token("r1").await;
    let client = client_with(transport, Arc::clone(&storage));

    client.logout().await;

    let reopened = FileTokenStorage::new(&token_path);
    assert!(reopened.access_token().await.is_none());
    assert!(reopened.refresh_token().await.is_none());
}

#[tokio::test]
async fn test_public_contact_submission_needs_no_session() {
    let dir = tempdir().expect("temp dir");
    let transport = ScriptedTransport::new(Box::new(|request| {
        // No Authorization header and no refresh traffic expected.
        assert!(request
            .headers
            .iter()
            .all(|(name, _)| name != "Authorization"));
        assert_eq!(request.url.path(), "/api/contacts/");
        Box::pin(async {
            Ok(json(
                201,
                serde_json::json!({
                    "id": "c9",
                    "name": "Lan",
                    "email": "lan@example.com",
                    "message": "Price list please"
                }),
            ))
        })
    }));
    // Empty storage: nothing to authenticate with.
    let storage = Arc::new(FileTokenStorage::new(dir.path().join("tokens.json")));
    let client = client_with(transport, storage);

    let message = greentek_domain::ContactMessage {
        name: "Lan".to_string(),
        email: "lan@example.com".to_string(),
        phone: None,
        subject: None,
        message: "Price list please".to_string(),
    };
    let created = client.contacts().create(&message).await.expect("create");
    assert_eq!(created.id, "c9");
}

#[tokio::test]
async fn test_raw_api_call_surface() {
    let dir = tempdir().expect("temp dir");
    let transport = ScriptedTransport::new(Box::new(|request| {
        assert_eq!(request.url.query(), Some("status=active"));
        Box::pin(async { Ok(json(200, serde_json::json!({ "count": 0, "results": [] }))) })
    }));
    let storage = Arc::new(FileTokenStorage::new(dir.path().join("tokens.json")));
    storage.set_access_token(&token(NOW + 3_600)).await;
    storage.set_refresh_token("r1").await;
    let client = client_with(transport, storage);

    // Escape hatch for endpoints without a typed wrapper.
    let value: serde_json::Value = client
        .request(ApiCall::get("/products/").query("status", "active"))
        .await
        .expect("raw call");
    assert_eq!(value["count"], 0);
}
