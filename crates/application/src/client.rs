//! Authenticated request executor.
//!
//! One logical API call = proactive token check, bearer header,
//! network round trip, and at most one 401-driven refresh-and-retry.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use greentek_domain::auth::is_expired_at;
use greentek_domain::TokenPair;

use crate::auth::{RefreshCoordinator, SessionNotifier};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::ports::{
    Clock, HttpMethod, HttpRequest, HttpTransport, RawResponse, RequestBody, TokenStorage,
};

/// One logical API call, before URL resolution.
#[derive(Debug, Clone)]
pub struct ApiCall {
    method: HttpMethod,
    endpoint: String,
    query: Vec<(String, String)>,
    body: RequestBody,
    require_auth: bool,
}

impl ApiCall {
    fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            require_auth: true,
        }
    }

    /// A GET call. The endpoint is a path joined onto the base URL,
    /// or a full `http(s)://` URL passed through untouched.
    #[must_use]
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// A POST call.
    #[must_use]
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    /// A PUT call.
    #[must_use]
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, endpoint)
    }

    /// A DELETE call.
    #[must_use]
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Marks the call as public: no bearer header, and a 401 is
    /// surfaced as a plain status error without touching the refresh
    /// machinery.
    #[must_use]
    pub const fn public(mut self) -> Self {
        self.require_auth = false;
        self
    }
}

/// Typed client for the Greentek backend.
///
/// Owns the token refresh coordinator and the session-expiry
/// notifier; all I/O goes through the injected ports, so the whole
/// retry protocol can be exercised against scripted transports.
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
    storage: Arc<dyn TokenStorage>,
    clock: Arc<dyn Clock>,
    refresher: RefreshCoordinator,
    session: SessionNotifier,
}

impl ApiClient {
    /// Creates a client from its configuration and ports.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid
    /// absolute URL.
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn TokenStorage>,
        clock: Arc<dyn Clock>,
    ) -> ApiResult<Self> {
        let refresh_url = format!("{}/auth/token/refresh/", config.base_url);
        let refresh_url = Url::parse(&refresh_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{e}: {refresh_url}")))?;
        let refresher = RefreshCoordinator::new(
            Arc::clone(&transport),
            Arc::clone(&storage),
            refresh_url,
            config.timeout_ms,
        );
        Ok(Self {
            config,
            transport,
            storage,
            clock,
            refresher,
            session: SessionNotifier::new(),
        })
    }

    /// Registers the one-shot session-expired handler.
    pub fn on_session_expired(&self, handler: impl Fn() + Send + Sync + 'static) {
        self.session.set_handler(Box::new(handler));
    }

    /// Whether the session-expired notification has fired.
    #[must_use]
    pub fn session_expired(&self) -> bool {
        self.session.has_fired()
    }

    /// Authenticates against `POST /token/` and stores the returned
    /// token pair.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with the server's `detail` message
    /// on rejected credentials.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenPair> {
        let call = ApiCall::post("/token/")
            .public()
            .with_json(serde_json::json!({ "username": username, "password": password }));
        let pair: TokenPair = self.request(call).await?;
        self.storage.set_access_token(&pair.access).await;
        self.storage.set_refresh_token(&pair.refresh).await;
        self.session.rearm();
        tracing::info!("login successful");
        Ok(pair)
    }

    /// Discards the stored token pair.
    pub async fn logout(&self) {
        self.storage.clear_access_token().await;
        self.storage.clear_refresh_token().await;
        tracing::info!("logged out");
    }

    /// Executes a call and decodes the JSON response body.
    ///
    /// A 2xx response without a JSON content type decodes as `null`,
    /// so unit and `Option` targets accept empty bodies.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the failure taxonomy.
    pub async fn request<T: DeserializeOwned>(&self, call: ApiCall) -> ApiResult<T> {
        let response = self.dispatch(&call).await?;
        if response.is_json() {
            serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            serde_json::from_value(serde_json::Value::Null)
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
    }

    /// Executes a call and discards the response body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the failure taxonomy.
    pub async fn request_empty(&self, call: ApiCall) -> ApiResult<()> {
        self.dispatch(&call).await.map(|_| ())
    }

    /// Uploads a file to `POST /upload/` as multipart form data.
    ///
    /// The stored access token is attached as-is when present; the
    /// upload deliberately bypasses the refresh-and-retry machinery
    /// since a consumed multipart body cannot be replayed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-2xx response.
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        kind: &str,
    ) -> ApiResult<serde_json::Value> {
        let url = self.resolve_url(&ApiCall::post("/upload/"))?;
        let mut headers = Vec::new();
        if let Some(token) = self.storage.access_token().await {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        tracing::debug!(file_name, size = bytes.len(), "uploading file");
        let request = HttpRequest {
            method: HttpMethod::Post,
            url,
            headers,
            body: RequestBody::Multipart {
                field: "file".to_string(),
                file_name: file_name.to_string(),
                bytes,
                extra: vec![("type".to_string(), kind.to_string())],
            },
            timeout_ms: self.config.timeout_ms,
        };
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(status_error(&response));
        }
        if response.is_json() {
            serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            Ok(serde_json::Value::Null)
        }
    }

    /// Sends the call, refreshing the token at most once on 401.
    async fn dispatch(&self, call: &ApiCall) -> ApiResult<RawResponse> {
        let url = self.resolve_url(call)?;
        let mut retry_count: u8 = 0;
        loop {
            let mut headers = Vec::new();
            if call.require_auth {
                if let Some(token) = self.usable_access_token().await {
                    headers.push(("Authorization".to_string(), format!("Bearer {token}")));
                }
            }

            tracing::debug!(
                method = call.method.as_str(),
                url = %url,
                retry_count,
                "api call"
            );
            let request = HttpRequest {
                method: call.method,
                url: url.clone(),
                headers,
                body: call.body.clone(),
                timeout_ms: self.config.timeout_ms,
            };
            let response = self.transport.send(request).await?;

            if response.status == 401 && call.require_auth {
                if retry_count == 0 {
                    tracing::warn!(url = %url, "401 unauthorized - attempting token refresh");
                    if self.refresher.refresh().await.is_some() {
                        retry_count += 1;
                        continue;
                    }
                    return Err(self.session_expired_error().await);
                }
                // 401 again after a nominally successful refresh:
                // fatal, never a third attempt.
                tracing::warn!(url = %url, "still unauthorized after refresh");
                return Err(self.session_expired_error().await);
            }

            if !response.is_success() {
                return Err(status_error(&response));
            }
            return Ok(response);
        }
    }

    /// Returns an access token worth sending, refreshing proactively
    /// when the stored one is expired under the configured skew.
    ///
    /// Returns `None` when no usable token can be produced; the call
    /// then proceeds unauthenticated and the server's verdict governs.
    async fn usable_access_token(&self) -> Option<String> {
        let token = self.storage.access_token().await?;
        if is_expired_at(&token, self.clock.now(), self.config.expiry_skew_secs) {
            tracing::warn!("access token expired - refreshing before request");
            return self.refresher.refresh().await;
        }
        Some(token)
    }

    /// Clears credentials, fires the one-shot notification, and
    /// builds the terminal error.
    async fn session_expired_error(&self) -> ApiError {
        self.storage.clear_access_token().await;
        self.storage.clear_refresh_token().await;
        self.session.fire();
        ApiError::SessionExpired
    }

    fn resolve_url(&self, call: &ApiCall) -> ApiResult<Url> {
        let raw = if call.endpoint.starts_with("http://") || call.endpoint.starts_with("https://")
        {
            call.endpoint.clone()
        } else {
            format!("{}{}", self.config.base_url, call.endpoint)
        };
        let mut url =
            Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{e}: {raw}")))?;
        if !call.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(call.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

/// Builds the structured error for a non-2xx response, preferring the
/// server's `detail` message over the raw body.
fn status_error(response: &RawResponse) -> ApiError {
    let text = response.text();
    let detail = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from));
    let message = detail.unwrap_or_else(|| {
        if text.is_empty() {
            format!("HTTP {}", response.status)
        } else {
            text
        }
    });
    tracing::warn!(status = response.status, "api error: {message}");
    ApiError::Status {
        status: response.status,
        message,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStorage;
    use crate::ports::TransportError;
    use async_trait::async_trait;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::{DateTime, Utc};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    type ResponseFuture = Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + Send>>;
    type Handler = Box<dyn Fn(HttpRequest) -> ResponseFuture + Send + Sync>;

    /// One request as seen by the transport, for assertions.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct SentRequest {
        method: &'static str,
        path: String,
        bearer: Option<String>,
    }

    /// Transport driven by a per-test handler closure; records every
    /// request in arrival order.
    struct RoutedTransport {
        handler: Handler,
        log: Mutex<Vec<SentRequest>>,
    }

    impl RoutedTransport {
        fn new(handler: Handler) -> Arc<Self> {
            Arc::new(Self {
                handler,
                log: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<SentRequest> {
            self.log.lock().unwrap().clone()
        }

        fn count_path(&self, path: &str) -> usize {
            self.sent().iter().filter(|r| r.path == path).count()
        }
    }

    #[async_trait]
    impl HttpTransport for RoutedTransport {
        async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
            let bearer = request
                .headers
                .iter()
                .find(|(name, _)| name == "Authorization")
                .map(|(_, value)| value.clone());
            self.log.lock().unwrap().push(SentRequest {
                method: request.method.as_str(),
                path: request.url.path().to_string(),
                bearer,
            });
            (self.handler)(request).await
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    const NOW: i64 = 1_700_000_000;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(NOW, 0).unwrap()
    }

    /// Builds an unsigned token with the given expiry.
    fn token(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body =
            URL_SAFE_NO_PAD.encode(serde_json::json!({ "exp": exp }).to_string().as_bytes());
        format!("{header}.{body}.sig")
    }

    fn fresh_token() -> String {
        token(NOW + 3_600)
    }

    fn json(status: u16, body: serde_json::Value) -> RawResponse {
        RawResponse {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string().into_bytes(),
        }
    }

    fn ready(response: RawResponse) -> ResponseFuture {
        Box::pin(async move { Ok(response) })
    }

    fn client(
        transport: Arc<RoutedTransport>,
        storage: Arc<MemoryTokenStorage>,
    ) -> ApiClient {
        ApiClient::new(
            ClientConfig::new("http://localhost:8000/api"),
            transport,
            storage,
            Arc::new(FixedClock(now())),
        )
        .unwrap()
    }

    fn bearer_of(request: &HttpRequest) -> Option<String> {
        request
            .headers
            .iter()
            .find(|(name, _)| name == "Authorization")
            .map(|(_, value)| value.clone())
    }

    #[tokio::test]
    async fn test_success_attaches_bearer_and_decodes_json() {
        let access = fresh_token();
        let expected = format!("Bearer {access}");
        let transport = RoutedTransport::new(Box::new(|_request| {
            ready(json(200, serde_json::json!([{ "id": "p1" }])))
        }));
        let storage = Arc::new(MemoryTokenStorage::with_tokens(&access, "r1"));
        let client = client(Arc::clone(&transport), storage);

        let rows: Vec<serde_json::Value> =
            client.request(ApiCall::get("/products/")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(transport.sent()[0].bearer.as_deref(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_public_call_skips_auth_and_refresh() {
        let transport = RoutedTransport::new(Box::new(|_request| {
            ready(json(200, serde_json::json!({ "general": {} })))
        }));
        // Stored tokens are stale garbage; a public call must not care.
        let storage = Arc::new(MemoryTokenStorage::with_tokens("garbage", "garbage"));
        let client = client(Arc::clone(&transport), storage);

        let _: serde_json::Value = client
            .request(ApiCall::get("/settings/public/").public())
            .await
            .unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].bearer.is_none());
        assert_eq!(transport.count_path("/api/auth/token/refresh/"), 0);
    }

    #[tokio::test]
    async fn test_401_refreshes_and_retries_once() {
        let old = fresh_token();
        let renewed = token(NOW + 7_200);
        let renewed_clone = renewed.clone();
        let old_bearer = format!("Bearer {old}");
        let transport = RoutedTransport::new(Box::new(move |request| {
            let renewed = renewed_clone.clone();
            let is_refresh = request.url.path().ends_with("/auth/token/refresh/");
            let sent_old = bearer_of(&request).as_deref() == Some(old_bearer.as_str());
            Box::pin(async move {
                if is_refresh {
                    Ok(json(200, serde_json::json!({ "access": renewed })))
                } else if sent_old {
                    Ok(json(401, serde_json::json!({ "detail": "expired" })))
                } else {
                    Ok(json(200, serde_json::json!({ "id": "p1" })))
                }
            })
        }));
        let storage = Arc::new(MemoryTokenStorage::with_tokens(&old, "r1"));
        let client = client(Arc::clone(&transport), Arc::clone(&storage));

        let row: serde_json::Value = client
            .request(ApiCall::get("/products/p1/"))
            .await
            .unwrap();
        assert_eq!(row["id"], "p1");

        assert_eq!(transport.count_path("/api/auth/token/refresh/"), 1);
        assert_eq!(transport.count_path("/api/products/p1/"), 2);
        // Retry carries the refreshed token.
        let retried = transport.sent().into_iter().last().unwrap();
        assert_eq!(retried.bearer, Some(format!("Bearer {renewed}")));
        assert_eq!(storage.access_token().await, Some(renewed));
    }

    #[tokio::test]
    async fn test_persistent_401_is_session_expired_after_one_retry() {
        let renewed = token(NOW + 7_200);
        let transport = RoutedTransport::new(Box::new(move |request| {
            let renewed = renewed.clone();
            let is_refresh = request.url.path().ends_with("/auth/token/refresh/");
            Box::pin(async move {
                if is_refresh {
                    Ok(json(200, serde_json::json!({ "access": renewed })))
                } else {
                    Ok(json(401, serde_json::json!({ "detail": "nope" })))
                }
            })
        }));
        let storage = Arc::new(MemoryTokenStorage::with_tokens(&fresh_token(), "r1"));
        let client = client(Arc::clone(&transport), Arc::clone(&storage));

        let result: ApiResult<serde_json::Value> =
            client.request(ApiCall::get("/contacts/")).await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));

        // Original attempt + exactly one retry, never a third.
        assert_eq!(transport.count_path("/api/contacts/"), 2);
        assert_eq!(transport.count_path("/api/auth/token/refresh/"), 1);
        assert!(storage.access_token().await.is_none());
        assert!(storage.refresh_token().await.is_none());
        assert!(client.session_expired());
    }

    #[tokio::test]
    async fn test_rejected_refresh_clears_tokens_and_fires_once() {
        let transport = RoutedTransport::new(Box::new(|request| {
            let is_refresh = request.url.path().ends_with("/auth/token/refresh/");
            Box::pin(async move {
                if is_refresh {
                    Ok(json(401, serde_json::json!({ "detail": "revoked" })))
                } else {
                    Ok(json(401, serde_json::json!({ "detail": "expired" })))
                }
            })
        }));
        let storage = Arc::new(MemoryTokenStorage::with_tokens(&fresh_token(), "r1"));
        let client = client(Arc::clone(&transport), Arc::clone(&storage));
        let fired = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&fired);
        client.on_session_expired(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let first: ApiResult<serde_json::Value> =
            client.request(ApiCall::get("/articles/")).await;
        assert!(matches!(first, Err(ApiError::SessionExpired)));
        assert!(storage.access_token().await.is_none());
        assert!(storage.refresh_token().await.is_none());

        // A second failing call must not re-fire the notification.
        let second: ApiResult<serde_json::Value> =
            client.request(ApiCall::get("/articles/")).await;
        assert!(matches!(second, Err(ApiError::SessionExpired)));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_refresh_token_never_contacts_refresh_endpoint() {
        let transport = RoutedTransport::new(Box::new(|_request| {
            ready(json(401, serde_json::json!({ "detail": "expired" })))
        }));
        let storage = Arc::new(MemoryTokenStorage::new());
        storage.set_access_token(&fresh_token()).await;
        let client = client(Arc::clone(&transport), storage);

        let result: ApiResult<serde_json::Value> =
            client.request(ApiCall::get("/products/")).await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert_eq!(transport.count_path("/api/auth/token/refresh/"), 0);
    }

    #[tokio::test]
    async fn test_proactive_refresh_precedes_request() {
        // Expires in 30s: inside the 60s skew window.
        let stale = token(NOW + 30);
        let renewed = token(NOW + 7_200);
        let renewed_clone = renewed.clone();
        let transport = RoutedTransport::new(Box::new(move |request| {
            let renewed = renewed_clone.clone();
            let is_refresh = request.url.path().ends_with("/auth/token/refresh/");
            Box::pin(async move {
                if is_refresh {
                    Ok(json(200, serde_json::json!({ "access": renewed })))
                } else {
                    Ok(json(200, serde_json::json!([])))
                }
            })
        }));
        let storage = Arc::new(MemoryTokenStorage::with_tokens(&stale, "r1"));
        let client = client(Arc::clone(&transport), storage);

        let _: Vec<serde_json::Value> =
            client.request(ApiCall::get("/products/")).await.unwrap();

        let sent = transport.sent();
        // The refresh happens before the resource call, which then
        // goes out exactly once, already carrying the new token.
        assert_eq!(sent[0].path, "/api/auth/token/refresh/");
        assert_eq!(sent[1].path, "/api/products/");
        assert_eq!(sent[1].bearer, Some(format!("Bearer {renewed}")));
        assert_eq!(sent.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_401s_share_a_single_refresh() {
        let old = fresh_token();
        let renewed = token(NOW + 7_200);
        let refresh_calls = Arc::new(AtomicUsize::new(0));
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());

        let renewed_clone = renewed.clone();
        let old_bearer = format!("Bearer {old}");
        let counter = Arc::clone(&refresh_calls);
        let entered_tx = Arc::clone(&entered);
        let release_rx = Arc::clone(&release);
        let transport = RoutedTransport::new(Box::new(move |request| {
            let renewed = renewed_clone.clone();
            let is_refresh = request.url.path().ends_with("/auth/token/refresh/");
            let sent_old = bearer_of(&request).as_deref() == Some(old_bearer.as_str());
            let counter = Arc::clone(&counter);
            let entered_tx = Arc::clone(&entered_tx);
            let release_rx = Arc::clone(&release_rx);
            Box::pin(async move {
                if is_refresh {
                    counter.fetch_add(1, Ordering::SeqCst);
                    entered_tx.notify_one();
                    release_rx.notified().await;
                    Ok(json(200, serde_json::json!({ "access": renewed })))
                } else if sent_old {
                    Ok(json(401, serde_json::json!({ "detail": "expired" })))
                } else {
                    Ok(json(200, serde_json::json!({ "ok": true })))
                }
            })
        }));
        let storage = Arc::new(MemoryTokenStorage::with_tokens(&old, "r1"));
        let client = Arc::new(client(Arc::clone(&transport), storage));

        // First caller hits 401 and becomes the refresh leader.
        let first = {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .request::<serde_json::Value>(ApiCall::get("/products/"))
                    .await
            })
        };
        entered.notified().await;

        // Two more callers hit 401 while the refresh is outstanding.
        let second = {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .request::<serde_json::Value>(ApiCall::get("/articles/"))
                    .await
            })
        };
        let third = {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .request::<serde_json::Value>(ApiCall::get("/contacts/"))
                    .await
            })
        };
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        release.notify_one();

        assert!(first.await.unwrap().is_ok());
        assert!(second.await.unwrap().is_ok());
        assert!(third.await.unwrap().is_ok());
        assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);

        // Every retry went out with the shared refreshed token.
        let expected = format!("Bearer {renewed}");
        let retries: Vec<_> = transport
            .sent()
            .into_iter()
            .filter(|r| r.bearer.as_deref() == Some(expected.as_str()))
            .collect();
        assert_eq!(retries.len(), 3);
    }

    #[tokio::test]
    async fn test_non_2xx_error_carries_detail_message() {
        let transport = RoutedTransport::new(Box::new(|_request| {
            ready(json(400, serde_json::json!({ "detail": "Name is required" })))
        }));
        let storage = Arc::new(MemoryTokenStorage::with_tokens(&fresh_token(), "r1"));
        let client = client(transport, storage);

        let result: ApiResult<serde_json::Value> =
            client.request(ApiCall::post("/products/")).await;
        match result {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Name is required");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_passed_through() {
        let transport = RoutedTransport::new(Box::new(|_request| {
            ready(RawResponse {
                status: 502,
                content_type: Some("text/plain".to_string()),
                body: b"bad gateway".to_vec(),
            })
        }));
        let storage = Arc::new(MemoryTokenStorage::with_tokens(&fresh_token(), "r1"));
        let client = client(transport, storage);

        let result: ApiResult<serde_json::Value> =
            client.request(ApiCall::get("/stats/")).await;
        match result {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_success_body_decodes_as_unit() {
        let transport = RoutedTransport::new(Box::new(|_request| {
            ready(RawResponse {
                status: 204,
                content_type: None,
                body: Vec::new(),
            })
        }));
        let storage = Arc::new(MemoryTokenStorage::with_tokens(&fresh_token(), "r1"));
        let client = client(transport, storage);

        client
            .request_empty(ApiCall::delete("/products/p1/"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_absolute_endpoint_bypasses_base_url() {
        let transport = RoutedTransport::new(Box::new(|request| {
            assert_eq!(request.url.as_str(), "https://cdn.example.com/health");
            ready(json(200, serde_json::json!({ "ok": true })))
        }));
        let storage = Arc::new(MemoryTokenStorage::new());
        let client = client(transport, storage);

        let _: serde_json::Value = client
            .request(ApiCall::get("https://cdn.example.com/health").public())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_query_parameters_are_appended() {
        let transport = RoutedTransport::new(Box::new(|request| {
            assert_eq!(request.url.query(), Some("status=active"));
            ready(json(200, serde_json::json!([])))
        }));
        let storage = Arc::new(MemoryTokenStorage::with_tokens(&fresh_token(), "r1"));
        let client = client(transport, storage);

        let _: Vec<serde_json::Value> = client
            .request(ApiCall::get("/products/").query("status", "active"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_login_stores_pair_and_rearms_session_notifier() {
        let transport = RoutedTransport::new(Box::new(|request| {
            let is_login = request.url.path().ends_with("/token/");
            Box::pin(async move {
                if is_login {
                    Ok(json(
                        200,
                        serde_json::json!({ "access": "a1", "refresh": "r1" }),
                    ))
                } else {
                    Ok(json(200, serde_json::json!({})))
                }
            })
        }));
        let storage = Arc::new(MemoryTokenStorage::new());
        let client = client(Arc::clone(&transport), Arc::clone(&storage));
        client.session.fire();
        assert!(client.session_expired());

        let pair = client.login("admin", "secret").await.unwrap();
        assert_eq!(pair.access, "a1");
        assert_eq!(storage.access_token().await.as_deref(), Some("a1"));
        assert_eq!(storage.refresh_token().await.as_deref(), Some("r1"));
        assert!(!client.session_expired());
        // Login itself goes out without a bearer header.
        assert!(transport.sent()[0].bearer.is_none());
    }

    #[tokio::test]
    async fn test_rejected_login_surfaces_detail() {
        let transport = RoutedTransport::new(Box::new(|_request| {
            ready(json(
                401,
                serde_json::json!({ "detail": "No active account found" }),
            ))
        }));
        let storage = Arc::new(MemoryTokenStorage::new());
        let client = client(transport, Arc::clone(&storage));

        let result = client.login("admin", "wrong").await;
        match result {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "No active account found");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(storage.access_token().await.is_none());
    }

    #[tokio::test]
    async fn test_transport_error_propagates_and_keeps_tokens() {
        let transport = RoutedTransport::new(Box::new(|_request| {
            Box::pin(async { Err(TransportError::Timeout { timeout_ms: 30_000 }) })
        }));
        let storage = Arc::new(MemoryTokenStorage::with_tokens(&fresh_token(), "r1"));
        let client = client(transport, Arc::clone(&storage));

        let result: ApiResult<serde_json::Value> =
            client.request(ApiCall::get("/products/")).await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
        // A pure network failure outside the refresh path does not
        // invalidate stored credentials.
        assert!(storage.access_token().await.is_some());
        assert!(storage.refresh_token().await.is_some());
    }
}
