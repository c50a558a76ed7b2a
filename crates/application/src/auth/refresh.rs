//! Single-flight access-token refresh.

use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tokio::sync::oneshot;
use url::Url;

use crate::ports::{HttpMethod, HttpRequest, HttpTransport, RequestBody, TokenStorage};

/// Body of a successful `POST /auth/token/refresh/` response.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Coordinator state. The flag is `Refreshing` exactly while the
/// governing network call is outstanding; only an Idle -> Refreshing
/// transition may issue that call.
enum RefreshState {
    Idle,
    Refreshing(Vec<oneshot::Sender<Option<String>>>),
}

/// Outcome of asking to participate in a refresh.
enum Ticket {
    /// This caller performs the network call.
    Leader,
    /// A refresh is already in flight; resume with its outcome.
    Follower(oneshot::Receiver<Option<String>>),
}

/// Guarantees at most one in-flight refresh call system-wide.
///
/// Concurrent callers that trigger a refresh while one is underway
/// subscribe a continuation instead; all waiters are resolved in bulk
/// with the leader's outcome, in subscription order. This matters
/// because the backend invalidates a refresh token on first use -
/// naive concurrent refreshing would strand every caller but one.
///
/// Constructed once per client and injected; holds no global state.
pub struct RefreshCoordinator {
    transport: Arc<dyn HttpTransport>,
    storage: Arc<dyn TokenStorage>,
    refresh_url: Url,
    timeout_ms: u64,
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    /// Creates a coordinator targeting the given refresh endpoint.
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn TokenStorage>,
        refresh_url: Url,
        timeout_ms: u64,
    ) -> Self {
        Self {
            transport,
            storage,
            refresh_url,
            timeout_ms,
            state: Mutex::new(RefreshState::Idle),
        }
    }

    /// Obtains a fresh access token, sharing one network call among
    /// concurrent callers.
    ///
    /// Returns the new access token (already stored) on success, or
    /// `None` when the session cannot be refreshed - in which case
    /// both stored tokens have been cleared and the caller must treat
    /// the session as expired.
    pub async fn refresh(&self) -> Option<String> {
        match self.join() {
            Ticket::Leader => {
                let outcome = self.refresh_access_token().await;
                self.notify_all(outcome.clone());
                outcome
            }
            Ticket::Follower(receiver) => receiver.await.ok().flatten(),
        }
    }

    /// Takes the leader slot or subscribes a continuation.
    fn join(&self) -> Ticket {
        let mut state = self.lock_state();
        match &mut *state {
            RefreshState::Idle => {
                *state = RefreshState::Refreshing(Vec::new());
                Ticket::Leader
            }
            RefreshState::Refreshing(waiters) => {
                let (sender, receiver) = oneshot::channel();
                waiters.push(sender);
                Ticket::Follower(receiver)
            }
        }
    }

    /// Performs the single network refresh call.
    ///
    /// Any failure - missing refresh token aside - clears both stored
    /// tokens: a refused refresh almost always means the refresh token
    /// itself is invalid or revoked, so the client forces a full
    /// re-authentication instead of retrying indefinitely.
    async fn refresh_access_token(&self) -> Option<String> {
        let Some(refresh_token) = self.storage.refresh_token().await else {
            tracing::warn!("no refresh token available");
            return None;
        };

        tracing::debug!(url = %self.refresh_url, "refreshing access token");
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.refresh_url.clone(),
            headers: Vec::new(),
            body: RequestBody::Json(serde_json::json!({ "refresh": refresh_token })),
            timeout_ms: self.timeout_ms,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("token refresh failed: {err}");
                self.clear_tokens().await;
                return None;
            }
        };

        if !response.is_success() {
            tracing::warn!(status = response.status, "token refresh rejected");
            self.clear_tokens().await;
            return None;
        }

        match serde_json::from_slice::<RefreshResponse>(&response.body) {
            Ok(parsed) => {
                self.storage.set_access_token(&parsed.access).await;
                tracing::debug!("access token refreshed");
                Some(parsed.access)
            }
            Err(err) => {
                tracing::warn!("malformed refresh response: {err}");
                self.clear_tokens().await;
                None
            }
        }
    }

    /// Drains every queued continuation with the outcome and returns
    /// the coordinator to idle.
    fn notify_all(&self, outcome: Option<String>) {
        let waiters = {
            let mut state = self.lock_state();
            match std::mem::replace(&mut *state, RefreshState::Idle) {
                RefreshState::Refreshing(waiters) => waiters,
                RefreshState::Idle => Vec::new(),
            }
        };
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }

    async fn clear_tokens(&self) {
        self.storage.clear_access_token().await;
        self.storage.clear_refresh_token().await;
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RefreshState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("refresh_url", &self.refresh_url.as_str())
            .finish_non_exhaustive()
    }
}
