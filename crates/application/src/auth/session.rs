//! Session-expiry notification.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// Callback invoked when the session can no longer be refreshed.
pub type SessionExpiredHandler = Box<dyn Fn() + Send + Sync>;

/// One-shot "session invalidated" notifier.
///
/// A cascade of failing calls fires the handler at most once; the
/// embedding layer decides what navigation (if any) follows. The
/// guard is re-armed by a successful login, which starts a new
/// session.
#[derive(Default)]
pub struct SessionNotifier {
    fired: AtomicBool,
    handler: RwLock<Option<SessionExpiredHandler>>,
}

impl SessionNotifier {
    /// Creates a notifier with no handler registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler, replacing any previous one.
    pub fn set_handler(&self, handler: SessionExpiredHandler) {
        if let Ok(mut slot) = self.handler.write() {
            *slot = Some(handler);
        }
    }

    /// Fires the handler if it has not fired since the last re-arm.
    pub fn fire(&self) {
        if self.fired.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Ok(slot) = self.handler.read() {
            if let Some(handler) = slot.as_ref() {
                handler();
            }
        }
    }

    /// Re-arms the notifier for a new session.
    pub fn rearm(&self) {
        self.fired.store(false, Ordering::SeqCst);
    }

    /// Whether the notifier has fired since the last re-arm.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for SessionNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionNotifier")
            .field("fired", &self.has_fired())
            .finish_non_exhaustive()
    }
}
