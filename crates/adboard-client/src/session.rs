//! Session-expiry handling for the API client.
//!
//! A 401 from any endpoint means the stored credential is dead. The first
//! 401 observed clears it, shows a notice, and schedules a redirect to the
//! sign-in route; every later 401 in the same session is a no-op. The
//! single-shot state lives in [`SessionExpiry`], owned by the client and
//! shared by its clones.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::storage::{CredentialStore, ACCESS_TOKEN_KEY};

pub const EXPIRED_NOTICE: &str = "Your session has expired. Please sign in again.";

/// Where user-facing side effects of the client land.
///
/// A browser shell would show a toast and change `location`; the CLI logs.
pub trait Navigator: Send + Sync {
    fn notify(&self, message: &str);
    fn redirect(&self, location: &str);
}

/// [`Navigator`] that reports through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn notify(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn redirect(&self, location: &str) {
        tracing::info!(location, "redirecting to sign-in");
    }
}

/// Single-shot expiry state.
pub struct SessionExpiry {
    tripped: AtomicBool,
    navigator: Arc<dyn Navigator>,
    sign_in_path: String,
    redirect_delay: Duration,
    redirect: Mutex<Option<JoinHandle<()>>>,
}

impl SessionExpiry {
    #[must_use]
    pub fn new(
        navigator: Arc<dyn Navigator>,
        sign_in_path: impl Into<String>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            tripped: AtomicBool::new(false),
            navigator,
            sign_in_path: sign_in_path.into(),
            redirect_delay,
            redirect: Mutex::new(None),
        }
    }

    /// `true` once a 401 has been observed in this session.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn sign_in_path(&self) -> &str {
        &self.sign_in_path
    }

    /// Handles a 401. Returns `true` only for the call that performed the
    /// expiry.
    ///
    /// Only the credential is removed; the user id stays so the sign-in page
    /// can offer to continue as the same user. The redirect runs on a spawned
    /// task, so this must be called from within a Tokio runtime; callers that
    /// exit soon afterwards should [`settle`](Self::settle) first.
    pub(crate) fn observe_unauthorized(&self, store: &dyn CredentialStore) -> bool {
        if self
            .tripped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("401 after session already expired; ignoring");
            return false;
        }

        tracing::warn!("credential rejected by backend; expiring session");
        if let Err(e) = store.remove(ACCESS_TOKEN_KEY) {
            tracing::error!(error = %e, "failed to clear expired credential");
        }
        self.navigator.notify(EXPIRED_NOTICE);

        let navigator = Arc::clone(&self.navigator);
        let location = self.sign_in_path.clone();
        let delay = self.redirect_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.redirect(&location);
        });
        *self.redirect.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        true
    }

    /// Waits for the scheduled sign-in redirect, if one is pending.
    ///
    /// The redirect task is detached; a process that returns from `main`
    /// before the delay elapses drops it.
    pub async fn settle(&self) {
        let pending = self
            .redirect
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "sign-in redirect task did not finish");
            }
        }
    }
}

impl std::fmt::Debug for SessionExpiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionExpiry")
            .field("tripped", &self.is_expired())
            .field("sign_in_path", &self.sign_in_path)
            .field("redirect_delay", &self.redirect_delay)
            .finish_non_exhaustive()
    }
}
