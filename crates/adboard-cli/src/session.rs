//! Credential handling: sign-in, sign-out, and route guard checks.

use std::sync::Arc;
use std::time::Duration;

use adboard_client::{ApiClient, CredentialStore, FileStore, Session, TracingNavigator};
use adboard_core::{AppConfig, LocalConfig};
use adboard_dashboard::{GuardDecision, RouteGuard};

/// The persisted session, without any backend access.
pub(crate) fn open_session(local: &LocalConfig) -> Session {
    Session::new(Arc::new(FileStore::new(&local.storage_path)))
}

/// Everything a backend command needs: config, the persisted session, and a
/// client sharing that session's store.
pub(crate) struct Context {
    pub config: AppConfig,
    pub session: Session,
    pub client: ApiClient,
}

impl Context {
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built from `config`.
    pub(crate) fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn CredentialStore> = Arc::new(FileStore::new(&config.storage_path));
        let client = ApiClient::from_config(&config, Arc::clone(&store), Arc::new(TracingNavigator))?;
        Ok(Self {
            session: Session::new(store),
            client,
            config,
        })
    }

    /// The signed-in user's id.
    ///
    /// # Errors
    ///
    /// Returns an error if no session is stored or the store is unreadable.
    pub(crate) fn require_user(&self) -> anyhow::Result<String> {
        if self.session.access_token()?.is_none() {
            anyhow::bail!("not signed in; run `adboard login` first");
        }
        self.session
            .user_id()?
            .ok_or_else(|| anyhow::anyhow!("stored session has no user id; run `adboard login` again"))
    }

    pub(crate) fn resync_window(&self) -> Duration {
        Duration::from_millis(self.config.resync_grace_ms)
    }
}

/// Persist a credential issued by the backend.
///
/// # Errors
///
/// Returns an error if the session file cannot be written.
pub(crate) fn run_login(
    local: &LocalConfig,
    token: &str,
    user_id: &str,
    admin: bool,
) -> anyhow::Result<()> {
    if token.trim().is_empty() {
        anyhow::bail!("token must not be empty");
    }
    open_session(local).sign_in(token.trim(), user_id, admin)?;
    tracing::info!(user_id, admin, path = %local.storage_path.display(), "session stored");
    println!("signed in as {user_id}{}", if admin { " (admin)" } else { "" });
    Ok(())
}

/// # Errors
///
/// Returns an error if the session file cannot be written.
pub(crate) fn run_logout(local: &LocalConfig) -> anyhow::Result<()> {
    open_session(local).sign_out()?;
    println!("signed out");
    Ok(())
}

/// Print the guard decision for `path`.
///
/// # Errors
///
/// Returns an error if the session file cannot be read.
pub(crate) fn run_guard(local: &LocalConfig, guard: RouteGuard, path: &str) -> anyhow::Result<()> {
    match guard.check(&open_session(local), &local.sign_in_path, path)? {
        GuardDecision::Allow => println!("allow {path}"),
        GuardDecision::Redirect { to, from } => println!("redirect {from} -> {to}"),
    }
    Ok(())
}
