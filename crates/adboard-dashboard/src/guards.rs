//! Route access checks.
//!
//! Guards only read the credential store; they never call the backend. A
//! stale token therefore passes the guard and is caught by the client's
//! session-expiry handling on the first request.

use adboard_client::{Session, StoreError};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Where non-admins land when they open an admin page.
const PROFILE_PATH: &str = "/profile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// Any signed-in user.
    Authenticated,
    /// Signed-in users with the admin flag.
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Send the user to `to`; `from` is the location originally requested,
    /// kept so sign-in can return there.
    Redirect { to: String, from: String },
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

impl RouteGuard {
    /// Decides whether `requested` may be shown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the credential store cannot be read.
    pub fn check(
        self,
        session: &Session,
        sign_in_path: &str,
        requested: &str,
    ) -> Result<GuardDecision, StoreError> {
        let redirect = |to: String| GuardDecision::Redirect {
            to,
            from: requested.to_string(),
        };

        if session.access_token()?.is_none() {
            tracing::debug!(requested, "no credential; redirecting to sign-in");
            return Ok(redirect(sign_in_path.to_string()));
        }

        match self {
            RouteGuard::Authenticated => Ok(GuardDecision::Allow),
            RouteGuard::Admin if session.is_admin()? => Ok(GuardDecision::Allow),
            RouteGuard::Admin => {
                let to = match session.user_id()? {
                    Some(user_id) => format!(
                        "{PROFILE_PATH}?user_id={}",
                        utf8_percent_encode(&user_id, NON_ALPHANUMERIC)
                    ),
                    None => "/".to_string(),
                };
                tracing::debug!(requested, %to, "admin route denied");
                Ok(redirect(to))
            }
        }
    }
}
