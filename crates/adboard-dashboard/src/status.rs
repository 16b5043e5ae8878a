use adboard_client::{ApiClient, ClientError};
use adboard_core::PlatformStatus;
use tokio::sync::watch;

use crate::state::StateCell;
use crate::GENERIC_LOAD_ERROR;

/// Which platforms the current user has linked.
///
/// `loaded` flips to `true` after the first resolution attempt regardless of
/// outcome, so downstream loaders can tell "not linked" from "not known yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformStatusState {
    pub status: PlatformStatus,
    pub loaded: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// Resolves [`PlatformStatusState`] for a user.
pub struct PlatformStatusResolver {
    client: ApiClient,
    state: StateCell<PlatformStatusState>,
}

impl PlatformStatusResolver {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: StateCell::default(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> PlatformStatusState {
        self.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlatformStatusState> {
        self.state.subscribe()
    }

    /// Fetches the user's platform status.
    ///
    /// Without a user id nothing is requested and the state becomes the
    /// all-disconnected default, marked loaded. On a non-auth failure the
    /// error is recorded and the previous status is kept; a 401 is left to
    /// the client's session-expiry handling.
    pub async fn resolve(&self, user_id: Option<&str>) -> PlatformStatusState {
        let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
            self.state.update(|s| {
                *s = PlatformStatusState {
                    loaded: true,
                    ..PlatformStatusState::default()
                };
            });
            return self.snapshot();
        };

        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = self.client.platform_status(user_id).await;

        self.state.update(|s| {
            s.loading = false;
            s.loaded = true;
            match result {
                Ok(status) => s.status = status,
                Err(ClientError::Unauthorized) => {}
                Err(err) => {
                    tracing::warn!(user_id, error = %err, "platform status lookup failed");
                    s.error = Some(err.user_message(GENERIC_LOAD_ERROR));
                }
            }
        });
        self.snapshot()
    }
}
