use adboard_core::PlatformStatus;
use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::ClientError;

/// `GET /user/{id}/platforms` answers either with the status object itself
/// or with it nested under `platforms`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusBody {
    Wrapped { platforms: PlatformStatus },
    Bare(PlatformStatus),
}

impl ApiClient {
    /// Fetches which platforms `user_id` has linked and their selected accounts.
    ///
    /// Platforms the backend omits come back disconnected.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn platform_status(&self, user_id: &str) -> Result<PlatformStatus, ClientError> {
        let body: StatusBody = self
            .get_json(&["user", user_id, "platforms"], &[])
            .await?;
        Ok(match body {
            StatusBody::Wrapped { platforms } | StatusBody::Bare(platforms) => platforms,
        })
    }
}
