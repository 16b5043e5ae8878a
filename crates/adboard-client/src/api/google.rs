use adboard_core::{DateWindow, GoogleAd, GoogleAdGroup, GoogleCampaign, Platform};

use super::{AckBody, EntityLevel, InsightMap, ListBody, SyncAck};
use crate::client::ApiClient;
use crate::error::ClientError;

/// `group_by` dimension the aggregation endpoint uses for each level.
fn group_by(level: EntityLevel) -> &'static str {
    match level {
        EntityLevel::Campaign => "campaign",
        EntityLevel::AdSet => "ad_group",
        EntityLevel::Ad => "ad",
    }
}

impl ApiClient {
    /// `GET /google/campaigns/{user}/{customer}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn google_campaigns(
        &self,
        user_id: &str,
        customer_id: &str,
    ) -> Result<Vec<GoogleCampaign>, ClientError> {
        let body: ListBody<GoogleCampaign> = self
            .get_json(&["google", "campaigns", user_id, customer_id], &[])
            .await?;
        Ok(body.into_vec())
    }

    /// `GET /google/ad-groups/{user}/{customer}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn google_ad_groups(
        &self,
        user_id: &str,
        customer_id: &str,
    ) -> Result<Vec<GoogleAdGroup>, ClientError> {
        let body: ListBody<GoogleAdGroup> = self
            .get_json(&["google", "ad-groups", user_id, customer_id], &[])
            .await?;
        Ok(body.into_vec())
    }

    /// `GET /google/ads/{user}/{customer}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn google_ads(
        &self,
        user_id: &str,
        customer_id: &str,
    ) -> Result<Vec<GoogleAd>, ClientError> {
        let body: ListBody<GoogleAd> = self
            .get_json(&["google", "ads", user_id, customer_id], &[])
            .await?;
        Ok(body.into_vec())
    }

    /// Insights per entity via `POST /aggregate/google` grouped by level.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn google_insights(
        &self,
        level: EntityLevel,
        customer_id: &str,
        window: DateWindow,
    ) -> Result<InsightMap, ClientError> {
        self.aggregate_grouped(Platform::Google, customer_id, window, group_by(level))
            .await
    }

    /// Asks the backend to backfill daily Google Ads insights for the user.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn google_backfill(&self, user_id: &str) -> Result<SyncAck, ClientError> {
        let body: AckBody = self
            .post_empty(&["google", "daily-insights", "backfill", user_id])
            .await?;
        Ok(body.into_ack())
    }
}
