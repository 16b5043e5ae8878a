use adboard_core::{MetaAd, MetaAdSet, MetaCampaign};

use super::{AckBody, EntityLevel, InsightBody, InsightMap, InsightPeriod, ListBody, SyncAck};
use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// `GET /meta/campaigns/{user}/{account}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn meta_campaigns(
        &self,
        user_id: &str,
        ad_account_id: &str,
    ) -> Result<Vec<MetaCampaign>, ClientError> {
        let body: ListBody<MetaCampaign> = self
            .get_json(&["meta", "campaigns", user_id, ad_account_id], &[])
            .await?;
        Ok(body.into_vec())
    }

    /// `GET /meta/adsets/{user}/{account}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn meta_adsets(
        &self,
        user_id: &str,
        ad_account_id: &str,
    ) -> Result<Vec<MetaAdSet>, ClientError> {
        let body: ListBody<MetaAdSet> = self
            .get_json(&["meta", "adsets", user_id, ad_account_id], &[])
            .await?;
        Ok(body.into_vec())
    }

    /// `GET /meta/ads/{user}/{account}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn meta_ads(
        &self,
        user_id: &str,
        ad_account_id: &str,
    ) -> Result<Vec<MetaAd>, ClientError> {
        let body: ListBody<MetaAd> = self
            .get_json(&["meta", "ads", user_id, ad_account_id], &[])
            .await?;
        Ok(body.into_vec())
    }

    /// Aggregated insights for every entity of one level.
    ///
    /// `GET /aggregate/meta/insights/{level}?ad_account_id=..&date_preset=..`,
    /// or with `start_date`/`end_date` for an explicit window.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn meta_insights(
        &self,
        level: EntityLevel,
        ad_account_id: &str,
        period: InsightPeriod,
    ) -> Result<InsightMap, ClientError> {
        let start;
        let end;
        let mut query = vec![("ad_account_id", ad_account_id)];
        match period {
            InsightPeriod::Preset(preset) => query.push(("date_preset", preset.meta_preset())),
            InsightPeriod::Window(window) => {
                start = window.start.to_string();
                end = window.end.to_string();
                query.push(("start_date", start.as_str()));
                query.push(("end_date", end.as_str()));
            }
        }

        let body: InsightBody = self
            .get_json(&["aggregate", "meta", "insights", level.as_str()], &query)
            .await?;
        Ok(body.into_map())
    }

    /// Asks the backend to pull recent Meta data for the account.
    ///
    /// Returns once the backend has accepted the job, not when it finishes.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn meta_sync_recent(
        &self,
        user_id: &str,
        ad_account_id: &str,
    ) -> Result<SyncAck, ClientError> {
        let body: AckBody = self
            .post_empty(&["meta", "sync", "recent", user_id, ad_account_id])
            .await?;
        Ok(body.into_ack())
    }
}
