use adboard_core::{DailyChartPoint, DateWindow, Platform};
use serde::Serialize;

use super::{InsightBody, InsightMap, ListBody};
use crate::client::ApiClient;
use crate::error::ClientError;

pub const AGGREGATE_GROUP_BY_DATE: &str = "date";

/// Body of `POST /aggregate/{platform}`.
#[derive(Debug, Serialize)]
pub(super) struct AggregateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_account_id: Option<&'a str>,
    #[serde(flatten)]
    pub window: DateWindow,
    pub group_by: &'a str,
}

impl ApiClient {
    /// Daily aggregate series for one platform, ordered by date.
    ///
    /// `account_id` scopes the series to one ad account; Shopify aggregates
    /// are scoped by the user's linked shop and pass `None`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn aggregate_daily(
        &self,
        platform: Platform,
        account_id: Option<&str>,
        window: DateWindow,
    ) -> Result<Vec<DailyChartPoint>, ClientError> {
        let request = AggregateRequest {
            ad_account_id: account_id,
            window,
            group_by: AGGREGATE_GROUP_BY_DATE,
        };
        let body: ListBody<DailyChartPoint> = self
            .post_json(&["aggregate", platform.as_str()], &request)
            .await?;
        let mut points = body.into_vec();
        points.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(points)
    }

    /// Aggregates grouped by an entity dimension rather than by date.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub(super) async fn aggregate_grouped(
        &self,
        platform: Platform,
        account_id: &str,
        window: DateWindow,
        group_by: &str,
    ) -> Result<InsightMap, ClientError> {
        let request = AggregateRequest {
            ad_account_id: Some(account_id),
            window,
            group_by,
        };
        let body: InsightBody = self
            .post_json(&["aggregate", platform.as_str()], &request)
            .await?;
        Ok(body.into_map())
    }
}
