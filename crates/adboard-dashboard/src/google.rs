use std::future::Future;

use adboard_client::{ApiClient, ClientError, EntityLevel, InsightMap, InsightPeriod, SyncAck};
use adboard_core::{GoogleAd, GoogleAdGroup, GoogleCampaign, Platform};
use chrono::NaiveDate;

use crate::ads::{AdsDataLoader, AdsPlatform};

/// Google Ads bindings. The aggregation endpoint only takes explicit dates,
/// so presets are resolved locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Google;

pub type GoogleDataLoader = AdsDataLoader<Google>;

impl AdsPlatform for Google {
    const PLATFORM: Platform = Platform::Google;

    type Campaign = GoogleCampaign;
    type AdSet = GoogleAdGroup;
    type Ad = GoogleAd;

    fn campaigns(
        client: &ApiClient,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<Vec<GoogleCampaign>, ClientError>> + Send {
        client.google_campaigns(user_id, account_id)
    }

    fn ad_sets(
        client: &ApiClient,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<Vec<GoogleAdGroup>, ClientError>> + Send {
        client.google_ad_groups(user_id, account_id)
    }

    fn ads(
        client: &ApiClient,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<Vec<GoogleAd>, ClientError>> + Send {
        client.google_ads(user_id, account_id)
    }

    fn insights(
        client: &ApiClient,
        level: EntityLevel,
        account_id: &str,
        period: InsightPeriod,
        today: NaiveDate,
    ) -> impl Future<Output = Result<InsightMap, ClientError>> + Send {
        client.google_insights(level, account_id, period.window(today))
    }

    /// Backfill is per user; the customer id is not part of the request.
    fn resync(
        client: &ApiClient,
        user_id: &str,
        _account_id: &str,
    ) -> impl Future<Output = Result<SyncAck, ClientError>> + Send {
        client.google_backfill(user_id)
    }
}
