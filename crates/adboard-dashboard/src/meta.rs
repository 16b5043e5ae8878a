use std::future::Future;

use adboard_client::{ApiClient, ClientError, EntityLevel, InsightMap, InsightPeriod, SyncAck};
use adboard_core::{MetaAd, MetaAdSet, MetaCampaign, Platform};
use chrono::NaiveDate;

use crate::ads::{AdsDataLoader, AdsPlatform};

/// Meta Ads bindings. Insights take presets by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Meta;

pub type MetaDataLoader = AdsDataLoader<Meta>;

impl AdsPlatform for Meta {
    const PLATFORM: Platform = Platform::Meta;

    type Campaign = MetaCampaign;
    type AdSet = MetaAdSet;
    type Ad = MetaAd;

    fn campaigns(
        client: &ApiClient,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<Vec<MetaCampaign>, ClientError>> + Send {
        client.meta_campaigns(user_id, account_id)
    }

    fn ad_sets(
        client: &ApiClient,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<Vec<MetaAdSet>, ClientError>> + Send {
        client.meta_adsets(user_id, account_id)
    }

    fn ads(
        client: &ApiClient,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<Vec<MetaAd>, ClientError>> + Send {
        client.meta_ads(user_id, account_id)
    }

    fn insights(
        client: &ApiClient,
        level: EntityLevel,
        account_id: &str,
        period: InsightPeriod,
        _today: NaiveDate,
    ) -> impl Future<Output = Result<InsightMap, ClientError>> + Send {
        client.meta_insights(level, account_id, period)
    }

    fn resync(
        client: &ApiClient,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<SyncAck, ClientError>> + Send {
        client.meta_sync_recent(user_id, account_id)
    }
}
