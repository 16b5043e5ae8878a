//! Campaign / ad set / ad loader shared by the advertising platforms.
//!
//! Loading runs in two independent phases:
//!
//! - **basic**: the three entity lists, requested together;
//! - **insights**: one aggregation request per level for the selected window.
//!
//! The phases are stored separately and joined on read
//! ([`AdsState::campaigns_with_insights`] and friends), so either can be
//! re-run without touching the other. Each level records its own error:
//! one failing list does not mark its siblings as failed.

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use adboard_client::{ApiClient, ClientError, EntityLevel, InsightMap, InsightPeriod, SyncAck};
use adboard_core::{Identified, Platform};
use chrono::NaiveDate;
use tokio::sync::watch;

use crate::context::{local_today, Clock, FetchContext, FetchOutcome, Ready};
use crate::merge::{merge_insights, WithInsights};
use crate::resync::ResyncTask;
use crate::state::{Loadable, StateCell};
use crate::GENERIC_LOAD_ERROR;

const REFRESH_ERROR: &str = "Failed to refresh data. Please try again.";

/// Endpoint bindings for one advertising platform.
pub trait AdsPlatform: Clone + Debug + Default + PartialEq + Send + Sync + 'static {
    const PLATFORM: Platform;

    type Campaign: Identified + Clone + Debug + PartialEq + Send + Sync;
    type AdSet: Identified + Clone + Debug + PartialEq + Send + Sync;
    type Ad: Identified + Clone + Debug + PartialEq + Send + Sync;

    fn campaigns(
        client: &ApiClient,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<Vec<Self::Campaign>, ClientError>> + Send;

    fn ad_sets(
        client: &ApiClient,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<Vec<Self::AdSet>, ClientError>> + Send;

    fn ads(
        client: &ApiClient,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<Vec<Self::Ad>, ClientError>> + Send;

    /// Insights for one level. `today` resolves presets for platforms whose
    /// endpoint only takes explicit dates.
    fn insights(
        client: &ApiClient,
        level: EntityLevel,
        account_id: &str,
        period: InsightPeriod,
        today: NaiveDate,
    ) -> impl Future<Output = Result<InsightMap, ClientError>> + Send;

    /// Asks the backend to pull fresh data. Completes on acceptance.
    fn resync(
        client: &ApiClient,
        user_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<SyncAck, ClientError>> + Send;
}

/// Everything an advertising page renders for one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct AdsState<P: AdsPlatform> {
    pub campaigns: Loadable<Vec<P::Campaign>>,
    pub ad_sets: Loadable<Vec<P::AdSet>>,
    pub ads: Loadable<Vec<P::Ad>>,
    pub campaign_insights: Loadable<InsightMap>,
    pub ad_set_insights: Loadable<InsightMap>,
    pub ad_insights: Loadable<InsightMap>,
    /// Last refresh: acknowledgement on success.
    pub refresh: Loadable<Option<SyncAck>>,
}

// Entity types have no `Default`; a derive would demand one.
impl<P: AdsPlatform> Default for AdsState<P> {
    fn default() -> Self {
        Self {
            campaigns: Loadable::default(),
            ad_sets: Loadable::default(),
            ads: Loadable::default(),
            campaign_insights: Loadable::default(),
            ad_set_insights: Loadable::default(),
            ad_insights: Loadable::default(),
            refresh: Loadable::default(),
        }
    }
}

impl<P: AdsPlatform> AdsState<P> {
    #[must_use]
    pub fn campaigns_with_insights(&self) -> Vec<WithInsights<P::Campaign>> {
        merge_insights(&self.campaigns.data, &self.campaign_insights.data)
    }

    #[must_use]
    pub fn ad_sets_with_insights(&self) -> Vec<WithInsights<P::AdSet>> {
        merge_insights(&self.ad_sets.data, &self.ad_set_insights.data)
    }

    #[must_use]
    pub fn ads_with_insights(&self) -> Vec<WithInsights<P::Ad>> {
        merge_insights(&self.ads.data, &self.ad_insights.data)
    }

    fn insights_mut(&mut self, level: EntityLevel) -> &mut Loadable<InsightMap> {
        match level {
            EntityLevel::Campaign => &mut self.campaign_insights,
            EntityLevel::AdSet => &mut self.ad_set_insights,
            EntityLevel::Ad => &mut self.ad_insights,
        }
    }
}

/// Loader for one advertising platform's entity and insight data.
///
/// Requests are not cancelled when inputs change; if two loads overlap, the
/// one that resolves last wins.
pub struct AdsDataLoader<P: AdsPlatform> {
    client: ApiClient,
    state: StateCell<AdsState<P>>,
    resync: ResyncTask,
    clock: Clock,
}

impl<P: AdsPlatform> AdsDataLoader<P> {
    #[must_use]
    pub fn new(client: ApiClient, resync_window: Duration) -> Self {
        Self {
            client,
            state: StateCell::default(),
            resync: ResyncTask::new(resync_window),
            clock: local_today,
        }
    }

    /// Overrides the date source used to resolve presets.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn snapshot(&self) -> AdsState<P> {
        self.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AdsState<P>> {
        self.state.subscribe()
    }

    /// Runs both phases concurrently.
    pub async fn load(&self, ctx: &FetchContext<'_>) -> FetchOutcome {
        let Some((ready, period)) = Self::preconditions(ctx) else {
            return FetchOutcome::Skipped;
        };
        tokio::join!(self.fetch_basic(&ready), self.fetch_insights(&ready, period));
        FetchOutcome::Fired
    }

    /// Phase A only: the three entity lists.
    pub async fn load_basic(&self, ctx: &FetchContext<'_>) -> FetchOutcome {
        let Some((ready, _)) = Self::preconditions(ctx) else {
            return FetchOutcome::Skipped;
        };
        self.fetch_basic(&ready).await;
        FetchOutcome::Fired
    }

    /// Phase B only: insights for every level.
    pub async fn load_insights(&self, ctx: &FetchContext<'_>) -> FetchOutcome {
        let Some((ready, period)) = Self::preconditions(ctx) else {
            return FetchOutcome::Skipped;
        };
        self.fetch_insights(&ready, period).await;
        FetchOutcome::Fired
    }

    /// Triggers a backend resync, waits out the resync window, then re-runs
    /// phase A once. Insights are not reloaded.
    pub async fn refresh(&self, ctx: &FetchContext<'_>) -> FetchOutcome {
        let Some((ready, _)) = Self::preconditions(ctx) else {
            return FetchOutcome::Skipped;
        };

        self.state.update(|s| s.refresh.start());
        let result = self
            .resync
            .run(
                || P::resync(&self.client, &ready.user_id, &ready.account_id),
                || self.fetch_basic(&ready),
            )
            .await;
        self.state.update(|s| {
            s.refresh
                .apply(result.map(|(ack, ())| Some(ack)), REFRESH_ERROR);
        });
        FetchOutcome::Fired
    }

    fn preconditions(ctx: &FetchContext<'_>) -> Option<(Ready, InsightPeriod)> {
        let ready = ctx.ready_for(P::PLATFORM)?;
        let period = InsightPeriod::from_range(&ctx.date_range)?;
        Some((ready, period))
    }

    async fn fetch_basic(&self, ready: &Ready) {
        tracing::debug!(
            platform = %P::PLATFORM,
            user_id = %ready.user_id,
            account_id = %ready.account_id,
            "loading entity lists"
        );
        self.state.update(|s| {
            s.campaigns.start();
            s.ad_sets.start();
            s.ads.start();
        });

        let (campaigns, ad_sets, ads) = tokio::join!(
            P::campaigns(&self.client, &ready.user_id, &ready.account_id),
            P::ad_sets(&self.client, &ready.user_id, &ready.account_id),
            P::ads(&self.client, &ready.user_id, &ready.account_id),
        );

        self.state.update(|s| {
            s.campaigns.apply(campaigns, GENERIC_LOAD_ERROR);
            s.ad_sets.apply(ad_sets, GENERIC_LOAD_ERROR);
            s.ads.apply(ads, GENERIC_LOAD_ERROR);
        });
    }

    async fn fetch_insights(&self, ready: &Ready, period: InsightPeriod) {
        tracing::debug!(
            platform = %P::PLATFORM,
            account_id = %ready.account_id,
            ?period,
            "loading insights"
        );
        self.state.update(|s| {
            for level in EntityLevel::ALL {
                s.insights_mut(level).start();
            }
        });

        let today = (self.clock)();
        let (campaign, ad_set, ad) = tokio::join!(
            P::insights(&self.client, EntityLevel::Campaign, &ready.account_id, period, today),
            P::insights(&self.client, EntityLevel::AdSet, &ready.account_id, period, today),
            P::insights(&self.client, EntityLevel::Ad, &ready.account_id, period, today),
        );

        self.state.update(|s| {
            s.campaign_insights.apply(campaign, GENERIC_LOAD_ERROR);
            s.ad_set_insights.apply(ad_set, GENERIC_LOAD_ERROR);
            s.ad_insights.apply(ad, GENERIC_LOAD_ERROR);
        });
    }
}
