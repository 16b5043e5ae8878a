//! Daily aggregate series behind the overview charts.

use adboard_client::ApiClient;
use adboard_core::{DailyChartPoint, DateWindow, Platform};
use serde::Serialize;
use tokio::sync::watch;

use crate::context::{local_today, Clock, FetchContext, FetchOutcome};
use crate::state::{Loadable, StateCell};
use crate::GENERIC_LOAD_ERROR;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewState {
    /// Points ordered by date.
    pub points: Loadable<Vec<DailyChartPoint>>,
    /// Window of the last request, if any.
    pub window: Option<DateWindow>,
}

impl OverviewState {
    #[must_use]
    pub fn totals(&self) -> OverviewTotals {
        OverviewTotals::from_points(&self.points.data)
    }
}

/// Sums over a series, for headline numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OverviewTotals {
    pub days: usize,
    pub spend: f64,
    pub impressions: f64,
    pub clicks: f64,
    pub conversions: f64,
    pub revenue: f64,
    pub orders: f64,
    /// Revenue over spend; `None` with zero spend.
    pub roas: Option<f64>,
}

impl OverviewTotals {
    #[must_use]
    pub fn from_points(points: &[DailyChartPoint]) -> Self {
        let mut totals = points.iter().fold(
            Self {
                days: points.len(),
                ..Self::default()
            },
            |mut acc, p| {
                acc.spend += p.spend;
                acc.impressions += p.impressions;
                acc.clicks += p.clicks;
                acc.conversions += p.conversions;
                acc.revenue += p.revenue;
                acc.orders += p.orders;
                acc
            },
        );
        totals.roas = (totals.spend > 0.0).then(|| totals.revenue / totals.spend);
        totals
    }
}

/// Chart data loader for one platform.
pub struct OverviewLoader {
    client: ApiClient,
    platform: Platform,
    state: StateCell<OverviewState>,
    clock: Clock,
}

impl OverviewLoader {
    #[must_use]
    pub fn new(client: ApiClient, platform: Platform) -> Self {
        Self {
            client,
            platform,
            state: StateCell::default(),
            clock: local_today,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub fn snapshot(&self) -> OverviewState {
        self.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OverviewState> {
        self.state.subscribe()
    }

    /// Loads the daily series for the context's range.
    ///
    /// A custom range with a missing bound clears the series and sends
    /// nothing. Otherwise the platform must pass the same readiness checks
    /// as the entity loaders. Shopify aggregates are scoped by the linked
    /// shop, so no account is sent for them.
    pub async fn load(&self, ctx: &FetchContext<'_>) -> FetchOutcome {
        let Some(window) = ctx.date_range.window((self.clock)()) else {
            self.state.update(|s| *s = OverviewState::default());
            return FetchOutcome::Skipped;
        };
        let Some(ready) = ctx.ready_for(self.platform) else {
            return FetchOutcome::Skipped;
        };
        let account_id =
            (self.platform != Platform::Shopify).then_some(ready.account_id.as_str());

        tracing::debug!(
            platform = %self.platform,
            start = %window.start,
            end = %window.end,
            "loading overview series"
        );
        self.state.update(|s| {
            s.points.start();
            s.window = Some(window);
        });

        let result = self
            .client
            .aggregate_daily(self.platform, account_id, window)
            .await;

        self.state
            .update(|s| s.points.apply(result, GENERIC_LOAD_ERROR));
        FetchOutcome::Fired
    }
}
