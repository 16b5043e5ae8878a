//! Shopify store data: orders, products and customers.
//!
//! Shopify has no per-entity insights, so there is a single phase. The shop
//! domain plays the role of the selected account.

use std::time::Duration;

use adboard_client::{ApiClient, SyncAck};
use adboard_core::{Platform, ShopifyCustomer, ShopifyOrder, ShopifyProduct};
use tokio::sync::watch;

use crate::context::{FetchContext, FetchOutcome, Ready};
use crate::resync::ResyncTask;
use crate::state::{Loadable, StateCell};
use crate::GENERIC_LOAD_ERROR;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopifyState {
    pub orders: Loadable<Vec<ShopifyOrder>>,
    pub products: Loadable<Vec<ShopifyProduct>>,
    pub customers: Loadable<Vec<ShopifyCustomer>>,
    pub refresh: Loadable<Option<SyncAck>>,
}

pub struct ShopifyDataLoader {
    client: ApiClient,
    state: StateCell<ShopifyState>,
    resync: ResyncTask,
}

impl ShopifyDataLoader {
    #[must_use]
    pub fn new(client: ApiClient, resync_window: Duration) -> Self {
        Self {
            client,
            state: StateCell::default(),
            resync: ResyncTask::new(resync_window),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ShopifyState {
        self.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ShopifyState> {
        self.state.subscribe()
    }

    /// Loads all three lists concurrently.
    pub async fn load(&self, ctx: &FetchContext<'_>) -> FetchOutcome {
        let Some(ready) = ctx.ready_for(Platform::Shopify) else {
            return FetchOutcome::Skipped;
        };
        self.fetch(&ready).await;
        FetchOutcome::Fired
    }

    /// Triggers a shop sync, waits out the resync window, reloads once.
    pub async fn refresh(&self, ctx: &FetchContext<'_>) -> FetchOutcome {
        let Some(ready) = ctx.ready_for(Platform::Shopify) else {
            return FetchOutcome::Skipped;
        };

        self.state.update(|s| s.refresh.start());
        let result = self
            .resync
            .run(
                || self.client.shopify_sync(&ready.user_id, &ready.account_id),
                || self.fetch(&ready),
            )
            .await;
        self.state.update(|s| {
            s.refresh.apply(
                result.map(|(ack, ())| Some(ack)),
                "Failed to sync store. Please try again.",
            );
        });
        FetchOutcome::Fired
    }

    async fn fetch(&self, ready: &Ready) {
        tracing::debug!(user_id = %ready.user_id, shop = %ready.account_id, "loading shopify data");
        self.state.update(|s| {
            s.orders.start();
            s.products.start();
            s.customers.start();
        });

        let (orders, products, customers) = tokio::join!(
            self.client.shopify_orders(&ready.user_id, &ready.account_id),
            self.client.shopify_products(&ready.user_id, &ready.account_id),
            self.client.shopify_customers(&ready.user_id, &ready.account_id),
        );

        self.state.update(|s| {
            s.orders.apply(orders, GENERIC_LOAD_ERROR);
            s.products.apply(products, GENERIC_LOAD_ERROR);
            s.customers.apply(customers, GENERIC_LOAD_ERROR);
        });
    }
}
