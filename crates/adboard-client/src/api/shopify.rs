use adboard_core::{ShopifyCustomer, ShopifyOrder, ShopifyProduct};

use super::{AckBody, ListBody, SyncAck};
use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// `GET /shopify/orders/{user}/{shop}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn shopify_orders(
        &self,
        user_id: &str,
        shop: &str,
    ) -> Result<Vec<ShopifyOrder>, ClientError> {
        let body: ListBody<ShopifyOrder> = self
            .get_json(&["shopify", "orders", user_id, shop], &[])
            .await?;
        Ok(body.into_vec())
    }

    /// `GET /shopify/products/{user}/{shop}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn shopify_products(
        &self,
        user_id: &str,
        shop: &str,
    ) -> Result<Vec<ShopifyProduct>, ClientError> {
        let body: ListBody<ShopifyProduct> = self
            .get_json(&["shopify", "products", user_id, shop], &[])
            .await?;
        Ok(body.into_vec())
    }

    /// `GET /shopify/customers/{user}/{shop}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn shopify_customers(
        &self,
        user_id: &str,
        shop: &str,
    ) -> Result<Vec<ShopifyCustomer>, ClientError> {
        let body: ListBody<ShopifyCustomer> = self
            .get_json(&["shopify", "customers", user_id, shop], &[])
            .await?;
        Ok(body.into_vec())
    }

    /// Asks the backend to re-import the shop's orders and catalog.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn shopify_sync(&self, user_id: &str, shop: &str) -> Result<SyncAck, ClientError> {
        let body: AckBody = self.post_empty(&["shopify", "sync", user_id, shop]).await?;
        Ok(body.into_ack())
    }
}
