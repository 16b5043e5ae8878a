use serde::{Deserialize, Serialize};

use super::{AckBody, ListBody, SyncAck};
use crate::client::ApiClient;
use crate::error::ClientError;

/// An ad account (Meta) or customer (Google Ads) the user can select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdAccount {
    #[serde(alias = "customer_id", deserialize_with = "adboard_core::lenient::id")]
    pub id: String,
    #[serde(default, alias = "descriptive_name")]
    pub name: Option<String>,
    #[serde(default, alias = "currency_code")]
    pub currency: Option<String>,
    #[serde(default, alias = "account_status")]
    pub status: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AccountsBody {
    List(ListBody<AdAccount>),
    Keyed { accounts: Vec<AdAccount> },
}

impl AccountsBody {
    fn into_vec(self) -> Vec<AdAccount> {
        match self {
            AccountsBody::List(list) => list.into_vec(),
            AccountsBody::Keyed { accounts } => accounts,
        }
    }
}

#[derive(Debug, Serialize)]
struct SelectMetaAccount<'a> {
    ad_account_id: &'a str,
}

#[derive(Debug, Serialize)]
struct SelectGoogleAccount<'a> {
    customer_id: &'a str,
}

impl ApiClient {
    /// Ad accounts reachable through the user's linked Meta login.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn meta_ad_accounts(&self) -> Result<Vec<AdAccount>, ClientError> {
        let body: AccountsBody = self.get_json(&["meta", "ad-accounts"], &[]).await?;
        Ok(body.into_vec())
    }

    /// Customers reachable through the user's linked Google Ads login.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn google_ad_accounts(&self) -> Result<Vec<AdAccount>, ClientError> {
        let body: AccountsBody = self.get_json(&["google", "ad-accounts"], &[]).await?;
        Ok(body.into_vec())
    }

    /// Makes `ad_account_id` the selected Meta account for the user.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn select_meta_account(&self, ad_account_id: &str) -> Result<SyncAck, ClientError> {
        let body: AckBody = self
            .post_json(
                &["meta", "select-account"],
                &SelectMetaAccount { ad_account_id },
            )
            .await?;
        Ok(body.into_ack())
    }

    /// Makes `customer_id` the selected Google Ads customer for the user.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn select_google_account(&self, customer_id: &str) -> Result<SyncAck, ClientError> {
        let body: AckBody = self
            .post_json(
                &["google", "select-account"],
                &SelectGoogleAccount { customer_id },
            )
            .await?;
        Ok(body.into_ack())
    }
}
