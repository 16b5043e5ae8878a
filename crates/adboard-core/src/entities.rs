//! Entity records returned by the backend's platform list endpoints.
//!
//! Only the fields the dashboard displays are decoded; everything else in
//! the backend payload is ignored. Ids from every platform are normalized to
//! strings (see [`crate::lenient::id`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Anything with a platform-scoped identifier that insights can be keyed by.
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })+
    };
}

identified!(
    MetaCampaign,
    MetaAdSet,
    MetaAd,
    GoogleCampaign,
    GoogleAdGroup,
    GoogleAd,
    ShopifyOrder,
    ShopifyProduct,
    ShopifyCustomer,
);

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaCampaign {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub daily_budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub lifetime_budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaAdSet {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Owning campaign. Lookup only; the campaign may not be in the same page.
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub campaign_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub daily_budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub lifetime_budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaAd {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub adset_id: Option<String>,
    #[serde(default)]
    pub creative: Option<AdCreative>,
}

/// Creative payload attached to an ad, when the backend includes one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCreative {
    #[serde(default, alias = "thumbnail_url")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, alias = "final_url")]
    pub link_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Google Ads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleCampaign {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "channel_type")]
    pub advertising_channel_type: Option<String>,
    #[serde(default, alias = "budget_amount", deserialize_with = "lenient::opt_f64")]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleAdGroup {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub campaign_id: Option<String>,
    #[serde(default, alias = "cpc_bid", deserialize_with = "lenient::opt_f64")]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleAd {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub ad_group_id: Option<String>,
    #[serde(default)]
    pub creative: Option<AdCreative>,
}

// ---------------------------------------------------------------------------
// Shopify
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopifyOrder {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    /// Display number such as `"#1001"`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub total_price: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub financial_status: Option<String>,
    #[serde(default)]
    pub fulfillment_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopifyProduct {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub variants: Vec<ShopifyVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopifyVariant {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopifyCustomer {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::u64")]
    pub orders_count: u64,
    #[serde(default)]
    pub total_spent: Decimal,
}
