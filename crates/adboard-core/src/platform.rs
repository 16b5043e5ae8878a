use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::CoreError;

/// External platform an account can be linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Meta,
    Google,
    Shopify,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Meta, Platform::Google, Platform::Shopify];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Meta => "meta",
            Platform::Google => "google",
            Platform::Shopify => "shopify",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meta" | "facebook" => Ok(Platform::Meta),
            "google" | "google_ads" => Ok(Platform::Google),
            "shopify" => Ok(Platform::Shopify),
            other => Err(CoreError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Connection state of one platform for one user.
///
/// `account_id` is the selected Meta ad account, Google Ads customer id, or
/// Shopify shop domain, depending on the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawConnection")]
pub struct PlatformConnection {
    pub connected: bool,
    pub account_id: Option<String>,
}

/// Wire shape of a connection. The backend names the selected account
/// differently per platform and sometimes sends several of the names at
/// once, so each is decoded on its own.
#[derive(Deserialize)]
struct RawConnection {
    #[serde(default, deserialize_with = "lenient::bool_or_false")]
    connected: bool,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    account_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    selected_account_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    ad_account_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    customer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    shop_domain: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    shop: Option<String>,
}

impl From<RawConnection> for PlatformConnection {
    fn from(raw: RawConnection) -> Self {
        let account_id = [
            raw.account_id,
            raw.selected_account_id,
            raw.ad_account_id,
            raw.customer_id,
            raw.shop_domain,
            raw.shop,
        ]
        .into_iter()
        .flatten()
        .find(|id| !id.is_empty());
        Self {
            connected: raw.connected,
            account_id,
        }
    }
}

impl PlatformConnection {
    /// The selected account, if the platform is connected and one is chosen.
    #[must_use]
    pub fn selected_account(&self) -> Option<&str> {
        if self.connected {
            self.account_id.as_deref().filter(|id| !id.is_empty())
        } else {
            None
        }
    }
}

/// Per-user connectivity for every platform.
///
/// Every platform is always present; a platform the backend omits decodes as
/// disconnected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStatus {
    #[serde(default, deserialize_with = "connection_or_default")]
    pub meta: PlatformConnection,
    #[serde(default, deserialize_with = "connection_or_default")]
    pub google: PlatformConnection,
    #[serde(default, deserialize_with = "connection_or_default")]
    pub shopify: PlatformConnection,
}

impl PlatformStatus {
    #[must_use]
    pub fn get(&self, platform: Platform) -> &PlatformConnection {
        match platform {
            Platform::Meta => &self.meta,
            Platform::Google => &self.google,
            Platform::Shopify => &self.shopify,
        }
    }
}

fn connection_or_default<'de, D>(deserializer: D) -> Result<PlatformConnection, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<PlatformConnection>::deserialize(deserializer)?.unwrap_or_default())
}
