//! Data layer behind the dashboard pages.
//!
//! Each loader owns one slice of state, publishes it through a
//! [`tokio::sync::watch`] channel, and never propagates expected failures:
//! errors land in the slice as display text. Preconditions that are not yet
//! met (no user, platform not linked, half-filled custom range) make a load a
//! silent no-op.

pub mod ads;
pub mod context;
pub mod google;
pub mod guards;
pub mod merge;
pub mod meta;
pub mod overview;
pub mod resync;
pub mod shopify;
pub mod state;
pub mod status;

pub use ads::{AdsDataLoader, AdsPlatform, AdsState};
pub use context::{local_today, Clock, FetchContext, FetchOutcome};
pub use google::{Google, GoogleDataLoader};
pub use guards::{GuardDecision, RouteGuard};
pub use merge::{merge_insights, WithInsights};
pub use meta::{Meta, MetaDataLoader};
pub use overview::{OverviewLoader, OverviewState, OverviewTotals};
pub use resync::ResyncTask;
pub use shopify::{ShopifyDataLoader, ShopifyState};
pub use state::{Loadable, StateCell};
pub use status::{PlatformStatusResolver, PlatformStatusState};

/// Banner text used when the backend gives no explanation.
pub const GENERIC_LOAD_ERROR: &str = "Failed to load data. Please try again.";
