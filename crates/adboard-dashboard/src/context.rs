use adboard_core::{DateRange, Platform};
use chrono::NaiveDate;

use crate::status::PlatformStatusState;

/// Source of "today" for resolving preset ranges.
pub type Clock = fn() -> NaiveDate;

/// Today's date in the local time zone.
#[must_use]
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Whether a load actually issued requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Fired,
    /// A precondition was not met; nothing was requested or changed.
    Skipped,
}

/// Inputs a page hands to the platform loaders.
#[derive(Debug, Clone, Copy)]
pub struct FetchContext<'a> {
    pub user_id: Option<&'a str>,
    pub platforms: &'a PlatformStatusState,
    pub date_range: DateRange,
}

/// Identifiers a load needs once every precondition holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Ready {
    pub user_id: String,
    pub account_id: String,
}

impl FetchContext<'_> {
    /// Checks every precondition for loading `platform`.
    ///
    /// All of these must hold: platform status loaded, platform connected,
    /// an account selected, a user id present, and a custom range (if any)
    /// complete.
    pub(crate) fn ready_for(&self, platform: Platform) -> Option<Ready> {
        if !self.platforms.loaded {
            return None;
        }
        let account_id = self.platforms.status.get(platform).selected_account()?;
        let user_id = self.user_id.filter(|id| !id.is_empty())?;
        if !self.date_range.is_complete() {
            return None;
        }
        Some(Ready {
            user_id: user_id.to_string(),
            account_id: account_id.to_string(),
        })
    }
}
