//! Date-range selection and its resolution to concrete start/end dates.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::CoreError;

/// Days covered by the `lifetime` preset (about two years).
pub const LIFETIME_DAYS: u64 = 730;

/// Named shorthand for a trailing window ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePreset {
    Today,
    Last7Days,
    Last30Days,
    Last90Days,
    Lifetime,
}

impl DatePreset {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Last7Days => "7days",
            DatePreset::Last30Days => "30days",
            DatePreset::Last90Days => "90days",
            DatePreset::Lifetime => "lifetime",
        }
    }

    /// The equivalent Meta Marketing API `date_preset` value.
    #[must_use]
    pub fn meta_preset(self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Last7Days => "last_7d",
            DatePreset::Last30Days => "last_30d",
            DatePreset::Last90Days => "last_90d",
            DatePreset::Lifetime => "maximum",
        }
    }

    /// Resolves the preset to an inclusive window ending on `today`.
    ///
    /// `7days` covers today and the six days before it; `lifetime` reaches
    /// back [`LIFETIME_DAYS`].
    #[must_use]
    pub fn window(self, today: NaiveDate) -> DateWindow {
        let back = match self {
            DatePreset::Today => 0,
            DatePreset::Last7Days => 6,
            DatePreset::Last30Days => 29,
            DatePreset::Last90Days => 89,
            DatePreset::Lifetime => LIFETIME_DAYS,
        };
        let start = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
        DateWindow { start, end: today }
    }
}

impl std::fmt::Display for DatePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DatePreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(DatePreset::Today),
            "7days" | "last_7d" => Ok(DatePreset::Last7Days),
            "30days" | "last_30d" => Ok(DatePreset::Last30Days),
            "90days" | "last_90d" => Ok(DatePreset::Last90Days),
            "lifetime" | "maximum" => Ok(DatePreset::Lifetime),
            other => Err(CoreError::UnknownDatePreset(other.to_string())),
        }
    }
}

/// The user's date-range selection.
///
/// A custom range may be half-filled while the user is still picking dates;
/// such a range is incomplete and must not trigger any fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Preset(DatePreset),
    Custom {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl Default for DateRange {
    fn default() -> Self {
        DateRange::Preset(DatePreset::Last30Days)
    }
}

impl DateRange {
    #[must_use]
    pub fn custom(from: NaiveDate, to: NaiveDate) -> Self {
        DateRange::Custom {
            from: Some(from),
            to: Some(to),
        }
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, DateRange::Custom { .. })
    }

    /// `false` only for a custom range missing one or both bounds.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            DateRange::Preset(_) => true,
            DateRange::Custom { from, to } => from.is_some() && to.is_some(),
        }
    }

    /// Resolves the selection to concrete dates, or `None` when incomplete.
    #[must_use]
    pub fn window(&self, today: NaiveDate) -> Option<DateWindow> {
        match *self {
            DateRange::Preset(preset) => Some(preset.window(today)),
            DateRange::Custom {
                from: Some(start),
                to: Some(end),
            } => Some(DateWindow { start, end }),
            DateRange::Custom { .. } => None,
        }
    }
}

/// Inclusive start/end pair sent to the aggregation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    #[serde(rename = "start_date")]
    pub start: NaiveDate,
    #[serde(rename = "end_date")]
    pub end: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn today_is_a_single_day() {
        let today = day(2026, 3, 15);
        let w = DatePreset::Today.window(today);
        assert_eq!(w.start, today);
        assert_eq!(w.end, today);
    }

    #[test]
    fn seven_days_includes_today() {
        let w = DatePreset::Last7Days.window(day(2026, 3, 15));
        assert_eq!(w.start, day(2026, 3, 9));
        assert_eq!(w.end, day(2026, 3, 15));
    }

    #[test]
    fn ninety_days_crosses_year_boundary() {
        let w = DatePreset::Last90Days.window(day(2026, 1, 10));
        assert_eq!(w.start, day(2025, 10, 13));
    }

    #[test]
    fn lifetime_reaches_two_years_back() {
        let w = DatePreset::Lifetime.window(day(2026, 3, 15));
        assert_eq!(w.start, day(2024, 3, 15));
    }

    #[test]
    fn half_filled_custom_range_is_incomplete() {
        let only_from = DateRange::Custom {
            from: Some(day(2026, 1, 1)),
            to: None,
        };
        let only_to = DateRange::Custom {
            from: None,
            to: Some(day(2026, 1, 31)),
        };
        assert!(!only_from.is_complete());
        assert!(!only_to.is_complete());
        assert_eq!(only_from.window(day(2026, 2, 1)), None);
        assert_eq!(only_to.window(day(2026, 2, 1)), None);
    }

    #[test]
    fn complete_custom_range_resolves_verbatim() {
        let range = DateRange::custom(day(2026, 1, 1), day(2026, 1, 31));
        let w = range.window(day(2026, 6, 1)).unwrap();
        assert_eq!(w.start, day(2026, 1, 1));
        assert_eq!(w.end, day(2026, 1, 31));
    }

    #[test]
    fn window_serializes_with_backend_field_names() {
        let w = DateWindow {
            start: day(2026, 1, 1),
            end: day(2026, 1, 7),
        };
        let value = serde_json::to_value(w).unwrap();
        assert_eq!(value["start_date"], "2026-01-01");
        assert_eq!(value["end_date"], "2026-01-07");
    }

    #[test]
    fn presets_parse_from_ui_and_meta_names() {
        assert_eq!("7days".parse::<DatePreset>().unwrap(), DatePreset::Last7Days);
        assert_eq!("maximum".parse::<DatePreset>().unwrap(), DatePreset::Lifetime);
        assert!("yesterday".parse::<DatePreset>().is_err());
    }
}
