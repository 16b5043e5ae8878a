//! Typed bindings for the backend endpoints.
//!
//! Each submodule adds an `impl ApiClient` block for one area of the
//! backend. Response envelopes vary between endpoints (bare arrays, arrays
//! under `data`, maps, row lists); the envelope types here accept every
//! shape the backend is known to produce and reject anything else with
//! [`crate::ClientError::Decode`].

mod accounts;
mod aggregate;
mod google;
mod meta;
mod platforms;
mod shopify;

use std::collections::HashMap;

use adboard_core::{DatePreset, DateRange, DateWindow, InsightMetrics};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use accounts::AdAccount;
pub use aggregate::AGGREGATE_GROUP_BY_DATE;

/// Entity id → metrics for one level and one date window.
pub type InsightMap = HashMap<String, InsightMetrics>;

/// Hierarchy level of an advertising entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLevel {
    Campaign,
    /// Meta ad set / Google ad group.
    AdSet,
    Ad,
}

impl EntityLevel {
    pub const ALL: [EntityLevel; 3] = [EntityLevel::Campaign, EntityLevel::AdSet, EntityLevel::Ad];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityLevel::Campaign => "campaign",
            EntityLevel::AdSet => "adset",
            EntityLevel::Ad => "ad",
        }
    }
}

impl std::fmt::Display for EntityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date parameterization of an insights request.
///
/// Presets are forwarded by name so the backend can use the platform's own
/// preset semantics; custom ranges are sent as explicit dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightPeriod {
    Preset(DatePreset),
    Window(DateWindow),
}

impl InsightPeriod {
    /// `None` for an incomplete custom range.
    #[must_use]
    pub fn from_range(range: &DateRange) -> Option<Self> {
        match *range {
            DateRange::Preset(preset) => Some(InsightPeriod::Preset(preset)),
            DateRange::Custom {
                from: Some(start),
                to: Some(end),
            } => Some(InsightPeriod::Window(DateWindow { start, end })),
            DateRange::Custom { .. } => None,
        }
    }

    /// Concrete dates for endpoints that only accept explicit windows.
    #[must_use]
    pub fn window(self, today: NaiveDate) -> DateWindow {
        match self {
            InsightPeriod::Preset(preset) => preset.window(today),
            InsightPeriod::Window(window) => window,
        }
    }
}

/// Backend acknowledgement of a sync/backfill request.
///
/// Acceptance only: the work itself continues on the backend after this
/// returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAck")]
pub struct SyncAck {
    pub message: Option<String>,
    pub task_id: Option<String>,
}

/// Wire shape of an acknowledgement; some endpoints say `job_id`.
#[derive(Deserialize)]
struct RawAck {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, deserialize_with = "adboard_core::lenient::opt_id")]
    task_id: Option<String>,
    #[serde(default, deserialize_with = "adboard_core::lenient::opt_id")]
    job_id: Option<String>,
}

impl From<RawAck> for SyncAck {
    fn from(raw: RawAck) -> Self {
        Self {
            message: raw.message,
            task_id: raw.task_id.or(raw.job_id),
        }
    }
}

/// Decodes an acknowledgement body that may be empty, `null`, a string, or
/// an object. Any other JSON is a decode error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AckBody {
    Object(SyncAck),
    Text(String),
    Null,
}

impl AckBody {
    fn into_ack(self) -> SyncAck {
        match self {
            AckBody::Object(ack) => ack,
            AckBody::Text(message) => SyncAck {
                message: Some(message),
                task_id: None,
            },
            AckBody::Null => SyncAck::default(),
        }
    }
}

/// A list either bare or wrapped as `{"data": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) | ListBody::Wrapped { data: items } => items,
        }
    }
}

/// One row of a row-shaped insights response.
#[derive(Debug, Deserialize)]
struct InsightRow {
    #[serde(alias = "key", deserialize_with = "adboard_core::lenient::id")]
    id: String,
    #[serde(flatten)]
    metrics: InsightMetrics,
}

/// Map-shaped insights as sent; an entity may map to `null`.
type SparseInsightMap = HashMap<String, Option<InsightMetrics>>;

/// Insights keyed by entity id, in any of the shapes the backend emits.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InsightBody {
    Rows(Vec<InsightRow>),
    WrappedRows { data: Vec<InsightRow> },
    Wrapped { data: SparseInsightMap },
    Bare(SparseInsightMap),
}

impl InsightBody {
    fn into_map(self) -> InsightMap {
        match self {
            InsightBody::Rows(rows) | InsightBody::WrappedRows { data: rows } => rows
                .into_iter()
                .map(|row| (row.id, row.metrics))
                .collect(),
            InsightBody::Wrapped { data } | InsightBody::Bare(data) => data
                .into_iter()
                .filter_map(|(id, metrics)| Some((id, metrics?)))
                .collect(),
        }
    }
}
