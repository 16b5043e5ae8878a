use serde::{Deserialize, Serialize};

use crate::lenient;

/// Performance numbers for one entity over one date window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightMetrics {
    #[serde(default, deserialize_with = "lenient::f64")]
    pub spend: f64,
    #[serde(default, deserialize_with = "lenient::u64")]
    pub impressions: u64,
    #[serde(default, deserialize_with = "lenient::u64")]
    pub clicks: u64,
    #[serde(default, deserialize_with = "lenient::u64")]
    pub reach: u64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub conversions: f64,
    #[serde(default, alias = "purchase_value", deserialize_with = "lenient::f64")]
    pub conversion_value: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub ctr: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub cpc: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub cpm: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub roas: f64,
}

/// One day of an overview chart series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyChartPoint {
    /// `YYYY-MM-DD` date key as sent by the backend.
    #[serde(alias = "day")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub spend: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub impressions: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub clicks: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub conversions: f64,
    #[serde(default, alias = "total_sales", deserialize_with = "lenient::f64")]
    pub revenue: f64,
    #[serde(default, alias = "order_count", deserialize_with = "lenient::f64")]
    pub orders: f64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn insight_metrics_from_meta_strings() {
        let m: InsightMetrics = serde_json::from_value(json!({
            "spend": "12.5",
            "impressions": "1000",
            "clicks": "40",
            "ctr": "4.0"
        }))
        .unwrap();
        assert!((m.spend - 12.5).abs() < f64::EPSILON);
        assert_eq!(m.impressions, 1000);
        assert_eq!(m.clicks, 40);
        assert!((m.ctr - 4.0).abs() < f64::EPSILON);
        assert!(m.roas.abs() < f64::EPSILON);
    }

    #[test]
    fn chart_point_normalizes_every_metric() {
        let p: DailyChartPoint = serde_json::from_value(json!({
            "date": "2026-03-01",
            "spend": "12.5",
            "impressions": 12.5,
            "revenue": null
        }))
        .unwrap();
        assert!((p.spend - 12.5).abs() < f64::EPSILON);
        assert!((p.impressions - 12.5).abs() < f64::EPSILON);
        assert!(p.clicks.abs() < f64::EPSILON);
        assert!(p.revenue.abs() < f64::EPSILON);
    }
}
