use adboard_client::InsightMap;
use adboard_core::{Identified, InsightMetrics};
use serde::Serialize;

/// An entity annotated with its insights for the selected window.
///
/// `insights` is `None` when the backend had nothing for this entity in the
/// window. That renders as "no data", not as an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithInsights<T> {
    #[serde(flatten)]
    pub entity: T,
    pub insights: Option<InsightMetrics>,
}

/// Joins an entity list with an insight map by id, preserving list order.
///
/// Pure: the same inputs always produce the same output, so re-running a
/// basic fetch that returns unchanged data leaves the merged view unchanged.
pub fn merge_insights<T>(entities: &[T], insights: &InsightMap) -> Vec<WithInsights<T>>
where
    T: Identified + Clone,
{
    entities
        .iter()
        .map(|entity| WithInsights {
            insights: insights.get(entity.id()).cloned(),
            entity: entity.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use adboard_core::MetaCampaign;

    use super::*;

    fn campaign(id: &str) -> MetaCampaign {
        MetaCampaign {
            id: id.to_string(),
            name: format!("Campaign {id}"),
            status: Some("ACTIVE".to_string()),
            objective: None,
            daily_budget: None,
            lifetime_budget: None,
        }
    }

    fn metrics(spend: f64) -> InsightMetrics {
        InsightMetrics {
            spend,
            ..InsightMetrics::default()
        }
    }

    #[test]
    fn missing_key_becomes_none() {
        let entities = vec![campaign("c1"), campaign("c2"), campaign("c3")];
        let mut map = InsightMap::new();
        map.insert("c1".to_string(), metrics(10.0));
        map.insert("c3".to_string(), metrics(3.0));

        let merged = merge_insights(&entities, &map);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].insights, Some(metrics(10.0)));
        assert_eq!(merged[1].insights, None);
        assert_eq!(merged[2].insights, Some(metrics(3.0)));
    }

    #[test]
    fn insights_for_unknown_ids_are_ignored() {
        let entities = vec![campaign("c1")];
        let mut map = InsightMap::new();
        map.insert("gone".to_string(), metrics(1.0));
        let merged = merge_insights(&entities, &map);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].insights, None);
    }

    #[test]
    fn merging_twice_is_identical() {
        let entities = vec![campaign("c1"), campaign("c2")];
        let mut map = InsightMap::new();
        map.insert("c2".to_string(), metrics(2.5));
        assert_eq!(
            merge_insights(&entities, &map),
            merge_insights(&entities.clone(), &map)
        );
    }

    #[test]
    fn serializes_flat_with_insights_field() {
        let merged = merge_insights(&[campaign("c1")], &InsightMap::new());
        let value = serde_json::to_value(&merged[0]).unwrap();
        assert_eq!(value["id"], "c1");
        assert!(value["insights"].is_null());
    }
}
