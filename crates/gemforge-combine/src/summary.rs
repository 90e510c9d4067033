//! Serializable gem reports
//!
//! [`GemSummary`] flattens one gem of a pool into plain values for JSON
//! output.

use serde::{Deserialize, Serialize};

use gemforge_core::{GemError, GemId};

use crate::pool::GemPool;

/// Flat, serializable view of one gem for front ends and reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GemSummary {
    pub recipe: String,
    pub color: String,
    /// One-based grade, as players count it
    pub grade: u32,
    pub cost: u64,
    pub power: f64,
    /// `null` for base gems. Non-finite values (a chain with no power has
    /// `-inf` growth) are written as the strings `"-inf"`, `"inf"` or `"NaN"`.
    #[serde(with = "growth_value")]
    pub growth: Option<f64>,
    pub spec: bool,
    pub pure_upgrade: bool,
}

impl GemPool {
    pub fn summary(&self, id: GemId) -> Result<GemSummary, GemError> {
        let gem = self.gem(id)?;
        Ok(GemSummary {
            recipe: self.recipe(id)?,
            color: gem.color().name(),
            grade: gem.grade() + 1,
            cost: gem.cost(),
            power: gem.power(),
            growth: gem.growth(),
            spec: gem.is_spec(),
            pure_upgrade: gem.is_pure_upgrade(),
        })
    }
}

/// JSON numbers cannot hold infinities, so those go out as text.
mod growth_value {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Value {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(growth: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match growth {
            Some(g) if !g.is_finite() => Value::Text(g.to_string()).serialize(serializer),
            Some(g) => Value::Number(*g).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Value::Number(g)) => Ok(Some(g)),
            Some(Value::Text(text)) => text
                .parse::<f64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid growth '{text}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_a_spec_gem() {
        let mut pool = GemPool::new();
        let id = pool.parse_recipe("(2o+b)").unwrap();
        let summary = pool.summary(id).unwrap();
        assert_eq!(summary.recipe, "(2o+b)");
        assert_eq!(summary.color, "Orange|Black");
        assert_eq!(summary.grade, 2);
        assert_eq!(summary.cost, 3);
        assert!(summary.spec);
        assert!(!summary.pure_upgrade);
        assert!(summary.growth.is_some());
    }

    #[test]
    fn summary_serializes_to_json() {
        let mut pool = GemPool::new();
        let id = pool.leaf('y').unwrap();
        let json = serde_json::to_value(pool.summary(id).unwrap()).unwrap();
        assert_eq!(json["recipe"], "y");
        assert_eq!(json["grade"], 1);
        assert!(json["growth"].is_null());
    }

    #[test]
    fn powerless_growth_is_not_confused_with_a_leaf() {
        let mut pool = GemPool::new();
        let id = pool.parse_recipe("2r").unwrap();
        let summary = pool.summary(id).unwrap();
        assert_eq!(summary.growth, Some(f64::NEG_INFINITY));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["growth"], "-inf");

        let back: GemSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn finite_growth_stays_a_number() {
        let mut pool = GemPool::new();
        let id = pool.parse_recipe("2y").unwrap();
        let summary = pool.summary(id).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["growth"].is_f64());

        let back: GemSummary = serde_json::from_str(&serde_json::to_string(&summary).unwrap()).unwrap();
        let (back, original) = (back.growth.unwrap(), summary.growth.unwrap());
        assert!((back - original).abs() < 1e-12);
        assert!(serde_json::from_value::<GemSummary>(serde_json::json!({
            "recipe": "y", "color": "Yellow", "grade": 1, "cost": 1,
            "power": 1.0, "growth": "fast", "spec": false, "pure_upgrade": true
        }))
        .is_err());
    }

    #[test]
    fn summary_of_missing_gem() {
        let pool = GemPool::new();
        let ghost = GemId::from_raw(0);
        assert_eq!(pool.summary(ghost), Err(GemError::MissingGem(ghost)));
    }
}
