use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Point-density summary for a field. Its presence means overlapping marks along
/// this field can be detected, so discrete x discrete scatter plots are informative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcclusionStats {
    /// Largest number of records that share one value
    pub max_overlap: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStats {
    pub cardinality: u32,
    #[serde(default = "default_binnable")]
    pub binnable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occlusion: Option<OcclusionStats>,
}

fn default_binnable() -> bool {
    true
}

impl FieldStats {
    pub fn new(cardinality: u32) -> Self {
        Self {
            cardinality,
            binnable: true,
            occlusion: None,
        }
    }

    pub fn with_binnable(mut self, binnable: bool) -> Self {
        self.binnable = binnable;
        self
    }

    pub fn with_occlusion(mut self, occlusion: OcclusionStats) -> Self {
        self.occlusion = Some(occlusion);
        self
    }
}

/// Summary statistics keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticsMap {
    fields: HashMap<String, FieldStats>,
}

impl StatisticsMap {
    pub fn insert(&mut self, name: impl Into<String>, stats: FieldStats) {
        self.fields.insert(name.into(), stats);
    }

    pub fn get(&self, name: &str) -> Result<&FieldStats, SpecError> {
        self.fields
            .get(name)
            .ok_or_else(|| SpecError::MissingStatistics(name.to_string()))
    }

    /// Whether point-density information was computed for `name`
    pub fn has_occlusion(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .is_some_and(|stats| stats.occlusion.is_some())
    }

    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<S: Into<String>> FromIterator<(S, FieldStats)> for StatisticsMap {
    fn from_iter<T: IntoIterator<Item = (S, FieldStats)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_from_json() -> Result<(), SpecError> {
        let stats = StatisticsMap::from_json(
            r#"{
                "Origin": {"cardinality": 3},
                "Cylinders": {"cardinality": 5, "occlusion": {"maxOverlap": 40}},
                "Name": {"cardinality": 311, "binnable": false}
            }"#,
        )?;
        assert_eq!(stats.get("Origin")?.cardinality, 3);
        assert!(stats.get("Origin")?.binnable);
        assert!(!stats.get("Name")?.binnable);
        assert!(stats.has_occlusion("Cylinders"));
        assert!(!stats.has_occlusion("Origin"));
        assert!(!stats.has_occlusion("Unknown"));
        assert!(stats.get("Unknown").is_err());
        Ok(())
    }
}
