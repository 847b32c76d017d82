//! Feature usage counters

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Human-readable names for the dashboard's tracked features
pub const FEATURE_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("model_training_process", "Model Training"),
    ("clustering_analysis", "Clustering Analysis"),
    ("ml_code_examples", "ML Code Examples"),
];

/// Display name for a feature key, or the key itself when unmapped
pub fn display_name(feature: &str) -> &str {
    FEATURE_DISPLAY_NAMES
        .iter()
        .find(|(key, _)| *key == feature)
        .map(|(_, name)| *name)
        .unwrap_or(feature)
}

/// Per-feature usage tally.
///
/// Entries keep first-use order, both in memory and in the JSON object
/// written to disk, so ties in `most_used` resolve deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureCounter {
    entries: Vec<(String, u64)>,
}

impl FeatureCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one use of `feature`, returning the new count
    pub fn increment(&mut self, feature: &str) -> u64 {
        match self.entries.iter_mut().find(|(name, _)| name == feature) {
            Some((_, count)) => {
                *count += 1;
                *count
            }
            None => {
                self.entries.push((feature.to_string(), 1));
                1
            }
        }
    }

    /// Usage count, zero for features never used
    pub fn get(&self, feature: &str) -> u64 {
        self.entries
            .iter()
            .find(|(name, _)| name == feature)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == feature)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total uses across all features
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Feature with the highest count; the earliest-recorded wins a tie
    pub fn most_used(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (name, count) in self.iter() {
            match best {
                Some((_, top)) if count <= top => {}
                _ => best = Some((name, count)),
            }
        }
        best
    }

    /// Features ordered by descending count, ties in first-use order
    pub fn by_usage(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<(&str, u64)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    fn upsert(&mut self, feature: String, count: u64) {
        match self.entries.iter_mut().find(|(name, _)| *name == feature) {
            Some((_, existing)) => *existing = count,
            None => self.entries.push((feature, count)),
        }
    }
}

impl Serialize for FeatureCounter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FeatureCounter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FeatureCounterVisitor)
    }
}

struct FeatureCounterVisitor;

impl<'de> Visitor<'de> for FeatureCounterVisitor {
    type Value = FeatureCounter;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of feature names to usage counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut counter = FeatureCounter::new();

        while let Some((name, value)) = access.next_entry::<String, serde_json::Value>()? {
            match value.as_u64() {
                Some(count) => counter.upsert(name, count),
                None => tracing::warn!(feature = %name, value = %value, "Skipping invalid usage count"),
            }
        }

        Ok(counter)
    }
}
