use super::UNKNOWN_CONTENT_TYPE;
use crate::filter::StatusClass;
use crate::model::RequestEntry;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Counts keyed by label, kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: Vec<(String, usize)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.counts.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((key.to_string(), 1)),
        }
    }

    /// Count for a label, zero when never seen
    pub fn get(&self, key: &str) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, count)| (k.as_str(), *count))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Labels ordered by descending count, ties kept in first-seen order
    pub fn sorted_by_count(&self) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (key, count) in &self.counts {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Request counts per status class.
///
/// The four known classes always read as present (zero by default). Other
/// classes such as `0xx` are kept under their own key so the counts always
/// add up to the number of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    counts: BTreeMap<StatusClass, usize>,
}

impl StatusCounts {
    pub fn get(&self, class: StatusClass) -> usize {
        self.counts.get(&class).copied().unwrap_or(0)
    }

    /// Counts for 2xx, 3xx, 4xx and 5xx, in that order
    pub fn known(&self) -> [(StatusClass, usize); 4] {
        StatusClass::KNOWN.map(|class| (class, self.get(class)))
    }

    /// Classes outside 2xx..5xx that occurred
    pub fn other(&self) -> impl Iterator<Item = (StatusClass, usize)> + '_ {
        self.counts
            .iter()
            .filter(|(class, _)| !class.is_known())
            .map(|(class, count)| (*class, *count))
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl Serialize for StatusCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let other: Vec<(StatusClass, usize)> = self.other().collect();
        let mut map = serializer.serialize_map(Some(4 + other.len()))?;
        for (class, count) in self.known().iter().chain(other.iter()) {
            map.serialize_entry(&class.to_string(), count)?;
        }
        map.end()
    }
}

/// Count entries per status class
pub fn group_by_status_class(entries: &[RequestEntry]) -> StatusCounts {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.status_class()).or_insert(0) += 1;
    }
    StatusCounts { counts }
}

/// Count entries per content type, parameters stripped, `unknown` when absent
pub fn group_by_content_type(entries: &[RequestEntry]) -> Tally {
    let mut tally = Tally::new();
    for entry in entries {
        tally.increment(entry.media_type().unwrap_or(UNKNOWN_CONTENT_TYPE));
    }
    tally
}

/// Count entries per HTTP method
pub fn group_by_method(entries: &[RequestEntry]) -> Tally {
    let mut tally = Tally::new();
    for entry in entries {
        tally.increment(&entry.method);
    }
    tally
}
