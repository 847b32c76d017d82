//! Record lists that survive entries they cannot parse

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A JSON array of records.
///
/// Entries that do not fit `T` are kept verbatim in `unparsed` and written
/// back ahead of the parsed items on save, so a hand-edited or older file
/// never loses history just because this version cannot read part of it.
/// Everything else goes through `Deref` to the parsed `Vec<T>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Records<T> {
    pub items: Vec<T>,
    pub unparsed: Vec<Value>,
}

impl<T> Records<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            unparsed: Vec::new(),
        }
    }

    /// The parsed items
    pub fn as_mut_vec(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    /// Number of entries that will be written back, parsed or not
    pub fn stored_len(&self) -> usize {
        self.items.len() + self.unparsed.len()
    }
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Records<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            unparsed: Vec::new(),
        }
    }
}

impl<T> Deref for Records<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.items
    }
}

impl<T> DerefMut for Records<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}

impl<'a, T> IntoIterator for &'a Records<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for Records<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.stored_len()))?;
        for raw in &self.unparsed {
            seq.serialize_element(raw)?;
        }
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Records<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<Value>::deserialize(deserializer)?;
        let mut records = Records::new();

        for value in raw {
            match T::deserialize(&value) {
                Ok(item) => records.items.push(item),
                Err(e) => {
                    tracing::warn!(error = %e, "Keeping unreadable record as-is");
                    records.unparsed.push(value);
                }
            }
        }

        if !records.unparsed.is_empty() {
            tracing::debug!(
                parsed = records.items.len(),
                unparsed = records.unparsed.len(),
                "Loaded records with unreadable entries"
            );
        }

        Ok(records)
    }
}
