//! Wire-name to property-name remapping
//!
//! The API returns flat lowercase keys (`displayname`, `zoneid`). Models
//! declare a static table of the renames they need; the table is applied to
//! the raw object before deserialization.

use serde_json::{Map, Value};

/// Static rename table: `(wire_name, property_name)` pairs
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    /// Create map from a static table
    #[inline]
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Property name for a wire name, if renamed
    #[inline]
    #[must_use]
    pub fn property_for(&self, wire: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find_map(|(from, to)| (*from == wire).then_some(*to))
    }

    /// Rename wire keys to property keys
    ///
    /// Keys not in the table pass through unchanged. A key that already uses
    /// the property name is never overwritten by its wire counterpart.
    #[must_use]
    pub fn remap(&self, raw: &Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::with_capacity(raw.len());

        for (key, value) in raw {
            if self.property_for(key).is_none() {
                out.insert(key.clone(), value.clone());
            }
        }

        for (key, value) in raw {
            if let Some(property) = self.property_for(key) {
                out.entry(property.to_string()).or_insert_with(|| value.clone());
            }
        }

        out
    }

    /// Number of renames
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if table is empty
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
