//! Declarative filter schemas
//!
//! A [`FilterSchema`] whitelists the filter keys a listing page accepts and
//! says how each raw value is to be interpreted. The serialized form is the
//! console's JSON shape:
//!
//! ```json
//! {
//!   "zones":  { "type": "array" },
//!   "mode":   { "type": "string", "options": ["grid", "list"], "defaultOption": "grid" },
//!   "spare":  { "type": "boolean" }
//! }
//! ```

use crate::error::SchemaError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a raw filter value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// `true`/`false`, or the strings `"true"`/`"false"`
    Boolean,

    /// Any string, optionally restricted to `options`
    String,

    /// Sequence of strings, or one comma-separated string
    Array,
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Array => "array",
        };
        f.write_str(name)
    }
}

/// Declaration of a single filter key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFieldSpec {
    /// Value interpretation
    #[serde(rename = "type")]
    pub kind: FilterType,

    /// Allowed values (whitelist for strings, intersection set for arrays)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Fallback when no source yields a valid value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_option: Option<Value>,
}

impl FilterFieldSpec {
    /// Create spec of the given kind with no constraints
    #[inline]
    #[must_use]
    pub fn new(kind: FilterType) -> Self {
        Self {
            kind,
            options: None,
            default_option: None,
        }
    }

    /// Boolean field
    #[inline]
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(FilterType::Boolean)
    }

    /// String field
    #[inline]
    #[must_use]
    pub fn string() -> Self {
        Self::new(FilterType::String)
    }

    /// Array field
    #[inline]
    #[must_use]
    pub fn array() -> Self {
        Self::new(FilterType::Array)
    }

    /// With allowed options
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// With default option
    #[inline]
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default_option = Some(default.into());
        self
    }

    /// Check `value` against the options whitelist
    ///
    /// Always true when no options are declared.
    #[inline]
    #[must_use]
    pub fn allows(&self, value: &str) -> bool {
        self.options
            .as_ref()
            .map_or(true, |options| options.iter().any(|o| o == value))
    }
}

/// Whitelist of filter keys for one logical filter group
///
/// Keys keep their declaration order, which is also the order of the
/// resolved [`FilterSet`](crate::FilterSet).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSchema {
    fields: IndexMap<String, FilterFieldSpec>,
}

impl FilterSchema {
    /// Create empty schema
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse schema from its JSON form
    ///
    /// # Errors
    /// Returns [`SchemaError::Parse`] for malformed JSON or unknown types.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// With field declaration
    #[inline]
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, spec: FilterFieldSpec) -> Self {
        self.insert(key, spec);
        self
    }

    /// Declare or replace a field
    pub fn insert(&mut self, key: impl Into<String>, spec: FilterFieldSpec) -> Option<FilterFieldSpec> {
        self.fields.insert(key.into(), spec)
    }

    /// Get field declaration
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FilterFieldSpec> {
        self.fields.get(key)
    }

    /// Check if key is declared
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Declared keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Declarations in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterFieldSpec)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if schema is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FilterFieldSpec)> for FilterSchema {
    fn from_iter<I: IntoIterator<Item = (K, FilterFieldSpec)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
