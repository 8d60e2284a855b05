//! Pure reconciliation of query parameters, snapshot and schema

use crate::coerce::interpret;
use crate::query::QueryParams;
use crate::schema::FilterSchema;
use crate::value::FilterSet;
use serde_json::{Map, Value};

/// Resolve every schema key
///
/// Precedence per key: query value, snapshot value, default option. Each
/// candidate is interpreted by the field type and the first valid one wins.
/// Keys with no valid candidate are omitted.
#[must_use]
pub fn reconcile(schema: &FilterSchema, query: &QueryParams, snapshot: &Map<String, Value>) -> FilterSet {
    let mut filters = FilterSet::new();

    for (key, spec) in schema.iter() {
        let resolved = [query.get(key), snapshot.get(key), spec.default_option.as_ref()]
            .into_iter()
            .flatten()
            .find_map(|raw| interpret(spec, raw));

        match resolved {
            Some(value) => {
                filters.insert(key, value);
            }
            None => tracing::trace!(key, "filter omitted"),
        }
    }

    filters
}

/// Schema keys not present in the query parameters
#[must_use]
pub fn missing_keys<'a>(schema: &'a FilterSchema, query: &QueryParams) -> Vec<&'a str> {
    schema.keys().filter(|k| !query.contains_key(k)).collect()
}

/// Drop keys whose value is an empty array
#[must_use]
pub fn prune_empty_arrays(patch: &Map<String, Value>) -> Map<String, Value> {
    patch
        .iter()
        .filter(|(_, v)| !matches!(v, Value::Array(items) if items.is_empty()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
