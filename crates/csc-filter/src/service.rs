//! Filter reconciliation service
//!
//! Binds the pure reconciliation rules to a persistence store and a query
//! source. Neither operation returns an error: malformed stored data and
//! failing stores degrade to "no snapshot" with a log line.

use crate::query::QuerySource;
use crate::reconcile::{missing_keys, prune_empty_arrays, reconcile};
use crate::schema::FilterSchema;
use crate::value::FilterSet;
use csc_store::KeyValueStore;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Reconciles route query parameters with persisted filter snapshots
#[derive(Clone)]
pub struct FilterService {
    store: Arc<dyn KeyValueStore>,
    route: Arc<dyn QuerySource>,
}

impl std::fmt::Debug for FilterService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterService").finish_non_exhaustive()
    }
}

impl FilterService {
    /// Create service over a store and a query source
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, route: Arc<dyn QuerySource>) -> Self {
        Self { store, route }
    }

    /// Resolve the filters of the group stored under `storage_key`
    ///
    /// The snapshot is only read when some schema key is absent from the
    /// query parameters. A snapshot that is not valid JSON is deleted.
    #[must_use]
    pub fn init(&self, storage_key: &str, schema: &FilterSchema) -> FilterSet {
        let query = self.route.snapshot();
        let missing = missing_keys(schema, &query);

        let snapshot = if missing.is_empty() {
            Map::new()
        } else {
            tracing::debug!(storage_key, missing = ?missing, "reading filter snapshot");
            self.load_snapshot(storage_key)
        };

        let filters = reconcile(schema, &query, &snapshot);
        tracing::debug!(storage_key, resolved = filters.len(), declared = schema.len(), "filters resolved");
        filters
    }

    /// Persist the filters currently applied on a page
    ///
    /// Empty arrays are dropped and the previous snapshot is replaced in
    /// full. The patch is not checked against any schema.
    pub fn update(&self, storage_key: &str, patch: &Map<String, Value>) {
        let pruned = prune_empty_arrays(patch);

        let encoded = match serde_json::to_string(&pruned) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(storage_key, error = %e, "failed to encode filter snapshot");
                return;
            }
        };

        if let Err(e) = self.store.write(storage_key, &encoded) {
            tracing::warn!(storage_key, error = %e, "failed to persist filter snapshot");
        }
    }

    /// Persist a resolved filter set
    #[inline]
    pub fn update_filters(&self, storage_key: &str, filters: &FilterSet) {
        self.update(storage_key, &filters.to_json_map());
    }

    fn load_snapshot(&self, storage_key: &str) -> Map<String, Value> {
        let text = match self.store.read(storage_key) {
            Ok(Some(text)) => text,
            Ok(None) => return Map::new(),
            Err(e) => {
                tracing::warn!(storage_key, error = %e, "failed to read filter snapshot");
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => {
                tracing::warn!(storage_key, error = %e, "discarding corrupt filter snapshot");
                if let Err(e) = self.store.remove(storage_key) {
                    tracing::warn!(storage_key, error = %e, "failed to remove corrupt filter snapshot");
                }
                Map::new()
            }
        }
    }
}
