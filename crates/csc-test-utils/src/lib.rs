//! Testing utilities for cs-console workspace
//!
//! Shared fixtures for filter reconciliation tests.

#![allow(missing_docs)]

use csc_filter::{FilterService, QueryParams, RouteQuery};
use csc_store::{KeyValueStore, MemoryStore};
use serde_json::{Map, Value};
use std::sync::Arc;

pub const TEST_KEY: &str = "testKey";

/// Service wired to an in-memory store and a route holder the test controls
pub struct FilterHarness {
    pub store: Arc<MemoryStore>,
    pub route: Arc<RouteQuery>,
    pub service: FilterService,
}

impl FilterHarness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let route = Arc::new(RouteQuery::default());
        let service = FilterService::new(store.clone(), route.clone());
        Self { store, route, service }
    }

    pub fn with_query(self, query: QueryParams) -> Self {
        self.route.navigate(query);
        self
    }

    pub fn with_stored(self, key: &str, text: &str) -> Self {
        self.store.write(key, text).unwrap();
        self
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.store.read(key).unwrap()
    }

    pub fn stored_json(&self, key: &str) -> Option<Value> {
        self.stored(key).map(|text| serde_json::from_str(&text).unwrap())
    }
}

impl Default for FilterHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Query parameters from a JSON object literal
pub fn query(value: Value) -> QueryParams {
    QueryParams::from(object(value))
}

/// JSON object from a literal
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}
