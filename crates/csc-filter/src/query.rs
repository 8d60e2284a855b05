//! Route query parameters
//!
//! The reconciliation service only ever needs the query parameters as they
//! are at the moment of the call. [`QuerySource`] is that snapshot read;
//! [`RouteQuery`] is a navigation holder built on a `tokio::sync::watch`
//! channel so other components can observe navigations as they happen.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::watch;

/// Snapshot of the current route's query parameters
///
/// Router-produced values are strings, or arrays of strings for repeated
/// keys. Programmatic callers may place any JSON value here; the
/// reconciliation service validates whatever it finds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    params: Map<String, Value>,
}

impl QueryParams {
    /// Create empty snapshot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `key=value` pairs
    ///
    /// A key seen more than once becomes an array of its values in order,
    /// as a router does for `?tag=a&tag=b`.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Map::new();
        for (key, value) in pairs {
            let key = key.into();
            let value = Value::String(value.into());
            match params.get_mut(&key) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    params.insert(key, value);
                }
            }
        }
        Self { params }
    }

    /// With parameter
    #[inline]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.params.insert(key.into(), value.into())
    }

    /// Get raw parameter value
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Check if parameter is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Parameter names
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Number of parameters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if there are no parameters
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl From<Map<String, Value>> for QueryParams {
    fn from(params: Map<String, Value>) -> Self {
        Self { params }
    }
}

/// Source of the current query parameters
pub trait QuerySource: Send + Sync {
    /// Query parameters at the moment of the call
    fn snapshot(&self) -> QueryParams;
}

impl QuerySource for QueryParams {
    fn snapshot(&self) -> QueryParams {
        self.clone()
    }
}

impl QuerySource for watch::Receiver<QueryParams> {
    fn snapshot(&self) -> QueryParams {
        self.borrow().clone()
    }
}

/// Current route state
///
/// Holds the latest query parameters. `navigate` replaces them and wakes
/// every receiver obtained from `subscribe`.
#[derive(Debug)]
pub struct RouteQuery {
    tx: watch::Sender<QueryParams>,
}

impl RouteQuery {
    /// Create route state with initial parameters
    #[must_use]
    pub fn new(initial: QueryParams) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the current query parameters
    pub fn navigate(&self, params: QueryParams) {
        tracing::debug!(params = params.len(), "route query changed");
        self.tx.send_replace(params);
    }

    /// Observe future navigations
    #[inline]
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryParams> {
        self.tx.subscribe()
    }
}

impl Default for RouteQuery {
    fn default() -> Self {
        Self::new(QueryParams::new())
    }
}

impl QuerySource for RouteQuery {
    fn snapshot(&self) -> QueryParams {
        self.tx.borrow().clone()
    }
}
