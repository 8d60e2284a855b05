//! cs-console Persistence Stores
//!
//! String key-value storage for client state that must survive a page
//! reload or a process restart (filter snapshots, preferences).
//!
//! # Overview
//!
//! - **KeyValueStore**: the read/write/remove contract every store honours
//! - **MemoryStore**: concurrent in-memory map, for tests and ephemeral sessions
//! - **FileStore**: one JSON object file holding every key
//!
//! # Example
//!
//! ```rust
//! use csc_store::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.write("vm-list", r#"{"zones":["z1"]}"#).unwrap();
//! assert_eq!(store.read("vm-list").unwrap().as_deref(), Some(r#"{"zones":["z1"]}"#));
//!
//! store.remove("vm-list").unwrap();
//! assert!(store.read("vm-list").unwrap().is_none());
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod file;
pub mod memory;

use std::sync::Arc;

// Re-exports
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// String key-value store
///
/// Reading a key that was never written yields `Ok(None)`, and removing it is
/// a no-op. Reads are synchronous from the caller's point of view.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    #[inline]
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    #[inline]
    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write(key, value)
    }

    #[inline]
    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for store users
    pub use crate::{FileStore, KeyValueStore, MemoryStore, StoreError, StoreResult};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
