//! cs-console Resource Models
//!
//! Typed views of API resources. Wire names are mapped to property names by
//! explicit static tables ([`FieldMap`]) before deserialization.
//!
//! # Example
//!
//! ```rust
//! use csc_model::{VirtualMachine, VmAction, VmState};
//!
//! let raw = serde_json::json!({
//!     "id": "42",
//!     "displayname": "web-1",
//!     "state": "Running",
//!     "zonename": "zone-a"
//! });
//!
//! let vm = VirtualMachine::from_api(&raw).unwrap();
//! assert_eq!(vm.display_name, "web-1");
//! assert_eq!(vm.state, VmState::Running);
//! assert!(!vm.can_apply(VmAction::Start));
//! ```

#![warn(missing_docs)]

pub mod action;
pub mod error;
pub mod field_map;
pub mod vm;

// Re-exports
pub use action::{ActionDescriptor, UnknownAction, VmAction};
pub use error::ModelError;
pub use field_map::FieldMap;
pub use vm::{
    GroupRef, Nic, VirtualMachine, VmState, Volume, MAX_ROOT_DISK_SIZE_ADMIN, MIN_ROOT_DISK_SIZE,
    NIC_FIELDS, VM_FIELDS,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
