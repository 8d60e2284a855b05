//! Subcommand bodies
//!
//! Each command works on an injected store and returns what `main` prints,
//! so the binary stays a thin argument layer.

use anyhow::{anyhow, bail, Context};
use csc_filter::{FilterSchema, FilterService, FilterSet, QueryParams};
use csc_model::{ActionDescriptor, VirtualMachine};
use csc_store::KeyValueStore;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Split a `key=value` argument at the first `=`
///
/// # Errors
/// Fails when there is no `=` or the key is empty.
pub fn parse_pair(raw: &str) -> anyhow::Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got `{raw}`"))?;
    if key.is_empty() {
        bail!("empty key in `{raw}`");
    }
    Ok((key.to_string(), value.to_string()))
}

/// Resolve the filter group `key` against `params` and the stored snapshot
#[must_use]
pub fn filters_init(
    store: Arc<dyn KeyValueStore>,
    key: &str,
    schema: &FilterSchema,
    params: Vec<(String, String)>,
) -> FilterSet {
    let query = QueryParams::from_pairs(params);
    tracing::debug!(key, params = query.len(), "resolving filters");
    FilterService::new(store, Arc::new(query)).init(key, schema)
}

/// Store `patch` (a JSON object) as the snapshot of `key`
///
/// # Errors
/// Fails when `patch` is not a JSON object.
pub fn filters_update(store: Arc<dyn KeyValueStore>, key: &str, patch: &str) -> anyhow::Result<()> {
    let patch: Map<String, Value> =
        serde_json::from_str(patch).context("patch must be a JSON object")?;
    FilterService::new(store, Arc::new(QueryParams::new())).update(key, &patch);
    Ok(())
}

/// Raw snapshot stored under `key`
///
/// # Errors
/// Propagates store read failures.
pub fn filters_show(store: &dyn KeyValueStore, key: &str) -> anyhow::Result<Option<String>> {
    store
        .read(key)
        .with_context(|| format!("failed to read `{key}`"))
}

/// Result of `vm inspect`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VmReport {
    /// Remapped machine
    pub vm: VirtualMachine,
    /// Total volume size in GiB
    pub disks_size_gib: f64,
    /// Address of the default NIC
    pub primary_ip: Option<String>,
    /// Actions valid in the current state
    pub actions: Vec<ActionDescriptor>,
}

/// Remap a raw API VM and list what can be done with it
///
/// # Errors
/// Fails when `raw` is not a JSON object or does not decode as a VM.
pub fn vm_inspect(raw: &Value) -> anyhow::Result<VmReport> {
    let vm = VirtualMachine::from_api(raw).context("invalid virtual machine")?;
    let actions = vm
        .applicable_actions()
        .into_iter()
        .map(|action| action.descriptor())
        .collect();

    Ok(VmReport {
        disks_size_gib: vm.disks_size_gib(),
        primary_ip: vm.primary_ip().map(str::to_string),
        actions,
        vm,
    })
}
