//! Virtual machine resource model

use crate::action::VmAction;
use crate::error::ModelError;
use crate::field_map::FieldMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest root disk a user may request, in GiB
pub const MIN_ROOT_DISK_SIZE: u64 = 10;

/// Largest root disk an administrator may request, in GiB
pub const MAX_ROOT_DISK_SIZE_ADMIN: u64 = 200;

const BYTES_PER_GIB: f64 = (1u64 << 30) as f64;

/// API renames for virtual machines
pub const VM_FIELDS: FieldMap = FieldMap::new(&[
    ("displayname", "displayName"),
    ("serviceofferingid", "serviceOfferingId"),
    ("serviceofferingname", "serviceOfferingName"),
    ("securitygroup", "securityGroup"),
    ("affinitygroup", "affinityGroup"),
    ("zoneid", "zoneId"),
    ("zonename", "zoneName"),
    ("templateid", "templateId"),
    ("templatename", "templateName"),
    ("guestosid", "guestOsId"),
    ("cpunumber", "cpuNumber"),
    ("cpuspeed", "cpuSpeed"),
    ("jobid", "jobId"),
    ("cpuused", "cpuUsed"),
    ("networkkbsread", "networkKbsRead"),
    ("networkkbswrite", "networkKbsWrite"),
    ("diskkbsread", "diskKbsRead"),
    ("diskkbswrite", "diskKbsWrite"),
    ("diskioread", "diskIoRead"),
    ("diskiowrite", "diskIoWrite"),
    ("keypair", "keyPair"),
]);

/// API renames for network interfaces
pub const NIC_FIELDS: FieldMap = FieldMap::new(&[
    ("ipaddress", "ipAddress"),
    ("macaddress", "macAddress"),
    ("networkid", "networkId"),
    ("networkname", "networkName"),
    ("isdefault", "isDefault"),
]);

/// Lifecycle state reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VmState {
    /// Powered on
    Running,
    /// Powered off
    Stopped,
    /// Power-on in progress
    Starting,
    /// Power-off in progress
    Stopping,
    /// Destroyed, not yet expunged
    Destroyed,
    /// Being removed for good
    Expunging,
    /// Live migration in progress
    Migrating,
    /// Hypervisor reported a failure
    Error,
    /// State string this console does not know
    #[default]
    Unknown,
}

impl VmState {
    /// API spelling of the state
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Stopped => "Stopped",
            Self::Starting => "Starting",
            Self::Stopping => "Stopping",
            Self::Destroyed => "Destroyed",
            Self::Expunging => "Expunging",
            Self::Migrating => "Migrating",
            Self::Error => "Error",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<&str> for VmState {
    fn from(s: &str) -> Self {
        match s {
            "Running" => Self::Running,
            "Stopped" => Self::Stopped,
            "Starting" => Self::Starting,
            "Stopping" => Self::Stopping,
            "Destroyed" => Self::Destroyed,
            "Expunging" => Self::Expunging,
            "Migrating" => Self::Migrating,
            "Error" => Self::Error,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for VmState {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<VmState> for String {
    fn from(state: VmState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for VmState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Id/name reference to a security or affinity group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupRef {
    /// Group id
    pub id: String,
    /// Group name
    pub name: String,
}

/// Storage volume attached to a VM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    /// Volume id
    pub id: String,
    /// Volume name
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

/// Network interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Nic {
    /// NIC id
    pub id: String,
    /// Network id
    pub network_id: String,
    /// Network name
    pub network_name: String,
    /// IPv4 address
    pub ip_address: Option<String>,
    /// MAC address
    pub mac_address: Option<String>,
    /// Netmask
    pub netmask: Option<String>,
    /// Gateway
    pub gateway: Option<String>,
    /// Primary interface
    pub is_default: bool,
}

/// List properties the API may send as `null`
const LIST_FIELDS: [&str; 4] = ["volumes", "nic", "securityGroup", "affinityGroup"];

/// Virtual machine as shown in the console
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachine {
    /// VM id
    pub id: String,
    /// Name shown in lists
    pub display_name: String,
    /// Lifecycle state
    pub state: VmState,

    // Service offering
    /// Service offering id
    pub service_offering_id: String,
    /// Service offering name
    pub service_offering_name: String,
    /// Number of vCPUs
    pub cpu_number: u32,
    /// MHz
    pub cpu_speed: u32,
    /// MiB
    pub memory: u64,
    /// Attached volumes
    pub volumes: Vec<Volume>,

    /// Network interfaces
    pub nic: Vec<Nic>,
    /// Security groups
    pub security_group: Vec<GroupRef>,
    /// Affinity groups
    pub affinity_group: Vec<GroupRef>,

    /// Zone id
    pub zone_id: String,
    /// Zone name
    pub zone_name: String,

    /// Template id
    pub template_id: String,
    /// Template name
    pub template_name: String,
    /// Guest OS type id
    pub guest_os_id: String,

    /// Async job running against the VM
    pub job_id: Option<String>,
    /// Set locally while an action is in flight
    pub pending: bool,

    // Statistics
    /// CPU usage, as the API formats it (e.g. `"12%"`)
    pub cpu_used: Option<String>,
    /// Network KiB received
    pub network_kbs_read: u64,
    /// Network KiB sent
    pub network_kbs_write: u64,
    /// Disk KiB read
    pub disk_kbs_read: u64,
    /// Disk KiB written
    pub disk_kbs_write: u64,
    /// Disk read operations
    pub disk_io_read: u64,
    /// Disk write operations
    pub disk_io_write: u64,

    /// SSH key pair name
    pub key_pair: Option<String>,
    /// Password returned by a reset
    pub password: Option<String>,
}

impl VirtualMachine {
    /// Build from a raw API object
    ///
    /// # Errors
    /// Returns [`ModelError::NotAnObject`] if `raw` (or a NIC entry) is not an
    /// object and [`ModelError::Decode`] if a field has the wrong type.
    pub fn from_api(raw: &Value) -> Result<Self, ModelError> {
        let Value::Object(object) = raw else {
            return Err(ModelError::NotAnObject { model: "VirtualMachine" });
        };

        let mut mapped = VM_FIELDS.remap(object);

        for key in LIST_FIELDS {
            if let Some(value) = mapped.get_mut(key).filter(|v| v.is_null()) {
                *value = Value::Array(Vec::new());
            }
        }

        if let Some(Value::Array(nics)) = mapped.get_mut("nic") {
            for nic in nics.iter_mut() {
                let Value::Object(fields) = nic else {
                    return Err(ModelError::NotAnObject { model: "Nic" });
                };
                *nic = Value::Object(NIC_FIELDS.remap(fields));
            }
        }

        Ok(serde_json::from_value(Value::Object(mapped))?)
    }

    /// Actions offered in the VM menu
    #[inline]
    #[must_use]
    pub fn actions(&self) -> &'static [VmAction] {
        &VmAction::ALL
    }

    /// Actions that may be applied in the current state
    #[must_use]
    pub fn applicable_actions(&self) -> Vec<VmAction> {
        VmAction::ALL.into_iter().filter(|a| self.can_apply(*a)).collect()
    }

    /// Check whether `action` may be applied in the current state
    ///
    /// Nothing applies outside `Running`/`Stopped`. Start needs a
    /// non-running VM; stop and reboot need a non-stopped one.
    #[must_use]
    pub fn can_apply(&self, action: VmAction) -> bool {
        let state = self.state;
        if state != VmState::Running && state != VmState::Stopped {
            return false;
        }

        match action {
            VmAction::Start => state != VmState::Running,
            VmAction::Stop | VmAction::Reboot => state != VmState::Stopped,
            _ => true,
        }
    }

    /// Total size of attached volumes in GiB
    #[must_use]
    pub fn disks_size_gib(&self) -> f64 {
        let bytes: u64 = self.volumes.iter().map(|v| v.size).sum();
        bytes as f64 / BYTES_PER_GIB
    }

    /// Address of the default NIC
    #[must_use]
    pub fn primary_ip(&self) -> Option<&str> {
        self.nic
            .iter()
            .find(|n| n.is_default)
            .or_else(|| self.nic.first())
            .and_then(|n| n.ip_address.as_deref())
    }
}
