//! VirtualMachine decoding tests against API-shaped payloads

use csc_model::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn api_vm() -> serde_json::Value {
    json!({
        "id": "8d1e",
        "displayname": "web-1",
        "state": "Stopped",
        "serviceofferingid": "so-1",
        "serviceofferingname": "Small",
        "cpunumber": 2,
        "cpuspeed": 1000,
        "memory": 2048,
        "zoneid": "z1",
        "zonename": "zone-a",
        "templateid": "t1",
        "templatename": "Ubuntu",
        "guestosid": "os-7",
        "securitygroup": [{ "id": "sg1", "name": "default" }],
        "affinitygroup": [],
        "cpuused": "12.5%",
        "networkkbsread": 10,
        "diskiowrite": 3,
        "keypair": "ops",
        "jobid": "job-9",
        "nic": [
            { "id": "n1", "networkid": "net1", "networkname": "guest", "ipaddress": "10.1.1.5", "isdefault": true }
        ],
        "hypervisor": "KVM"
    })
}

#[test]
fn test_vm_fields_remapped() {
    let vm = VirtualMachine::from_api(&api_vm()).unwrap();

    assert_eq!(vm.id, "8d1e");
    assert_eq!(vm.display_name, "web-1");
    assert_eq!(vm.state, VmState::Stopped);
    assert_eq!(vm.service_offering_name, "Small");
    assert_eq!(vm.cpu_number, 2);
    assert_eq!(vm.cpu_speed, 1000);
    assert_eq!(vm.zone_name, "zone-a");
    assert_eq!(vm.template_name, "Ubuntu");
    assert_eq!(vm.guest_os_id, "os-7");
    assert_eq!(vm.cpu_used.as_deref(), Some("12.5%"));
    assert_eq!(vm.network_kbs_read, 10);
    assert_eq!(vm.disk_io_write, 3);
    assert_eq!(vm.key_pair.as_deref(), Some("ops"));
    assert_eq!(vm.job_id.as_deref(), Some("job-9"));
    assert_eq!(
        vm.security_group,
        vec![GroupRef { id: "sg1".into(), name: "default".into() }]
    );
}

#[test]
fn test_nic_fields_remapped() {
    let vm = VirtualMachine::from_api(&api_vm()).unwrap();

    assert_eq!(vm.nic.len(), 1);
    assert_eq!(vm.nic[0].network_name, "guest");
    assert_eq!(vm.nic[0].ip_address.as_deref(), Some("10.1.1.5"));
    assert!(vm.nic[0].is_default);
    assert_eq!(vm.primary_ip(), Some("10.1.1.5"));
}

#[test]
fn test_missing_nic_defaults_empty() {
    let vm = VirtualMachine::from_api(&json!({ "id": "1", "state": "Running" })).unwrap();
    assert!(vm.nic.is_empty());
    assert_eq!(vm.primary_ip(), None);
}

#[test]
fn test_null_nic_defaults_empty() {
    let vm = VirtualMachine::from_api(&json!({ "id": "1", "state": "Running", "nic": null })).unwrap();
    assert!(vm.nic.is_empty());
    assert_eq!(vm.primary_ip(), None);
}

#[test]
fn test_null_lists_default_empty() {
    let vm = VirtualMachine::from_api(&json!({
        "id": "1",
        "state": "Stopped",
        "volumes": null,
        "securitygroup": null,
        "affinitygroup": null
    }))
    .unwrap();

    assert!(vm.volumes.is_empty());
    assert!(vm.security_group.is_empty());
    assert!(vm.affinity_group.is_empty());
    assert!(vm.disks_size_gib().abs() < f64::EPSILON);
}

#[test]
fn test_stopped_vm_applicable_actions() {
    let vm = VirtualMachine::from_api(&api_vm()).unwrap();
    assert_eq!(
        vm.applicable_actions(),
        vec![VmAction::Start, VmAction::Restore, VmAction::Destroy, VmAction::ResetPasswordFor]
    );
    assert_eq!(vm.actions().len(), 6);
}

#[test]
fn test_state_serializes_as_api_string() {
    let vm = VirtualMachine::from_api(&api_vm()).unwrap();
    let out = serde_json::to_value(&vm).unwrap();
    assert_eq!(out["state"], "Stopped");
    assert_eq!(out["displayName"], "web-1");
}

proptest! {
    #[test]
    fn prop_only_running_or_stopped_allow_actions(state in "[A-Za-z]{0,12}", idx in 0..6usize) {
        let vm = VirtualMachine::from_api(&json!({ "state": state })).unwrap();
        let action = VmAction::ALL[idx];
        if vm.can_apply(action) {
            prop_assert!(matches!(vm.state, VmState::Running | VmState::Stopped));
        }
    }
}
