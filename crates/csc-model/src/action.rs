//! VM actions and their UI descriptors

use serde::Serialize;
use std::str::FromStr;

/// Lifecycle command that can be issued against a VM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VmAction {
    /// Power on
    Start,
    /// Power off
    Stop,
    /// Restart
    Reboot,
    /// Reinstall from template
    Restore,
    /// Destroy
    Destroy,
    /// Reset the guest password (command name is fixed by the API)
    ResetPasswordFor,
}

impl VmAction {
    /// All actions in menu order
    pub const ALL: [VmAction; 6] = [
        Self::Start,
        Self::Stop,
        Self::Reboot,
        Self::Restore,
        Self::Destroy,
        Self::ResetPasswordFor,
    ];

    /// API command name
    #[must_use]
    pub const fn command_name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Reboot => "reboot",
            Self::Restore => "restore",
            Self::Destroy => "destroy",
            Self::ResetPasswordFor => "resetPasswordFor",
        }
    }

    /// Material icon shown next to the action
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Start => "play_arrow",
            Self::Stop => "stop",
            Self::Reboot => "replay",
            Self::Restore => "settings_backup_restore",
            Self::Destroy => "close",
            Self::ResetPasswordFor => "vpn_key",
        }
    }

    /// Labels and message keys derived from the command name
    #[must_use]
    pub fn descriptor(self) -> ActionDescriptor {
        let command = self.command_name();
        let caps = command.to_uppercase();

        let mut chars = command.chars();
        let name = chars
            .next()
            .map(|first| first.to_uppercase().chain(chars).collect::<String>())
            .unwrap_or_default();

        ActionDescriptor {
            name,
            command_name: command,
            name_lower: command.to_lowercase(),
            vm_state_on_action: format!("{caps}_IN_PROGRESS"),
            vm_action_completed: format!("{caps}_DONE"),
            icon: self.icon(),
            confirm_message: format!("CONFIRM_VM_{caps}"),
            progress_message: format!("VM_{caps}_IN_PROGRESS"),
            success_message: format!("{caps}_DONE"),
            name_caps: caps,
        }
    }
}

impl std::fmt::Display for VmAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.command_name())
    }
}

/// Unrecognised action command name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vm action: '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for VmAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.command_name() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Labels and translation keys for rendering an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    /// Capitalized name, e.g. `Start`
    pub name: String,
    /// API command name
    pub command_name: &'static str,
    /// Lower-case name
    pub name_lower: String,
    /// Upper-case name
    pub name_caps: String,
    /// Message key for the in-progress state
    pub vm_state_on_action: String,
    /// Message key for completion
    pub vm_action_completed: String,
    /// Material icon
    pub icon: &'static str,
    /// Message key of the confirmation dialog
    pub confirm_message: String,
    /// Message key while in progress
    pub progress_message: String,
    /// Message key on success
    pub success_message: String,
}
