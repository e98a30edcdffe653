// Network interface models: identities, classes and per-tick counter snapshots

use std::borrow::Borrow;
use std::fmt;

use super::Counter;

/// Stable name of one interface (its adapter description). Only ever compared.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InterfaceIdentity(String);

impl InterfaceIdentity {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterfaceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for InterfaceIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InterfaceIdentity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for InterfaceIdentity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceClass {
    Wired,
    Wireless,
    Other,
}

impl InterfaceClass {
    /// Only Ethernet and Wi-Fi adapters take part in aggregation.
    pub fn is_monitored(self) -> bool {
        matches!(self, Self::Wired | Self::Wireless)
    }

    /// Best-effort guess from a kernel interface name (`eth0`, `enp3s0`, `wlan0`, ...).
    pub fn from_interface_name(name: &str) -> Self {
        if name.starts_with("wl") || name.starts_with("ath") {
            Self::Wireless
        } else if name.starts_with("en") || name.starts_with("eth") || name.starts_with("em") {
            Self::Wired
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationalState {
    Up,
    Down,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminStatus {
    Up,
    Down,
    Unknown,
}

/// One entry of the adapter inventory consulted once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
    pub description: InterfaceIdentity,
    pub class: InterfaceClass,
}

/// One row of the live interface table, captured at a single instant.
///
/// `index`, `admin_status` and `speed` (bits per second) are carried along but
/// not consumed by rate computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSnapshot {
    pub identity: InterfaceIdentity,
    pub class: InterfaceClass,
    pub oper_state: OperationalState,
    pub received_bytes: Counter,
    pub sent_bytes: Counter,
    pub index: u32,
    pub admin_status: AdminStatus,
    pub speed: u64,
}

impl InterfaceSnapshot {
    pub fn is_up(&self) -> bool {
        self.oper_state == OperationalState::Up
    }
}
