// Interface counters via sysinfo, with Linux sysfs for class and state

use super::{InterfaceSource, linux};
use crate::models::*;
use crate::query::QueryError;
use std::sync::Mutex;
use sysinfo::Networks;

/// Portable backend. Neither query has a caller-sized buffer, so the size hint is
/// ignored and `BufferTooSmall` never comes back.
pub struct SysinfoSource {
    networks: Mutex<Networks>,
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSource {
    pub fn new() -> Self {
        Self {
            networks: Mutex::new(Networks::new_with_refreshed_list()),
        }
    }

    fn refreshed<T>(&self, f: impl FnOnce(&Networks) -> T) -> Result<T, QueryError> {
        let mut networks = self
            .networks
            .lock()
            .map_err(|e| QueryError::Failure(format!("sysinfo networks lock poisoned: {e}")))?;
        networks.refresh(true);
        Ok(f(&networks))
    }
}

fn classify(name: &str) -> InterfaceClass {
    linux::read_interface_class(name).unwrap_or_else(|| InterfaceClass::from_interface_name(name))
}

impl InterfaceSource for SysinfoSource {
    fn adapter_inventory(&self, _size_hint: usize) -> Result<Vec<AdapterInfo>, QueryError> {
        self.refreshed(|networks| {
            let mut adapters: Vec<AdapterInfo> = networks
                .list()
                .keys()
                .map(|name| AdapterInfo {
                    description: InterfaceIdentity::new(name.as_str()),
                    class: classify(name),
                })
                .collect();
            adapters.sort_by(|a, b| a.description.cmp(&b.description));
            adapters
        })
    }

    fn interface_table(&self, _size_hint: usize) -> Result<Vec<InterfaceSnapshot>, QueryError> {
        self.refreshed(|networks| {
            let mut table: Vec<InterfaceSnapshot> = networks
                .list()
                .iter()
                .map(|(name, data)| InterfaceSnapshot {
                    identity: InterfaceIdentity::new(name.as_str()),
                    class: classify(name),
                    // Interfaces sysinfo lists exist; without sysfs there is nothing better to go on.
                    oper_state: linux::read_oper_state(name).unwrap_or(OperationalState::Up),
                    // Low 32 bits: deltas stay exact modulo 2^32.
                    received_bytes: data.total_received() as Counter,
                    sent_bytes: data.total_transmitted() as Counter,
                    index: linux::read_ifindex(name).unwrap_or(0),
                    admin_status: linux::read_admin_status(name).unwrap_or(AdminStatus::Unknown),
                    speed: linux::get_interface_speed(name),
                })
                .collect();
            table.sort_by(|a, b| a.identity.cmp(&b.identity));
            table
        })
    }
}
