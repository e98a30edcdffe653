// Windows IP Helper API backend: GetAdaptersInfo inventory and GetIfTable counters

use super::InterfaceSource;
use crate::models::*;
use crate::query::QueryError;
use std::ffi::CStr;

use windows::Win32::Foundation::BOOL;
use windows::Win32::NetworkManagement::IpHelper::{
    GetAdaptersInfo, GetIfTable, IF_OPER_STATUS_DISCONNECTED, IF_OPER_STATUS_NON_OPERATIONAL,
    IF_OPER_STATUS_OPERATIONAL, IF_OPER_STATUS_UNREACHABLE, INTERNAL_IF_OPER_STATUS,
    IP_ADAPTER_INFO, MIB_IFROW, MIB_IFTABLE,
};

const NO_ERROR: u32 = 0;
const ERROR_NOT_ENOUGH_MEMORY: u32 = 8;
const ERROR_BUFFER_OVERFLOW: u32 = 111;
const ERROR_INSUFFICIENT_BUFFER: u32 = 122;
const ERROR_NO_DATA: u32 = 232;

const MIB_IF_TYPE_ETHERNET: u32 = 6;
const IF_TYPE_IEEE80211: u32 = 71;

const MIB_IF_ADMIN_STATUS_UP: u32 = 1;
const MIB_IF_ADMIN_STATUS_DOWN: u32 = 2;

/// Queries the IP Helper API into buffers sized from the caller's hint.
#[derive(Debug, Default)]
pub struct IpHelperSource;

impl IpHelperSource {
    pub fn new() -> Self {
        Self
    }
}

/// 8-byte aligned zeroed buffer of at least `size` bytes.
fn query_buffer(size: usize) -> Result<Vec<u64>, QueryError> {
    let words = size.div_ceil(8).max(1);
    let mut buf = Vec::new();
    buf.try_reserve_exact(words)
        .map_err(|_| QueryError::AllocationFailure(size))?;
    buf.resize(words, 0);
    Ok(buf)
}

fn buffer_len(buf: &[u64]) -> u32 {
    u32::try_from(std::mem::size_of_val(buf)).unwrap_or(u32::MAX)
}

fn status_to_result(api: &str, code: u32, required: u32) -> Result<(), QueryError> {
    match code {
        NO_ERROR => Ok(()),
        ERROR_BUFFER_OVERFLOW | ERROR_INSUFFICIENT_BUFFER => Err(QueryError::BufferTooSmall {
            required: required as usize,
        }),
        ERROR_NOT_ENOUGH_MEMORY => Err(QueryError::AllocationFailure(required as usize)),
        other => Err(QueryError::Failure(format!("{api} returned error code {other}"))),
    }
}

/// NUL-terminated ANSI text out of a fixed-size field.
fn ansi_field(ptr: *const u8, len: usize) -> String {
    // SAFETY: callers pass a pointer/length pair describing a field of a live struct.
    let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
    match CStr::from_bytes_until_nul(bytes) {
        Ok(s) => s.to_string_lossy().into_owned(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn classify(if_type: u32) -> InterfaceClass {
    match if_type {
        MIB_IF_TYPE_ETHERNET => InterfaceClass::Wired,
        IF_TYPE_IEEE80211 => InterfaceClass::Wireless,
        _ => InterfaceClass::Other,
    }
}

fn oper_state(status: INTERNAL_IF_OPER_STATUS) -> OperationalState {
    if status == IF_OPER_STATUS_OPERATIONAL {
        OperationalState::Up
    } else if status == IF_OPER_STATUS_NON_OPERATIONAL
        || status == IF_OPER_STATUS_UNREACHABLE
        || status == IF_OPER_STATUS_DISCONNECTED
    {
        OperationalState::Down
    } else {
        OperationalState::Unknown
    }
}

fn admin_status(status: u32) -> AdminStatus {
    match status {
        MIB_IF_ADMIN_STATUS_UP => AdminStatus::Up,
        MIB_IF_ADMIN_STATUS_DOWN => AdminStatus::Down,
        _ => AdminStatus::Unknown,
    }
}

fn snapshot_from_row(row: &MIB_IFROW) -> InterfaceSnapshot {
    let descr_len = (row.dwDescrLen as usize).min(row.bDescr.len());
    InterfaceSnapshot {
        identity: InterfaceIdentity::new(ansi_field(row.bDescr.as_ptr(), descr_len)),
        class: classify(row.dwType),
        oper_state: oper_state(row.dwOperStatus),
        received_bytes: row.dwInOctets,
        sent_bytes: row.dwOutOctets,
        index: row.dwIndex,
        admin_status: admin_status(row.dwAdminStatus),
        speed: u64::from(row.dwSpeed),
    }
}

impl InterfaceSource for IpHelperSource {
    fn adapter_inventory(&self, size_hint: usize) -> Result<Vec<AdapterInfo>, QueryError> {
        let mut buf = query_buffer(size_hint)?;
        let mut size = buffer_len(&buf);
        let head = buf.as_mut_ptr().cast::<IP_ADAPTER_INFO>();

        // SAFETY: `head` points at `size` writable bytes owned by `buf`.
        let code = unsafe { GetAdaptersInfo(Some(head), &mut size) };
        if code == ERROR_NO_DATA {
            return Ok(Vec::new());
        }
        status_to_result("GetAdaptersInfo", code, size)?;

        let mut adapters = Vec::new();
        let mut cursor: *const IP_ADAPTER_INFO = head;
        // SAFETY: on success the buffer holds a linked list whose `Next` pointers stay
        // inside `buf`, terminated by null.
        while let Some(info) = unsafe { cursor.as_ref() } {
            adapters.push(AdapterInfo {
                description: InterfaceIdentity::new(ansi_field(
                    info.Description.as_ptr().cast::<u8>(),
                    info.Description.len(),
                )),
                class: classify(info.Type),
            });
            cursor = info.Next;
        }
        tracing::trace!(adapters = adapters.len(), "GetAdaptersInfo");
        Ok(adapters)
    }

    fn interface_table(&self, size_hint: usize) -> Result<Vec<InterfaceSnapshot>, QueryError> {
        let mut buf = query_buffer(size_hint.max(std::mem::size_of::<MIB_IFTABLE>()))?;
        let mut size = buffer_len(&buf);
        let table = buf.as_mut_ptr().cast::<MIB_IFTABLE>();

        // SAFETY: `table` points at `size` writable bytes owned by `buf`.
        let code = unsafe { GetIfTable(Some(table), &mut size, BOOL::from(true)) };
        status_to_result("GetIfTable", code, size)?;

        // SAFETY: on success the buffer starts with a MIB_IFTABLE followed by
        // `dwNumEntries` rows.
        let rows = unsafe {
            let table = &*table;
            std::slice::from_raw_parts(table.table.as_ptr(), table.dwNumEntries as usize)
        };
        Ok(rows.iter().map(snapshot_from_row).collect())
    }
}
