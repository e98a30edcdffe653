// Linux-specific helpers: interface class, state, flags, index and speed from /sys/class/net.

use crate::models::{AdminStatus, InterfaceClass, OperationalState};
use std::path::Path;

#[cfg(target_os = "linux")]
const SYS_CLASS_NET: &str = "/sys/class/net";

/// ARPHRD_ETHER, shared by Ethernet and most Wi-Fi drivers.
const ARPHRD_ETHER: u32 = 1;
const IFF_UP: u32 = 0x1;

fn read_attr(root: &Path, interface_name: &str, attr: &str) -> Option<String> {
    let content = std::fs::read_to_string(root.join(interface_name).join(attr)).ok()?;
    Some(content.trim().to_string())
}

/// Wireless if the interface has a `wireless`/`phy80211` node; wired if it is an
/// Ethernet-type device backed by real hardware (`device` link). Bridges, veths,
/// tunnels and loopback end up as `Other`.
pub(super) fn read_interface_class_at(root: &Path, interface_name: &str) -> Option<InterfaceClass> {
    let dir = root.join(interface_name);
    if !dir.is_dir() {
        return None;
    }
    if dir.join("wireless").exists() || dir.join("phy80211").exists() {
        return Some(InterfaceClass::Wireless);
    }
    let arp_type = read_attr(root, interface_name, "type")?.parse::<u32>().ok()?;
    if arp_type == ARPHRD_ETHER && dir.join("device").exists() {
        Some(InterfaceClass::Wired)
    } else {
        Some(InterfaceClass::Other)
    }
}

/// `operstate` "up" is up; "unknown" counts as up when the carrier is present
/// (drivers that never report operstate).
pub(super) fn read_oper_state_at(root: &Path, interface_name: &str) -> Option<OperationalState> {
    let state = read_attr(root, interface_name, "operstate")?;
    let state = match state.as_str() {
        "up" => OperationalState::Up,
        "unknown" => {
            if read_attr(root, interface_name, "carrier").as_deref() == Some("1") {
                OperationalState::Up
            } else {
                OperationalState::Unknown
            }
        }
        "down" | "lowerlayerdown" | "notpresent" | "dormant" | "testing" => {
            OperationalState::Down
        }
        _ => OperationalState::Unknown,
    };
    Some(state)
}

pub(super) fn read_admin_status_at(root: &Path, interface_name: &str) -> Option<AdminStatus> {
    let flags = read_attr(root, interface_name, "flags")?;
    let flags = u32::from_str_radix(flags.trim_start_matches("0x"), 16).ok()?;
    Some(if flags & IFF_UP != 0 {
        AdminStatus::Up
    } else {
        AdminStatus::Down
    })
}

pub(super) fn read_ifindex_at(root: &Path, interface_name: &str) -> Option<u32> {
    read_attr(root, interface_name, "ifindex")?.parse().ok()
}

/// Link speed in bits per second, or 0 if unavailable (virtual or disconnected links report -1).
pub(super) fn read_speed_at(root: &Path, interface_name: &str) -> u64 {
    if let Some(content) = read_attr(root, interface_name, "speed")
        && let Ok(mbps) = content.parse::<i64>()
        && mbps > 0
    {
        return (mbps as u64) * 1_000_000;
    }
    0
}

/// sysfs network class directory; None off Linux.
fn sys_root() -> Option<&'static Path> {
    #[cfg(target_os = "linux")]
    {
        Some(Path::new(SYS_CLASS_NET))
    }
    #[cfg(not(target_os = "linux"))]
    None
}

pub(super) fn read_interface_class(interface_name: &str) -> Option<InterfaceClass> {
    read_interface_class_at(sys_root()?, interface_name)
}

pub(super) fn read_oper_state(interface_name: &str) -> Option<OperationalState> {
    read_oper_state_at(sys_root()?, interface_name)
}

pub(super) fn read_admin_status(interface_name: &str) -> Option<AdminStatus> {
    read_admin_status_at(sys_root()?, interface_name)
}

pub(super) fn read_ifindex(interface_name: &str) -> Option<u32> {
    read_ifindex_at(sys_root()?, interface_name)
}

pub(super) fn get_interface_speed(interface_name: &str) -> u64 {
    sys_root().map_or(0, |root| read_speed_at(root, interface_name))
}
