// Human-readable byte counts: B below 1 KiB, then KB, then MB, truncated to 2 decimals

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Formats bytes observed during one interval.
///
/// Kilobyte and megabyte values are floored (never rounded) at the second decimal and
/// printed without trailing zeros: 2048 -> "2 KB", 1536 -> "1.5 KB", 1500000 -> "1.43 MB".
pub fn format_rate(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{} KB", truncated_hundredths(bytes, KIB))
    } else {
        format!("{} MB", truncated_hundredths(bytes, MIB))
    }
}

fn truncated_hundredths(bytes: u64, unit: u64) -> String {
    let hundredths = u128::from(bytes) * 100 / u128::from(unit);
    let whole = hundredths / 100;
    let frac = hundredths % 100;
    if frac == 0 {
        whole.to_string()
    } else if frac % 10 == 0 {
        format!("{whole}.{}", frac / 10)
    } else {
        format!("{whole}.{frac:02}")
    }
}
