// Formatter thresholds and truncation

use netspeed::format::format_rate;

#[test]
fn test_bytes_below_one_kilobyte() {
    assert_eq!(format_rate(0), "0 B");
    assert_eq!(format_rate(512), "512 B");
    assert_eq!(format_rate(1023), "1023 B");
}

#[test]
fn test_kilobytes_drop_trailing_zeros() {
    assert_eq!(format_rate(1024), "1 KB");
    assert_eq!(format_rate(2048), "2 KB");
    assert_eq!(format_rate(1536), "1.5 KB");
    assert_eq!(format_rate(1100), "1.07 KB");
}

#[test]
fn test_megabytes() {
    assert_eq!(format_rate(1_048_576), "1 MB");
    assert_eq!(format_rate(1_048_576 * 10 + 524_288), "10.5 MB");
}

#[test]
fn test_truncates_instead_of_rounding() {
    // 1500000 / 1048576 = 1.4305...
    assert_eq!(format_rate(1_500_000), "1.43 MB");
    // 1047552 / 1024 = 1022.999..., rounding would give "1023 KB"
    assert_eq!(format_rate(1_048_575), "1023.99 KB");
    // 2047 / 1024 = 1.999...
    assert_eq!(format_rate(2047), "1.99 KB");
}

#[test]
fn test_largest_counter_delta() {
    assert_eq!(format_rate(u64::from(u32::MAX)), "4095.99 MB");
}
