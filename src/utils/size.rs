//! Byte-size formatting helpers.
//!
//! This module turns raw byte counts into the short, binary-scaled strings
//! used throughout the report (e.g. `"1.20MB"`), and computes the share of a
//! total that a single value represents.

/// Unit prefixes in scaling order. Scaling stops at the last entry.
const UNITS: [&str; 6] = ["", "K", "M", "G", "T", "P"];

/// Scaling factor between two consecutive units.
const FACTOR: f64 = 1024.0;

/// Scale a byte count to its most readable binary unit.
///
/// The value is divided by 1024 while it stays at or above 1024, up to the
/// petabyte unit. Anything larger than 1024 PB is still reported in PB.
/// The result always carries exactly two decimal digits followed by the
/// unit prefix and a literal `B`.
///
/// # Examples
///
/// ```
/// # use sysprobe::utils::scale_bytes;
/// assert_eq!(scale_bytes(512), "512.00B");
/// assert_eq!(scale_bytes(1_253_656), "1.20MB");
/// assert_eq!(scale_bytes(1_253_656_678), "1.17GB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn scale_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= FACTOR && unit < UNITS.len() - 1 {
        value /= FACTOR;
        unit += 1;
    }

    format!("{value:.2}{}B", UNITS[unit])
}

/// Compute `part` as a percentage of `total`.
///
/// A zero `total` yields `0.0` instead of dividing by zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    part as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_bytes_base_unit() {
        assert_eq!(scale_bytes(0), "0.00B");
        assert_eq!(scale_bytes(1), "1.00B");
        assert_eq!(scale_bytes(512), "512.00B");
        assert_eq!(scale_bytes(1023), "1023.00B");
    }

    #[test]
    fn test_scale_bytes_unit_boundaries() {
        assert_eq!(scale_bytes(1024), "1.00KB");
        assert_eq!(scale_bytes(1024 * 1024), "1.00MB");
        assert_eq!(scale_bytes(1024 * 1024 * 1024), "1.00GB");
        assert_eq!(scale_bytes(1024_u64.pow(4)), "1.00TB");
        assert_eq!(scale_bytes(1024_u64.pow(5)), "1.00PB");
    }

    #[test]
    fn test_scale_bytes_reference_values() {
        assert_eq!(scale_bytes(1_253_656), "1.20MB");
        assert_eq!(scale_bytes(1_253_656_678), "1.17GB");
        assert_eq!(scale_bytes(1536), "1.50KB");
    }

    #[test]
    fn test_scale_bytes_just_below_next_unit() {
        // 1023.999 KB rounds up in the display but stays in the KB unit
        assert_eq!(scale_bytes(1024 * 1024 - 1), "1024.00KB");
    }

    #[test]
    fn test_scale_bytes_caps_at_petabytes() {
        assert_eq!(scale_bytes(1024_u64.pow(5) * 2048), "2048.00PB");
        assert!(scale_bytes(u64::MAX).ends_with("PB"));
    }

    #[test]
    fn test_scale_bytes_always_ends_with_b() {
        for bytes in [0, 7, 999, 4096, 10_000_000, u64::MAX / 3] {
            assert!(scale_bytes(bytes).ends_with('B'));
        }
    }

    #[test]
    fn test_percentage() {
        assert!((percentage(300, 400) - 75.0).abs() < f64::EPSILON);
        assert!((percentage(100, 400) - 25.0).abs() < f64::EPSILON);
        assert!((percentage(5, 5) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert!(percentage(0, 0).abs() < f64::EPSILON);
        assert!(percentage(10, 0).abs() < f64::EPSILON);
    }
}
