//! The volume generation transform.

/// Concatenate `unit` with itself `times` times, then trim surrounding
/// whitespace once.
///
/// The accumulator is pre-sized to `times * unit.len()` so each append is
/// amortized constant; replication counts in the millions must not degrade
/// into quadratic re-copying.
pub fn replicate(unit: &str, times: usize) -> String {
    let mut volume_data = String::with_capacity(unit.len() * times);

    for _ in 0..times {
        volume_data.push_str(unit);
    }

    volume_data.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replicate_zero_times_is_empty() {
        assert_eq!(replicate("a,b\n", 0), "");
    }

    #[test]
    fn test_replicate_once_is_trimmed_unit() {
        assert_eq!(replicate("a,b\n", 1), "a,b");
        assert_eq!(replicate("  spaced  ", 1), "spaced");
    }

    #[test]
    fn test_replicate_preserves_order() {
        assert_eq!(replicate("a,b\n", 2), "a,b\na,b");
        assert_eq!(replicate("x", 5), "xxxxx");
    }

    #[test]
    fn test_replicate_length() {
        let unit = "12345,abcde\n";
        let times = 1000;

        let volume_data = replicate(unit, times);

        // Full length minus the single trailing terminator trimmed off.
        assert_eq!(volume_data.len(), times * unit.len() - 1);
    }

    #[test]
    fn test_trim_is_idempotent() {
        let volume_data = replicate(" a,b \n", 3);

        assert_eq!(volume_data, volume_data.trim());
    }
}
