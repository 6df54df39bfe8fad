//! Record identifier generation.

use chrono::Utc;
use rand::Rng;

/// Produce a new record identifier: millisecond timestamp in base 36 plus a
/// six-character random base-36 suffix.
///
/// Unique with very high probability at interactive write rates. Two calls in
/// the same millisecond share the time component, so uniqueness then rests on
/// the suffix alone — adequate here, but callers needing a hard guarantee
/// should substitute a cryptographically random fixed-length identifier.
pub fn new_record_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let suffix: u32 = rand::thread_rng().gen_range(0..36u32.pow(6));
    format!("{}{:0>6}", to_base36(millis), to_base36(suffix as u64))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| new_record_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_are_lowercase_base36() {
        let id = new_record_id();
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        // 8 chars of timestamp (until 2059) + 6 chars of suffix
        assert_eq!(id.len(), 14);
    }

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
