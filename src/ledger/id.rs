use chrono::{DateTime, Utc};

const SUFFIX_LEN: usize = 11;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Base-36 millisecond timestamp followed by a random base-36 suffix.
/// Unique in practice, not by construction.
pub(crate) fn generate_id(now: DateTime<Utc>) -> String {
    let millis = u128::try_from(now.timestamp_millis()).unwrap_or(0);
    let random = to_base36(uuid::Uuid::new_v4().as_u128());
    // Low digits only: the high bits of a v4 UUID carry version markers.
    let suffix = &random[random.len().saturating_sub(SUFFIX_LEN)..];
    format!("{}{suffix}", to_base36(millis))
}

fn to_base36(mut n: u128) -> String {
    if n == 0 {
        return "0".into();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn test_id_starts_with_timestamp() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let id = generate_id(now);
        assert!(id.starts_with("loyw3v28"));
        assert!(id.len() > "loyw3v28".len());
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_ids_differ_within_same_millisecond() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let a = generate_id(now);
        let b = generate_id(now);
        assert_ne!(a, b);
    }
}
