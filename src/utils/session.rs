//! Session tokens.
//!
//! The default token is a base-36 random fragment followed by a base-36
//! millisecond timestamp. It is a deduplication hint, not an identity:
//! anyone can mint one. [`SessionScheme::Uuid`] trades the short form for
//! a plain UUID v4.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use uuid::Uuid;

/// Bits of randomness kept for the compact fragment
const RANDOM_BITS: u32 = 52;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SessionScheme {
    /// Base-36 random fragment + base-36 timestamp (default)
    #[default]
    Compact,
    /// Hyphenated UUID v4
    Uuid,
}

impl SessionScheme {
    pub(crate) fn generate(self) -> String {
        match self {
            SessionScheme::Compact => generate_session_id(),
            SessionScheme::Uuid => Uuid::new_v4().to_string(),
        }
    }
}

pub(crate) fn generate_session_id() -> String {
    // Low 52 bits of a v4 UUID carry no version/variant bits.
    let random = (Uuid::new_v4().as_u128() as u64) & ((1u64 << RANDOM_BITS) - 1);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut id = to_base36(random);
    id.push_str(&to_base36(millis));
    id
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::with_capacity(13);
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn base36_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn compact_ids_are_lowercase_alphanumeric() {
        let id = generate_session_id();
        assert!(id.len() >= 9, "too short: {id}");
        assert!(
            id.chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn compact_ids_rarely_collide() {
        let ids: HashSet<String> = (0..2000).map(|_| generate_session_id()).collect();
        assert_eq!(ids.len(), 2000);
    }

    #[test]
    fn uuid_scheme_produces_v4() {
        let id = SessionScheme::Uuid.generate();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn default_scheme_is_compact() {
        assert_eq!(SessionScheme::default(), SessionScheme::Compact);
        assert!(!SessionScheme::default().generate().contains('-'));
    }
}
