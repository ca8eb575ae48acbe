//! crates/rb_io/src/hasher.rs
//!
//! SHA-256 over raw artifact bytes. Digests are lowercase 64-hex, compared
//! against the optional `inputs_sha256` block of the dashboard manifest.

#![forbid(unsafe_code)]

use sha2::{Digest, Sha256};

use crate::IoError;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// `true` for exactly 64 lowercase hex characters.
#[inline]
pub fn is_lower_hex_64(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Hash `bytes` and, when `expected` is given, require an exact match.
/// Returns the computed digest either way.
pub fn verify_digest(location: &str, bytes: &[u8], expected: Option<&str>) -> Result<String, IoError> {
    let actual = sha256_hex(bytes);
    match expected {
        Some(exp) if exp != actual => Err(IoError::Digest {
            location: location.to_string(),
            expected: exp.to_string(),
            actual,
        }),
        _ => Ok(actual),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_encoding_is_lowercase() {
        let h = sha256_hex(b"abc");
        assert_eq!(h, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
        assert!(is_lower_hex_64(&h));
    }

    #[test]
    fn hex_shape_check() {
        assert!(!is_lower_hex_64("ABC"));
        assert!(!is_lower_hex_64(&"A".repeat(64)));
        assert!(is_lower_hex_64(&"a".repeat(64)));
    }

    #[test]
    fn mismatch_is_reported() {
        let err = verify_digest("dist/coverage.json", b"{}", Some(&"0".repeat(64))).unwrap_err();
        assert!(matches!(err, IoError::Digest { .. }));
        let ok = verify_digest("dist/coverage.json", b"abc", None).unwrap();
        assert_eq!(ok, sha256_hex(b"abc"));
    }
}
