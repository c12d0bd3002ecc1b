//! Loggable fingerprint of the session signing key.
//!
//! Operators compare fingerprints across instances to confirm they share a
//! key without the key material ever reaching the logs.

use std::fmt;

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First eight bytes of the SHA-256 of the signing key, hex encoded.
///
/// # Examples
/// ```
/// use actix_web::cookie::Key;
/// use portal::inbound::http::session_config::KeyFingerprint;
///
/// let fp = KeyFingerprint::of(&Key::derive_from(&[7; 64]));
/// assert_eq!(fp.to_string().len(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFingerprint(String);

impl KeyFingerprint {
    #[must_use]
    pub fn of(key: &Key) -> Self {
        let digest = Sha256::digest(key.signing());
        let prefix = digest.get(..FINGERPRINT_BYTES).unwrap_or_default();
        Self(hex::encode(prefix))
    }
}

impl fmt::Display for KeyFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn stable_for_the_same_key() {
        let key = Key::derive_from(&[b'a'; 64]);
        assert_eq!(KeyFingerprint::of(&key), KeyFingerprint::of(&key));
    }

    #[rstest]
    fn distinguishes_keys() {
        assert_ne!(
            KeyFingerprint::of(&Key::derive_from(&[b'a'; 64])),
            KeyFingerprint::of(&Key::derive_from(&[b'b'; 64]))
        );
    }

    #[rstest]
    fn is_sixteen_lowercase_hex_digits() {
        let rendered = KeyFingerprint::of(&Key::generate()).to_string();
        assert_eq!(rendered.len(), FINGERPRINT_BYTES * 2);
        assert!(
            rendered
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }
}
