use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Salted one-way hash in the `"<salt_hex>$<digest_hex>"` format: 16 random
/// salt bytes, SHA-256 over the raw password bytes followed by the salt's hex
/// representation.
pub fn hash_password(plain: &str) -> String {
    let mut salt = [0u8; 16];
    OsRng.fill_bytes(&mut salt);
    let salt_hex = hex::encode(salt);
    let digest = digest_hex(plain, &salt_hex);
    format!("{salt_hex}${digest}")
}

/// Fails closed: an empty stored value or one without a `$` separator never
/// verifies.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex_stored)) = stored.split_once('$') else {
        return false;
    };
    digest_hex(plain, salt_hex) == digest_hex_stored
}

fn digest_hex(plain: &str, salt_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    hasher.update(salt_hex.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password);
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-horse-battery-staple");
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn verify_fails_closed_without_separator() {
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "not-a-valid-hash"));
        assert!(!verify_password("anything", "deadbeefdeadbeef"));
    }

    #[test]
    fn hash_format() {
        let hash = hash_password("pw");
        let (salt_hex, digest_hex) = hash.split_once('$').expect("separator");
        assert_eq!(salt_hex.len(), 32); // 16 salt bytes
        assert_eq!(digest_hex.len(), 64); // SHA-256
        assert!(salt_hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(digest_hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_covers_password_and_salt_hex() {
        // Recompute a stored value by hand to pin the digest input ordering.
        let stored = hash_password("pw");
        let (salt_hex, digest) = stored.split_once('$').unwrap();
        let mut hasher = Sha256::new();
        hasher.update(b"pw");
        hasher.update(salt_hex.as_bytes());
        assert_eq!(hex::encode(hasher.finalize()), digest);
    }

    #[test]
    fn salts_differ_between_calls() {
        assert_ne!(hash_password("pw"), hash_password("pw"));
    }
}
