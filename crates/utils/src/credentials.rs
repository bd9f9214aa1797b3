use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the plaintext, the format stored in the credential records.
///
/// Unsalted and single-round so the seeded demo credentials keep working.
pub fn hash_password(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    hash_password(plaintext).eq_ignore_ascii_case(stored_hash)
}
