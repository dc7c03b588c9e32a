//! Deterministic SHA-256 fingerprint of UTF-8 content.
//!
//! Used both as the trace ledger's `content_hash` and as the optimistic
//! lock's comparison key. No salt; same input always yields the same
//! 64-char lowercase hex digest.

use sha2::{Digest, Sha256};

/// Fingerprint `content` as lowercase hex SHA-256.
pub fn hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Fingerprint raw bytes as lowercase hex SHA-256.
pub fn hash_bytes(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
