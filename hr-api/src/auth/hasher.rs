//! Credential hashing
//!
//! Unsalted single-round SHA-256, lower-case hex. Identical passwords yield
//! identical digests; stored hashes from existing deployments stay valid.

use sha2::{Digest, Sha256};

/// Digest a plaintext credential. The empty string maps to the empty string.
pub fn hash_credential(plaintext: &str) -> String {
    if plaintext.is_empty() {
        return String::new();
    }
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}
