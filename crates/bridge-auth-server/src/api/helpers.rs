//! Shared API helper functions.

/// Hash a sensitive value (token, email) for logging. Eight bytes of the
/// digest are enough to correlate log lines without disclosing the value.
pub fn hash_for_log(value: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}
