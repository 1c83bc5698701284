//! String digests used as cache keys.

use md5::{Digest, Md5};

/// Lowercase hex MD5, the legacy key format for URLs and local paths.
pub fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Lowercase hex BLAKE3 of raw bytes (64 chars)
pub fn blake3_hex(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
