use sha2::{Digest, Sha256};

/// Hex SHA-256 of a rendered RGBA frame.
///
/// Render output is deterministic, so tests can pin a frame with a single
/// string instead of checking in image assets.
pub fn frame_hash(frame: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(frame);
    hex::encode(hasher.finalize())
}
