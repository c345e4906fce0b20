//! Pairwise content hashing.

use alloy_primitives::{keccak256, B256};

/// Computes the keccak256 of the concatenation of two 32-byte digests.
///
/// The operation is order-sensitive: `hash_pair(a, b) != hash_pair(b, a)` for
/// `a != b`. Used to fold chunk content hashes into a batch data hash and to
/// build two-level commitment structures over message data.
pub fn hash_pair(a: B256, b: B256) -> B256 {
    let mut bytes = [0u8; 64];
    bytes[..32].copy_from_slice(a.as_slice());
    bytes[32..].copy_from_slice(b.as_slice());
    keccak256(bytes)
}
