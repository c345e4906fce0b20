//! Chunk content hashing.

use crate::{block::BlockContext, error::DecodingError};

use alloy_primitives::{bytes::BufMut, keccak256, B256};
use bridge_primitives::L2BlockData;

/// Computes the content hash of a chunk.
///
/// The hash is the keccak256 of `total_l1_messages_popped_before` as 8 big
/// endian bytes followed by the [`BlockContext`] encoding of every block in
/// order. The popped-before prefix ties the hash to the global L1-message
/// ordering, so two chunks with identical blocks but different positions in
/// the message queue hash differently.
///
/// Errors if `blocks` is empty or the block numbers are not a gap-free
/// ascending sequence.
pub fn chunk_hash(
    blocks: &[L2BlockData],
    total_l1_messages_popped_before: u64,
) -> Result<B256, DecodingError> {
    if blocks.is_empty() {
        return Err(DecodingError::EmptyChunk)
    }
    if !blocks.windows(2).all(|w| w[1].number == w[0].number + 1) {
        return Err(DecodingError::NonContiguousBlocks)
    }

    let mut buf =
        Vec::with_capacity(size_of::<u64>() + blocks.len() * BlockContext::BYTES_LENGTH);
    buf.put_slice(&total_l1_messages_popped_before.to_be_bytes());
    for block in blocks {
        buf.put_slice(&BlockContext::from(block).to_be_bytes());
    }

    Ok(keccak256(buf))
}
