use super::{L2BlockData, ProvingStatus};
use alloy_primitives::B256;

/// A contiguous run of L2 blocks to be aggregated into one commitment unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    /// The blocks of the chunk, in ascending block-number order.
    pub blocks: Vec<L2BlockData>,
}

impl Chunk {
    /// Returns a new instance of a [`Chunk`].
    pub const fn new(blocks: Vec<L2BlockData>) -> Self {
        Self { blocks }
    }

    /// Returns the number of the first block in the chunk, if any.
    pub fn start_block_number(&self) -> Option<u64> {
        self.blocks.first().map(|b| b.number)
    }

    /// Returns the number of the last block in the chunk, if any.
    pub fn end_block_number(&self) -> Option<u64> {
        self.blocks.last().map(|b| b.number)
    }

    /// Returns the total number of L1 messages popped by the chunk.
    pub fn l1_message_count(&self) -> u64 {
        self.blocks.iter().map(|b| b.l1_message_count as u64).sum()
    }

    /// Returns true if the block numbers form a gap-free ascending sequence.
    pub fn is_contiguous(&self) -> bool {
        self.blocks.windows(2).all(|w| w[1].number == w[0].number + 1)
    }
}

/// A persisted chunk: a claimed range of L2 blocks with its content hash and
/// proving lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkData {
    /// The index of the chunk.
    pub index: u64,
    /// The content hash of the chunk.
    pub hash: B256,
    /// The number of the first block covered by the chunk.
    pub start_block_number: u64,
    /// The number of the last block covered by the chunk.
    pub end_block_number: u64,
    /// The total number of L1 messages popped by all strictly earlier chunks.
    pub total_l1_messages_popped_before: u64,
    /// The number of L1 messages popped by the chunk.
    pub l1_message_count: u64,
    /// The proving status of the chunk.
    pub proving_status: ProvingStatus,
    /// The hash of the batch that has claimed the chunk, if any.
    pub batch_hash: Option<B256>,
}
