use alloy_primitives::{Bytes, B256, U256};

/// Information about a block.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BlockInfo {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
}

impl BlockInfo {
    /// Returns a new instance of [`BlockInfo`].
    pub const fn new(number: u64, hash: B256) -> Self {
        Self { number, hash }
    }
}

/// A fetched L2 block, stored before aggregation into a chunk.
///
/// `payload` holds the raw transaction/trace bytes of the block in their
/// serialized form. The remaining fields are the block attributes covered by
/// the chunk content hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct L2BlockData {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
    /// The block timestamp.
    pub timestamp: u64,
    /// The block base fee.
    pub base_fee: U256,
    /// The block gas limit.
    pub gas_limit: u64,
    /// The raw transaction/trace payload of the block.
    pub payload: Bytes,
    /// The number of transactions in the block.
    pub transaction_count: u16,
    /// The number of L1-originated messages included in the block.
    pub l1_message_count: u16,
}

impl L2BlockData {
    /// Returns the [`BlockInfo`] for the block.
    pub const fn block_info(&self) -> BlockInfo {
        BlockInfo { number: self.number, hash: self.hash }
    }
}
