//! Typed decoding of the batch-commitment entry points.

use super::L1AbiError;

use alloy_primitives::hex;
use alloy_sol_types::{sol, SolCall};

sol! {
    /// The fixed-width context of one L2 block as committed on L1.
    #[derive(Debug)]
    struct BlockContext {
        bytes32 blockHash;
        bytes32 parentHash;
        uint64 blockNumber;
        uint64 timestamp;
        uint256 baseFee;
        uint64 gasLimit;
        uint16 numTransactions;
        uint16 numL1Messages;
    }

    /// A batch descriptor as committed on L1.
    #[derive(Debug)]
    struct Batch {
        BlockContext[] blocks;
        bytes32 prevStateRoot;
        bytes32 newStateRoot;
        bytes32 withdrawTrieRoot;
        uint64 batchIndex;
        bytes32 parentBatchHash;
        bytes l2Transactions;
    }

    #[derive(Debug)]
    function commitBatch(Batch memory batch) external;

    #[derive(Debug)]
    function commitBatches(Batch[] memory batches) external;
}

/// The 4-byte selector of the multi-batch commitment entry point.
pub const COMMIT_BATCHES_SELECTOR: [u8; 4] = hex!("cb905499");

/// The 4-byte selector of the single-batch commitment entry point.
pub const COMMIT_BATCH_SELECTOR: [u8; 4] = hex!("8c73235d");

/// The batch index and inclusive L2 block range of every batch committed by
/// one L1 transaction, in decoded order.
///
/// Used to reconstruct bridge history from finalized L1 calldata without
/// replaying the rollup's internal databases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRanges {
    /// The index of every committed batch.
    pub indices: Vec<u64>,
    /// The number of the first L2 block covered by each batch.
    pub start_blocks: Vec<u64>,
    /// The number of the last L2 block covered by each batch.
    pub finish_blocks: Vec<u64>,
}

impl BatchRanges {
    /// Tries to decode the raw call-input bytes of a batch-commitment
    /// transaction, keyed by its literal 4-byte selector.
    ///
    /// Any other selector is rejected with [`L1AbiError::InvalidSelector`];
    /// ABI decoding failures propagate verbatim.
    pub fn try_from_calldata(calldata: &[u8]) -> Result<Self, L1AbiError> {
        let selector: [u8; 4] = calldata
            .get(0..4)
            .map(|sel| sel.try_into().expect("correct slice length"))
            .ok_or(L1AbiError::MissingSelector(calldata.len()))?;

        let mut ranges = Self::default();
        match selector {
            COMMIT_BATCHES_SELECTOR => {
                let call = commitBatchesCall::abi_decode_raw(&calldata[4..])?;
                for batch in &call.batches {
                    ranges.push(batch)?;
                }
            }
            COMMIT_BATCH_SELECTOR => {
                let call = commitBatchCall::abi_decode_raw(&calldata[4..])?;
                ranges.push(&call.batch)?;
            }
            other => return Err(L1AbiError::InvalidSelector(other)),
        }

        Ok(ranges)
    }

    fn push(&mut self, batch: &Batch) -> Result<(), L1AbiError> {
        let (first, last) = match (batch.blocks.first(), batch.blocks.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(L1AbiError::EmptyBatch(batch.batchIndex)),
        };
        self.indices.push(batch.batchIndex);
        self.start_blocks.push(first.blockNumber);
        self.finish_blocks.push(last.blockNumber);
        Ok(())
    }
}
