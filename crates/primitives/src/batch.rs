use super::{GasOracleStatus, ProvingStatus, RollupStatus};
use alloy_primitives::{Bytes, B256};

/// Information about a batch.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BatchInfo {
    /// The index of the batch.
    pub index: u64,
    /// The hash of the batch.
    pub hash: B256,
}

impl BatchInfo {
    /// Returns a new instance of [`BatchInfo`].
    pub const fn new(index: u64, hash: B256) -> Self {
        Self { index, hash }
    }
}

/// A persisted batch: a claimed range of chunks with its encoded header and
/// the three settlement state machines.
///
/// The hash is always re-derivable from `header`: decoding the stored header
/// bytes and hashing them yields `hash` for every batch ever inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchData {
    /// The index of the batch.
    pub index: u64,
    /// The hash of the batch header.
    pub hash: B256,
    /// The index of the first chunk covered by the batch.
    pub start_chunk_index: u64,
    /// The index of the last chunk covered by the batch.
    pub end_chunk_index: u64,
    /// The hash of the first chunk covered by the batch.
    pub start_chunk_hash: B256,
    /// The hash of the last chunk covered by the batch.
    pub end_chunk_hash: B256,
    /// The encoded batch header.
    pub header: Bytes,
    /// The proving status of the batch.
    pub proving_status: ProvingStatus,
    /// The rollup (L1 settlement) status of the batch.
    pub rollup_status: RollupStatus,
    /// The gas-oracle status of the batch.
    pub oracle_status: GasOracleStatus,
    /// The hash of the L1 commit transaction, if any.
    pub commit_tx_hash: Option<B256>,
    /// The hash of the L1 finalize transaction, if any.
    pub finalize_tx_hash: Option<B256>,
    /// The hash of the L1 gas-oracle import transaction, if any.
    pub oracle_tx_hash: Option<B256>,
}

impl BatchData {
    /// Returns the [`BatchInfo`] for the batch.
    pub const fn batch_info(&self) -> BatchInfo {
        BatchInfo { index: self.index, hash: self.hash }
    }
}
