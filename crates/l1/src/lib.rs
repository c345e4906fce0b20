//! The typed ABI surface towards L1: batch-commitment calldata decoding,
//! cross-chain message hashing and the safe-height helper.

pub mod abi;

pub use abi::{calls::BatchRanges, message::compute_message_hash, L1AbiError};

/// Returns the highest block number considered final given the current tip
/// and a confirmation margin, or `None` if the tip is not yet past the
/// margin.
///
/// Every scanning component gates on this value to avoid acting on blocks
/// that may still be reorganized away.
pub const fn safe_block_number(current_tip: u64, confirmations: u64) -> Option<u64> {
    if current_tip <= confirmations {
        return None
    }
    Some(current_tip - confirmations)
}
