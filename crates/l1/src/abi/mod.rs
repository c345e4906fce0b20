//! ABI definitions for the rollup and messenger contracts.

pub mod calls;
pub mod message;

/// An error occurring while decoding or encoding an ABI surface.
#[derive(Debug, thiserror::Error)]
pub enum L1AbiError {
    /// The calldata selector matches no known batch-commitment entry point.
    #[error("invalid selector [{}]", alloy_primitives::hex::encode(.0))]
    InvalidSelector([u8; 4]),
    /// The calldata is shorter than a 4-byte selector.
    #[error("calldata too short for a selector: {0} bytes")]
    MissingSelector(usize),
    /// A committed batch carries no blocks.
    #[error("batch [{0}] holds no blocks")]
    EmptyBatch(u64),
    /// The ABI payload could not be decoded.
    #[error(transparent)]
    Abi(#[from] alloy_sol_types::Error),
}
