use alloy_primitives::B256;

/// The error type for database operations.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    /// A wire format error occurred.
    #[error(transparent)]
    Codec(#[from] bridge_codec::DecodingError),
    /// A batch was not found in the database.
    #[error("batch with hash [{0}] not found in database")]
    BatchNotFound(B256),
    /// A chunk was not found in the database.
    #[error("chunk with hash [{0}] not found in database")]
    ChunkNotFound(B256),
    /// The batch covers no chunks.
    #[error("batch covers no chunks")]
    EmptyBatch,
    /// The batch chunk range does not extend the previously inserted batch.
    #[error("batch is not contiguous: expected start chunk index {expected}, got {got}")]
    BatchNotContiguous {
        /// The expected start chunk index.
        expected: u64,
        /// The provided start chunk index.
        got: u64,
    },
    /// Not every block in the chunk range could be claimed.
    #[error("claimed {claimed} of {expected} blocks, some are missing or already chunked")]
    BlockClaimFailed {
        /// The number of blocks the chunk covers.
        expected: u64,
        /// The number of blocks actually claimed.
        claimed: u64,
    },
    /// Not every chunk in the batch range could be claimed.
    #[error("claimed {claimed} of {expected} chunks, some are missing or already batched")]
    ChunkClaimFailed {
        /// The number of chunks the batch covers.
        expected: u64,
        /// The number of chunks actually claimed.
        claimed: u64,
    },
    /// The stored chunk rows do not match the batch arguments.
    #[error("stored chunks do not match the batch arguments: {0}")]
    ChunkMismatch(&'static str),
    /// The requested status transition is not legal for the state machine.
    #[error("invalid {kind} status transition from [{from}] to [{to}]")]
    InvalidStatusTransition {
        /// The state machine the transition was attempted on.
        kind: &'static str,
        /// The current status.
        from: &'static str,
        /// The requested status.
        to: &'static str,
    },
}
