//! Primitive types for the bridge aggregation core.

pub use block::{BlockInfo, L2BlockData};
mod block;

pub use chunk::{Chunk, ChunkData};
mod chunk;

pub use batch::{BatchData, BatchInfo};
mod batch;

pub use status::{GasOracleStatus, InvalidStatus, ProvingStatus, RollupStatus};
mod status;
