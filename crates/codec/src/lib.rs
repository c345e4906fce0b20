//! Wire formats and content hashing for chunks and batches.
//!
//! The byte layouts in this crate are a versioned compatibility contract: a
//! hash computed by one component must always be re-derivable by another from
//! the stored bytes. Any layout change requires a new version.

pub use block::BlockContext;
mod block;

pub use chunk::chunk_hash;
mod chunk;

pub use batch_header::{BatchHeader, BATCH_HEADER_VERSION};
mod batch_header;

pub use hashing::hash_pair;
mod hashing;

pub use error::DecodingError;
mod error;

mod macros;
