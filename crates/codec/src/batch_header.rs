//! Batch header wire format.

use crate::{
    error::DecodingError, from_be_bytes_slice_and_advance_buf, from_slice_and_advance_buf,
};

use alloy_primitives::{
    bytes::{Buf, BufMut},
    keccak256, B256,
};

/// The current batch header version.
pub const BATCH_HEADER_VERSION: u8 = 0;

/// The batch header.
///
/// Wire layout (big endian): version u8 | batch_index u64 |
/// l1_message_popped u64 | total_l1_message_popped u64 | data_hash B256 |
/// parent_batch_hash B256. The batch hash is the keccak256 of this encoding,
/// so the layout must be stable across processes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchHeader {
    /// The batch version.
    pub version: u8,
    /// The index of the batch.
    pub batch_index: u64,
    /// Number of L1 messages popped in the batch.
    pub l1_message_popped: u64,
    /// Number of total L1 messages popped after the batch.
    pub total_l1_message_popped: u64,
    /// The data hash of the batch, folding every chunk's content hash.
    pub data_hash: B256,
    /// The parent batch hash.
    pub parent_batch_hash: B256,
}

impl BatchHeader {
    /// The length of the encoded batch header in bytes.
    pub const BYTES_LENGTH: usize = 89;

    /// Returns a new instance [`BatchHeader`].
    pub const fn new(
        version: u8,
        batch_index: u64,
        l1_message_popped: u64,
        total_l1_message_popped: u64,
        data_hash: B256,
        parent_batch_hash: B256,
    ) -> Self {
        Self {
            version,
            batch_index,
            l1_message_popped,
            total_l1_message_popped,
            data_hash,
            parent_batch_hash,
        }
    }

    /// Returns the encoding of the header.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::<u8>::with_capacity(Self::BYTES_LENGTH);
        bytes.put_slice(&self.version.to_be_bytes());
        bytes.put_slice(&self.batch_index.to_be_bytes());
        bytes.put_slice(&self.l1_message_popped.to_be_bytes());
        bytes.put_slice(&self.total_l1_message_popped.to_be_bytes());
        bytes.put_slice(&self.data_hash.0);
        bytes.put_slice(&self.parent_batch_hash.0);
        bytes
    }

    /// Tries to read from the input buffer into the [`BatchHeader`].
    /// Returns [`DecodingError::Eof`] if the buffer length differs from
    /// [`BatchHeader::BYTES_LENGTH`].
    pub fn try_from_buf(buf: &mut &[u8]) -> Result<Self, DecodingError> {
        if buf.len() < Self::BYTES_LENGTH {
            return Err(DecodingError::Eof)
        }

        let version = from_be_bytes_slice_and_advance_buf!(u8, buf);
        let batch_index = from_be_bytes_slice_and_advance_buf!(u64, buf);
        let l1_message_popped = from_be_bytes_slice_and_advance_buf!(u64, buf);
        let total_l1_message_popped = from_be_bytes_slice_and_advance_buf!(u64, buf);
        let data_hash = from_slice_and_advance_buf!(B256, buf);
        let parent_batch_hash = from_slice_and_advance_buf!(B256, buf);

        if buf.has_remaining() {
            return Err(DecodingError::UnexpectedTrailingBytes(buf.len()))
        }

        Ok(Self {
            version,
            batch_index,
            l1_message_popped,
            total_l1_message_popped,
            data_hash,
            parent_batch_hash,
        })
    }

    /// Computes the hash for the header.
    pub fn hash_slow(&self) -> B256 {
        keccak256(self.encode())
    }
}
