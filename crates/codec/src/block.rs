//! Fixed-width block context encoding.

use crate::{error::DecodingError, from_be_bytes_slice_and_advance_buf};

use alloy_primitives::{bytes::BufMut, U256};
use bridge_primitives::L2BlockData;

/// The fixed-width context of one L2 block, as covered by the chunk content
/// hash.
///
/// Wire layout (big endian): number u64 | timestamp u64 | base_fee u256 |
/// gas_limit u64 | transaction_count u16 | l1_message_count u16.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockContext {
    /// The block number.
    pub number: u64,
    /// The block timestamp.
    pub timestamp: u64,
    /// The block base fee.
    pub base_fee: U256,
    /// The block gas limit.
    pub gas_limit: u64,
    /// The number of transactions in the block.
    pub transaction_count: u16,
    /// The block's L1 message count.
    pub l1_message_count: u16,
}

impl BlockContext {
    /// The length of the encoded block context in bytes.
    pub const BYTES_LENGTH: usize = 60;

    /// Returns the big endian encoding of the block context.
    pub fn to_be_bytes(&self) -> [u8; Self::BYTES_LENGTH] {
        let mut bytes = [0u8; Self::BYTES_LENGTH];
        let mut buf = bytes.as_mut_slice();
        buf.put_slice(&self.number.to_be_bytes());
        buf.put_slice(&self.timestamp.to_be_bytes());
        buf.put_slice(&self.base_fee.to_be_bytes::<32>());
        buf.put_slice(&self.gas_limit.to_be_bytes());
        buf.put_slice(&self.transaction_count.to_be_bytes());
        buf.put_slice(&self.l1_message_count.to_be_bytes());
        bytes
    }

    /// Tries to read from the input buffer into the [`BlockContext`].
    /// Returns [`DecodingError::Eof`] if the buffer holds less than
    /// [`BlockContext::BYTES_LENGTH`] bytes.
    pub fn try_from_buf(buf: &mut &[u8]) -> Result<Self, DecodingError> {
        if buf.len() < Self::BYTES_LENGTH {
            return Err(DecodingError::Eof)
        }

        let number = from_be_bytes_slice_and_advance_buf!(u64, buf);
        let timestamp = from_be_bytes_slice_and_advance_buf!(u64, buf);
        let base_fee = from_be_bytes_slice_and_advance_buf!(U256, buf);
        let gas_limit = from_be_bytes_slice_and_advance_buf!(u64, buf);
        let transaction_count = from_be_bytes_slice_and_advance_buf!(u16, buf);
        let l1_message_count = from_be_bytes_slice_and_advance_buf!(u16, buf);

        Ok(Self { number, timestamp, base_fee, gas_limit, transaction_count, l1_message_count })
    }
}

impl From<&L2BlockData> for BlockContext {
    fn from(block: &L2BlockData) -> Self {
        Self {
            number: block.number,
            timestamp: block.timestamp,
            base_fee: block.base_fee,
            gas_limit: block.gas_limit,
            transaction_count: block.transaction_count,
            l1_message_count: block.l1_message_count,
        }
    }
}
