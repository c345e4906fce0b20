/// An error occurring during encoding or decoding of the wire formats.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodingError {
    /// The chunk holds no blocks.
    #[error("chunk holds no blocks")]
    EmptyChunk,
    /// The block numbers are not a gap-free ascending sequence.
    #[error("block numbers are not contiguous")]
    NonContiguousBlocks,
    /// The input buffer ended before the full value could be read.
    #[error("end of file")]
    Eof,
    /// The input buffer holds bytes past the end of the encoded value.
    #[error("unexpected trailing bytes: {0}")]
    UnexpectedTrailingBytes(usize),
}
