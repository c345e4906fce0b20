/// Reads a full-width big-endian $ty from the front of the buffer and advances it.
#[macro_export]
macro_rules! from_be_bytes_slice_and_advance_buf {
    ($ty:ty, $slice:expr) => {{
        let size = ::std::mem::size_of::<$ty>();
        let mut arr = [0u8; ::std::mem::size_of::<$ty>()];
        arr.copy_from_slice(&$slice[0..size]);
        ::alloy_primitives::bytes::Buf::advance($slice, size);
        <$ty>::from_be_bytes(arr)
    }};
}

/// Reads a fixed-width $ty from the front of the buffer using $ty::from_slice and advances it.
#[macro_export]
macro_rules! from_slice_and_advance_buf {
    ($ty:ty, $slice:expr) => {{
        let size = ::std::mem::size_of::<$ty>();
        let val = <$ty>::from_slice(&$slice[0..size]);
        ::alloy_primitives::bytes::Buf::advance($slice, size);
        val
    }};
}
