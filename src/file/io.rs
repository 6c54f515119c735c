//! Bounds-checked little-endian reads of primitive values from byte buffers.
//!
//! Everything in a CLI image (PE headers, metadata tables, method bodies, IL operands) is
//! built from fixed-width little-endian integers. The functions here are the single place
//! where raw slices are turned into numbers; every other reader in the crate goes through
//! them (directly or via [`crate::file::parser::Parser`]).
//!
//! # Examples
//!
//! ```rust,ignore
//! use cildasm::file::io::read_le_at;
//!
//! let data = [0x01, 0x00, 0x02, 0x00, 0x00, 0x00];
//! let mut offset = 0;
//! let first: u16 = read_le_at(&data, &mut offset)?;
//! let second: u32 = read_le_at(&data, &mut offset)?;
//! assert_eq!((first, second, offset), (1, 2, 6));
//! # Ok::<(), cildasm::Error>(())
//! ```
//!
//! # Errors
//!
//! All readers return [`crate::Error::OutOfBounds`] if the buffer is too short.

use crate::{Error::OutOfBounds, Result};

/// Primitive types which can be decoded from a fixed-size byte array.
pub trait CilIO: Sized {
    /// The byte array representation of the type
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Decode from little-endian bytes
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_cil_io {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CilIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_cil_io!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

fn take<T: CilIO>(data: &[u8], offset: &mut usize) -> Result<T::Bytes> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };

    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;
    Ok(read)
}

/// Read a little-endian value from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is too short.
pub fn read_le<T: CilIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Read a little-endian value at `offset` and advance it by the size of `T`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the read would pass the end of `data`.
pub fn read_le_at<T: CilIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    Ok(T::from_le_bytes(take::<T>(data, offset)?))
}

/// Read a 2 or 4 byte little-endian index, depending on `is_large`.
///
/// Metadata table columns which point into heaps or other tables change their width with the
/// size of the target, this reads either form as `u32`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the read would pass the end of `data`.
pub fn read_le_at_dyn(data: &[u8], offset: &mut usize, is_large: bool) -> Result<u32> {
    let res = if is_large {
        read_le_at::<u32>(data, offset)?
    } else {
        u32::from(read_le_at::<u16>(data, offset)?)
    };

    Ok(res)
}
