//! Full IEEE network format
//!
//! The wire form of every width is its densely packed decimal encoding in
//! big-endian byte order: 4, 8 or 16 bytes. It is total: zeros, infinities
//! and NaNs all have a network form, and decoding never fails once enough
//! bytes are present.

use crate::byteorder::{host_to_network, network_to_host};
use crate::decimal::{Decimal128, Decimal32, Decimal64, DecimalStorage};
use crate::error::{ensure_input, ensure_output, DecodeError, DecodeResult, EncodeResult};

/// A decimal width with a fixed-size network encoding
pub trait NetworkFormat: DecimalStorage {
    /// Bytes of the network encoding
    const SIZE: usize;

    /// Fixed-size array holding one network encoding
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Encode as big-endian DPD
    fn to_network_bytes(self) -> Self::Bytes;

    /// Decode big-endian DPD
    fn from_network_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! network_format {
    ($name:ident, $bits:ty) => {
        impl NetworkFormat for $name {
            const SIZE: usize = std::mem::size_of::<$bits>();

            type Bytes = [u8; std::mem::size_of::<$bits>()];

            #[inline]
            fn to_network_bytes(self) -> Self::Bytes {
                host_to_network(self.to_densely_packed()).to_ne_bytes()
            }

            #[inline]
            fn from_network_bytes(bytes: Self::Bytes) -> Self {
                Self::from_densely_packed(network_to_host(<$bits>::from_ne_bytes(bytes)))
            }
        }
    };
}

network_format!(Decimal32, u32);
network_format!(Decimal64, u64);
network_format!(Decimal128, u128);

/// Write the network encoding of `value` at the start of `buf`.
///
/// Returns the unwritten remainder of `buf`.
///
/// # Errors
///
/// Returns [`EncodeError::BufferTooSmall`](crate::EncodeError::BufferTooSmall)
/// if `buf` is shorter than [`NetworkFormat::SIZE`].
pub fn write_network<D: NetworkFormat>(buf: &mut [u8], value: D) -> EncodeResult<&mut [u8]> {
    ensure_output(buf, D::SIZE)?;
    let (head, tail) = buf.split_at_mut(D::SIZE);
    head.copy_from_slice(value.to_network_bytes().as_ref());
    Ok(tail)
}

/// Read a network encoding from the start of `bytes`.
///
/// Returns the value and the unread remainder of `bytes`.
///
/// # Errors
///
/// Returns [`DecodeError::BufferTooShort`] if `bytes` is shorter than
/// [`NetworkFormat::SIZE`].
pub fn read_network<D: NetworkFormat>(bytes: &[u8]) -> DecodeResult<(D, &[u8])> {
    ensure_input(bytes, D::SIZE)?;
    let (head, tail) = bytes.split_at(D::SIZE);
    let raw = D::Bytes::try_from(head).map_err(|_| DecodeError::BufferTooShort {
        expected: D::SIZE,
        actual: bytes.len(),
    })?;
    Ok((D::from_network_bytes(raw), tail))
}
