//! Compact decimal64 encoders
//!
//! Both encoders read the BID small-significand fields of the value and pick
//! the smallest table row (see [`compact`](crate::compact)) that holds them.
//! Anything else (infinities, NaNs, significands of 2^53 or more, exponents
//! outside every row) falls back to the full network form.

use std::fmt;

use crate::bits::{BitWriter, MAX_COMPACT_SIZE};
use crate::compact::{
    Misfit, Tier, MULTI_WIDTH_TIERS, NETWORK_SIZE, VARIABLE_WIDTH_ESCAPE, VARIABLE_WIDTH_TIERS,
};
use crate::decimal::{BidFields, Decimal64};
use crate::error::{ensure_output, EncodeResult};
use crate::network::NetworkFormat;

/// A compact encoding held on the stack
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompactBytes {
    bytes: [u8; MAX_COMPACT_SIZE],
    len: usize,
}

impl CompactBytes {
    /// The encoded bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Encoded size in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn from_writer(writer: BitWriter) -> Self {
        let (bytes, len) = writer.finish();
        Self { bytes, len }
    }
}

impl AsRef<[u8]> for CompactBytes {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for CompactBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactBytes(")?;
        for (i, b) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02x}")?;
        }
        f.write_str(")")
    }
}

/// Write the predicate, sign, exponent offset and significand of `tier`.
#[allow(clippy::cast_sign_loss)]
fn write_tier(writer: &mut BitWriter, tier: &Tier, fields: &BidFields) {
    writer.write_bits(tier.prefix, tier.prefix_bits);
    if tier.signed {
        writer.write_bit(fields.negative);
    }
    let offset = (fields.biased_exponent - tier.exponent_base) as u64;
    writer.write_bits(offset, tier.exponent_bits);
    writer.write_bits(fields.mantissa, tier.significand_bits);
}

/// First row of `tiers` that holds `fields`, or the reason the last one failed
fn select<'t>(tiers: &'t [Tier], fields: &BidFields) -> Result<&'t Tier, Misfit> {
    let mut misfit = Misfit::Significand;
    for tier in tiers {
        match tier.check(fields) {
            Ok(()) => return Ok(tier),
            Err(reason) => misfit = reason,
        }
    }
    Err(misfit)
}

/// Encode `value` in the Multi-Width format.
///
/// The result is 2, 3, 4, 5 or 8 bytes long; the size must travel alongside
/// the bytes for [`decode_multi_width`](crate::decode_multi_width).
#[must_use]
pub fn encode_multi_width(value: Decimal64) -> CompactBytes {
    let mut writer = BitWriter::new();
    let Some(fields) = value.to_unpacked_special() else {
        tracing::trace!(%value, "multi-width fallback: special encoding");
        writer.write_bytes(&value.to_network_bytes());
        return CompactBytes::from_writer(writer);
    };

    match select(&MULTI_WIDTH_TIERS, &fields) {
        Ok(tier) => write_tier(&mut writer, tier, &fields),
        Err(reason) => {
            tracing::trace!(%value, ?reason, "multi-width fallback");
            writer.write_bytes(&value.to_network_bytes());
        }
    }
    CompactBytes::from_writer(writer)
}

/// Encode `value` in the Multi-Width format at the start of `buf`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`EncodeError::BufferTooSmall`](crate::EncodeError::BufferTooSmall)
/// if `buf` cannot hold the encoding. Eight bytes always suffice.
pub fn encode_multi_width_into(buf: &mut [u8], value: Decimal64) -> EncodeResult<usize> {
    copy_into(buf, &encode_multi_width(value))
}

/// Encode `value` in the self-describing Variable-Width format.
///
/// The result is 2, 3, 4 or 9 bytes long. A 4-byte encoding never starts
/// with `0xFF`, which introduces the 9-byte form.
#[must_use]
pub fn encode_variable_width(value: Decimal64) -> CompactBytes {
    let mut writer = BitWriter::new();
    if let Some(fields) = value.to_unpacked_special() {
        match select(&VARIABLE_WIDTH_TIERS, &fields) {
            Ok(tier) => {
                write_tier(&mut writer, tier, &fields);
                let encoded = CompactBytes::from_writer(writer);
                if encoded.as_bytes()[0] != VARIABLE_WIDTH_ESCAPE {
                    return encoded;
                }
                tracing::trace!(%value, "variable-width fallback: escape collision");
                writer = BitWriter::new();
            }
            Err(reason) => tracing::trace!(%value, ?reason, "variable-width fallback"),
        }
    } else {
        tracing::trace!(%value, "variable-width fallback: special encoding");
    }

    writer.write_bits(u64::from(VARIABLE_WIDTH_ESCAPE), 8);
    writer.write_bytes(&value.to_network_bytes());
    debug_assert_eq!(writer.len(), NETWORK_SIZE + 1);
    CompactBytes::from_writer(writer)
}

/// Encode `value` in the Variable-Width format at the start of `buf`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`EncodeError::BufferTooSmall`](crate::EncodeError::BufferTooSmall)
/// if `buf` cannot hold the encoding. Nine bytes always suffice.
pub fn encode_variable_width_into(buf: &mut [u8], value: Decimal64) -> EncodeResult<usize> {
    copy_into(buf, &encode_variable_width(value))
}

fn copy_into(buf: &mut [u8], encoded: &CompactBytes) -> EncodeResult<usize> {
    ensure_output(buf, encoded.len())?;
    buf[..encoded.len()].copy_from_slice(encoded.as_bytes());
    Ok(encoded.len())
}
