//! Compact decimal64 decoders

use crate::bits::BitReader;
use crate::compact::{Tier, NETWORK_SIZE, VARIABLE_WIDTH_ESCAPE, VARIABLE_WIDTH_TIERS};
use crate::decimal::{BidFields, Decimal64};
use crate::error::{ensure_input, DecodeError, DecodeResult};
use crate::network::read_network;

/// Read the sign, exponent offset and significand of `tier` (predicate
/// already consumed) and rebuild the value.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn read_tier(reader: &mut BitReader<'_>, tier: &Tier) -> DecodeResult<Decimal64> {
    let negative = tier.signed && reader.read_bit()?;
    let offset = reader.read_bits(tier.exponent_bits)? as i32;
    let mantissa = reader.read_bits(tier.significand_bits)?;
    Ok(Decimal64::from_unpacked_special(BidFields {
        negative,
        biased_exponent: tier.exponent_base + offset,
        mantissa,
    }))
}

/// Decode a Multi-Width encoding of `size` bytes from the start of `bytes`.
///
/// Size 8 is the full network form; sizes 1 through 5 are the compact rows.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidSize`] if `size` is not 1, 2, 3, 4, 5 or 8,
/// or [`DecodeError::BufferTooShort`] if `bytes` holds fewer than `size` bytes.
pub fn decode_multi_width(bytes: &[u8], size: usize) -> DecodeResult<Decimal64> {
    if size == NETWORK_SIZE {
        return read_network(bytes).map(|(value, _)| value);
    }
    let Some(tier) = Tier::multi_width(size) else {
        tracing::debug!(size, "invalid multi-width size");
        return Err(DecodeError::InvalidSize(size));
    };
    ensure_input(bytes, size)?;
    read_tier(&mut BitReader::new(&bytes[..size]), &tier)
}

/// Decode a Variable-Width encoding from the start of `bytes`.
///
/// Returns the value and the number of bytes it occupied.
///
/// # Errors
///
/// Returns [`DecodeError::BufferTooShort`] if `bytes` ends before the
/// encoding its predicate announces.
pub fn decode_variable_width(bytes: &[u8]) -> DecodeResult<(Decimal64, usize)> {
    ensure_input(bytes, 1)?;
    if bytes[0] == VARIABLE_WIDTH_ESCAPE {
        let (value, _) = read_network(&bytes[1..]).map_err(|_| {
            tracing::debug!(actual = bytes.len(), "variable-width network form truncated");
            DecodeError::BufferTooShort {
                expected: NETWORK_SIZE + 1,
                actual: bytes.len(),
            }
        })?;
        return Ok((value, NETWORK_SIZE + 1));
    }

    // The predicates `0`, `10` and `11` cover every other leading byte.
    let lead = u64::from(bytes[0]);
    let tier = VARIABLE_WIDTH_TIERS
        .iter()
        .find(|t| lead >> (8 - t.prefix_bits) == t.prefix)
        .unwrap_or(&VARIABLE_WIDTH_TIERS[VARIABLE_WIDTH_TIERS.len() - 1]);
    ensure_input(bytes, tier.size)?;

    let mut reader = BitReader::new(&bytes[..tier.size]);
    reader.read_bits(tier.prefix_bits)?;
    let value = read_tier(&mut reader, tier)?;
    Ok((value, tier.size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkFormat;

    #[test]
    fn test_multi_width_size_2() {
        let value = decode_multi_width(&[0x80, 0x7B], 2).unwrap();
        assert_eq!(value, Decimal64::from_parts(false, 0, 123));
        let fields = value.decompose();
        assert!(!fields.negative);
        assert_eq!(fields.exponent, 0);
        assert_eq!(fields.significand, 123);
    }

    #[test]
    fn test_multi_width_sizes() {
        assert_eq!(
            decode_multi_width(&[0x4F, 0x42, 0x40], 3).unwrap(),
            Decimal64::from_parts(false, -2, 1_000_000)
        );
        assert_eq!(
            decode_multi_width(&[0xB8, 0x00, 0x30, 0x39], 4).unwrap(),
            Decimal64::from_parts(true, -2, 12345)
        );
        assert_eq!(
            decode_multi_width(&[0x40, 0x40, 0x00, 0x00, 0x00], 5).unwrap(),
            Decimal64::from_parts(false, 0, 1 << 30)
        );
    }

    #[test]
    fn test_multi_width_size_1() {
        // 1 | 0000101: exponent -1, significand 5
        assert_eq!(
            decode_multi_width(&[0x85], 1).unwrap(),
            Decimal64::from_parts(false, -1, 5)
        );
        assert_eq!(
            decode_multi_width(&[0x7F], 1).unwrap(),
            Decimal64::from_parts(false, -2, 127)
        );
    }

    #[test]
    fn test_multi_width_size_8_is_network_form() {
        let bytes = [0x25, 0x55, 0x34, 0xb9, 0xc1, 0xe2, 0x8e, 0x56];
        assert_eq!(
            decode_multi_width(&bytes, 8).unwrap(),
            Decimal64::from_parts(false, -57, 1_234_567_890_123_456)
        );
        let nan = Decimal64::nan().to_network_bytes();
        assert!(decode_multi_width(&nan, 8).unwrap().is_nan());
    }

    #[test]
    fn test_multi_width_rejects_bad_input() {
        assert_eq!(decode_multi_width(&[0; 8], 6), Err(DecodeError::InvalidSize(6)));
        assert_eq!(decode_multi_width(&[0; 8], 0), Err(DecodeError::InvalidSize(0)));
        assert_eq!(
            decode_multi_width(&[0x80], 2),
            Err(DecodeError::BufferTooShort {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            decode_multi_width(&[0; 7], 8),
            Err(DecodeError::BufferTooShort {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn test_variable_width_rows() {
        assert_eq!(
            decode_variable_width(&[0x40, 0x7B]).unwrap(),
            (Decimal64::from_parts(false, 0, 123), 2)
        );
        assert_eq!(
            decode_variable_width(&[0xA0, 0x20, 0x00]).unwrap(),
            (Decimal64::from_parts(false, 0, 1 << 13), 3)
        );
        assert_eq!(
            decode_variable_width(&[0xEE, 0x00, 0x30, 0x39, 0xAA]).unwrap(),
            (Decimal64::from_parts(true, -2, 12345), 4)
        );
    }

    #[test]
    fn test_variable_width_escape() {
        let value = Decimal64::infinity();
        let mut bytes = [0xFF; 9];
        bytes[1..].copy_from_slice(&value.to_network_bytes());
        assert_eq!(decode_variable_width(&bytes).unwrap(), (value, 9));
        assert_eq!(
            decode_variable_width(&bytes[..5]),
            Err(DecodeError::BufferTooShort {
                expected: 9,
                actual: 5
            })
        );
    }

    #[test]
    fn test_variable_width_truncated() {
        assert_eq!(
            decode_variable_width(&[]),
            Err(DecodeError::BufferTooShort {
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(
            decode_variable_width(&[0xC0, 0x00]),
            Err(DecodeError::BufferTooShort {
                expected: 4,
                actual: 2
            })
        );
    }
}
