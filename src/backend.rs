//! Native decimal encodings
//!
//! A [`DecimalBackend`] knows how the decimal value types store their bits.
//! Exactly one backend is active per build: [`BidBackend`] by default, or
//! [`DpdBackend`] when the `dpd-native` feature is enabled. [`Platform`] names
//! the active one.

use crate::decimal::{Class, DecimalStorage, Decomposed, Unpacked};
use crate::layout::Layout;
use crate::{bid, convert, dpd};

/// Encoding used for the native storage of decimal values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    BinaryInteger,
    DenselyPacked,
}

/// Field access and conversions for one native decimal encoding
pub trait DecimalBackend {
    /// The encoding this backend reads and writes
    const ENCODING: Encoding;

    fn classify(bits: u128, layout: &Layout) -> Class;

    /// Split a finite encoding into sign, unbiased exponent and significand.
    fn decompose(bits: u128, layout: &Layout) -> Decomposed;

    /// Inverse of [`decompose`](Self::decompose).
    fn compose(value: &Decomposed, layout: &Layout) -> u128;

    fn unpack(bits: u128, layout: &Layout) -> Unpacked;

    fn pack(value: &Unpacked, layout: &Layout) -> u128;

    /// Nearest binary64 value of `value`
    fn to_f64<D: DecimalStorage>(value: D) -> f64 {
        convert::unpacked_to_f64(&Self::unpack(value.to_raw(), &D::LAYOUT))
    }

    /// Nearest binary32 value of `value`
    fn to_f32<D: DecimalStorage>(value: D) -> f32 {
        convert::unpacked_to_f32(&Self::unpack(value.to_raw(), &D::LAYOUT))
    }

    /// DPD encoding of `value`, in the low bits of the result
    fn to_densely_packed<D: DecimalStorage>(value: D) -> u128 {
        match Self::ENCODING {
            Encoding::DenselyPacked => value.to_raw(),
            Encoding::BinaryInteger => {
                dpd::pack(&Self::unpack(value.to_raw(), &D::LAYOUT), &D::LAYOUT)
            }
        }
    }

    /// Value of a DPD encoding held in the low bits of `bits`
    fn from_densely_packed<D: DecimalStorage>(bits: u128) -> D {
        match Self::ENCODING {
            Encoding::DenselyPacked => D::from_raw(bits),
            Encoding::BinaryInteger => {
                D::from_raw(Self::pack(&dpd::unpack(bits, &D::LAYOUT), &D::LAYOUT))
            }
        }
    }

    /// BID encoding of `value`, in the low bits of the result
    fn to_binary_integral<D: DecimalStorage>(value: D) -> u128 {
        match Self::ENCODING {
            Encoding::BinaryInteger => value.to_raw(),
            Encoding::DenselyPacked => {
                bid::pack(&Self::unpack(value.to_raw(), &D::LAYOUT), &D::LAYOUT)
            }
        }
    }

    /// Value of a BID encoding held in the low bits of `bits`
    fn from_binary_integral<D: DecimalStorage>(bits: u128) -> D {
        match Self::ENCODING {
            Encoding::BinaryInteger => D::from_raw(bits),
            Encoding::DenselyPacked => {
                D::from_raw(Self::pack(&bid::unpack(bits, &D::LAYOUT), &D::LAYOUT))
            }
        }
    }
}

/// Decimals stored as binary integer decimal
#[derive(Debug, Clone, Copy, Default)]
pub struct BidBackend;

impl DecimalBackend for BidBackend {
    const ENCODING: Encoding = Encoding::BinaryInteger;

    #[inline]
    fn classify(bits: u128, layout: &Layout) -> Class {
        bid::classify(bits, layout)
    }

    #[inline]
    fn decompose(bits: u128, layout: &Layout) -> Decomposed {
        bid::decompose(bits, layout)
    }

    #[inline]
    fn compose(value: &Decomposed, layout: &Layout) -> u128 {
        bid::compose(value, layout)
    }

    fn unpack(bits: u128, layout: &Layout) -> Unpacked {
        bid::unpack(bits, layout)
    }

    fn pack(value: &Unpacked, layout: &Layout) -> u128 {
        bid::pack(value, layout)
    }
}

/// Decimals stored as densely packed decimal
#[derive(Debug, Clone, Copy, Default)]
pub struct DpdBackend;

impl DecimalBackend for DpdBackend {
    const ENCODING: Encoding = Encoding::DenselyPacked;

    #[inline]
    fn classify(bits: u128, layout: &Layout) -> Class {
        dpd::classify(bits, layout)
    }

    #[inline]
    fn decompose(bits: u128, layout: &Layout) -> Decomposed {
        dpd::decompose(bits, layout)
    }

    #[inline]
    fn compose(value: &Decomposed, layout: &Layout) -> u128 {
        dpd::compose(value, layout)
    }

    fn unpack(bits: u128, layout: &Layout) -> Unpacked {
        dpd::unpack(bits, layout)
    }

    fn pack(value: &Unpacked, layout: &Layout) -> u128 {
        dpd::pack(value, layout)
    }
}

/// The backend used by [`Decimal32`](crate::Decimal32),
/// [`Decimal64`](crate::Decimal64) and [`Decimal128`](crate::Decimal128)
#[cfg(not(feature = "dpd-native"))]
pub type Platform = BidBackend;

/// The backend used by [`Decimal32`](crate::Decimal32),
/// [`Decimal64`](crate::Decimal64) and [`Decimal128`](crate::Decimal128)
#[cfg(feature = "dpd-native")]
pub type Platform = DpdBackend;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Decimal64;
    use crate::layout::DECIMAL64_LAYOUT;

    #[test]
    fn test_platform_matches_feature() {
        if cfg!(feature = "dpd-native") {
            assert_eq!(Platform::ENCODING, Encoding::DenselyPacked);
        } else {
            assert_eq!(Platform::ENCODING, Encoding::BinaryInteger);
        }
    }

    #[test]
    fn test_backends_agree_on_fields() {
        let value = Decomposed {
            negative: true,
            exponent: -57,
            significand: 1_234_567_890_123_456,
        };
        let bid_bits = BidBackend::compose(&value, &DECIMAL64_LAYOUT);
        let dpd_bits = DpdBackend::compose(&value, &DECIMAL64_LAYOUT);
        assert_eq!(BidBackend::decompose(bid_bits, &DECIMAL64_LAYOUT), value);
        assert_eq!(DpdBackend::decompose(dpd_bits, &DECIMAL64_LAYOUT), value);
    }

    #[test]
    fn test_densely_packed_conversion() {
        let value = Decimal64::from_parts(false, -57, 1_234_567_890_123_456);
        assert_eq!(Platform::to_densely_packed(value), 0x2555_34b9_c1e2_8e56);
        let back: Decimal64 = Platform::from_densely_packed(0x2555_34b9_c1e2_8e56);
        assert_eq!(back, value);
    }

    #[test]
    fn test_binary_integral_conversion() {
        let value = Decimal64::from_parts(false, 0, 1);
        assert_eq!(Platform::to_binary_integral(value), 0x31c0_0000_0000_0001);
        let back: Decimal64 = Platform::from_binary_integral(0x31c0_0000_0000_0001);
        assert_eq!(back, value);
    }

    #[test]
    fn test_cross_backend_special_conversion() {
        let inf = Decimal64::neg_infinity();
        assert_eq!(Platform::to_densely_packed(inf), 0xf800_0000_0000_0000);
        assert_eq!(Platform::to_binary_integral(inf), 0xf800_0000_0000_0000);
    }
}
