//! Fixed-width decimal value types and their field views

use std::fmt;

use crate::backend::{DecimalBackend, Platform};
use crate::convert;
use crate::layout::{Layout, DECIMAL128_LAYOUT, DECIMAL32_LAYOUT, DECIMAL64_LAYOUT};

/// Sign, unbiased exponent and integer significand of a finite decimal
///
/// The value is `(-1)^negative × significand × 10^exponent`. `significand`
/// never has more digits than the width's precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decomposed {
    pub negative: bool,
    pub exponent: i32,
    pub significand: u128,
}

/// Kind of value held by a decimal encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Finite,
    Infinite,
    QuietNan,
    SignalingNan,
}

/// A fully classified decimal: finite fields, an infinity, or a NaN with payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unpacked {
    Finite(Decomposed),
    Infinite {
        negative: bool,
    },
    Nan {
        negative: bool,
        signaling: bool,
        payload: u128,
    },
}

impl Unpacked {
    /// The [`Class`] of this value
    #[must_use]
    pub const fn class(&self) -> Class {
        match self {
            Self::Finite(_) => Class::Finite,
            Self::Infinite { .. } => Class::Infinite,
            Self::Nan {
                signaling: false, ..
            } => Class::QuietNan,
            Self::Nan {
                signaling: true, ..
            } => Class::SignalingNan,
        }
    }

    /// Whether the sign bit is set
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        match *self {
            Self::Finite(Decomposed { negative, .. })
            | Self::Infinite { negative }
            | Self::Nan { negative, .. } => negative,
        }
    }
}

impl fmt::Display for Unpacked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        match self {
            Self::Finite(d) => write!(f, "{}e{}", d.significand, d.exponent),
            Self::Infinite { .. } => f.write_str("Inf"),
            Self::Nan {
                signaling, payload, ..
            } => {
                if *signaling {
                    f.write_str("s")?;
                }
                f.write_str("NaN")?;
                if *payload != 0 {
                    write!(f, "({payload})")?;
                }
                Ok(())
            }
        }
    }
}

/// Raw storage of a fixed-width decimal
///
/// The storage holds the native encoding selected at build time (BID by
/// default, DPD with the `dpd-native` feature).
pub trait DecimalStorage: Copy {
    /// Bit layout of this width
    const LAYOUT: Layout;

    /// Raw storage, zero-extended to 128 bits
    fn to_raw(self) -> u128;

    /// Rebuild from raw storage; bits above the width are dropped
    fn from_raw(raw: u128) -> Self;
}

macro_rules! decimal_type {
    ($(#[$meta:meta])* $name:ident, $bits:ty, $layout:expr) => {
        $(#[$meta])*
        ///
        /// Equality and hashing compare the stored bits: `NaN == NaN` holds for
        /// identical encodings, and numerically equal values with different
        /// exponents (`1e0` and `10e-1`) are distinct.
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name($bits);

        impl DecimalStorage for $name {
            const LAYOUT: Layout = $layout;

            #[inline]
            fn to_raw(self) -> u128 {
                u128::from(self.0)
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_raw(raw: u128) -> Self {
                Self(raw as $bits)
            }
        }

        impl $name {
            /// Wrap bits already in the native encoding
            #[must_use]
            pub const fn from_bits(bits: $bits) -> Self {
                Self(bits)
            }

            /// The bits of the native encoding
            #[must_use]
            pub const fn to_bits(self) -> $bits {
                self.0
            }

            /// Build a finite value from its sign, unbiased exponent and significand.
            ///
            /// The significand must have at most the width's digits and the
            /// exponent must lie in the width's range; neither is checked in
            /// release builds.
            #[must_use]
            pub fn from_parts(negative: bool, exponent: i32, significand: u128) -> Self {
                debug_assert!(significand <= Self::LAYOUT.max_significand());
                debug_assert!(
                    (Self::LAYOUT.min_exponent()..=Self::LAYOUT.max_exponent())
                        .contains(&exponent)
                );
                let fields = Decomposed {
                    negative,
                    exponent,
                    significand,
                };
                Self::from_raw(Platform::compose(&fields, &Self::LAYOUT))
            }

            /// Split into sign, unbiased exponent and significand.
            ///
            /// Only meaningful for finite values; see [`unpack`](Self::unpack).
            #[must_use]
            pub fn decompose(self) -> Decomposed {
                Platform::decompose(self.to_raw(), &Self::LAYOUT)
            }

            /// Classify and split, handling infinities and NaNs
            #[must_use]
            pub fn unpack(self) -> Unpacked {
                Platform::unpack(self.to_raw(), &Self::LAYOUT)
            }

            /// Inverse of [`unpack`](Self::unpack)
            #[must_use]
            pub fn pack(value: &Unpacked) -> Self {
                Self::from_raw(Platform::pack(value, &Self::LAYOUT))
            }

            #[must_use]
            pub fn class(self) -> Class {
                Platform::classify(self.to_raw(), &Self::LAYOUT)
            }

            #[must_use]
            pub fn is_nan(self) -> bool {
                matches!(self.class(), Class::QuietNan | Class::SignalingNan)
            }

            #[must_use]
            pub fn is_signaling(self) -> bool {
                self.class() == Class::SignalingNan
            }

            #[must_use]
            pub fn is_infinite(self) -> bool {
                self.class() == Class::Infinite
            }

            #[must_use]
            pub fn is_finite(self) -> bool {
                self.class() == Class::Finite
            }

            /// Whether the sign bit is set (also for zeros and NaNs)
            #[must_use]
            pub const fn is_negative(self) -> bool {
                (self.0 >> ($layout.width - 1)) != 0
            }

            /// Quiet NaN with a zero payload
            #[must_use]
            pub fn nan() -> Self {
                Self::pack(&Unpacked::Nan {
                    negative: false,
                    signaling: false,
                    payload: 0,
                })
            }

            #[must_use]
            pub fn infinity() -> Self {
                Self::pack(&Unpacked::Infinite { negative: false })
            }

            #[must_use]
            pub fn neg_infinity() -> Self {
                Self::pack(&Unpacked::Infinite { negative: true })
            }

            /// `0e0`
            #[must_use]
            pub fn zero() -> Self {
                Self::from_parts(false, 0, 0)
            }

            /// Nearest binary64 value
            #[must_use]
            pub fn to_f64(self) -> f64 {
                Platform::to_f64(self)
            }

            /// Nearest binary32 value
            #[must_use]
            pub fn to_f32(self) -> f32 {
                Platform::to_f32(self)
            }

            /// Decimal with the shortest digit string that round-trips `value`,
            /// rounded half-even to this width's precision
            #[must_use]
            pub fn from_f64(value: f64) -> Self {
                Self::pack(&convert::unpacked_from_f64(value, &Self::LAYOUT))
            }

            /// Decimal with the shortest digit string that round-trips `value`,
            /// rounded half-even to this width's precision
            #[must_use]
            pub fn from_f32(value: f32) -> Self {
                Self::pack(&convert::unpacked_from_f32(value, &Self::LAYOUT))
            }

            /// The same value encoded as densely packed decimal
            #[must_use]
            #[allow(clippy::cast_possible_truncation)]
            pub fn to_densely_packed(self) -> $bits {
                Platform::to_densely_packed(self) as $bits
            }

            /// Rebuild from a densely packed decimal encoding
            #[must_use]
            pub fn from_densely_packed(dpd: $bits) -> Self {
                Platform::from_densely_packed(u128::from(dpd))
            }

            /// The same value encoded as binary integer decimal
            #[must_use]
            #[allow(clippy::cast_possible_truncation)]
            pub fn to_binary_integral(self) -> $bits {
                Platform::to_binary_integral(self) as $bits
            }

            /// Rebuild from a binary integer decimal encoding
            #[must_use]
            pub fn from_binary_integral(bid: $bits) -> Self {
                Platform::from_binary_integral(u128::from(bid))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.unpack(), f)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }
    };
}

decimal_type!(
    /// IEEE 754-2008 decimal32: 7 digits, exponents -101 to 90
    Decimal32,
    u32,
    DECIMAL32_LAYOUT
);

decimal_type!(
    /// IEEE 754-2008 decimal64: 16 digits, exponents -398 to 369
    Decimal64,
    u64,
    DECIMAL64_LAYOUT
);

decimal_type!(
    /// IEEE 754-2008 decimal128: 34 digits, exponents -6176 to 6111
    Decimal128,
    u128,
    DECIMAL128_LAYOUT
);

/// BID encodings whose two bits below the sign are `11`: large significands,
/// infinities and NaNs.
const SPECIAL_ENCODING_MASK64: u64 = 0x6000_0000_0000_0000;
const EXPONENT_SHIFT_SMALL64: u32 = 53;
const EXPONENT_MASK64: u64 = 0x3ff;
const SMALL_COEFF_MASK64: u64 = 0x001f_ffff_ffff_ffff;

/// Fields of a decimal64 whose BID encoding uses the small-significand layout
///
/// `biased_exponent` is the stored exponent (unbiased exponent + 398).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BidFields {
    pub negative: bool,
    pub biased_exponent: i32,
    pub mantissa: u64,
}

impl Decimal64 {
    /// Read the BID small-significand fields directly.
    ///
    /// Returns `None` (a punt, not an error) for infinities, NaNs and
    /// significands of 2^53 or more; callers fall back to the full encoding.
    #[must_use]
    pub fn to_unpacked_special(self) -> Option<BidFields> {
        let bid = self.to_binary_integral();
        if bid & SPECIAL_ENCODING_MASK64 == SPECIAL_ENCODING_MASK64 {
            return None;
        }

        #[allow(clippy::cast_possible_truncation)]
        let biased_exponent = ((bid >> EXPONENT_SHIFT_SMALL64) & EXPONENT_MASK64) as i32;
        Some(BidFields {
            negative: bid >> 63 != 0,
            biased_exponent,
            mantissa: bid & SMALL_COEFF_MASK64,
        })
    }

    /// Inverse of [`to_unpacked_special`](Self::to_unpacked_special).
    ///
    /// `mantissa` must be below 2^53 and `biased_exponent` in `[0, 767]`.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn from_unpacked_special(fields: BidFields) -> Self {
        debug_assert!(fields.mantissa <= SMALL_COEFF_MASK64);
        debug_assert!((0..=DECIMAL64_LAYOUT.max_biased_exponent()).contains(&fields.biased_exponent));
        let sign = if fields.negative { 1u64 << 63 } else { 0 };
        let bid = sign
            | ((fields.biased_exponent as u64) << EXPONENT_SHIFT_SMALL64)
            | fields.mantissa;
        Self::from_binary_integral(bid)
    }
}
