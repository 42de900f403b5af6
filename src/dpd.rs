//! Densely packed decimal (DPD) field layout
//!
//! The combination field carries the two high exponent bits and the leading
//! significand digit: `ee ddd` for digits 0-7, `11 ee d` for 8 and 9 (the
//! implicit `100` prefix). The exponent continuation follows, then the
//! remaining digits as declets.

use crate::decimal::{Class, Decomposed, Unpacked};
use crate::declet;
use crate::layout::Layout;

#[inline]
const fn mask(bits: u32) -> u128 {
    (1u128 << bits) - 1
}

#[inline]
const fn trailing_scale(layout: &Layout) -> u128 {
    10u128.pow(layout.digits - 1)
}

/// Classify a DPD encoding as finite, infinite or NaN.
///
/// Specials share their combination-field patterns with BID.
#[must_use]
pub fn classify(bits: u128, layout: &Layout) -> Class {
    crate::bid::classify(bits, layout)
}

/// Extract sign, unbiased exponent and significand from a finite DPD encoding.
#[must_use]
pub fn decompose(bits: u128, layout: &Layout) -> Decomposed {
    let negative = (bits >> layout.sign_shift()) & 1 == 1;
    let combo = (bits >> layout.combination_shift()) & 0x1f;

    let (exponent_high, leading_digit) = if combo >> 3 != 0b11 {
        (combo >> 3, combo & 0x7)
    } else {
        ((combo >> 1) & 0x3, 0x8 | (combo & 1))
    };

    let continuation = (bits >> layout.trailing_bits) & mask(layout.continuation_bits());
    let biased = (exponent_high << layout.continuation_bits()) | continuation;
    let trailing = declet::to_binary(bits & mask(layout.trailing_bits), layout.declets());

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let exponent = biased as i32 - layout.bias;
    Decomposed {
        negative,
        exponent,
        significand: leading_digit * trailing_scale(layout) + trailing,
    }
}

/// Pack sign, unbiased exponent and significand into a DPD encoding.
///
/// The significand must not exceed the width's precision and the exponent
/// must be in range.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn compose(value: &Decomposed, layout: &Layout) -> u128 {
    let scale = trailing_scale(layout);
    let leading_digit = value.significand / scale;
    let trailing = value.significand % scale;

    let biased = (value.exponent + layout.bias) as u128;
    let exponent_high = biased >> layout.continuation_bits();
    let continuation = biased & mask(layout.continuation_bits());

    let combo = if leading_digit < 8 {
        (exponent_high << 3) | leading_digit
    } else {
        0b11000 | (exponent_high << 1) | (leading_digit & 1)
    };

    (u128::from(value.negative) << layout.sign_shift())
        | (combo << layout.combination_shift())
        | (continuation << layout.trailing_bits)
        | declet::from_binary(trailing, layout.declets())
}

/// Classify and split any DPD encoding.
#[must_use]
pub fn unpack(bits: u128, layout: &Layout) -> Unpacked {
    let negative = (bits >> layout.sign_shift()) & 1 == 1;
    match classify(bits, layout) {
        Class::Finite => Unpacked::Finite(decompose(bits, layout)),
        Class::Infinite => Unpacked::Infinite { negative },
        class => Unpacked::Nan {
            negative,
            signaling: class == Class::SignalingNan,
            payload: declet::to_binary(bits & mask(layout.trailing_bits), layout.declets()),
        },
    }
}

/// Inverse of [`unpack`], producing canonical encodings for infinities and NaNs.
#[must_use]
pub fn pack(value: &Unpacked, layout: &Layout) -> u128 {
    match *value {
        Unpacked::Finite(ref fields) => compose(fields, layout),
        Unpacked::Infinite { negative } => {
            (u128::from(negative) << layout.sign_shift())
                | (0b11110 << layout.combination_shift())
        }
        Unpacked::Nan {
            negative,
            signaling,
            payload,
        } => {
            (u128::from(negative) << layout.sign_shift())
                | (0b11111 << layout.combination_shift())
                | (u128::from(signaling) << (layout.combination_shift() - 1))
                | declet::from_binary(payload, layout.declets())
        }
    }
}
