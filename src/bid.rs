//! Binary integer decimal (BID) field layout
//!
//! The significand is a plain binary integer. When the two bits below the sign
//! are not `11` the exponent sits right below the sign and the significand
//! fills the remaining `t + 3` bits. Otherwise the exponent is shifted down by
//! two bits and only `t + 1` significand bits are stored, the implicit prefix
//! `100` completing a significand of 2^(t+3) or more.

use crate::decimal::{Class, Decomposed, Unpacked};
use crate::layout::Layout;

#[inline]
const fn mask(bits: u32) -> u128 {
    (1u128 << bits) - 1
}

/// Classify a BID encoding as finite, infinite or NaN.
#[must_use]
pub fn classify(bits: u128, layout: &Layout) -> Class {
    let combo = (bits >> layout.combination_shift()) & 0x1f;
    match combo {
        0b11111 if (bits >> (layout.combination_shift() - 1)) & 1 == 1 => Class::SignalingNan,
        0b11111 => Class::QuietNan,
        0b11110 => Class::Infinite,
        _ => Class::Finite,
    }
}

/// Extract sign, unbiased exponent and significand from a finite BID encoding.
///
/// The fields are taken verbatim: a non-canonical significand is returned
/// as stored, and infinities or NaNs yield meaningless fields.
#[must_use]
pub fn decompose(bits: u128, layout: &Layout) -> Decomposed {
    let negative = (bits >> layout.sign_shift()) & 1 == 1;
    let exponent_mask = mask(layout.exponent_bits);

    let (biased, significand) = if (bits >> (layout.width - 3)) & 0b11 != 0b11 {
        let shift = layout.wide_significand_bits();
        ((bits >> shift) & exponent_mask, bits & mask(shift))
    } else {
        let shift = layout.narrow_significand_bits();
        (
            (bits >> shift) & exponent_mask,
            (bits & mask(shift)) | (0x8 << layout.trailing_bits),
        )
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let exponent = biased as i32 - layout.bias;
    Decomposed {
        negative,
        exponent,
        significand,
    }
}

/// Pack sign, unbiased exponent and significand into a BID encoding.
///
/// The significand must not exceed the width's precision and the exponent
/// must be in range.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn compose(value: &Decomposed, layout: &Layout) -> u128 {
    let sign = u128::from(value.negative) << layout.sign_shift();
    let biased = (value.exponent + layout.bias) as u128;

    let wide = layout.wide_significand_bits();
    if value.significand < 1u128 << wide {
        sign | (biased << wide) | value.significand
    } else {
        let narrow = layout.narrow_significand_bits();
        sign | (0b11 << (layout.width - 3))
            | (biased << narrow)
            | (value.significand & mask(narrow))
    }
}

/// Classify and split any BID encoding.
///
/// Non-canonical significands and NaN payloads (too many digits for the
/// width) are read as zero.
#[must_use]
pub fn unpack(bits: u128, layout: &Layout) -> Unpacked {
    let negative = (bits >> layout.sign_shift()) & 1 == 1;
    match classify(bits, layout) {
        Class::Finite => {
            let mut fields = decompose(bits, layout);
            if fields.significand > layout.max_significand() {
                fields.significand = 0;
            }
            Unpacked::Finite(fields)
        }
        Class::Infinite => Unpacked::Infinite { negative },
        class => {
            let payload = bits & mask(layout.trailing_bits);
            let max_payload = layout.max_significand() / 10;
            Unpacked::Nan {
                negative,
                signaling: class == Class::SignalingNan,
                payload: if payload > max_payload { 0 } else { payload },
            }
        }
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
                | (payload & mask(layout.trailing_bits))
        }
    }
}
