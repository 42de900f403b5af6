//! Conversions between decimal fields and binary floating point

use std::fmt::{self, Write};

use crate::decimal::{Decomposed, Unpacked};
use crate::layout::Layout;

/// Powers of ten exactly representable as `f64`
const POW10_F64: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Powers of ten exactly representable as `f32`
const POW10_F32: [f32; 11] = [1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10];

/// Fixed-capacity buffer for formatting numbers without touching the heap
struct StackBuf {
    buf: [u8; 48],
    len: usize,
}

impl StackBuf {
    const fn new() -> Self {
        Self {
            buf: [0; 48],
            len: 0,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn as_str(&self) -> &str {
        // Safety: fmt::Write for str only writes valid UTF-8
        unsafe { std::str::from_utf8_unchecked(&self.buf[..self.len]) }
    }
}

impl fmt::Write for StackBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let new_len = self.len + bytes.len();
        if new_len > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..new_len].copy_from_slice(bytes);
        self.len = new_len;
        Ok(())
    }
}

/// Nearest `f64` to an unpacked decimal, ties to even.
#[must_use]
pub fn unpacked_to_f64(value: &Unpacked) -> f64 {
    let magnitude = match *value {
        Unpacked::Nan { .. } => f64::NAN,
        Unpacked::Infinite { .. } => f64::INFINITY,
        Unpacked::Finite(Decomposed {
            exponent,
            significand,
            ..
        }) => finite_to_f64(exponent, significand),
    };
    if value.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Nearest `f32` to an unpacked decimal, ties to even.
#[must_use]
pub fn unpacked_to_f32(value: &Unpacked) -> f32 {
    let magnitude = match *value {
        Unpacked::Nan { .. } => f32::NAN,
        Unpacked::Infinite { .. } => f32::INFINITY,
        Unpacked::Finite(Decomposed {
            exponent,
            significand,
            ..
        }) => finite_to_f32(exponent, significand),
    };
    if value.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn finite_to_f64(exponent: i32, significand: u128) -> f64 {
    if significand == 0 {
        return 0.0;
    }
    // One exact operand pair and a single rounding step
    if significand <= 1 << 53 && exponent.unsigned_abs() < POW10_F64.len() as u32 {
        let m = significand as f64;
        let p = POW10_F64[exponent.unsigned_abs() as usize];
        return if exponent >= 0 { m * p } else { m / p };
    }
    let mut buf = StackBuf::new();
    if write!(buf, "{significand}e{exponent}").is_err() {
        return f64::NAN;
    }
    // `<digits>e<exponent>` always parses; the float parser rounds correctly.
    buf.as_str().parse().unwrap_or(f64::NAN)
}

#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn finite_to_f32(exponent: i32, significand: u128) -> f32 {
    if significand == 0 {
        return 0.0;
    }
    if significand <= 1 << 24 && exponent.unsigned_abs() < POW10_F32.len() as u32 {
        let m = significand as f32;
        let p = POW10_F32[exponent.unsigned_abs() as usize];
        return if exponent >= 0 { m * p } else { m / p };
    }
    let mut buf = StackBuf::new();
    if write!(buf, "{significand}e{exponent}").is_err() {
        return f32::NAN;
    }
    buf.as_str().parse().unwrap_or(f32::NAN)
}

/// Decimal fields of an `f64`, from its shortest round-trip digit string,
/// rounded half-even to `layout`'s precision.
///
/// Values below the smallest exponent are rounded into it (possibly to zero);
/// values beyond the largest exponent are padded with zeros when the precision
/// allows and become infinite otherwise.
#[must_use]
pub fn unpacked_from_f64(value: f64, layout: &Layout) -> Unpacked {
    let negative = value.is_sign_negative();
    if value.is_nan() {
        return Unpacked::Nan {
            negative,
            signaling: false,
            payload: 0,
        };
    }
    if value.is_infinite() {
        return Unpacked::Infinite { negative };
    }
    let mut buf = StackBuf::new();
    if write!(buf, "{:e}", value.abs()).is_err() {
        return Unpacked::Nan {
            negative,
            signaling: false,
            payload: 0,
        };
    }
    from_scientific(negative, buf.as_bytes(), layout)
}

/// Decimal fields of an `f32`; see [`unpacked_from_f64`].
#[must_use]
pub fn unpacked_from_f32(value: f32, layout: &Layout) -> Unpacked {
    let negative = value.is_sign_negative();
    if value.is_nan() {
        return Unpacked::Nan {
            negative,
            signaling: false,
            payload: 0,
        };
    }
    if value.is_infinite() {
        return Unpacked::Infinite { negative };
    }
    let mut buf = StackBuf::new();
    if write!(buf, "{:e}", value.abs()).is_err() {
        return Unpacked::Nan {
            negative,
            signaling: false,
            payload: 0,
        };
    }
    from_scientific(negative, buf.as_bytes(), layout)
}

/// Parse `d[.ddd]e[-]x` as produced by `{:e}` and fit it into `layout`.
fn from_scientific(negative: bool, text: &[u8], layout: &Layout) -> Unpacked {
    let mut significand = 0u128;
    let mut digits = 0u32;
    let mut fraction_digits = 0i32;
    let mut in_fraction = false;
    let mut rest = text;

    while let Some((&b, tail)) = rest.split_first() {
        rest = tail;
        match b {
            b'0'..=b'9' => {
                significand = significand * 10 + u128::from(b - b'0');
                if significand != 0 {
                    digits += 1;
                }
                if in_fraction {
                    fraction_digits += 1;
                }
            }
            b'.' => in_fraction = true,
            _ => break,
        }
    }

    let mut exponent = 0i32;
    let mut exponent_negative = false;
    for &b in rest {
        match b {
            b'-' => exponent_negative = true,
            b'0'..=b'9' => exponent = exponent * 10 + i32::from(b - b'0'),
            _ => {}
        }
    }
    if exponent_negative {
        exponent = -exponent;
    }

    fit(
        Decomposed {
            negative,
            exponent: exponent - fraction_digits,
            significand,
        },
        digits,
        layout,
    )
}

/// Divide by `10^shift`, rounding half to even. Shifts past the range of
/// `u128` round to zero.
fn shift_right_even(value: u128, shift: u32) -> u128 {
    let Some(divisor) = 10u128.checked_pow(shift) else {
        return 0;
    };
    let quotient = value / divisor;
    let remainder = value % divisor;
    let half = divisor / 2;
    if remainder > half || (remainder == half && divisor > 1 && quotient & 1 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

fn digit_count(mut value: u128) -> u32 {
    let mut n = 0;
    while value != 0 {
        value /= 10;
        n += 1;
    }
    n
}

/// Round `value` (with `digits` significant digits) into the precision and
/// exponent range of `layout`.
fn fit(mut value: Decomposed, digits: u32, layout: &Layout) -> Unpacked {
    // Precision and the smallest exponent are honoured in a single rounding.
    #[allow(clippy::cast_possible_wrap)]
    let excess = digits.saturating_sub(layout.digits) as i32;
    let target = (value.exponent + excess).max(layout.min_exponent());
    if target > value.exponent {
        let shift = (target - value.exponent).unsigned_abs();
        value.significand = shift_right_even(value.significand, shift);
        value.exponent = target;
        if value.significand > layout.max_significand() {
            value.significand /= 10;
            value.exponent += 1;
        }
    }

    if value.exponent > layout.max_exponent() {
        if value.significand == 0 {
            value.exponent = layout.max_exponent();
        }
        while value.exponent > layout.max_exponent()
            && digit_count(value.significand) < layout.digits
        {
            value.significand *= 10;
            value.exponent -= 1;
        }
        if value.exponent > layout.max_exponent() {
            return Unpacked::Infinite {
                negative: value.negative,
            };
        }
    }

    Unpacked::Finite(value)
}
