//! Densely packed decimal declets
//!
//! A declet stores three decimal digits in 10 bits. Digits 0-7 are "small"
//! (3 bits), 8-9 are "large" (1 bit plus an indicator). The indicator bits
//! `v`, `wx` and `st` select one of eight patterns:
//!
//! ```text
//! | large | pqr stu v wxy |
//! | ----- | ------------- |
//! | none  | bcd fgh 0 jkm |
//! | right | bcd fgh 1 00m |
//! | mid   | bcd jkh 1 01m |
//! | left  | jkd fgh 1 10m |
//! | l+m   | jkd 00h 1 11m |
//! | l+r   | fgd 01h 1 11m |
//! | m+r   | bcd 10h 1 11m |
//! | all   | 00d 11h 1 11m |
//! ```
//!
//! where the digits are `abcd`, `efgh` and `ijkm` from left to right.

/// Pack a binary number in `[0, 999]` into a declet.
#[must_use]
pub const fn pack(bin: u16) -> u16 {
    let d2 = bin / 100;
    let d1 = (bin / 10) % 10;
    let d0 = bin % 10;
    let m = d0 & 1;

    match (d2 >= 8, d1 >= 8, d0 >= 8) {
        (false, false, false) => (d2 << 7) | (d1 << 4) | d0,
        (false, false, true) => (d2 << 7) | (d1 << 4) | 0b1000 | m,
        (false, true, false) => (d2 << 7) | (((d0 >> 1) & 3) << 5) | ((d1 & 1) << 4) | 0b1010 | m,
        (true, false, false) => {
            (((d0 >> 1) & 3) << 8) | ((d2 & 1) << 7) | (d1 << 4) | 0b1100 | m
        }
        (true, true, false) => {
            (((d0 >> 1) & 3) << 8) | ((d2 & 1) << 7) | ((d1 & 1) << 4) | 0b1110 | m
        }
        (true, false, true) => {
            (((d1 >> 1) & 3) << 8) | ((d2 & 1) << 7) | (0b01 << 5) | ((d1 & 1) << 4) | 0b1110 | m
        }
        (false, true, true) => (d2 << 7) | (0b10 << 5) | ((d1 & 1) << 4) | 0b1110 | m,
        (true, true, true) => ((d2 & 1) << 7) | (0b11 << 5) | ((d1 & 1) << 4) | 0b1110 | m,
    }
}

/// Unpack a declet into a binary number in `[0, 999]`.
///
/// Only the low 10 bits are read. The 24 non-canonical declets decode to the
/// same value as their canonical counterparts.
#[must_use]
pub const fn unpack(dpd: u16) -> u16 {
    let pqr = (dpd >> 7) & 0x7;
    let stu = (dpd >> 4) & 0x7;
    let wxy = dpd & 0x7;
    let pq = (dpd >> 8) & 0x3;
    let st = (dpd >> 5) & 0x3;
    let r = (dpd >> 7) & 1;
    let u = (dpd >> 4) & 1;
    let y = dpd & 1;

    let (d2, d1, d0) = if dpd & 0x8 == 0 {
        (pqr, stu, wxy)
    } else {
        match (dpd >> 1) & 0x3 {
            0b00 => (pqr, stu, 8 | y),
            0b01 => (pqr, 8 | u, (st << 1) | y),
            0b10 => (8 | r, stu, (pq << 1) | y),
            _ => match st {
                0b00 => (8 | r, 8 | u, (pq << 1) | y),
                0b01 => (8 | r, (pq << 1) | u, 8 | y),
                0b10 => (pqr, 8 | u, 8 | y),
                _ => (8 | r, 8 | u, 8 | y),
            },
        }
    };
    d2 * 100 + d1 * 10 + d0
}

/// Maps a binary number in `[0, 999]` to its declet.
#[allow(clippy::cast_possible_truncation)]
const BIN_TO_DPD: [u16; 1000] = {
    let mut t = [0u16; 1000];
    let mut i = 0;
    while i < t.len() {
        t[i] = pack(i as u16);
        i += 1;
    }
    t
};

/// Maps a declet to its binary number in `[0, 999]`.
#[allow(clippy::cast_possible_truncation)]
const DPD_TO_BIN: [u16; 1 << 10] = {
    let mut t = [0u16; 1 << 10];
    let mut i = 0;
    while i < t.len() {
        t[i] = unpack(i as u16);
        i += 1;
    }
    t
};

/// Encode the low `count * 3` decimal digits of `value` as `count` declets,
/// least significant declet in the lowest bits.
#[must_use]
pub fn from_binary(mut value: u128, count: u32) -> u128 {
    let mut bits = 0u128;
    for i in 0..count {
        #[allow(clippy::cast_possible_truncation)]
        let group = (value % 1000) as usize;
        bits |= u128::from(BIN_TO_DPD[group]) << (10 * i);
        value /= 1000;
    }
    bits
}

/// Decode `count` declets from the low bits of `bits` into a binary number.
#[must_use]
pub fn to_binary(bits: u128, count: u32) -> u128 {
    let mut value = 0u128;
    for i in (0..count).rev() {
        #[allow(clippy::cast_possible_truncation)]
        let declet = ((bits >> (10 * i)) & 0x3ff) as usize;
        value = value * 1000 + u128::from(DPD_TO_BIN[declet]);
    }
    value
}
