//! Field tables of the compact decimal64 encodings
//!
//! Every compact layout stores, most significant bit first, an optional
//! predicate, an optional sign bit, an exponent offset from a base biased
//! exponent, and the binary significand:
//!
//! ```text
//! Multi-Width (size passed out of band)
//! | size | S | E |   B |  T |
//! |    1 | 0 | 1 |  -2 |  7 |   decode only
//! |    2 | 0 | 3 |  -4 | 13 |
//! |    3 | 0 | 3 |  -4 | 21 |
//! |    4 | 1 | 5 | -16 | 26 |
//! |    5 | 1 | 5 | -16 | 34 |
//! |    8 | network format  |
//!
//! Variable-Width (self-describing)
//! | size |        P | S | E |   B |  T |
//! |    2 |        0 | 0 | 2 |  -2 | 13 |
//! |    3 |       10 | 0 | 3 |  -4 | 19 |
//! |    4 |       11 | 1 | 5 | -16 | 24 |
//! |    9 | 11111111 | network format  |
//! ```
//!
//! `B` is relative to the decimal64 bias: an exponent field of 0 in a row with
//! `B = -4` means the biased exponent 394, i.e. an unbiased exponent of -4.

use crate::decimal::BidFields;
use crate::layout::DECIMAL64_LAYOUT;

/// Bytes of the full network form of a decimal64
pub const NETWORK_SIZE: usize = 8;

/// First byte of a Variable-Width encoding that carries the network form
pub const VARIABLE_WIDTH_ESCAPE: u8 = 0xFF;

/// One fixed-size row of a compact encoding table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    /// Encoded size in bytes
    pub size: usize,
    /// Predicate bit value, right-aligned
    pub prefix: u64,
    pub prefix_bits: usize,
    pub signed: bool,
    pub exponent_bits: usize,
    /// Biased exponent stored as an exponent field of 0
    pub exponent_base: i32,
    pub significand_bits: usize,
}

const fn tier(
    size: usize,
    prefix: u64,
    prefix_bits: usize,
    signed: bool,
    exponent_bits: usize,
    bias: i32,
    significand_bits: usize,
) -> Tier {
    Tier {
        size,
        prefix,
        prefix_bits,
        signed,
        exponent_bits,
        exponent_base: DECIMAL64_LAYOUT.bias + bias,
        significand_bits,
    }
}

/// Size-1 Multi-Width row, never produced by the encoder
pub const MULTI_WIDTH_SIZE_1: Tier = tier(1, 0, 0, false, 1, -2, 7);

/// Multi-Width rows tried by the encoder, smallest first
pub const MULTI_WIDTH_TIERS: [Tier; 4] = [
    tier(2, 0, 0, false, 3, -4, 13),
    tier(3, 0, 0, false, 3, -4, 21),
    tier(4, 0, 0, true, 5, -16, 26),
    tier(5, 0, 0, true, 5, -16, 34),
];

/// Variable-Width rows, smallest first
pub const VARIABLE_WIDTH_TIERS: [Tier; 3] = [
    tier(2, 0b0, 1, false, 2, -2, 13),
    tier(3, 0b10, 2, false, 3, -4, 19),
    tier(4, 0b11, 2, true, 5, -16, 24),
];

/// Why a value cannot use a given row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Misfit {
    Sign,
    Exponent,
    Significand,
}

impl Tier {
    /// Multi-Width row for an encoded size, if it is a compact one
    #[must_use]
    pub fn multi_width(size: usize) -> Option<Self> {
        if size == MULTI_WIDTH_SIZE_1.size {
            return Some(MULTI_WIDTH_SIZE_1);
        }
        MULTI_WIDTH_TIERS.iter().copied().find(|t| t.size == size)
    }

    /// One past the largest biased exponent this row holds
    #[must_use]
    pub const fn exponent_end(&self) -> i32 {
        self.exponent_base + (1 << self.exponent_bits)
    }

    /// Check whether `fields` can be stored in this row without loss.
    ///
    /// # Errors
    ///
    /// Returns the first field that does not fit.
    pub const fn check(&self, fields: &BidFields) -> Result<(), Misfit> {
        if fields.negative && !self.signed {
            return Err(Misfit::Sign);
        }
        if fields.biased_exponent < self.exponent_base
            || fields.biased_exponent >= self.exponent_end()
        {
            return Err(Misfit::Exponent);
        }
        if fields.mantissa >> self.significand_bits != 0 {
            return Err(Misfit::Significand);
        }
        Ok(())
    }
}
