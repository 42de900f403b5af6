//! Bit layouts of the three IEEE 754-2008 decimal interchange widths
//!
//! Every width shares the same shape, most significant bit first:
//!
//! ```text
//! [S|GGGGG|CCC...C|TTT...T]
//!  1   5    w - 2    t
//! ```
//!
//! `S` is the sign, `G` the 5-bit combination field, `C` the exponent
//! continuation and `T` the trailing significand. BID reads `G`/`C`/`T` as one
//! binary field split in one of two ways; DPD keeps `G` as a (digit, exponent)
//! selector and stores `T` as declets.

/// Width-specific constants of a decimal interchange format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Total storage width in bits (32, 64 or 128)
    pub width: u32,
    /// Bits of the biased exponent (`w + 2`)
    pub exponent_bits: u32,
    /// Bits of the trailing significand field (`t`)
    pub trailing_bits: u32,
    /// Exponent bias
    pub bias: i32,
    /// Decimal digits of precision
    pub digits: u32,
}

/// 32-bit decimal: 7 digits, bias 101
pub const DECIMAL32_LAYOUT: Layout = Layout {
    width: 32,
    exponent_bits: 8,
    trailing_bits: 20,
    bias: 101,
    digits: 7,
};

/// 64-bit decimal: 16 digits, bias 398
pub const DECIMAL64_LAYOUT: Layout = Layout {
    width: 64,
    exponent_bits: 10,
    trailing_bits: 50,
    bias: 398,
    digits: 16,
};

/// 128-bit decimal: 34 digits, bias 6176
pub const DECIMAL128_LAYOUT: Layout = Layout {
    width: 128,
    exponent_bits: 14,
    trailing_bits: 110,
    bias: 6176,
    digits: 34,
};

impl Layout {
    /// Position of the sign bit
    #[must_use]
    pub const fn sign_shift(&self) -> u32 {
        self.width - 1
    }

    /// Position of the lowest bit of the combination field
    #[must_use]
    pub const fn combination_shift(&self) -> u32 {
        self.width - 6
    }

    /// Bits of the exponent continuation field
    #[must_use]
    pub const fn continuation_bits(&self) -> u32 {
        self.exponent_bits - 2
    }

    /// Bits of the significand field in the wide-significand BID branch
    #[must_use]
    pub const fn wide_significand_bits(&self) -> u32 {
        self.trailing_bits + 3
    }

    /// Bits stored explicitly in the narrow-significand BID branch
    #[must_use]
    pub const fn narrow_significand_bits(&self) -> u32 {
        self.trailing_bits + 1
    }

    /// Declets in the trailing significand field
    #[must_use]
    pub const fn declets(&self) -> u32 {
        self.trailing_bits / 10
    }

    /// Largest biased exponent, `3 * 2^w - 1`
    #[must_use]
    pub const fn max_biased_exponent(&self) -> i32 {
        3 * (1 << self.continuation_bits()) - 1
    }

    /// Smallest unbiased exponent of a significand integer
    #[must_use]
    pub const fn min_exponent(&self) -> i32 {
        -self.bias
    }

    /// Largest unbiased exponent of a significand integer
    #[must_use]
    pub const fn max_exponent(&self) -> i32 {
        self.max_biased_exponent() - self.bias
    }

    /// `10^digits - 1`
    #[must_use]
    pub const fn max_significand(&self) -> u128 {
        10u128.pow(self.digits) - 1
    }

    /// Mask covering every bit of the storage
    #[must_use]
    pub const fn storage_mask(&self) -> u128 {
        if self.width == 128 {
            u128::MAX
        } else {
            (1u128 << self.width) - 1
        }
    }
}
