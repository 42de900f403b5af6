//! Byte-order swapping for integral types
//!
//! [`swap_bytes`] reverses the bytes of any integer width, returning the same
//! type it is given. [`host_to_network`] and [`network_to_host`] apply the swap
//! only on little-endian targets, so network (big-endian) words can be built
//! from native integers and then copied out with `to_ne_bytes`.

/// Integral types whose byte order can be reversed
pub trait SwapBytes: Copy {
    /// Return the value with the order of its bytes reversed
    #[must_use]
    fn swap_bytes(self) -> Self;
}

macro_rules! impl_swap_bytes {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SwapBytes for $ty {
                #[inline]
                fn swap_bytes(self) -> Self {
                    <$ty>::swap_bytes(self)
                }
            }
        )*
    };
}

impl_swap_bytes!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize);

/// Reverse the byte order of `x`
#[inline]
#[must_use]
pub fn swap_bytes<T: SwapBytes>(x: T) -> T {
    x.swap_bytes()
}

/// Reverse the byte order of a 16-bit word
#[inline]
#[must_use]
pub const fn swap_bytes16(x: u16) -> u16 {
    x.swap_bytes()
}

/// Reverse the byte order of a 32-bit word
#[inline]
#[must_use]
pub const fn swap_bytes32(x: u32) -> u32 {
    x.swap_bytes()
}

/// Reverse the byte order of a 64-bit word
#[inline]
#[must_use]
pub const fn swap_bytes64(x: u64) -> u64 {
    x.swap_bytes()
}

/// Convert a host-order word to network (big-endian) order
#[inline]
#[must_use]
pub fn host_to_network<T: SwapBytes>(x: T) -> T {
    if cfg!(target_endian = "little") {
        x.swap_bytes()
    } else {
        x
    }
}

/// Convert a network-order (big-endian) word to host order
#[inline]
#[must_use]
pub fn network_to_host<T: SwapBytes>(x: T) -> T {
    host_to_network(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_documented_values() {
        assert_eq!(swap_bytes(0x1234_u16), 0x3412);
        assert_eq!(swap_bytes(0x4321_i16), 0x2143);
        assert_eq!(swap_bytes(0x0102_0304_u32), 0x0403_0201);
        assert_eq!(swap_bytes(0x1122_3344_i32), 0x4433_2211);
        assert_eq!(swap_bytes(0x0102_0304_0506_0708_u64), 0x0807_0605_0403_0201);
        assert_eq!(
            swap_bytes(0x0a0b_0c0d_0e0f_0102_i64),
            0x0201_0f0e_0d0c_0b0a
        );
    }

    #[test]
    fn test_fixed_width_swaps() {
        assert_eq!(swap_bytes16(0xabcd), 0xcdab);
        assert_eq!(swap_bytes32(0xdead_beef), 0xefbe_adde);
        assert_eq!(swap_bytes64(0x0000_0000_0000_00ff), 0xff00_0000_0000_0000);
    }

    #[test]
    fn test_single_byte_is_identity() {
        assert_eq!(swap_bytes(0x5a_u8), 0x5a);
        assert_eq!(swap_bytes(-3_i8), -3);
    }

    #[test]
    fn test_swap_twice_is_identity() {
        for x in [0u16, 1, 0x00ff, 0x1234, u16::MAX] {
            assert_eq!(swap_bytes(swap_bytes(x)), x);
        }
        for x in [0u32, 1, 0x0102_0304, 0x8000_0001, u32::MAX] {
            assert_eq!(swap_bytes(swap_bytes(x)), x);
        }
        for x in [0u64, 1, 0x0102_0304_0506_0708, u64::MAX - 7] {
            assert_eq!(swap_bytes(swap_bytes(x)), x);
        }
    }

    #[test]
    fn test_host_to_network_is_big_endian() {
        let word = 0x0102_0304_0506_0708_u64;
        assert_eq!(
            host_to_network(word).to_ne_bytes(),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(network_to_host(host_to_network(word)), word);
    }
}
