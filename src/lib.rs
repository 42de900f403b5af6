//! # decwire
//!
//! Wire and storage codecs for IEEE 754-2008 decimal floating point values.
//!
//! - **Field decomposition**: split a 32, 64 or 128-bit decimal, stored as
//!   binary integer decimal (BID) or densely packed decimal (DPD), into sign,
//!   unbiased exponent and integer significand, and pack it back.
//! - **Network format**: the canonical big-endian DPD wire form of every width.
//! - **Compact encodings** for decimal64: Multi-Width (2 to 8 bytes, size sent
//!   out of band) and the self-describing Variable-Width (2 to 9 bytes).
//!
//! The native storage of [`Decimal32`], [`Decimal64`] and [`Decimal128`] is
//! BID unless the `dpd-native` feature is enabled. Wire output is identical
//! either way.
//!
//! ## Examples
//!
//! ```rust
//! use decwire::{decode_multi_width, encode_multi_width, Decimal64, NetworkFormat};
//!
//! // 1.23 as significand 123, exponent -2
//! let price = Decimal64::from_parts(false, -2, 123);
//!
//! // Small non-negative values take two bytes
//! let compact = encode_multi_width(price);
//! assert_eq!(compact.len(), 2);
//! let decoded = decode_multi_width(compact.as_bytes(), compact.len()).unwrap();
//! assert_eq!(decoded, price);
//!
//! // The network form is big-endian DPD
//! let value = Decimal64::from_parts(false, -57, 1_234_567_890_123_456);
//! assert_eq!(
//!     value.to_network_bytes(),
//!     [0x25, 0x55, 0x34, 0xb9, 0xc1, 0xe2, 0x8e, 0x56]
//! );
//! ```
//!
//! ## Layouts
//!
//! ```text
//! Multi-Width                         Variable-Width
//! | size | S | E |   B |  T |        | size |        P | S | E |   B |  T |
//! |    2 | 0 | 3 |  -4 | 13 |        |    2 |        0 | 0 | 2 |  -2 | 13 |
//! |    3 | 0 | 3 |  -4 | 21 |        |    3 |       10 | 0 | 3 |  -4 | 19 |
//! |    4 | 1 | 5 | -16 | 26 |        |    4 |       11 | 1 | 5 | -16 | 24 |
//! |    5 | 1 | 5 | -16 | 34 |        |    9 | 11111111 | network format  |
//! |    8 | network format  |
//! ```
//!
//! `S` sign bits, `E` exponent bits, `B` exponent bias, `T` significand bits,
//! `P` predicate bits.

pub mod backend;
pub mod bid;
pub(crate) mod bits;
pub mod byteorder;
pub(crate) mod compact;
pub(crate) mod convert;
pub(crate) mod decimal;
pub mod declet;
pub(crate) mod decoder;
pub mod dpd;
pub(crate) mod encoder;
pub(crate) mod error;
pub mod layout;
pub(crate) mod network;

// Re-export main types and functions
pub use backend::{BidBackend, DecimalBackend, DpdBackend, Encoding, Platform};
pub use byteorder::{host_to_network, network_to_host, swap_bytes, SwapBytes};
pub use decimal::{
    BidFields, Class, Decimal128, Decimal32, Decimal64, DecimalStorage, Decomposed, Unpacked,
};
pub use decoder::{decode_multi_width, decode_variable_width};
pub use encoder::{
    encode_multi_width, encode_multi_width_into, encode_variable_width,
    encode_variable_width_into, CompactBytes,
};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use layout::{Layout, DECIMAL128_LAYOUT, DECIMAL32_LAYOUT, DECIMAL64_LAYOUT};
pub use network::{read_network, write_network, NetworkFormat};
