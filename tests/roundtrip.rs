use decwire::{
    decode_multi_width, decode_variable_width, encode_multi_width, encode_variable_width,
    swap_bytes, Class, Decimal128, Decimal32, Decimal64, NetworkFormat, Unpacked,
};
use proptest::prelude::*;

/// Any finite decimal64, canonical significand
fn finite64() -> impl Strategy<Value = Decimal64> {
    (any::<bool>(), -398i32..=369, 0u128..=9_999_999_999_999_999)
        .prop_map(|(negative, exponent, significand)| {
            Decimal64::from_parts(negative, exponent, significand)
        })
}

/// Finite decimal64 values near the compact rows
fn small64() -> impl Strategy<Value = Decimal64> {
    (any::<bool>(), -20i32..=20, 0u128..(1 << 36))
        .prop_map(|(negative, exponent, significand)| {
            Decimal64::from_parts(negative, exponent, significand)
        })
}

/// Infinities and NaNs with arbitrary payloads
fn special64() -> impl Strategy<Value = Decimal64> {
    prop_oneof![
        any::<bool>().prop_map(|negative| Decimal64::pack(&Unpacked::Infinite { negative })),
        (any::<bool>(), any::<bool>(), 0u128..=999_999_999_999_999).prop_map(
            |(negative, signaling, payload)| Decimal64::pack(&Unpacked::Nan {
                negative,
                signaling,
                payload,
            })
        ),
    ]
}

fn any64() -> impl Strategy<Value = Decimal64> {
    prop_oneof![finite64(), small64(), special64()]
}

proptest! {
    #[test]
    fn network_roundtrip_decimal64(value in any64()) {
        let bytes = value.to_network_bytes();
        prop_assert_eq!(Decimal64::from_network_bytes(bytes), value);
    }

    #[test]
    fn network_roundtrip_decimal32(
        negative in any::<bool>(),
        exponent in -101i32..=90,
        significand in 0u128..=9_999_999,
    ) {
        let value = Decimal32::from_parts(negative, exponent, significand);
        prop_assert_eq!(Decimal32::from_network_bytes(value.to_network_bytes()), value);
        prop_assert_eq!(value.decompose().significand, significand);
        prop_assert_eq!(value.decompose().exponent, exponent);
    }

    #[test]
    fn network_roundtrip_decimal128(
        negative in any::<bool>(),
        exponent in -6176i32..=6111,
        significand in 0u128..=9_999_999_999_999_999_999_999_999_999_999_999,
    ) {
        let value = Decimal128::from_parts(negative, exponent, significand);
        prop_assert_eq!(Decimal128::from_network_bytes(value.to_network_bytes()), value);
    }

    #[test]
    fn densely_packed_roundtrip(value in any64()) {
        prop_assert_eq!(Decimal64::from_densely_packed(value.to_densely_packed()), value);
        prop_assert_eq!(Decimal64::from_binary_integral(value.to_binary_integral()), value);
    }

    #[test]
    fn decompose_matches_from_parts(value in finite64()) {
        let fields = value.decompose();
        prop_assert_eq!(
            Decimal64::from_parts(fields.negative, fields.exponent, fields.significand),
            value
        );
    }

    #[test]
    fn multi_width_roundtrip(value in any64()) {
        let encoded = encode_multi_width(value);
        prop_assert!(matches!(encoded.len(), 2 | 3 | 4 | 5 | 8));
        let decoded = decode_multi_width(encoded.as_bytes(), encoded.len()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn variable_width_roundtrip(value in any64()) {
        let encoded = encode_variable_width(value);
        prop_assert!(matches!(encoded.len(), 2 | 3 | 4 | 9));
        let (decoded, used) = decode_variable_width(encoded.as_bytes()).unwrap();
        prop_assert_eq!(used, encoded.len());
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn multi_width_minimality(
        exponent in -4i32..4,
        significand in 0u128..(1 << 13),
    ) {
        let value = Decimal64::from_parts(false, exponent, significand);
        prop_assert_eq!(encode_multi_width(value).len(), 2);
        let negated = Decimal64::from_parts(true, exponent, significand);
        prop_assert_eq!(encode_multi_width(negated).len(), 4);
    }

    #[test]
    fn multi_width_selects_smallest_row(value in small64()) {
        let fields = value.decompose();
        let biased = fields.exponent + 398;
        let sig = fields.significand;
        let expected = if !fields.negative && (394..402).contains(&biased) && sig < 1 << 13 {
            2
        } else if !fields.negative && (394..402).contains(&biased) && sig < 1 << 21 {
            3
        } else if (382..414).contains(&biased) && sig < 1 << 26 {
            4
        } else if (382..414).contains(&biased) && sig < 1 << 34 {
            5
        } else {
            8
        };
        prop_assert_eq!(encode_multi_width(value).len(), expected);
    }

    #[test]
    fn fallback_totality(value in special64()) {
        let encoded = encode_multi_width(value);
        let network = value.to_network_bytes();
        prop_assert_eq!(encoded.as_bytes(), network.as_slice());
        let encoded = encode_variable_width(value);
        prop_assert_eq!(encoded.len(), 9);
        prop_assert_eq!(encoded.as_bytes()[0], 0xFF);
        prop_assert_ne!(value.class(), Class::Finite);
    }

    #[test]
    fn eight_bytes_always_decode(bytes in any::<[u8; 8]>()) {
        let decoded = decode_multi_width(&bytes, 8).unwrap();
        prop_assert_eq!(decoded, Decimal64::from_network_bytes(bytes));
    }

    #[test]
    fn variable_width_never_reads_past_its_size(bytes in any::<[u8; 9]>()) {
        let (_, used) = decode_variable_width(&bytes).unwrap();
        prop_assert!(matches!(used, 2 | 3 | 4 | 9));
    }

    #[test]
    fn f64_roundtrip(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        // Binary64 values have at most 17 significant digits, within decimal128.
        prop_assert_eq!(Decimal128::from_f64(x).to_f64(), x);
    }

    #[test]
    fn swap_bytes_twice(a in any::<u16>(), b in any::<u32>(), c in any::<u64>()) {
        prop_assert_eq!(swap_bytes(swap_bytes(a)), a);
        prop_assert_eq!(swap_bytes(swap_bytes(b)), b);
        prop_assert_eq!(swap_bytes(swap_bytes(c)), c);
    }
}
