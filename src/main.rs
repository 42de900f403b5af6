use decwire::{
    decode_multi_width, decode_variable_width, encode_multi_width, encode_variable_width,
    Decimal128, Decimal32, Decimal64, NetworkFormat, Unpacked,
};
use tracing_subscriber::EnvFilter;

fn format_binary(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:08b}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("decwire=info")),
        )
        .init();

    println!("=== Field Decomposition ===\n");
    let value = Decimal64::from_parts(false, -57, 1_234_567_890_123_456);
    let fields = value.decompose();
    println!("  {value}");
    println!(
        "    negative={}, exponent={}, significand={}",
        fields.negative, fields.exponent, fields.significand
    );
    println!("    native bits:  {:#018x}", value.to_bits());
    println!("    DPD bits:     {:#018x}", value.to_densely_packed());
    println!("    BID bits:     {:#018x}", value.to_binary_integral());

    println!("\n=== Network Format ===\n");
    println!(
        "  decimal32  {}: {:02X?}",
        Decimal32::from_parts(false, 0, 1),
        Decimal32::from_parts(false, 0, 1).to_network_bytes()
    );
    println!("  decimal64  {value}: {:02X?}", value.to_network_bytes());
    let wide = Decimal128::from_parts(true, -6176, 1_234_567_890_123_456_789_012_345_678_901_234);
    println!("  decimal128 {wide}: {:02X?}", wide.to_network_bytes());

    println!("\n=== Compact Encodings ===\n");
    let examples = [
        Decimal64::from_parts(false, 0, 123),
        Decimal64::from_parts(false, -2, 1_000_000),
        Decimal64::from_parts(true, -2, 12345),
        Decimal64::from_parts(false, 0, 1 << 30),
        Decimal64::from_parts(false, 20, 7),
        Decimal64::from_f64(0.1),
        Decimal64::neg_infinity(),
        Decimal64::nan(),
    ];

    for example in examples {
        let multi = encode_multi_width(example);
        let variable = encode_variable_width(example);
        println!("  {example} ->");
        println!("    Multi-Width:    {} ({} bytes)", format_binary(multi.as_bytes()), multi.len());
        println!(
            "    Variable-Width: {} ({} bytes)",
            format_binary(variable.as_bytes()),
            variable.len()
        );

        // Verify roundtrip
        match decode_multi_width(multi.as_bytes(), multi.len()) {
            Ok(decoded) if decoded == example => println!("    ✓ Multi-Width roundtrip"),
            Ok(decoded) => println!("    ✗ Multi-Width decoded {decoded}"),
            Err(e) => println!("    ✗ Decode error: {e}"),
        }
        match decode_variable_width(variable.as_bytes()) {
            Ok((decoded, _)) if decoded == example => println!("    ✓ Variable-Width roundtrip"),
            Ok((decoded, _)) => println!("    ✗ Variable-Width decoded {decoded}"),
            Err(e) => println!("    ✗ Decode error: {e}"),
        }
        println!();
    }

    println!("=== Binary Floating Point ===\n");
    for x in [0.1, 123.45, 1.234_567_890_123_45e-42, f64::MAX] {
        let decimal = Decimal64::from_f64(x);
        println!("  {x:e} -> {decimal} -> {:e}", decimal.to_f64());
    }

    println!("\n=== Special Values ===\n");
    let specials = [
        ("Negative Infinity", Decimal64::neg_infinity()),
        ("Positive Zero", Decimal64::zero()),
        ("Positive Infinity", Decimal64::infinity()),
        ("NaN", Decimal64::nan()),
        (
            "Signaling NaN",
            Decimal64::pack(&Unpacked::Nan {
                negative: false,
                signaling: true,
                payload: 7,
            }),
        ),
    ];

    for (name, special) in specials {
        println!("  {name} -> {:02X?}", special.to_network_bytes());
    }

    println!("\n=== Demo Complete ===");
}
