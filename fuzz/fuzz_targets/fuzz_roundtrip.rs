#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpedit::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode to the same bytes (minus trailing data)
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let Ok(decoded) = decode(data, Some(&limits), &enough::Unstoppable) else {
        return;
    };

    let reencoded = decoded
        .encode(&enough::Unstoppable)
        .expect("decoded bitmap failed to encode");
    assert_eq!(&data[..reencoded.len()], &reencoded[..], "roundtrip byte mismatch");

    // Rotated output must decode with transposed dimensions
    let rotated = process(Operation::RotateLeft, data, Some(&limits), &enough::Unstoppable)
        .expect("rotation failed on decodable input");
    let Ok(again) = decode(&rotated, None, &enough::Unstoppable) else {
        panic!("rotated output failed to decode");
    };
    assert_eq!(again.pixels.rows(), decoded.pixels.cols());
    assert_eq!(again.pixels.cols(), decoded.pixels.rows());
});
