#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: i32, height: i32) -> Vec<u8> {
    let pixel_bytes = (width * height * 3) as u32;
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(54 + pixel_bytes).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[34..38].copy_from_slice(&pixel_bytes.to_le_bytes()); // image size
    bmp
}

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_roundtrip"] {
        fs::create_dir_all(dir).unwrap();

        // 1x1
        let mut bmp = header(1, 1);
        bmp.extend_from_slice(&[0xff, 0x00, 0x00]);
        fs::write(format!("{dir}/bmp_1x1.bmp"), bmp).unwrap();

        // 3x2, unpadded rows
        let mut bmp = header(3, 2);
        bmp.extend((0u8..18).map(|b| b * 13));
        fs::write(format!("{dir}/bmp_3x2.bmp"), bmp).unwrap();

        // Image size left at zero (tolerated)
        let mut bmp = header(2, 2);
        bmp[34..38].fill(0);
        bmp.extend_from_slice(&[0x80; 12]);
        fs::write(format!("{dir}/bmp_no_image_size.bmp"), bmp).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
        let mut bmp = header(4, 4);
        bmp.extend_from_slice(&[1; 10]);
        fs::write(format!("{dir}/bmp_short_pixels.bmp"), bmp).unwrap();
    }

    println!("Generated seed corpus in fuzz/corpus/");
}
