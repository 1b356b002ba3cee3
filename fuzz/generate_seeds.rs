#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // PPM 2x2
    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/ppm_2x2.ppm"), ppm).unwrap();

    // PPM 1x1 with comments between every token
    let commented = b"P6 #a\n1 #b\n1\n#c\n255\n\x01\x02\x03";
    fs::write(format!("{dir}/ppm_comments.ppm"), commented).unwrap();

    // PPM 16-bit 1x1
    let deep = b"P6\n1 1\n65535\n\x00\x01\x00\x02\x00\x03";
    fs::write(format!("{dir}/ppm_16bit.ppm"), deep).unwrap();

    // PPM 4x3 carrying "hi": LSBs spell "stghi\0"
    let mut hidden = b"P6\n4 3\n255\n".to_vec();
    for byte in b"stghi\0" {
        for shift in (0..8).rev() {
            hidden.push(0x80 | ((byte >> shift) & 1));
        }
    }
    hidden.truncate(b"P6\n4 3\n255\n".len() + 36);
    fs::write(format!("{dir}/ppm_hidden_partial.ppm"), hidden).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/zero_width.bin"), b"P6\n0 1\n255\n").unwrap();
    fs::write(format!("{dir}/no_separator.bin"), b"P6\n1 1\n255").unwrap();

    println!("Generated seed corpus in {dir}/");
}
