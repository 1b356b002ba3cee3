#![no_main]
use libfuzzer_sys::fuzz_target;
use zensteg::*;

fuzz_target!(|input: (&[u8], &[u8])| {
    let (data, msg) = input;
    let Ok(image) = parse(data) else {
        return;
    };

    // Serialization reproduces the parsed prefix of the input
    let bytes = image.serialize();
    assert_eq!(&data[..bytes.len()], &bytes[..], "serialize mismatch");

    let Ok(hidden) = hide(&image, msg) else {
        return;
    };
    assert_eq!(parse(data).unwrap(), image, "hide mutated its input");

    // Decoding stops at the first NUL in the payload
    let end = msg.iter().position(|&b| b == 0).unwrap_or(msg.len());
    let hidden = parse(&hidden.serialize()).expect("hidden image failed to parse");
    assert_eq!(unhide(&hidden).unwrap(), &msg[..end], "unhide mismatch");
});
