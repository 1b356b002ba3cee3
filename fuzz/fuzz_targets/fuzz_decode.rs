#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing and probing must never panic
    let _ = zensteg::ImageInfo::from_bytes(data);
    let Ok(image) = zensteg::parse(data) else {
        return;
    };

    // Any raster is a valid carrier: unhide returns an error or a message
    let _ = zensteg::unhide(&image);
});
