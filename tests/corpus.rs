//! Test corpus: hide/unhide across cover patterns, sizes, and sample depths.

use zensteg::*;

fn checkerboard(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * bpp;
            if (x + y) % 2 == 0 {
                for c in 0..bpp {
                    pixels[off + c] = 200 + (c as u8 * 20);
                }
            } else {
                for c in 0..bpp {
                    pixels[off + c] = 10 + (c as u8 * 30);
                }
            }
        }
    }
    pixels
}

fn noise_pattern(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

fn cover(w: u32, h: u32, pixels: Vec<u8>) -> PixelImage {
    PixelImage::from_samples(w, h, 255, &["cover"], pixels).unwrap()
}

// ── Concrete scenarios ──────────────────────────────────────────────

#[test]
fn two_by_two_cannot_hide_anything() {
    let image = cover(2, 2, checkerboard(2, 2, 3));
    assert_eq!(image.pixels().len(), 12);
    let err = hide(&image, b"x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TooBig);
    assert_eq!(err.code(), "STEG_TOO_BIG");
    // Even the empty frame needs 32 bits.
    assert_eq!(hide(&image, b"").unwrap_err().kind(), ErrorKind::TooBig);
}

#[test]
fn ten_by_ten_hides_hi() {
    let image = cover(10, 10, checkerboard(10, 10, 3));
    assert_eq!(image.pixels().len(), 300);
    let hidden = hide(&image, b"hi").unwrap();
    assert_eq!(unhide(&hidden).unwrap(), b"hi");
}

#[test]
fn too_big_message_names_image() {
    let image = cover(2, 2, checkerboard(2, 2, 3));
    let err = Steg::new(&image).with_id("inputs/tiny").hide(b"hello").unwrap_err();
    let text = err.to_string();
    assert!(text.contains("inputs/tiny"), "{text}");
    assert!(text.contains("too big"), "{text}");
    match err {
        StegError::TooBig {
            needed_bits,
            capacity_bits,
            ..
        } => {
            assert_eq!(needed_bits, (3 + 5 + 1) * 8);
            assert_eq!(capacity_bits, 12);
        }
        other => panic!("expected TooBig, got {other:?}"),
    }
}

// ── Invariants ──────────────────────────────────────────────────────

#[test]
fn hide_leaves_source_untouched() {
    let pixels = noise_pattern(16, 12, 3);
    let image = cover(16, 12, pixels.clone());
    let before = image.clone();
    let hidden = hide(&image, b"don't touch the cover").unwrap();
    assert_eq!(image, before);
    assert_eq!(image.pixels(), &pixels[..]);
    assert_ne!(hidden.pixels(), image.pixels());
}

#[test]
fn hide_changes_only_lsbs_of_framed_prefix() {
    let image = cover(16, 12, noise_pattern(16, 12, 3));
    let msg = b"lsb only";
    let hidden = hide(&image, msg).unwrap();
    let used = (STEG_MAGIC.len() + msg.len() + 1) * 8;
    for (i, (a, b)) in image.pixels().iter().zip(hidden.pixels()).enumerate() {
        assert_eq!(a & !1, b & !1, "upper bits changed at {i}");
        if i >= used {
            assert_eq!(a, b, "byte {i} past the frame changed");
        }
    }
}

#[test]
fn hidden_image_keeps_header() {
    let image = cover(10, 10, checkerboard(10, 10, 3));
    let hidden = hide(&image, b"hdr").unwrap();
    assert_eq!(hidden.header_bytes(), image.header_bytes());
    assert_eq!(hidden.comments(), ["cover"]);
    assert_eq!(hidden.width(), 10);
    assert_eq!(hidden.max_color_value(), 255);
}

#[test]
fn survives_serialize_and_parse() {
    let image = cover(12, 9, noise_pattern(12, 9, 3));
    let hidden = hide(&image, "héllo wörld".as_bytes()).unwrap();
    let reparsed = parse(&hidden.serialize()).unwrap();
    assert_eq!(Steg::new(&reparsed).unhide_text().unwrap(), "héllo wörld");
}

#[test]
fn double_hide_rejected() {
    let image = cover(10, 10, noise_pattern(10, 10, 3));
    let once = hide(&image, b"a").unwrap();
    let err = Steg::new(&once).with_id("out/1").hide(b"b").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyHidden);
    assert_eq!(err.code(), "STEG_MSG");
    assert!(err.to_string().contains("out/1"));
}

#[test]
fn empty_message_roundtrip_and_blocks_rehide() {
    let image = cover(8, 8, checkerboard(8, 8, 3));
    let hidden = hide(&image, b"").unwrap();
    assert_eq!(unhide(&hidden).unwrap(), b"");
    assert_eq!(
        hide(&hidden, b"again").unwrap_err().kind(),
        ErrorKind::AlreadyHidden
    );
}

#[test]
fn clean_cover_has_no_message() {
    for pixels in [checkerboard(8, 8, 3), noise_pattern(8, 8, 3), vec![0xFF; 192]] {
        let image = cover(8, 8, pixels);
        let err = Steg::new(&image).with_id("inputs/clean").unhide().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMessage);
        assert_eq!(err.code(), "STEG_NO_MSG");
        assert!(err.to_string().contains("inputs/clean"));
    }
}

#[test]
fn unhide_is_repeatable() {
    let image = cover(10, 10, noise_pattern(10, 10, 3));
    let hidden = hide(&image, b"same twice").unwrap();
    assert_eq!(unhide(&hidden).unwrap(), unhide(&hidden).unwrap());

    let a = unhide(&image).unwrap_err();
    let b = unhide(&image).unwrap_err();
    assert_eq!(a.kind(), b.kind());
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn internal_nul_truncates() {
    let image = cover(10, 10, checkerboard(10, 10, 3));
    let hidden = hide(&image, b"ab\0cd").unwrap();
    assert_eq!(unhide(&hidden).unwrap(), b"ab");
}

#[test]
fn binary_payload_roundtrip() {
    let payload: Vec<u8> = (1..=255).collect();
    let w = 40;
    let h = 20;
    let image = cover(w, h, noise_pattern(w as usize, h as usize, 3));
    let hidden = hide(&image, &payload).unwrap();
    assert_eq!(unhide(&hidden).unwrap(), payload);
}

#[test]
fn fills_capacity_exactly() {
    let image = cover(7, 11, noise_pattern(7, 11, 3));
    let steg = Steg::new(&image);
    let msg = vec![b'q'; steg.capacity()];
    let hidden = steg.hide(&msg).unwrap();
    assert_eq!(unhide(&hidden).unwrap(), msg);
}

#[test]
fn sixteen_bit_cover() {
    let pixels = noise_pattern(6, 6, 6);
    let image = PixelImage::from_samples(6, 6, 65535, &[], pixels).unwrap();
    assert_eq!(image.pixels().len(), 216);
    let hidden = hide(&image, b"deep color").unwrap();
    assert_eq!(unhide(&hidden).unwrap(), b"deep color");
    assert_eq!(parse(&hidden.serialize()).unwrap(), hidden);
}

#[test]
fn concurrent_unhide_on_shared_image() {
    let image = cover(32, 32, noise_pattern(32, 32, 3));
    let hidden = hide(&image, b"shared").unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| unhide(&hidden).unwrap())).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), b"shared");
        }
    });
}
