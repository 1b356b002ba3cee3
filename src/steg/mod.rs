//! LSB steganography over a [`PixelImage`] raster.
//!
//! A message is framed as [`STEG_MAGIC`] + payload + NUL, and each bit of
//! the frame, MSB-first, replaces the least-significant bit of one raster
//! byte starting at byte 0. Every raster byte is a carrier, 16-bit samples
//! included; there is no header reservation or length prefix.
//!
//! The magic prefix separates "no message" from "message present", and the
//! NUL marks the end. A payload containing a NUL byte therefore decodes only
//! up to that byte.

mod bits;

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::StegError;
use crate::ppm::PixelImage;

/// Prefix written before every hidden message.
pub const STEG_MAGIC: &[u8; 3] = b"stg";

const DEFAULT_ID: &str = "image";

/// Hides or reveals a message in one image.
///
/// Stateless apart from the borrowed image and its id; `hide` never
/// mutates the image it was built with.
///
/// ```
/// use zensteg::{PixelImage, Steg};
///
/// let cover = PixelImage::from_samples(10, 10, 255, &[], vec![0x80; 300])?;
/// let hidden = Steg::new(&cover).with_id("inputs/cover").hide(b"hi")?;
/// assert_eq!(Steg::new(&hidden).unhide()?, b"hi");
/// # Ok::<(), zensteg::StegError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Steg<'a> {
    id: &'a str,
    image: &'a PixelImage,
}

impl<'a> Steg<'a> {
    pub fn new(image: &'a PixelImage) -> Self {
        Self {
            id: DEFAULT_ID,
            image,
        }
    }

    /// Identifier used in error messages, e.g. `"group/name"`.
    pub fn with_id(mut self, id: &'a str) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> &str {
        self.id
    }

    /// Longest payload, in bytes, that `hide` would accept.
    pub fn capacity(&self) -> usize {
        (self.image.pixels().len() / 8).saturating_sub(STEG_MAGIC.len() + 1)
    }

    /// Return a copy of the image with `message` hidden in it.
    ///
    /// Fails with [`StegError::TooBig`] when the framed message needs more
    /// bits than the raster has bytes, and with [`StegError::AlreadyHidden`]
    /// when the image already decodes a message. On failure nothing is
    /// produced.
    pub fn hide(&self, message: &[u8]) -> Result<PixelImage, StegError> {
        let framed = frame(message);

        let capacity_bits = self.image.pixels().len();
        if !bits::fits(framed.len(), capacity_bits) {
            return Err(StegError::TooBig {
                id: self.id.to_owned(),
                needed_bits: framed.len().saturating_mul(8),
                capacity_bits,
            });
        }

        if self.unhide().is_ok() {
            return Err(StegError::AlreadyHidden {
                id: self.id.to_owned(),
            });
        }

        let mut pixels = self.image.pixels().to_vec();
        bits::embed(&mut pixels, &framed);
        self.image.with_pixels(pixels)
    }

    /// Recover the hidden payload, without the magic prefix or terminator.
    ///
    /// Fails with [`StegError::NoMessage`] when the LSB stream does not
    /// start with [`STEG_MAGIC`], and with [`StegError::BadMessage`] when it
    /// does but no NUL follows.
    pub fn unhide(&self) -> Result<Vec<u8>, StegError> {
        let raster = self.image.pixels();

        let prefix: Vec<u8> = bits::lsb_bytes(raster).take(STEG_MAGIC.len()).collect();
        if prefix != STEG_MAGIC {
            return Err(StegError::NoMessage {
                id: self.id.to_owned(),
            });
        }

        let scan = bits::scan_until_nul(raster, STEG_MAGIC.len());
        if !scan.terminated {
            return Err(StegError::BadMessage {
                id: self.id.to_owned(),
            });
        }
        Ok(scan.bytes)
    }

    /// [`Steg::unhide`], requiring the payload to be UTF-8.
    pub fn unhide_text(&self) -> Result<String, StegError> {
        String::from_utf8(self.unhide()?).map_err(|_| StegError::NotText {
            id: self.id.to_owned(),
        })
    }
}

/// `STEG_MAGIC ++ message ++ NUL`.
fn frame(message: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(STEG_MAGIC.len() + message.len() + 1);
    framed.extend_from_slice(STEG_MAGIC);
    framed.extend_from_slice(message);
    framed.push(0);
    framed
}
