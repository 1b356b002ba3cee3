//! # zensteg
//!
//! Binary PPM (P6) parser/serializer and an LSB steganography codec that
//! hides short messages in the raster.
//!
//! ## Lossless Headers
//!
//! [`PixelImage`] keeps the header bytes it was parsed from, comments and
//! odd whitespace included, so `serialize(parse(b)) == b` for any well-formed
//! input. Only the pixel buffer can change.
//!
//! ## Hidden Message Framing
//!
//! [`Steg::hide`] writes `"stg" ++ message ++ NUL` one bit per raster byte
//! into the least-significant bits, MSB-first. [`Steg::unhide`] reads the
//! LSBs back until the NUL. The magic prefix tells "no message" apart from
//! "message present", and `hide` refuses to overwrite an existing message.
//!
//! ## Store and Service (`std` feature)
//!
//! [`store::ImageStore`] is the narrow storage contract the codec is used
//! behind, with an in-memory [`store::MemoryStore`]. [`service::StegService`]
//! ties store and codec together and maps failures to the status codes and
//! error bodies an HTTP front end would return. No server is included.
//!
//! ## Non-Goals
//!
//! - ASCII PPM (P3) and other PNM variants
//! - Format conversion, compression, or encryption of payloads
//! - Network transport and persistent storage
//!
//! ## Usage
//!
//! ```
//! use zensteg::{PixelImage, Steg};
//!
//! let mut data = b"P6\n# cover\n10 10\n255\n".to_vec();
//! data.extend(std::iter::repeat(0x7Fu8).take(300));
//!
//! let cover = PixelImage::parse(&data)?;
//! let hidden = Steg::new(&cover).with_id("inputs/cover").hide(b"meet at noon")?;
//!
//! // The cover is untouched; the copy carries the message.
//! assert_eq!(cover.serialize(), data);
//! let bytes = hidden.serialize();
//! let reparsed = PixelImage::parse(&bytes)?;
//! assert_eq!(Steg::new(&reparsed).unhide_text()?, "meet at noon");
//! # Ok::<(), zensteg::StegError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod info;
mod limits;
mod pixel;
mod ppm;
mod steg;

#[cfg(feature = "std")]
pub mod service;
#[cfg(feature = "std")]
pub mod store;

// Re-exports
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{ErrorKind, StegError};
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{CHANNELS, SampleDepth};
pub use ppm::PixelImage;
pub use steg::{STEG_MAGIC, Steg};

/// Parse a P6 image. Shorthand for [`PixelImage::parse`].
pub fn parse(data: &[u8]) -> Result<PixelImage, StegError> {
    PixelImage::parse(data)
}

/// Serialize a P6 image. Shorthand for [`PixelImage::serialize`].
pub fn serialize(image: &PixelImage) -> alloc::vec::Vec<u8> {
    image.serialize()
}

/// Hide `message` in a copy of `image`. See [`Steg::hide`].
pub fn hide(image: &PixelImage, message: &[u8]) -> Result<PixelImage, StegError> {
    Steg::new(image).hide(message)
}

/// Recover the message hidden in `image`. See [`Steg::unhide`].
pub fn unhide(image: &PixelImage) -> Result<alloc::vec::Vec<u8>, StegError> {
    Steg::new(image).unhide()
}
