//! Binary PPM (P6) images.
//!
//! [`PixelImage`] keeps the header exactly as it was read, so an image that
//! is parsed and serialized again comes back byte-for-byte, comments
//! included. Only the pixel buffer is mutable.

pub(crate) mod decode;
mod encode;

use alloc::string::String;
use alloc::vec::Vec;
use enough::{Stop, Unstoppable};

use crate::error::StegError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::SampleDepth;

/// Parsed P6 header (internal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PpmHeader {
    pub magic: String,
    pub width: u32,
    pub height: u32,
    pub max_color_value: u32,
    pub depth: SampleDepth,
    pub comments: Vec<String>,
    /// Header bytes as they appeared in the input, separator included.
    pub bytes: Vec<u8>,
}

impl PpmHeader {
    /// Offset of the first raster byte.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Raster size in bytes implied by the header.
    pub fn pixel_len(&self) -> Result<usize, StegError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|wh| wh.checked_mul(self.depth.bytes_per_pixel()))
            .ok_or(StegError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

/// A P6 image: header metadata plus a mutable raster.
///
/// The raster is row-major, channel-interleaved RGB. For 16-bit images
/// each sample is two big-endian bytes. `pixels().len()` is always
/// `width * height * 3 * bytes_per_sample`.
///
/// `Clone` deep-copies the raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelImage {
    header: PpmHeader,
    pixels: Vec<u8>,
}

impl PixelImage {
    /// Parse a complete P6 image.
    ///
    /// Fails with [`StegError::MalformedHeader`] for a bad header and
    /// [`StegError::TruncatedData`] when the raster is short. Bytes after
    /// the raster are ignored.
    pub fn parse(data: &[u8]) -> Result<Self, StegError> {
        decode(data, None, &Unstoppable)
    }

    /// Build an image from raw samples with a canonical header.
    ///
    /// `comments` are written one per line, each after a `#`.
    pub fn from_samples(
        width: u32,
        height: u32,
        max_color_value: u32,
        comments: &[&str],
        pixels: Vec<u8>,
    ) -> Result<Self, StegError> {
        let bytes = encode::write_header(width, height, max_color_value, comments)?;
        let header = decode::parse_header(&bytes)?;
        Self::from_parts(header, pixels)
    }

    fn from_parts(header: PpmHeader, pixels: Vec<u8>) -> Result<Self, StegError> {
        let needed = header.pixel_len()?;
        if pixels.len() != needed {
            return Err(StegError::BufferSize {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self { header, pixels })
    }

    /// A new image with this image's header and `pixels` as its raster.
    pub fn with_pixels(&self, pixels: Vec<u8>) -> Result<Self, StegError> {
        Self::from_parts(self.header.clone(), pixels)
    }

    /// Header bytes as captured, followed by the current raster.
    pub fn serialize(&self) -> Vec<u8> {
        encode::serialize(&self.header.bytes, &self.pixels)
    }

    /// Format tag, always `"P6"`.
    pub fn magic_number(&self) -> &str {
        &self.header.magic
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn max_color_value(&self) -> u32 {
        self.header.max_color_value
    }

    /// Header comment lines in order, without the leading `#` or the line
    /// terminator.
    pub fn comments(&self) -> &[String] {
        &self.header.comments
    }

    /// Byte offset where pixel data begins.
    pub fn header_len(&self) -> usize {
        self.header.len()
    }

    pub fn header_bytes(&self) -> &[u8] {
        &self.header.bytes
    }

    pub fn depth(&self) -> SampleDepth {
        self.header.depth
    }

    pub fn bytes_per_sample(&self) -> usize {
        self.header.depth.bytes_per_sample()
    }

    /// Header summary.
    pub fn info(&self) -> ImageInfo {
        ImageInfo::from_header(&self.header)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable raster. A slice, so the length invariant cannot be broken.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Reinterpret the raster as RGB pixels.
    ///
    /// Returns [`StegError::DepthMismatch`] for 16-bit images.
    #[cfg(feature = "rgb")]
    pub fn as_rgb8(&self) -> Result<&[rgb::RGB8], StegError> {
        use rgb::AsPixels as _;

        if self.depth() != SampleDepth::Eight {
            return Err(StegError::DepthMismatch {
                expected: SampleDepth::Eight,
                actual: self.depth(),
            });
        }
        Ok(self.pixels.as_pixels())
    }

    /// Zero-copy 2D view of an 8-bit raster.
    ///
    /// Returns [`StegError::DepthMismatch`] for 16-bit images.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Result<imgref::ImgRef<'_, rgb::RGB8>, StegError> {
        Ok(imgref::ImgRef::new(
            self.as_rgb8()?,
            self.width() as usize,
            self.height() as usize,
        ))
    }
}

/// Parse with optional limits (called from DecodeRequest).
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelImage, StegError> {
    let header = decode::parse_header(data)?;
    let needed = header.pixel_len()?;

    if let Some(limits) = limits {
        limits.check(header.width, header.height, needed)?;
    }

    stop.check()?;

    let raster = &data[header.len()..];
    if raster.len() < needed {
        return Err(StegError::TruncatedData {
            needed,
            actual: raster.len(),
        });
    }

    Ok(PixelImage {
        pixels: raster[..needed].to_vec(),
        header,
    })
}
