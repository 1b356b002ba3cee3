use crate::error::StegError;
use crate::pixel::SampleDepth;
use crate::ppm::{PpmHeader, decode::parse_header};

/// Header summary, available without copying the raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub max_color_value: u32,
    /// Byte offset where pixel data begins.
    pub header_len: usize,
    pub depth: SampleDepth,
}

impl ImageInfo {
    /// Probe the header only. The raster is not read or length-checked.
    pub fn from_bytes(data: &[u8]) -> Result<Self, StegError> {
        let header = parse_header(data)?;
        Ok(Self::from_header(&header))
    }

    pub(crate) fn from_header(header: &PpmHeader) -> Self {
        Self {
            width: header.width,
            height: header.height,
            max_color_value: header.max_color_value,
            header_len: header.len(),
            depth: header.depth,
        }
    }

    /// Raster length the header declares, or `None` on overflow.
    pub fn pixel_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.depth.bytes_per_pixel())
    }
}
