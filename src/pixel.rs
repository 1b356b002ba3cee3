/// Bytes used to store one channel sample.
///
/// PPM stores 16-bit samples big-endian; this crate never reorders them, so
/// the pixel buffer is always exactly the on-disk raster.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleDepth {
    /// `max_color_value < 256`: one byte per sample.
    Eight,
    /// `max_color_value >= 256`: two bytes per sample, big-endian.
    Sixteen,
}

/// Channels per pixel in a P6 raster.
pub const CHANNELS: usize = 3;

impl SampleDepth {
    /// Depth implied by a header's max color value.
    pub fn from_max_value(max_color_value: u32) -> Self {
        if max_color_value < 256 {
            Self::Eight
        } else {
            Self::Sixteen
        }
    }

    /// Bytes per channel sample.
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            Self::Eight => 1,
            Self::Sixteen => 2,
        }
    }

    /// Bytes per RGB pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        CHANNELS * self.bytes_per_sample()
    }
}
