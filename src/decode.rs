use enough::Stop;

use crate::error::StegError;
use crate::limits::Limits;
use crate::ppm::{self, PixelImage};

/// Builder for parsing a P6 image with resource limits and cancellation.
///
/// ```
/// use zensteg::{DecodeRequest, Limits, Unstoppable};
///
/// let data = b"P6\n1 1\n255\n\x10\x20\x30";
/// let limits = Limits::none().with_max_pixels(16);
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!(image.pixels(), &[0x10, 0x20, 0x30]);
/// # Ok::<(), zensteg::StegError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before the raster is copied.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Parse the image. `stop` is checked after the header is read.
    pub fn decode(self, stop: impl Stop) -> Result<PixelImage, StegError> {
        ppm::decode(self.data, self.limits, &stop)
    }
}
