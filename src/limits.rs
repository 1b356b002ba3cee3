use alloc::format;

use crate::error::StegError;

/// Resource limits applied while parsing, before the pixel buffer is
/// allocated.
///
/// All fields default to `None` (no limit).
///
/// ```
/// use zensteg::Limits;
///
/// let limits = Limits::none()
///     .with_max_pixels(4096 * 4096)
///     .with_max_memory(64 * 1024 * 1024);
/// assert_eq!(limits.max_pixels, Some(4096 * 4096));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the pixel buffer in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// No limits (all fields `None`).
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_max_width(mut self, max: u64) -> Self {
        self.max_width = Some(max);
        self
    }

    pub fn with_max_height(mut self, max: u64) -> Self {
        self.max_height = Some(max);
        self
    }

    /// Set maximum total pixels.
    pub fn with_max_pixels(mut self, max: u64) -> Self {
        self.max_pixels = Some(max);
        self
    }

    /// Set maximum pixel buffer size in bytes.
    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    /// Check header dimensions and the resulting buffer size.
    pub(crate) fn check(&self, width: u32, height: u32, buffer_bytes: usize) -> Result<(), StegError> {
        let exceeded = |what: &str, value: u64, max: u64| {
            Err(StegError::LimitExceeded(format!(
                "{what} {value} exceeds limit {max}"
            )))
        };
        if let Some(max) = self.max_width.filter(|&m| u64::from(width) > m) {
            return exceeded("width", u64::from(width), max);
        }
        if let Some(max) = self.max_height.filter(|&m| u64::from(height) > m) {
            return exceeded("height", u64::from(height), max);
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max) = self.max_pixels.filter(|&m| pixels > m) {
            return exceeded("pixel count", pixels, max);
        }
        let bytes = buffer_bytes as u64;
        if let Some(max) = self.max_memory_bytes.filter(|&m| bytes > m) {
            return exceeded("pixel buffer size", bytes, max);
        }
        Ok(())
    }
}
