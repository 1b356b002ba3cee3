use alloc::string::String;
use enough::StopReason;

use crate::pixel::SampleDepth;

/// Errors from PPM parsing and steganographic hide/unhide.
///
/// Codec errors carry the id of the image they were raised for, so the
/// rendered message reads `"STEG_TOO_BIG: inputs/rose: ..."`.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StegError {
    #[error("BAD_HEADER: {0}")]
    MalformedHeader(String),

    #[error("BAD_HEADER: dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("TRUNCATED: need {needed} pixel bytes, got {actual}")]
    TruncatedData { needed: usize, actual: usize },

    #[error("STEG_TOO_BIG: {id}: message too big to be hidden in image ({needed_bits} bits needed, {capacity_bits} available)")]
    TooBig {
        id: String,
        needed_bits: usize,
        capacity_bits: usize,
    },

    #[error("STEG_MSG: {id}: image already contains a hidden message")]
    AlreadyHidden { id: String },

    #[error("STEG_NO_MSG: {id}: image does not have a message")]
    NoMessage { id: String },

    #[error("STEG_BAD_MSG: {id}: bad message, terminator not found")]
    BadMessage { id: String },

    #[error("STEG_BAD_MSG: {id}: hidden message is not valid UTF-8")]
    NotText { id: String },

    #[error("BAD_INPUT: pixel buffer has {actual} bytes, header requires {needed}")]
    BufferSize { needed: usize, actual: usize },

    #[error("BAD_INPUT: sample depth mismatch: expected {expected:?}, got {actual:?}")]
    DepthMismatch {
        expected: SampleDepth,
        actual: SampleDepth,
    },

    #[error("LIMIT_EXCEEDED: {0}")]
    LimitExceeded(String),

    #[error("CANCELLED: operation cancelled")]
    Cancelled(StopReason),
}

impl StegError {
    /// Stable classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedHeader(_) | Self::DimensionsTooLarge { .. } => {
                ErrorKind::MalformedHeader
            }
            Self::TruncatedData { .. } => ErrorKind::TruncatedData,
            Self::TooBig { .. } => ErrorKind::TooBig,
            Self::AlreadyHidden { .. } => ErrorKind::AlreadyHidden,
            Self::NoMessage { .. } => ErrorKind::NoMessage,
            Self::BadMessage { .. } | Self::NotText { .. } => ErrorKind::BadMessage,
            Self::BufferSize { .. } | Self::DepthMismatch { .. } => ErrorKind::InvalidInput,
            Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }

    /// Shorthand for `self.kind().code()`.
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

impl From<StopReason> for StegError {
    fn from(r: StopReason) -> Self {
        StegError::Cancelled(r)
    }
}

/// Error classes callers can match on without inspecting payloads.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Header tokens missing, non-numeric, or out of range.
    MalformedHeader,
    /// Fewer pixel bytes than the header declares.
    TruncatedData,
    /// Framed message needs more bits than the pixel buffer has bytes.
    TooBig,
    /// `hide` on an image that already decodes a hidden message.
    AlreadyHidden,
    /// No magic prefix in the decoded LSB stream.
    NoMessage,
    /// Magic prefix present but the payload is unusable.
    BadMessage,
    /// Caller-supplied buffer or view does not fit the image.
    InvalidInput,
    LimitExceeded,
    Cancelled,
}

impl ErrorKind {
    /// Stable machine-readable code, e.g. `"STEG_TOO_BIG"`.
    pub fn code(self) -> &'static str {
        match self {
            Self::MalformedHeader => "BAD_HEADER",
            Self::TruncatedData => "TRUNCATED",
            Self::TooBig => "STEG_TOO_BIG",
            Self::AlreadyHidden => "STEG_MSG",
            Self::NoMessage => "STEG_NO_MSG",
            Self::BadMessage => "STEG_BAD_MSG",
            Self::InvalidInput => "BAD_INPUT",
            Self::LimitExceeded => "LIMIT_EXCEEDED",
            Self::Cancelled => "CANCELLED",
        }
    }
}
