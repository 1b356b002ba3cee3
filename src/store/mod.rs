//! Image store contract.
//!
//! Images are addressed by a group and a name:
//!
//! - group: non-blank, no NUL characters;
//! - name: non-blank, no `/` or NUL characters.
//!
//! The image type is not part of the identity. Two images with the same
//! group and name are the same image.

mod memory;

pub use memory::MemoryStore;

use crate::error::StegError;

/// Meta-information kept for every stored image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageMeta {
    pub width: u32,
    pub height: u32,
    /// Max color value from the header.
    pub max_colors: u32,
    pub header_bytes: usize,
    /// Milliseconds since 1970-01-01T00:00:00Z.
    pub creation_time: u64,
}

/// Image encodings a store can hand out.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageType {
    Ppm,
}

impl ImageType {
    /// Parse a type name such as `"ppm"`.
    pub fn from_name(name: &str) -> Result<Self, StoreError> {
        match name {
            "ppm" => Ok(Self::Ppm),
            other => Err(StoreError::BadType(other.to_owned())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ppm => "ppm",
        }
    }
}

/// Errors with defined codes from an [`ImageStore`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("bad image group {0:?}")]
    BadGroup(String),

    #[error("bad image name {0:?}")]
    BadName(String),

    #[error("bad image type {0:?}")]
    BadType(String),

    #[error("image is not a valid P6 file: {0}")]
    BadFormat(#[source] StegError),

    #[error("image {group}/{name} not found")]
    NotFound { group: String, name: String },

    #[error("image {group}/{name} already exists")]
    Exists { group: String, name: String },
}

impl StoreError {
    /// Stable machine-readable code, e.g. `"NOT_FOUND"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadGroup(_) => "BAD_GROUP",
            Self::BadName(_) => "BAD_NAME",
            Self::BadType(_) => "BAD_TYPE",
            Self::BadFormat(_) => "BAD_FORMAT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Exists { .. } => "EXISTS",
        }
    }
}

/// Storage the steg service reads cover images from and writes results to.
///
/// Implementations must make `put` atomic with respect to `get`: a reader
/// sees either no image or all of its bytes.
pub trait ImageStore: Send + Sync {
    /// Bytes of the image `group/name` encoded as `image_type`.
    fn get(&self, group: &str, name: &str, image_type: &str) -> Result<Vec<u8>, StoreError>;

    /// Names stored under `group`, sorted. Empty for an unknown group.
    fn list(&self, group: &str) -> Result<Vec<String>, StoreError>;

    /// Meta-information for `group/name`, without reading image bytes.
    fn meta(&self, group: &str, name: &str) -> Result<ImageMeta, StoreError>;

    /// Store `bytes` under `group` with a generated name, returned on success.
    fn put(&self, group: &str, bytes: &[u8], image_type: &str) -> Result<String, StoreError>;

    /// Store `bytes` as `group/name`; [`StoreError::Exists`] if taken.
    fn put_named(
        &self,
        group: &str,
        name: &str,
        bytes: &[u8],
        image_type: &str,
    ) -> Result<(), StoreError>;
}

pub(crate) fn check_group(group: &str) -> Result<(), StoreError> {
    if group.trim().is_empty() || group.contains('\0') {
        return Err(StoreError::BadGroup(group.to_owned()));
    }
    Ok(())
}

pub(crate) fn check_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() || name.contains(['\0', '/']) {
        return Err(StoreError::BadName(name.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_rules() {
        assert!(check_group("inputs").is_ok());
        assert!(check_group("a/b").is_ok());
        assert_eq!(check_group("").unwrap_err().code(), "BAD_GROUP");
        assert_eq!(check_group("  ").unwrap_err().code(), "BAD_GROUP");
        assert_eq!(check_group("in\0puts").unwrap_err().code(), "BAD_GROUP");
    }

    #[test]
    fn name_rules() {
        assert!(check_name("rose").is_ok());
        assert_eq!(check_name("a/b").unwrap_err().code(), "BAD_NAME");
        assert_eq!(check_name("\0").unwrap_err().code(), "BAD_NAME");
        assert_eq!(check_name("\t").unwrap_err().code(), "BAD_NAME");
    }

    #[test]
    fn only_ppm_type() {
        assert_eq!(ImageType::from_name("ppm").unwrap(), ImageType::Ppm);
        assert_eq!(ImageType::from_name("png").unwrap_err().code(), "BAD_TYPE");
        assert_eq!(ImageType::Ppm.name(), "ppm");
    }
}
