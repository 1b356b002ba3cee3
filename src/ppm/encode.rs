//! P6 writer.

use alloc::format;
use alloc::vec::Vec;

use crate::error::StegError;

/// Build a canonical header: tag, one `#` line per comment, dimensions,
/// max value, each on its own line.
pub(crate) fn write_header(
    width: u32,
    height: u32,
    max_color_value: u32,
    comments: &[&str],
) -> Result<Vec<u8>, StegError> {
    let mut out = Vec::from(&b"P6\n"[..]);
    for comment in comments {
        if comment.contains(['\n', '\r']) {
            return Err(StegError::MalformedHeader(format!(
                "comment {comment:?} spans more than one line"
            )));
        }
        out.push(b'#');
        out.extend_from_slice(comment.as_bytes());
        out.push(b'\n');
    }
    out.extend_from_slice(format!("{width} {height}\n{max_color_value}\n").as_bytes());
    Ok(out)
}

/// Captured header bytes followed by the raster.
pub(crate) fn serialize(header: &[u8], pixels: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(header.len() + pixels.len());
    out.extend_from_slice(header);
    out.extend_from_slice(pixels);
    out
}
