//! P6 header parser.
//!
//! Tokens are separated by ASCII whitespace. A `#` starts a comment that
//! runs to the end of the line; comments may appear anywhere a separator
//! may and are collected in order. Exactly one whitespace byte follows the
//! max color value, after which the raster begins.

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::PpmHeader;
use crate::error::StegError;
use crate::pixel::SampleDepth;

const MAGIC: &[u8] = b"P6";
const MAX_COLOR_VALUE: u32 = 65535;

struct HeaderReader<'a> {
    data: &'a [u8],
    pos: usize,
    comments: Vec<String>,
}

impl<'a> HeaderReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            comments: Vec::new(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Skip whitespace, collecting any comment lines on the way.
    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                let start = self.pos + 1;
                let end = self.data[start..]
                    .iter()
                    .position(|&c| c == b'\n' || c == b'\r')
                    .map_or(self.data.len(), |off| start + off);
                self.comments
                    .push(String::from_utf8_lossy(&self.data[start..end]).into_owned());
                self.pos = end;
            } else {
                break;
            }
        }
    }

    fn token(&mut self, what: &str) -> Result<&'a [u8], StegError> {
        self.skip_separators();
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(StegError::MalformedHeader(format!("missing {what}")));
        }
        Ok(&self.data[start..self.pos])
    }

    fn number(&mut self, what: &str) -> Result<u32, StegError> {
        let token = self.token(what)?;
        let mut value: u32 = 0;
        for &digit in token {
            if !digit.is_ascii_digit() {
                return Err(StegError::MalformedHeader(format!(
                    "{what} is not a number: {:?}",
                    String::from_utf8_lossy(token)
                )));
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(digit - b'0')))
                .ok_or_else(|| StegError::MalformedHeader(format!("{what} out of range")))?;
        }
        Ok(value)
    }
}

/// Parse the header at the start of `data`.
///
/// Only the header bytes are inspected; the raster length is checked by the
/// caller.
pub(crate) fn parse_header(data: &[u8]) -> Result<PpmHeader, StegError> {
    let mut reader = HeaderReader::new(data);

    let magic = reader.token("format tag")?;
    if magic != MAGIC {
        return Err(StegError::MalformedHeader(format!(
            "unsupported format tag {:?}, expected P6",
            String::from_utf8_lossy(magic)
        )));
    }

    let width = reader.number("width")?;
    let height = reader.number("height")?;
    let max_color_value = reader.number("max color value")?;

    if width == 0 || height == 0 {
        return Err(StegError::MalformedHeader(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    if max_color_value == 0 || max_color_value > MAX_COLOR_VALUE {
        return Err(StegError::MalformedHeader(format!(
            "max color value {max_color_value} not in 1..={MAX_COLOR_VALUE}"
        )));
    }

    match reader.peek() {
        Some(b) if b.is_ascii_whitespace() => reader.pos += 1,
        Some(_) => {
            return Err(StegError::MalformedHeader(
                "max color value not followed by whitespace".to_owned(),
            ));
        }
        None => {
            return Err(StegError::MalformedHeader(
                "header ends before raster separator".to_owned(),
            ));
        }
    }

    let header_len = reader.pos;
    Ok(PpmHeader {
        magic: String::from_utf8_lossy(magic).into_owned(),
        width,
        height,
        max_color_value,
        depth: SampleDepth::from_max_value(max_color_value),
        comments: reader.comments,
        bytes: data[..header_len].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn minimal_header() {
        let h = parse_header(b"P6\n3 2\n255\n").unwrap();
        assert_eq!((h.width, h.height, h.max_color_value), (3, 2, 255));
        assert_eq!(h.depth, SampleDepth::Eight);
        assert_eq!(h.len(), 11);
        assert!(h.comments.is_empty());
    }

    #[test]
    fn comments_between_every_token() {
        let data = b"P6 # made by gimp\n#second\n4\n# w done\n 5 #h\n65535\n";
        let h = parse_header(data).unwrap();
        assert_eq!(h.comments, [" made by gimp", "second", " w done", "h"]);
        assert_eq!(h.depth, SampleDepth::Sixteen);
        assert_eq!(h.len(), data.len());
    }

    #[test]
    fn single_separator_byte_ends_header() {
        // The raster starts with a byte that happens to be whitespace.
        let h = parse_header(b"P6 1 1 255\n\n\n\n").unwrap();
        assert_eq!(h.len(), 11);
    }

    #[test]
    fn crlf_comment_terminator() {
        let h = parse_header(b"P6\r\n#dos\r\n1 1\r\n255\n").unwrap();
        assert_eq!(h.comments, ["dos"]);
    }

    #[test]
    fn rejects_bad_tokens() {
        let cases: &[&[u8]] = &[
            b"",
            b"P5\n1 1\n255\n",
            b"P6\n",
            b"P6\n0 4\n255\n",
            b"P6\n4 0\n255\n",
            b"P6\n4 4\n0\n",
            b"P6\n4 4\n65536\n",
            b"P6\n4x 4\n255\n",
            b"P6\n-4 4\n255\n",
            b"P6\n99999999999 4\n255\n",
            b"P6\n4 4\n255",
            b"P6\n4 4\n255#tail\n",
        ];
        for case in cases {
            let err = parse_header(case).unwrap_err();
            assert_eq!(
                err.kind(),
                ErrorKind::MalformedHeader,
                "{:?} -> {err}",
                String::from_utf8_lossy(case)
            );
        }
    }
}
