//! LSB packing: one message bit per carrier byte, MSB-first.

use alloc::vec::Vec;

/// Whether `framed_len` bytes fit in a carrier of `carrier_len` bytes.
pub(crate) fn fits(framed_len: usize, carrier_len: usize) -> bool {
    framed_len
        .checked_mul(8)
        .is_some_and(|bits| bits <= carrier_len)
}

/// Write the bits of `message` into the LSBs of `carrier`, leaving the
/// upper seven bits of every byte alone.
///
/// The caller guarantees the message fits; extra bits are not written.
pub(crate) fn embed(carrier: &mut [u8], message: &[u8]) {
    let bits = message
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1));
    for (slot, bit) in carrier.iter_mut().zip(bits) {
        *slot = (*slot & !1) | bit;
    }
}

/// Bytes reassembled from carrier LSBs, eight carrier bytes at a time.
/// A trailing partial group is ignored.
pub(crate) fn lsb_bytes(carrier: &[u8]) -> impl Iterator<Item = u8> + '_ {
    carrier
        .chunks_exact(8)
        .map(|group| group.iter().fold(0u8, |acc, &b| (acc << 1) | (b & 1)))
}

/// Result of scanning a carrier for a NUL-terminated payload.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Scan {
    /// Decoded bytes before the terminator.
    pub bytes: Vec<u8>,
    /// Whether a NUL was found before the carrier ran out.
    pub terminated: bool,
}

/// Decode bytes after skipping `skip` of them, stopping at the first NUL.
pub(crate) fn scan_until_nul(carrier: &[u8], skip: usize) -> Scan {
    let mut bytes = Vec::new();
    for byte in lsb_bytes(carrier).skip(skip) {
        if byte == 0 {
            return Scan {
                bytes,
                terminated: true,
            };
        }
        bytes.push(byte);
    }
    Scan {
        bytes,
        terminated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn msb_first_order() {
        let mut carrier = vec![0u8; 8];
        embed(&mut carrier, &[0b1010_0001]);
        assert_eq!(carrier, [1, 0, 1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn upper_bits_preserved() {
        let mut carrier = vec![0xFFu8, 0x00, 0x80, 0x7F, 0xFE, 0x01, 0x55, 0xAA];
        embed(&mut carrier, &[0b0101_0101]);
        assert_eq!(carrier, [0xFE, 0x01, 0x80, 0x7F, 0xFE, 0x01, 0x54, 0xAB]);
    }

    #[test]
    fn bytes_past_message_untouched() {
        let mut carrier = vec![0xFFu8; 20];
        embed(&mut carrier, &[0]);
        assert_eq!(&carrier[..8], &[0xFE; 8]);
        assert_eq!(&carrier[8..], &[0xFF; 12]);
    }

    #[test]
    fn lsb_bytes_drops_partial_group() {
        let mut carrier = vec![0u8; 19];
        embed(&mut carrier, b"ok");
        carrier[16..].fill(1);
        assert_eq!(lsb_bytes(&carrier).collect::<Vec<_>>(), b"ok");
    }

    #[test]
    fn scan_stops_at_first_nul() {
        let mut carrier = vec![0xAAu8; 64];
        embed(&mut carrier, b"stgab\0cd");
        let scan = scan_until_nul(&carrier, 3);
        assert_eq!(scan.bytes, b"ab");
        assert!(scan.terminated);
    }

    #[test]
    fn scan_without_nul_reads_everything() {
        let mut carrier = vec![0u8; 32];
        embed(&mut carrier, b"stgx");
        let scan = scan_until_nul(&carrier, 3);
        assert_eq!(scan.bytes, b"x");
        assert!(!scan.terminated);
    }

    #[test]
    fn capacity_boundary() {
        // "stg" + NUL is 32 bits.
        assert!(fits(4, 32));
        assert!(!fits(4, 31));
        assert!(fits(0, 0));
        assert!(!fits(usize::MAX, usize::MAX));
    }
}
