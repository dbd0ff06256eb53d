// src/common/frame.rs

use super::error::AirqError;
use core::fmt;

/// Number of bytes in one GP2Y1051AU0F measurement frame.
pub const FRAME_LEN: usize = 7;

/// Bytes requested per read. Twice the frame length, so a frame that starts
/// late in the read still fits completely.
pub const READ_LEN: usize = FRAME_LEN * 2;

/// START sentinel, first byte of every frame.
pub const START_BYTE: u8 = 0xAA;

/// END sentinel the sensor sends as the last byte. Observed only, never checked.
pub const END_BYTE: u8 = 0xFF;

/// One sensor frame: `[START, Vout_H, Vout_L, B3, B4, B5, END]`.
///
/// Only the START byte is validated. The sensor's END byte is kept as-is
/// and can be inspected through [`Frame::end_byte`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Builds a frame from exactly `FRAME_LEN` bytes starting with `START_BYTE`.
    pub fn new(bytes: [u8; FRAME_LEN]) -> Result<Self, AirqError> {
        if bytes[0] != START_BYTE {
            return Err(AirqError::InvalidFrameStart(bytes[0]));
        }
        Ok(Frame(bytes))
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// High byte of the Vout sample (B1).
    #[inline]
    pub const fn vout_high(&self) -> u8 {
        self.0[1]
    }

    /// Low byte of the Vout sample (B2).
    #[inline]
    pub const fn vout_low(&self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub const fn end_byte(&self) -> u8 {
        self.0[FRAME_LEN - 1]
    }

    /// Whether the last byte carries the usual `0xFF` END marker.
    #[inline]
    pub const fn has_end_marker(&self) -> bool {
        self.end_byte() == END_BYTE
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = AirqError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; FRAME_LEN] = bytes.try_into().map_err(|_| AirqError::FrameLength {
            expected: FRAME_LEN,
            got: bytes.len(),
        })?;
        Frame::new(array)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame(")?;
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02X}", b)?;
        }
        write!(f, ")")
    }
}

/// Finds the first frame in `buffer`.
///
/// Anchors on the first `START_BYTE`. Returns `None` when there is no START
/// byte, or when fewer than `FRAME_LEN` bytes remain from it (a short frame is
/// never returned, and later START bytes are not tried).
pub fn locate_frame(buffer: &[u8]) -> Option<Frame> {
    let start = buffer.iter().position(|&b| b == START_BYTE)?;
    let candidate = buffer.get(start..start + FRAME_LEN)?;
    // Slice is FRAME_LEN long and starts with START_BYTE, so this cannot fail.
    Frame::try_from(candidate).ok()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_new_requires_start_byte() {
        let ok = Frame::new([0xAA, 0x00, 0x61, 0x00, 0x00, 0x00, 0xFF]);
        assert!(ok.is_ok());
        let bad = Frame::new([0xAB, 0x00, 0x61, 0x00, 0x00, 0x00, 0xFF]);
        assert!(matches!(bad, Err(AirqError::InvalidFrameStart(0xAB))));
    }

    #[test]
    fn test_frame_end_byte_not_validated() {
        let frame = Frame::new([0xAA, 0x00, 0x02, 0x00, 0x61, 0x63, 0x12]).unwrap();
        assert_eq!(frame.end_byte(), 0x12);
        assert!(!frame.has_end_marker());
    }

    #[test]
    fn test_frame_try_from_wrong_length() {
        let short: &[u8] = &[0xAA, 0x00, 0x61];
        assert!(matches!(
            Frame::try_from(short),
            Err(AirqError::FrameLength { expected: 7, got: 3 })
        ));
    }

    #[test]
    fn test_frame_accessors() {
        let frame = Frame::new([0xAA, 0x01, 0x02, 0x03, 0x04, 0x05, 0xFF]).unwrap();
        assert_eq!(frame.vout_high(), 0x01);
        assert_eq!(frame.vout_low(), 0x02);
        assert!(frame.has_end_marker());
    }

    #[test]
    fn test_locate_frame_aligned() {
        let buf = [0xAA, 0x00, 0x02, 0x00, 0x61, 0x63, 0xFF, 0xAA, 0x00, 0x02, 0x00, 0x61, 0x63, 0xFF];
        let frame = locate_frame(&buf).unwrap();
        assert_eq!(frame.as_bytes(), &[0xAA, 0x00, 0x02, 0x00, 0x61, 0x63, 0xFF]);
    }

    #[test]
    fn test_locate_frame_misaligned() {
        // Stream picked up mid-frame
        let buf = [0x61, 0x63, 0xFF, 0xAA, 0x00, 0x05, 0x00, 0x61, 0x63, 0xFF, 0xAA, 0x00, 0x05, 0x00];
        let frame = locate_frame(&buf).unwrap();
        assert_eq!(frame.as_bytes(), &[0xAA, 0x00, 0x05, 0x00, 0x61, 0x63, 0xFF]);
    }

    #[test]
    fn test_locate_frame_exact_tail_fit() {
        // START with exactly six bytes after it
        let buf = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xAA, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let frame = locate_frame(&buf).unwrap();
        assert_eq!(frame.as_bytes(), &[0xAA, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
    }

    #[test]
    fn test_locate_frame_truncated_tail() {
        let buf = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xAA, 0x01, 0x02, 0x03, 0x04, 0x05];
        assert_eq!(locate_frame(&buf), None);
    }

    #[test]
    fn test_locate_frame_no_start() {
        assert_eq!(locate_frame(&[0x00, 0x61, 0x63, 0xFF, 0x00, 0x02, 0x00]), None);
        assert_eq!(locate_frame(&[]), None);
    }

    #[test]
    fn test_locate_frame_first_start_wins() {
        // 0xAA inside the payload of the first frame is part of that frame
        let buf = [0xAA, 0x00, 0xAA, 0x00, 0x00, 0x00, 0xFF, 0x00];
        let frame = locate_frame(&buf).unwrap();
        assert_eq!(frame.vout_low(), 0xAA);
    }

    #[test]
    fn test_locate_frame_every_offset() {
        let payload = [0xAA, 0x00, 0x61, 0x00, 0x00, 0x00, 0xFF];
        for offset in 0..READ_LEN {
            let mut buf = [0u8; READ_LEN];
            for (i, b) in payload.iter().enumerate() {
                if offset + i < READ_LEN {
                    buf[offset + i] = *b;
                }
            }
            let found = locate_frame(&buf);
            if offset + FRAME_LEN <= READ_LEN {
                assert_eq!(found.map(|f| *f.as_bytes()), Some(payload), "offset {}", offset);
            } else {
                assert_eq!(found, None, "offset {}", offset);
            }
        }
    }

    #[test]
    fn test_frame_debug_hex() {
        let frame = Frame::new([0xAA, 0x00, 0x61, 0x00, 0x00, 0x00, 0xFF]).unwrap();
        let mut out = heapless::String::<32>::new();
        core::fmt::write(&mut out, format_args!("{:?}", frame)).unwrap();
        assert_eq!(out.as_str(), "Frame(AA 00 61 00 00 00 FF)");
    }
}
