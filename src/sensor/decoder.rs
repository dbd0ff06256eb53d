// src/sensor/decoder.rs

use crate::common::{Frame, Vout};

/// Full-scale reference voltage of the sensor's ADC.
pub const VREF_VOLTS: u64 = 5;

/// ADC steps per full scale (10-bit converter).
pub const ADC_STEPS: u64 = 1024;

/// Converts a frame into its output voltage.
///
/// `vout = ((B1 * 256 + B2) * 5) / 1024`, rounded half-up to four decimals.
/// Done in integer arithmetic so the result is exact before rounding.
pub fn decode(frame: &Frame) -> Vout {
    let raw = raw_sample(frame);
    let scaled = raw * VREF_VOLTS * Vout::SCALE as u64; // volts * 10^4 * ADC_STEPS
    let rounded = (scaled + ADC_STEPS / 2) / ADC_STEPS;
    // Max is 65535 * 5 * 10^4 / 1024, well inside u32
    Vout::from_ten_thousandths(rounded as u32)
}

/// The 16-bit sample the sensor packs into B1 (high) and B2 (low).
#[inline]
pub fn raw_sample(frame: &Frame) -> u64 {
    u16::from_be_bytes([frame.vout_high(), frame.vout_low()]) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(high: u8, low: u8) -> Frame {
        Frame::new([0xAA, high, low, 0x00, 0x00, 0x00, 0xFF]).unwrap()
    }

    #[test]
    fn test_decode_zero() {
        assert_eq!(decode(&frame(0, 0)), Vout::ZERO);
    }

    #[test]
    fn test_decode_reference_sample() {
        // 97 * 5 / 1024 = 0.47363...
        assert_eq!(decode(&frame(0x00, 0x61)), Vout::from_ten_thousandths(4736));
    }

    #[test]
    fn test_decode_ten_bit_max() {
        // 1023 * 5 / 1024 = 4.9951171875
        assert_eq!(decode(&frame(0x03, 0xFF)), Vout::from_ten_thousandths(49951));
    }

    #[test]
    fn test_decode_sixteen_bit_max() {
        // Formula is applied as-is: 65535 * 5 / 1024 = 319.9951171875
        assert_eq!(decode(&frame(0xFF, 0xFF)), Vout::from_ten_thousandths(3_199_951));
    }

    #[test]
    fn test_decode_rounds_half_up() {
        // 32 * 5 / 1024 = 0.15625 exactly
        assert_eq!(decode(&frame(0x00, 0x20)), Vout::from_ten_thousandths(1563));
        // 2 * 5 / 1024 = 0.009765625
        assert_eq!(decode(&frame(0x00, 0x02)), Vout::from_ten_thousandths(98));
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let a = Frame::new([0xAA, 0x00, 0x61, 0x00, 0x00, 0x00, 0xFF]).unwrap();
        let b = Frame::new([0xAA, 0x00, 0x61, 0x12, 0x34, 0x56, 0x00]).unwrap();
        assert_eq!(decode(&a), decode(&b));
    }

    #[test]
    fn test_decode_deterministic() {
        let f = frame(0x01, 0x7F);
        let first = decode(&f);
        for _ in 0..10 {
            assert_eq!(decode(&f), first);
        }
    }
}
