// src/common/timing.rs

use core::time::Duration;

// GP2Y1051AU0F UART: 2400 baud, 8 data bits, no parity, 1 stop bit.
// It pushes one 7-byte frame roughly every 100 ms without being asked.

/// Sensor line speed.
pub const BAUD_RATE: u32 = 2400;

/// Nominal interval between two frames emitted by the sensor.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

// === Byte Timing at 2400 Baud (8N1) ===
// 1 start bit + 8 data bits + 1 stop bit = 10 bits per byte
// Time per byte = 10 / 2400 s = 4.1666... ms

/// Nominal duration of a single byte at 2400 baud (8N1).
pub const BYTE_DURATION: Duration = Duration::from_micros(4167);

/// Default upper bound for one blocking read of the source.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Sleep between empty polls of a non-blocking source while waiting for bytes.
pub const IDLE_POLL_DELAY: Duration = Duration::from_micros(500);

/// Suggested backoff for callers after an `Unavailable` poll.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(150);
