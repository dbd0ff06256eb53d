// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From error.rs
pub use error::AirqError;

// From frame.rs
pub use frame::{locate_frame, Frame, END_BYTE, FRAME_LEN, READ_LEN, START_BYTE};

// From hal_traits.rs
pub use hal_traits::{ByteSource, DustClock, DustInstant, DustSerial};

// From types.rs
pub use types::{PollOutcome, Reading, Vout};
