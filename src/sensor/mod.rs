// src/sensor/mod.rs

// Frame sync, decoding and density calculation for the GP2Y1051AU0F.
// Data flows reader -> decoder -> density, driven by the session.

pub mod decoder;
pub mod density;
pub mod reader;
pub mod session;

// --- Public Re-exports ---
pub use decoder::decode;
pub use density::{stepped_k, CoefficientModel, DensityModel, DensityPolicy};
pub use reader::{FrameReader, NbByteSource};
pub use session::{SensorSession, SessionState};
