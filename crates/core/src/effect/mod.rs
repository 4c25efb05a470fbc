pub mod depth;
pub mod enhance;
pub mod error;
pub mod frame_effect;
pub mod gaussian;
mod hsv;
pub mod tilt_shift;
