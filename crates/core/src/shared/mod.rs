pub mod constants;
pub mod frame;
pub mod resize;
pub mod sequence_metadata;
