use std::path::PathBuf;

/// Metadata for an opened frame source.
///
/// Single images are represented as a one-frame sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceMetadata {
    pub width: u32,
    pub height: u32,
    pub total_frames: usize,
    pub source_path: Option<PathBuf>,
}
