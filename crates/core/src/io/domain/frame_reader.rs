use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::sequence_metadata::SequenceMetadata;

/// Reads frames from an image or frame-sequence source.
///
/// Implementations handle file formats and enumeration; the pipeline works
/// with the abstract `Frame` and `SequenceMetadata` types only.
pub trait FrameReader: Send {
    /// Opens a source and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<SequenceMetadata, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in sequence order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the reader.
    fn close(&mut self);
}
