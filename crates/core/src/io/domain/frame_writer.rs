use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::sequence_metadata::SequenceMetadata;

/// Writes a sequence of processed frames.
///
/// Frames must be written in sequence order; the pipeline guarantees it even
/// when frames are processed in parallel.
pub trait FrameWriter: Send {
    fn open(
        &mut self,
        path: &Path,
        metadata: &SequenceMetadata,
    ) -> Result<(), Box<dyn std::error::Error>>;

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
