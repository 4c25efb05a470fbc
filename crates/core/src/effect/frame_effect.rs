use crate::shared::frame::Frame;

/// A per-frame transform applied by the pipeline.
///
/// Implementations must be pure with respect to the input frame and
/// reentrant: the executor may apply them to several frames concurrently.
pub trait FrameEffect: Send + Sync {
    fn apply(&self, frame: &Frame) -> Result<Frame, Box<dyn std::error::Error>>;
}
