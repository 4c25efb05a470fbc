use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::effect::frame_effect::FrameEffect;
use crate::io::domain::frame_reader::FrameReader;
use crate::io::domain::frame_writer::FrameWriter;
use crate::shared::sequence_metadata::SequenceMetadata;

/// Configuration for a pipeline execution run.
pub struct PipelineConfig {
    /// Worker threads applying the effect. Clamped to at least 1.
    pub workers: usize,
    /// Called as frames are handed to the writer; returning `false` cancels.
    pub on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
    pub cancelled: Arc<AtomicBool>,
}

/// Abstracts how the read → transform → write pipeline is executed.
///
/// This is a port (application-layer interface). Infrastructure provides
/// concrete implementations (e.g. threaded, single-threaded).
pub trait PipelineExecutor: Send {
    fn execute(
        &self,
        reader: Box<dyn FrameReader>,
        writer: Box<dyn FrameWriter>,
        effect: Arc<dyn FrameEffect>,
        metadata: &SequenceMetadata,
        output_path: &Path,
        config: PipelineConfig,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
