use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::effect::frame_effect::FrameEffect;
use crate::io::domain::frame_reader::FrameReader;
use crate::io::domain::frame_writer::FrameWriter;
use crate::shared::sequence_metadata::SequenceMetadata;

use super::pipeline_executor::{PipelineConfig, PipelineExecutor};

/// Orchestrates a frame sequence through the tilt-shift pipeline.
///
/// Wires the reader, writer, and effect together and delegates execution to
/// a [`PipelineExecutor`]. This is a single-use struct: `execute` consumes
/// the owned components, so calling it twice will fail.
pub struct TiltShiftSequenceUseCase {
    reader: Option<Box<dyn FrameReader>>,
    writer: Option<Box<dyn FrameWriter>>,
    effect: Arc<dyn FrameEffect>,
    executor: Box<dyn PipelineExecutor>,
    workers: usize,
    on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
    cancelled: Arc<AtomicBool>,
}

impl TiltShiftSequenceUseCase {
    pub fn new(
        reader: Box<dyn FrameReader>,
        writer: Box<dyn FrameWriter>,
        effect: Arc<dyn FrameEffect>,
        executor: Box<dyn PipelineExecutor>,
        workers: usize,
        on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            reader: Some(reader),
            writer: Some(writer),
            effect,
            executor,
            workers,
            on_progress,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn execute(
        &mut self,
        metadata: &SequenceMetadata,
        output_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let config = PipelineConfig {
            workers: self.workers,
            on_progress: self.on_progress.take(),
            cancelled: self.cancelled.clone(),
        };

        self.executor.execute(
            self.reader.take().ok_or("Pipeline already executed")?,
            self.writer.take().ok_or("Pipeline already executed")?,
            self.effect.clone(),
            metadata,
            output_path,
            config,
        )
    }
}
