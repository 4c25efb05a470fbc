use std::path::{Path, PathBuf};

use crate::io::domain::frame_writer::FrameWriter;
use crate::shared::frame::Frame;
use crate::shared::sequence_metadata::SequenceMetadata;

/// Writes processed frames as numbered PNG files into a directory.
///
/// Filenames are derived from each frame's sequence index
/// (`frame_000042.png`), so the output enumerates back in the same order.
pub struct ImageSequenceWriter {
    dir: Option<PathBuf>,
    written: usize,
}

impl ImageSequenceWriter {
    pub fn new() -> Self {
        Self {
            dir: None,
            written: 0,
        }
    }

    pub fn frames_written(&self) -> usize {
        self.written
    }
}

impl Default for ImageSequenceWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameWriter for ImageSequenceWriter {
    fn open(
        &mut self,
        path: &Path,
        _metadata: &SequenceMetadata,
    ) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all(path)?;
        self.dir = Some(path.to_path_buf());
        self.written = 0;
        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let dir = self
            .dir
            .as_ref()
            .ok_or("ImageSequenceWriter: not opened")?;
        let path = dir.join(format!("frame_{:06}.png", frame.index()));
        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Failed to create image from frame data")?;
        img.save(path)?;
        self.written += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.dir = None;
        Ok(())
    }
}
