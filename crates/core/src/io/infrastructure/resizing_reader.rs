use std::path::Path;

use crate::io::domain::frame_reader::FrameReader;
use crate::shared::frame::Frame;
use crate::shared::resize::resize_to_width;
use crate::shared::sequence_metadata::SequenceMetadata;

/// Decorator that resizes every frame from an inner reader to a target
/// width, keeping aspect ratio.
///
/// Reported metadata reflects the resized dimensions, so downstream focus
/// rows are expressed in output coordinates.
pub struct ResizingReader {
    inner: Box<dyn FrameReader>,
    target_width: u32,
}

impl ResizingReader {
    pub fn new(inner: Box<dyn FrameReader>, target_width: u32) -> Result<Self, &'static str> {
        if target_width == 0 {
            return Err("target_width must be >= 1");
        }
        Ok(Self {
            inner,
            target_width,
        })
    }
}

impl FrameReader for ResizingReader {
    fn open(&mut self, path: &Path) -> Result<SequenceMetadata, Box<dyn std::error::Error>> {
        let meta = self.inner.open(path)?;
        let height = ((meta.height as u64 * self.target_width as u64) / meta.width as u64) as u32;
        Ok(SequenceMetadata {
            width: self.target_width,
            height: height.max(1),
            ..meta
        })
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let target_width = self.target_width;
        Box::new(self.inner.frames().map(move |result| {
            result.map(|frame| {
                if frame.width() == target_width {
                    frame
                } else {
                    resize_to_width(&frame, target_width)
                }
            })
        }))
    }

    fn close(&mut self) {
        self.inner.close();
    }
}
