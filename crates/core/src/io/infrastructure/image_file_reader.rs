use std::path::Path;

use crate::io::domain::frame_reader::FrameReader;
use crate::shared::frame::Frame;
use crate::shared::sequence_metadata::SequenceMetadata;

/// Adapts a single image file to the [`FrameReader`] interface.
///
/// Treats the image as a one-frame sequence, allowing the pipeline to
/// process images and frame directories uniformly. Decoding happens in
/// `open` via the `image` crate; pixels are converted to RGB.
pub struct ImageFileReader {
    frame: Option<Frame>,
    metadata: Option<SequenceMetadata>,
}

impl ImageFileReader {
    pub fn new() -> Self {
        Self {
            frame: None,
            metadata: None,
        }
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameReader for ImageFileReader {
    fn open(&mut self, path: &Path) -> Result<SequenceMetadata, Box<dyn std::error::Error>> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();
        self.frame = Some(Frame::new(img.into_raw(), width, height, 3, 0));

        let metadata = SequenceMetadata {
            width,
            height,
            total_frames: 1,
            source_path: Some(path.to_path_buf()),
        };
        self.metadata = Some(metadata.clone());
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        if self.frame.is_none() {
            return Box::new(std::iter::once(Err("ImageFileReader: not opened".into())));
        }
        Box::new(self.frame.take().into_iter().map(Ok))
    }

    fn close(&mut self) {
        self.frame = None;
        self.metadata = None;
    }
}
