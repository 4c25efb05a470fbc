use std::path::{Path, PathBuf};

use crate::io::domain::frame_reader::FrameReader;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;
use crate::shared::sequence_metadata::SequenceMetadata;

/// Reads a directory of equally-sized image files as a frame sequence.
///
/// Files are enumerated in filename order, so sources should use
/// zero-padded numbering. Dimensions come from the first frame's header;
/// frames that disagree yield an error instead of a malformed sequence.
/// Decoding is lazy, one frame at a time.
pub struct ImageSequenceReader {
    files: Vec<PathBuf>,
    metadata: Option<SequenceMetadata>,
}

impl ImageSequenceReader {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            metadata: None,
        }
    }
}

impl Default for ImageSequenceReader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

impl FrameReader for ImageSequenceReader {
    fn open(&mut self, path: &Path) -> Result<SequenceMetadata, Box<dyn std::error::Error>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image_file(p))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(format!("no image frames found in {}", path.display()).into());
        }

        // Header-only probe; full decode happens lazily in frames().
        let (width, height) = image::image_dimensions(&files[0])?;
        log::debug!(
            "Found {} frames ({}x{}) in {}",
            files.len(),
            width,
            height,
            path.display()
        );

        let metadata = SequenceMetadata {
            width,
            height,
            total_frames: files.len(),
            source_path: Some(path.to_path_buf()),
        };
        self.files = files;
        self.metadata = Some(metadata.clone());
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let metadata = match &self.metadata {
            Some(m) => m.clone(),
            None => {
                return Box::new(std::iter::once(Err(
                    "ImageSequenceReader: not opened".into()
                )))
            }
        };

        Box::new(self.files.iter().enumerate().map(move |(index, file)| {
            let img = image::open(file)?.to_rgb8();
            let (width, height) = img.dimensions();
            if (width, height) != (metadata.width, metadata.height) {
                return Err(format!(
                    "frame {} is {}x{}, expected {}x{}",
                    file.display(),
                    width,
                    height,
                    metadata.width,
                    metadata.height
                )
                .into());
            }
            Ok(Frame::new(img.into_raw(), width, height, 3, index))
        }))
    }

    fn close(&mut self) {
        self.files.clear();
        self.metadata = None;
    }
}
