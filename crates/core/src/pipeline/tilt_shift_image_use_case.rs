use std::path::Path;

use crate::effect::frame_effect::FrameEffect;
use crate::io::domain::frame_reader::FrameReader;
use crate::io::domain::image_writer::ImageWriter;

/// Single-image pipeline: read → apply effect → write.
pub struct TiltShiftImageUseCase {
    reader: Box<dyn FrameReader>,
    image_writer: Box<dyn ImageWriter>,
    effect: Box<dyn FrameEffect>,
}

impl TiltShiftImageUseCase {
    pub fn new(
        reader: Box<dyn FrameReader>,
        image_writer: Box<dyn ImageWriter>,
        effect: Box<dyn FrameEffect>,
    ) -> Self {
        Self {
            reader,
            image_writer,
            effect,
        }
    }

    /// Reads a single image, applies the effect, and writes the output.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let _metadata = self.reader.open(input_path)?;

        let frame = self.reader.frames().next().ok_or("No frames in image")??;
        self.reader.close();

        let processed = self.effect.apply(&frame)?;
        self.image_writer.write(output_path, &processed)?;

        Ok(())
    }
}
