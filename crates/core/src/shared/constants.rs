/// Smallest usable depth of field. Below this the blur layers are too
/// narrow to blend without visible banding.
pub const MIN_DOF: usize = 10;

/// Default depth of field in pixels: half-width of the sharp band and the
/// height of each blur step.
pub const DEFAULT_DOF: usize = 60;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
