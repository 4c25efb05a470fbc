use thiserror::Error;

/// Errors raised by the tilt-shift effect.
///
/// The first two variants are configuration errors: the caller must supply a
/// corrected focus row or depth of field. The remaining variants signal
/// mismatched buffer shapes between paired operations, i.e. a programming
/// error upstream. None of them are retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    #[error("depth of field must be at least {min}, got {dof}")]
    DofTooSmall { dof: usize, min: usize },

    #[error(
        "focus row {focus_row} must leave more than {margin} rows above and below \
         (frame height {height})"
    )]
    FocusRowOutOfRange {
        focus_row: usize,
        margin: usize,
        height: usize,
    },

    #[error("region buffer holds {actual} bytes, expected {expected} for its declared shape")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("region of {rows} rows is too short, need at least {min_rows}")]
    RegionTooShort { rows: usize, min_rows: usize },
}
