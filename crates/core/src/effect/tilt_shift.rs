use crate::effect::depth::increasing_blur;
use crate::effect::enhance::{boost_colors, DEFAULT_BOOST};
use crate::effect::error::EffectError;
use crate::effect::frame_effect::FrameEffect;
use crate::effect::gaussian::gaussian_kernel_1d;
use crate::shared::constants::MIN_DOF;
use crate::shared::frame::Frame;

/// Fixed Gaussian kernel size for one blur step (15x15).
const BLUR_KERNEL_SIZE: usize = 15;

/// The tilt-shift compositor.
///
/// Splits a frame at a focus row, builds an increasing blur gradient over
/// each half (the above half is processed in reversed row order so "away
/// from focus" points the same way on both sides), rejoins the halves, and
/// optionally boosts saturation and brightness.
///
/// Stateless across calls and reentrant: one instance may be shared by
/// several worker threads.
pub struct TiltShift {
    dof: usize,
    enhance: bool,
    kernel: Vec<f32>,
}

impl TiltShift {
    pub fn new(dof: usize, enhance: bool) -> Self {
        Self {
            dof,
            enhance,
            kernel: gaussian_kernel_1d(BLUR_KERNEL_SIZE),
        }
    }

    /// Binds a focus row, yielding a per-frame effect for the pipeline.
    pub fn with_focus(self, focus_row: usize) -> FocusedTiltShift {
        FocusedTiltShift {
            inner: self,
            focus_row,
        }
    }

    /// Apply the effect around `focus_row`. Returns a new frame of identical
    /// dimensions; the input is not modified.
    pub fn apply(&self, frame: &Frame, focus_row: usize) -> Result<Frame, EffectError> {
        let height = frame.height() as usize;
        let width = frame.width() as usize;
        let channels = frame.channels() as usize;
        self.validate(focus_row, height)?;

        let row_len = frame.row_bytes();
        let mut temp = Vec::new();

        // Above half, reversed so row 0 is the row adjacent to focus.
        let above = reverse_rows(&frame.data()[..focus_row * row_len], row_len);
        let above = increasing_blur(
            &above,
            width,
            focus_row,
            channels,
            self.dof,
            &self.kernel,
            &mut temp,
        )?;
        let mut out = reverse_rows(&above, row_len);

        // Below half already starts at the focus row.
        let below = increasing_blur(
            &frame.data()[focus_row * row_len..],
            width,
            height - focus_row,
            channels,
            self.dof,
            &self.kernel,
            &mut temp,
        )?;
        out.extend_from_slice(&below);

        let result = Frame::new(
            out,
            frame.width(),
            frame.height(),
            frame.channels(),
            frame.index(),
        );
        Ok(if self.enhance {
            boost_colors(&result, DEFAULT_BOOST)
        } else {
            result
        })
    }

    /// The focus band plus at least one full blur layer must fit on each side.
    fn validate(&self, focus_row: usize, height: usize) -> Result<(), EffectError> {
        if self.dof < MIN_DOF {
            return Err(EffectError::DofTooSmall {
                dof: self.dof,
                min: MIN_DOF,
            });
        }
        let margin = 2 * self.dof;
        if focus_row <= margin || focus_row + margin >= height {
            return Err(EffectError::FocusRowOutOfRange {
                focus_row,
                margin,
                height,
            });
        }
        Ok(())
    }
}

/// A [`TiltShift`] with a fixed focus row, usable as a [`FrameEffect`].
pub struct FocusedTiltShift {
    inner: TiltShift,
    focus_row: usize,
}

impl FrameEffect for FocusedTiltShift {
    fn apply(&self, frame: &Frame) -> Result<Frame, Box<dyn std::error::Error>> {
        Ok(self.inner.apply(frame, self.focus_row)?)
    }
}

fn reverse_rows(data: &[u8], row_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for row in data.chunks_exact(row_len).rev() {
        out.extend_from_slice(row);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::s;
    use rstest::rstest;

    const H: u32 = 400;
    const W: u32 = 300;

    fn uniform_frame(h: u32, w: u32, value: u8) -> Frame {
        Frame::new(vec![value; (h * w * 3) as usize], w, h, 3, 0)
    }

    /// Frame with a single full-width bright line at `row`.
    fn line_frame(h: u32, w: u32, row: usize) -> Frame {
        let mut data = vec![0u8; (h * w * 3) as usize];
        let row_len = (w * 3) as usize;
        data[row * row_len..(row + 1) * row_len].fill(255);
        Frame::new(data, w, h, 3, 0)
    }

    fn max_in_rows(frame: &Frame, lo: usize, hi: usize) -> u8 {
        let arr = frame.as_ndarray();
        arr.slice(s![lo..hi, .., ..]).iter().copied().max().unwrap()
    }

    #[test]
    fn test_output_shape_matches_input() {
        let frame = uniform_frame(H, W, 90);
        let out = TiltShift::new(60, true).apply(&frame, 200).unwrap();
        assert_eq!(out.width(), W);
        assert_eq!(out.height(), H);
        assert_eq!(out.channels(), 3);
    }

    #[test]
    fn test_solid_color_unchanged_without_enhance() {
        let frame = uniform_frame(H, W, 137);
        let out = TiltShift::new(60, false).apply(&frame, 200).unwrap();
        assert_eq!(out.data(), frame.data());
    }

    #[test]
    fn test_sharp_band_is_pixel_identical() {
        // Noise-free check: a gradient image, focus at 200, dof 60. Rows
        // within (200-60, 200+60) must be untouched when enhance is off.
        let row_len = (W * 3) as usize;
        let data: Vec<u8> = (0..H as usize)
            .flat_map(|y| std::iter::repeat((y % 256) as u8).take(row_len))
            .collect();
        let frame = Frame::new(data, W, H, 3, 0);
        let out = TiltShift::new(60, false).apply(&frame, 200).unwrap();

        let input = frame.as_ndarray();
        let output = out.as_ndarray();
        assert_eq!(
            input.slice(s![141..260, .., ..]),
            output.slice(s![141..260, .., ..])
        );
    }

    #[test]
    fn test_line_far_from_focus_is_spread() {
        let frame = line_frame(H, W, 50);
        let out = TiltShift::new(60, false).apply(&frame, 200).unwrap();
        // The line itself is dimmer and its neighbors have picked up light.
        assert!(max_in_rows(&out, 45, 56) < 255);
        assert!(max_in_rows(&out, 30, 45) > 0);
    }

    #[test]
    fn test_line_in_sharp_band_stays_sharp() {
        let frame = line_frame(H, W, 200 + 30);
        let out = TiltShift::new(60, false).apply(&frame, 200).unwrap();
        assert_eq!(max_in_rows(&out, 229, 232), 255);
        // No spill into the rows just outside the line.
        assert_eq!(max_in_rows(&out, 220, 229), 0);
    }

    #[test]
    fn test_blur_grows_with_distance_from_focus() {
        let near = TiltShift::new(60, false)
            .apply(&line_frame(H, W, 320), 200)
            .unwrap();
        let far = TiltShift::new(60, false)
            .apply(&line_frame(H, W, 395), 200)
            .unwrap();
        assert!(max_in_rows(&far, 380, 400) < max_in_rows(&near, 305, 335));
    }

    #[test]
    fn test_enhance_changes_pixels_everywhere() {
        let frame = uniform_frame(H, W, 100);
        let out = TiltShift::new(60, true).apply(&frame, 200).unwrap();
        assert_ne!(out.data(), frame.data());
        // Brightness boost applies to the sharp band too.
        assert!(out.as_ndarray()[[200, 0, 0]] > 100);
    }

    #[rstest]
    #[case::dof_too_small(5, 200)]
    #[case::focus_at_top(60, 0)]
    #[case::focus_on_margin(60, 120)]
    #[case::focus_too_low(60, 280)]
    fn test_invalid_configuration_rejected(#[case] dof: usize, #[case] focus_row: usize) {
        let frame = uniform_frame(H, W, 0);
        let err = TiltShift::new(dof, false).apply(&frame, focus_row).unwrap_err();
        if dof < MIN_DOF {
            assert!(matches!(err, EffectError::DofTooSmall { .. }));
        } else {
            assert!(matches!(err, EffectError::FocusRowOutOfRange { .. }));
        }
    }

    #[test]
    fn test_input_frame_not_mutated() {
        let frame = line_frame(H, W, 50);
        let snapshot = frame.clone();
        let _ = TiltShift::new(60, true).apply(&frame, 200).unwrap();
        assert_eq!(frame, snapshot);
    }

    #[test]
    fn test_frame_index_preserved() {
        let frame = Frame::new(vec![7u8; (H * W * 3) as usize], W, H, 3, 31);
        let out = TiltShift::new(60, false).apply(&frame, 200).unwrap();
        assert_eq!(out.index(), 31);
    }

    #[test]
    fn test_focused_effect_applies_through_trait() {
        let effect = TiltShift::new(60, false).with_focus(200);
        let frame = uniform_frame(H, W, 55);
        let out = effect.apply(&frame).unwrap();
        assert_eq!(out.data(), frame.data());
    }

    #[test]
    fn test_reverse_rows_round_trip() {
        let data: Vec<u8> = (0..24).collect();
        let reversed = reverse_rows(&data, 6);
        assert_eq!(&reversed[..6], &data[18..]);
        assert_eq!(reverse_rows(&reversed, 6), data);
    }
}
