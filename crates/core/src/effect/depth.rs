use crate::effect::error::EffectError;
use crate::effect::gaussian;

/// Build an increasing blur gradient over a one-sided region.
///
/// `rows` is a row-major RGB buffer whose rows are ordered nearest-focus
/// first. The first `dof` rows are kept sharp, the rest are blurred once,
/// and the tail is re-blurred recursively so blur strength grows with
/// distance from row 0. Adjacent blur layers are joined by a `dof`-row
/// alpha-blend transition so no seam is visible.
///
/// Returns a new buffer; `rows` is not modified. `temp` is blur scratch
/// space reused across layers.
pub fn increasing_blur(
    rows: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    dof: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
) -> Result<Vec<u8>, EffectError> {
    let row_len = width * channels;
    if rows.len() != height * row_len {
        return Err(EffectError::BufferSizeMismatch {
            expected: height * row_len,
            actual: rows.len(),
        });
    }
    // A zero-height sharp head would never shrink the tail, so the
    // recursion could not terminate.
    if dof == 0 {
        return Err(EffectError::DofTooSmall { dof, min: 1 });
    }
    if height <= 2 * dof {
        return Err(EffectError::RegionTooShort {
            rows: height,
            min_rows: 2 * dof + 1,
        });
    }

    // One blur pass over everything past the sharp head.
    let tail_height = height - dof;
    let mut tail = rows[dof * row_len..].to_vec();
    gaussian::separable_gaussian_blur_with_kernel(
        &mut tail,
        width,
        tail_height,
        channels,
        kernel,
        temp,
    );

    // Re-blurring the tail's own tail is what turns a uniform blur into a
    // gradient: rows far from focus accumulate one pass per level. The
    // recursion leaves the tail's first `dof` rows untouched, so the blend
    // below always sees single-pass rows, matching the original effect.
    if tail_height > 2 * dof {
        tail = increasing_blur(&tail, width, tail_height, channels, dof, kernel, temp)?;
    }

    let mut out = vec![0u8; rows.len()];
    out[..dof * row_len].copy_from_slice(&rows[..dof * row_len]);

    let blend = blend_rows(
        &rows[dof * row_len..2 * dof * row_len],
        &tail[..dof * row_len],
        width,
        channels,
        dof,
    )?;
    out[dof * row_len..2 * dof * row_len].copy_from_slice(&blend);
    out[2 * dof * row_len..].copy_from_slice(&tail[dof * row_len..]);

    Ok(out)
}

/// Alpha-blend the boundary between two blur layers.
///
/// Produces `blend_width` rows where row `i` interpolates between the
/// unblurred side and the more-blurred side with weight
/// `1 - i / (blend_width - 1)`: row 0 is fully unblurred, the last row fully
/// blurred. The same weight applies to all channels of a row.
pub fn blend_rows(
    sharp: &[u8],
    blurred: &[u8],
    width: usize,
    channels: usize,
    blend_width: usize,
) -> Result<Vec<u8>, EffectError> {
    let row_len = width * channels;
    for side in [sharp, blurred] {
        if side.len() % row_len != 0 {
            return Err(EffectError::BufferSizeMismatch {
                expected: (side.len() / row_len + 1) * row_len,
                actual: side.len(),
            });
        }
        if side.len() < blend_width * row_len {
            return Err(EffectError::RegionTooShort {
                rows: side.len() / row_len,
                min_rows: blend_width,
            });
        }
    }

    let mut out = vec![0u8; blend_width * row_len];
    for i in 0..blend_width {
        let weight = if blend_width > 1 {
            1.0 - i as f32 / (blend_width - 1) as f32
        } else {
            1.0
        };
        let offset = i * row_len;
        for j in 0..row_len {
            let s = sharp[offset + j] as f32;
            let b = blurred[offset + j] as f32;
            out[offset + j] = (s * weight + b * (1.0 - weight)).round() as u8;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::gaussian::gaussian_kernel_1d;
    use rstest::rstest;

    const W: usize = 8;
    const C: usize = 3;

    fn uniform_rows(height: usize, value: u8) -> Vec<u8> {
        vec![value; height * W * C]
    }

    fn run(rows: &[u8], height: usize, dof: usize) -> Result<Vec<u8>, EffectError> {
        let kernel = gaussian_kernel_1d(15);
        let mut temp = Vec::new();
        increasing_blur(rows, W, height, C, dof, &kernel, &mut temp)
    }

    /// Brightest pixel within `radius` rows of `row`. A blurred line keeps
    /// its mass but loses peak height, so a lower peak means a wider spread.
    fn peak_brightness(rows: &[u8], row: usize, radius: usize) -> u8 {
        let row_len = W * C;
        let lo = row.saturating_sub(radius) * row_len;
        let hi = (row + radius) * row_len;
        rows[lo..hi].iter().copied().max().unwrap()
    }

    #[test]
    fn test_sharp_head_is_copied_verbatim() {
        let mut rows = uniform_rows(100, 40);
        // distinctive pixels in the head
        rows[0] = 255;
        rows[(10 * W + 3) * C + 1] = 200;
        let out = run(&rows, 100, 12).unwrap();
        assert_eq!(&out[..12 * W * C], &rows[..12 * W * C]);
    }

    #[test]
    fn test_output_shape_matches_input() {
        let rows = uniform_rows(75, 90);
        let out = run(&rows, 75, 10).unwrap();
        assert_eq!(out.len(), rows.len());
    }

    #[test]
    fn test_uniform_region_is_unchanged() {
        let rows = uniform_rows(120, 200);
        let out = run(&rows, 120, 10).unwrap();
        assert!(out.iter().all(|&v| (v as i32 - 200).abs() <= 1));
    }

    #[test]
    fn test_blur_increases_with_distance() {
        // Horizontal bright lines at increasing distance from row 0; the
        // farther line must end up more smeared than the nearer one.
        let mut rows = uniform_rows(200, 0);
        for &line in &[40usize, 160] {
            for j in 0..W * C {
                rows[line * W * C + j] = 255;
            }
        }
        let out = run(&rows, 200, 10).unwrap();
        let near = peak_brightness(&out, 40, 15);
        let far = peak_brightness(&out, 160, 15);
        assert!(
            far < near,
            "far line should be more spread: near={near} far={far}"
        );
    }

    #[test]
    fn test_zero_dof_is_rejected() {
        let rows = uniform_rows(100, 0);
        let err = run(&rows, 100, 0).unwrap_err();
        assert_eq!(err, EffectError::DofTooSmall { dof: 0, min: 1 });
    }

    #[test]
    fn test_region_too_short_is_rejected() {
        let rows = uniform_rows(20, 0);
        let err = run(&rows, 20, 10).unwrap_err();
        assert_eq!(
            err,
            EffectError::RegionTooShort {
                rows: 20,
                min_rows: 21
            }
        );
    }

    #[test]
    fn test_wrong_buffer_size_is_rejected() {
        let rows = uniform_rows(50, 0);
        let kernel = gaussian_kernel_1d(15);
        let mut temp = Vec::new();
        let err = increasing_blur(&rows, W, 51, C, 10, &kernel, &mut temp).unwrap_err();
        assert!(matches!(err, EffectError::BufferSizeMismatch { .. }));
    }

    // --- Seam blender ---

    #[test]
    fn test_blend_endpoints() {
        let sharp = uniform_rows(10, 200);
        let blurred = uniform_rows(10, 100);
        let out = blend_rows(&sharp, &blurred, W, C, 10).unwrap();
        assert_eq!(out[0], 200); // row 0 fully unblurred
        assert_eq!(out[9 * W * C], 100); // last row fully blurred
    }

    #[test]
    fn test_blend_stays_between_sources() {
        let sharp = uniform_rows(12, 240);
        let blurred = uniform_rows(12, 40);
        let out = blend_rows(&sharp, &blurred, W, C, 12).unwrap();
        assert!(out.iter().all(|&v| (40..=240).contains(&v)));
    }

    #[test]
    fn test_blend_is_monotonic_per_row() {
        let sharp = uniform_rows(10, 250);
        let blurred = uniform_rows(10, 0);
        let out = blend_rows(&sharp, &blurred, W, C, 10).unwrap();
        let row_len = W * C;
        for i in 1..10 {
            assert!(out[i * row_len] <= out[(i - 1) * row_len]);
        }
    }

    #[test]
    fn test_blend_weight_is_identical_across_channels() {
        let mut sharp = uniform_rows(10, 0);
        let mut blurred = uniform_rows(10, 0);
        // Same ramp on every channel: blended output must repeat per pixel.
        for px in sharp.chunks_exact_mut(C) {
            px.copy_from_slice(&[210, 210, 210]);
        }
        for px in blurred.chunks_exact_mut(C) {
            px.copy_from_slice(&[30, 30, 30]);
        }
        let out = blend_rows(&sharp, &blurred, W, C, 10).unwrap();
        for px in out.chunks_exact(C) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[rstest]
    #[case::sharp_too_short(5, 10)]
    #[case::exact_height_ok(10, 10)]
    fn test_blend_height_requirement(#[case] rows: usize, #[case] blend_width: usize) {
        let sharp = uniform_rows(rows, 1);
        let blurred = uniform_rows(10, 2);
        let result = blend_rows(&sharp, &blurred, W, C, blend_width);
        if rows < blend_width {
            assert_eq!(
                result.unwrap_err(),
                EffectError::RegionTooShort {
                    rows,
                    min_rows: blend_width
                }
            );
        } else {
            assert!(result.is_ok());
        }
    }
}
