use crate::shared::frame::Frame;

/// Resize a frame to `target_width`, keeping its aspect ratio.
///
/// The original tilt-shift tool hardwired this behind a global flag; here it
/// is an explicit step the caller opts into before running the effect.
pub fn resize_to_width(frame: &Frame, target_width: u32) -> Frame {
    let target_height =
        ((frame.height() as u64 * target_width as u64) / frame.width() as u64) as u32;
    resize(frame, target_width, target_height.max(1))
}

/// Bilinear resize to exact target dimensions.
pub fn resize(frame: &Frame, target_w: u32, target_h: u32) -> Frame {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let channels = frame.channels() as usize;
    let data = frame.data();

    let tw = target_w as usize;
    let th = target_h as usize;
    let mut out = vec![0u8; tw * th * channels];

    for y in 0..th {
        for x in 0..tw {
            let src_x = x as f32 * (width as f32 - 1.0) / (tw as f32 - 1.0).max(1.0);
            let src_y = y as f32 * (height as f32 - 1.0) / (th as f32 - 1.0).max(1.0);

            let x0 = (src_x.floor() as usize).min(width - 1);
            let x1 = (x0 + 1).min(width - 1);
            let y0 = (src_y.floor() as usize).min(height - 1);
            let y1 = (y0 + 1).min(height - 1);

            let fx = src_x - x0 as f32;
            let fy = src_y - y0 as f32;

            for c in 0..channels {
                let v00 = data[(y0 * width + x0) * channels + c] as f32;
                let v10 = data[(y0 * width + x1) * channels + c] as f32;
                let v01 = data[(y1 * width + x0) * channels + c] as f32;
                let v11 = data[(y1 * width + x1) * channels + c] as f32;

                let val = v00 * (1.0 - fx) * (1.0 - fy)
                    + v10 * fx * (1.0 - fy)
                    + v01 * (1.0 - fx) * fy
                    + v11 * fx * fy;
                out[(y * tw + x) * channels + c] = val.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Frame::new(out, target_w, target_h, frame.channels(), frame.index())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_frame(w: u32, h: u32, value: u8) -> Frame {
        Frame::new(vec![value; (w * h * 3) as usize], w, h, 3, 0)
    }

    #[test]
    fn test_resize_to_width_keeps_aspect_ratio() {
        let frame = uniform_frame(400, 300, 128);
        let resized = resize_to_width(&frame, 200);
        assert_eq!(resized.width(), 200);
        assert_eq!(resized.height(), 150);
    }

    #[test]
    fn test_resize_to_width_rounds_down_like_integer_division() {
        let frame = uniform_frame(300, 100, 0);
        let resized = resize_to_width(&frame, 250);
        // 100 * 250 / 300 = 83.33 -> 83
        assert_eq!(resized.height(), 83);
    }

    #[test]
    fn test_uniform_frame_survives_resize() {
        let frame = uniform_frame(40, 30, 77);
        let resized = resize(&frame, 25, 19);
        assert!(resized.data().iter().all(|&v| (v as i32 - 77).abs() <= 1));
    }

    #[test]
    fn test_upscale_preserves_corner_pixels() {
        let mut data = vec![0u8; 2 * 2 * 3];
        data[0] = 200; // top-left red
        let frame = Frame::new(data, 2, 2, 3, 0);
        let resized = resize(&frame, 8, 8);
        assert_eq!(resized.data()[0], 200);
        // bottom-right stays black
        let last = (7 * 8 + 7) * 3;
        assert_eq!(resized.data()[last], 0);
    }

    #[test]
    fn test_index_preserved() {
        let frame = Frame::new(vec![0u8; 4 * 4 * 3], 4, 4, 3, 9);
        assert_eq!(resize(&frame, 2, 2).index(), 9);
    }
}
