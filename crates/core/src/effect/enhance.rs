use crate::effect::hsv;
use crate::shared::frame::Frame;

/// Default saturation/brightness boost, matching the original effect.
pub const DEFAULT_BOOST: u8 = 10;

/// Boost saturation and brightness to mimic the punchy look of tilt-shift
/// photography.
///
/// Each pixel is converted to HSV, `amount` is added to the S and V channels
/// with saturating arithmetic (clamped at 255, no wraparound), and the pixel
/// is converted back. Shape- and channel-order-preserving.
pub fn boost_colors(frame: &Frame, amount: u8) -> Frame {
    debug_assert_eq!(frame.channels(), 3, "boost_colors expects RGB frames");

    let mut data = Vec::with_capacity(frame.data().len());
    for px in frame.data().chunks_exact(3) {
        let (h, s, v) = hsv::rgb_to_hsv(px[0], px[1], px[2]);
        let (r, g, b) = hsv::hsv_to_rgb(h, s.saturating_add(amount), v.saturating_add(amount));
        data.push(r);
        data.push(g);
        data.push(b);
    }
    Frame::new(
        data,
        frame.width(),
        frame.height(),
        frame.channels(),
        frame.index(),
    )
}
