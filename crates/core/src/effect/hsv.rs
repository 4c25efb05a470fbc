//! 8-bit RGB ↔ HSV conversion, OpenCV convention: H in [0, 180),
//! S and V in [0, 255].

pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let rf = r as f32;
    let gf = g as f32;
    let bf = b as f32;

    let v = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = v - min;

    let s = if v == 0.0 { 0.0 } else { delta * 255.0 / v };

    let h_deg = if delta == 0.0 {
        0.0
    } else if v == rf {
        60.0 * (gf - bf) / delta
    } else if v == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

    (
        ((h_deg / 2.0).round() as u16 % 180) as u8,
        s.round() as u8,
        v as u8,
    )
}

pub fn hsv_to_rgb(h: u8, s: u8, v: u8) -> (u8, u8, u8) {
    let vf = v as f32;
    if s == 0 {
        return (v, v, v);
    }
    let sf = s as f32 / 255.0;
    let sector = h as f32 * 2.0 / 60.0;
    let i = (sector.floor() as u32) % 6;
    let f = sector - sector.floor();

    let p = vf * (1.0 - sf);
    let q = vf * (1.0 - sf * f);
    let t = vf * (1.0 - sf * (1.0 - f));

    let (r, g, b) = match i {
        0 => (vf, t, p),
        1 => (q, vf, p),
        2 => (p, vf, t),
        3 => (p, q, vf),
        4 => (t, p, vf),
        _ => (vf, p, q),
    };
    (
        r.round().clamp(0.0, 255.0) as u8,
        g.round().clamp(0.0, 255.0) as u8,
        b.round().clamp(0.0, 255.0) as u8,
    )
}
