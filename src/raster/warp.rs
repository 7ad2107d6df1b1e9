use crate::foundation::core::ImageRgba;
use crate::foundation::error::FramefitResult;
use crate::geometry::homography::Homography;

/// Perspective-warp `src` into an `out_w` x `out_h` buffer using the forward
/// transform `h` (source canvas space onto output pixel space).
///
/// Sampling is inverse-mapped: each destination pixel is sent through the
/// inverted transform and the source is sampled with separable Catmull-Rom
/// bicubic taps. Destination pixels whose preimage falls outside the source
/// canvas stay fully transparent, so the warp never injects color outside
/// the intended quad even before masking.
///
/// The output is background-sized; the homography already encodes the
/// placement, so no crop-then-paste step exists.
pub fn warp_perspective(
    src: &ImageRgba,
    h: &Homography,
    out_w: u32,
    out_h: u32,
) -> FramefitResult<ImageRgba> {
    // Tolerance for solver round-off at the rect boundary.
    const EDGE_EPS: f64 = 1e-6;

    let inv = h.invert()?;
    let mut out = ImageRgba::new(out_w, out_h)?;
    let sw = src.width as f64;
    let sh = src.height as f64;

    for y in 0..out_h {
        let row = y as usize * out_w as usize * 4;
        for x in 0..out_w {
            let Some((sx, sy)) = inv.apply(x as f64, y as f64) else {
                continue;
            };
            if sx < -EDGE_EPS || sy < -EDGE_EPS || sx >= sw + EDGE_EPS || sy >= sh + EDGE_EPS {
                continue;
            }
            let px = sample_catmull_rom(src, sx, sy);
            let i = row + x as usize * 4;
            out.data[i..i + 4].copy_from_slice(&px);
        }
    }
    Ok(out)
}

/// 4x4 Catmull-Rom sample with clamp-to-edge taps.
///
/// Exact at integer coordinates (the center tap carries the full weight),
/// so axis-aligned unit-scale warps reproduce the source byte-for-byte.
fn sample_catmull_rom(src: &ImageRgba, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor();
    let y0 = y.floor();
    let wx = catmull_rom_weights(x - x0);
    let wy = catmull_rom_weights(y - y0);
    let xi = x0 as i64;
    let yi = y0 as i64;
    let max_x = src.width as i64 - 1;
    let max_y = src.height as i64 - 1;

    let mut acc = [0.0f64; 4];
    for (j, &wyj) in wy.iter().enumerate() {
        let sy = (yi + j as i64 - 1).clamp(0, max_y) as usize;
        for (i, &wxi) in wx.iter().enumerate() {
            let sx = (xi + i as i64 - 1).clamp(0, max_x) as usize;
            let o = (sy * src.width as usize + sx) * 4;
            let w = wxi * wyj;
            for c in 0..4 {
                acc[c] += w * f64::from(src.data[o + c]);
            }
        }
    }

    let mut px = [0u8; 4];
    for c in 0..4 {
        px[c] = acc[c].round().clamp(0.0, 255.0) as u8;
    }
    px
}

fn catmull_rom_weights(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        0.5 * (-t3 + 2.0 * t2 - t),
        0.5 * (3.0 * t3 - 5.0 * t2 + 2.0),
        0.5 * (-3.0 * t3 + 4.0 * t2 + t),
        0.5 * (t3 - t2),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/raster/warp.rs"]
mod tests;
