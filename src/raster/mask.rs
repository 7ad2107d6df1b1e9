use crate::foundation::core::Quad;

/// Rasterize `quad` into a single-channel occupancy mask.
///
/// Pixels whose centers fall inside the quad are 255, all others 0. A
/// positive `feather_px` post-processes the binary mask with a separable
/// Gaussian blur whose kernel holds `max(1, round(feather_px)) | 1` taps
/// (forced odd); the polygon fill itself is never altered.
///
/// Mask values are interpreted downstream as a `[0, 1]` alpha multiplier,
/// independent of any per-pixel alpha in the source images.
pub fn build_mask(width: u32, height: u32, quad: &Quad, feather_px: f32) -> Vec<u8> {
    let mut mask = vec![0u8; width as usize * height as usize];
    fill_convex(&mut mask, width, height, quad);

    if feather_px > 0.0 {
        let taps = kernel_taps(feather_px);
        if taps > 1 {
            mask = gaussian_blur_1ch(&mask, width, height, taps);
        }
    }
    mask
}

/// Odd kernel width derived from the feather radius.
fn kernel_taps(feather_px: f32) -> usize {
    ((feather_px.round() as i64).max(1) as usize) | 1
}

/// Scanline fill of a convex quad over pixel centers.
///
/// For each row the crossing edges are intersected at the row's center
/// ordinate; convexity guarantees a single filled span. Half-open edge
/// ranges skip horizontal edges and avoid double-counting at shared
/// vertices.
fn fill_convex(mask: &mut [u8], width: u32, height: u32, quad: &Quad) {
    let pts = quad.points();
    for y in 0..height {
        let yc = y as f64 + 0.5;
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for i in 0..4 {
            let p0 = pts[i];
            let p1 = pts[(i + 1) % 4];
            let (lo, hi) = if p0.y <= p1.y { (p0, p1) } else { (p1, p0) };
            if yc < lo.y || yc >= hi.y {
                continue;
            }
            let t = (yc - lo.y) / (hi.y - lo.y);
            let x = lo.x + t * (hi.x - lo.x);
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        }
        if min_x > max_x {
            continue;
        }

        let start = (min_x - 0.5).ceil().max(0.0) as i64;
        let end = (max_x - 0.5).floor().min(width as f64 - 1.0) as i64;
        if start > end {
            continue;
        }
        let row = y as usize * width as usize;
        mask[row + start as usize..=row + end as usize].fill(255);
    }
}

/// Separable single-channel Gaussian blur with a Q16 fixed-point kernel and
/// clamp-to-edge sampling.
fn gaussian_blur_1ch(src: &[u8], width: u32, height: u32, taps: usize) -> Vec<u8> {
    // Sigma matches the OpenCV convention for an unspecified sigma.
    let sigma = 0.3 * ((taps as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let kernel = gaussian_kernel_q16(taps, sigma);

    let mut tmp = vec![0u8; src.len()];
    let mut out = vec![0u8; src.len()];
    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    out
}

fn gaussian_kernel_q16(taps: usize, sigma: f64) -> Vec<u32> {
    let r = (taps / 2) as i32;
    let denom = 2.0 * sigma * sigma;
    let mut weights_f = Vec::<f64>::with_capacity(taps);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Force the fixed-point weights to sum to exactly 1.0 so a constant
    // input stays constant through the blur.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let mid_val = i64::from(weights[mid]);
        weights[mid] = (mid_val + delta).clamp(0, 65536) as u32;
    }
    weights
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                acc += u64::from(kw) * u64::from(src[(y * w + sx) as usize]);
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                acc += u64::from(kw) * u64::from(src[(sy * w + x) as usize]);
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    (((acc + 32768) >> 16).min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/mask.rs"]
mod tests;
