use crate::foundation::core::{BlendMode, ImageRgba};
use crate::foundation::error::FramefitResult;
use crate::foundation::math::{clamp01, to_channel_u8};

/// Composite `fg` over `bg` through `mask`, returning a new buffer.
///
/// The effective per-pixel alpha is `mask / 255 * clamp(opacity, 0, 1)`;
/// where it is zero the background bytes are copied through untouched, so an
/// opacity of zero reproduces the background exactly. Inputs are never
/// mutated.
///
/// Output alpha in both modes is standard over-coverage
/// `bg_a + a - bg_a * a`, so downstream consumers compositing the result
/// onto a further layer see correct coverage.
pub fn blend(
    bg: &ImageRgba,
    fg: &ImageRgba,
    mask: &[u8],
    mode: BlendMode,
    opacity: f32,
) -> FramefitResult<ImageRgba> {
    if bg.width != fg.width || bg.height != fg.height {
        return Err(anyhow::anyhow!(
            "blend expects equal-sized buffers, got {}x{} over {}x{}",
            fg.width,
            fg.height,
            bg.width,
            bg.height
        )
        .into());
    }
    if mask.len() != bg.width as usize * bg.height as usize {
        return Err(anyhow::anyhow!("blend mask length does not match dimensions").into());
    }

    let opacity = clamp01(opacity);
    let mut data = Vec::with_capacity(bg.data.len());
    for (i, (b, f)) in bg
        .data
        .chunks_exact(4)
        .zip(fg.data.chunks_exact(4))
        .enumerate()
    {
        let a = (f32::from(mask[i]) / 255.0) * opacity;
        if a <= 0.0 {
            data.extend_from_slice(b);
            continue;
        }
        let px = match mode {
            BlendMode::Normal => blend_normal(b, f, a),
            BlendMode::Multiply => blend_multiply(b, f, a),
        };
        data.extend_from_slice(&px);
    }

    Ok(ImageRgba {
        width: bg.width,
        height: bg.height,
        data,
    })
}

fn blend_normal(b: &[u8], f: &[u8], a: f32) -> [u8; 4] {
    let mut px = [0u8; 4];
    for c in 0..3 {
        px[c] = to_channel_u8(f32::from(f[c]) * a + f32::from(b[c]) * (1.0 - a));
    }
    px[3] = out_alpha(b[3], a);
    px
}

fn blend_multiply(b: &[u8], f: &[u8], a: f32) -> [u8; 4] {
    let mut px = [0u8; 4];
    for c in 0..3 {
        let bn = f32::from(b[c]) / 255.0;
        let fn_ = f32::from(f[c]) / 255.0;
        px[c] = to_channel_u8((bn * fn_ * a + bn * (1.0 - a)) * 255.0);
    }
    px[3] = out_alpha(b[3], a);
    px
}

fn out_alpha(bg_a: u8, a: f32) -> u8 {
    let ba = f32::from(bg_a) / 255.0;
    to_channel_u8((ba + a - ba * a) * 255.0)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blend.rs"]
mod tests;
