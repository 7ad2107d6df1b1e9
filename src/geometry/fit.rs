use crate::foundation::core::{FitMode, Quad};
use crate::foundation::error::{FramefitError, FramefitResult};
use crate::geometry::homography::Homography;

/// Resolved geometry for one composite: the artwork canvas size, the fitted
/// artwork size and offset within it, and the canvas-to-background
/// projective transform.
///
/// Recomputed per composite call; corners differ per template so nothing
/// here is cacheable across templates.
#[derive(Clone, Debug)]
pub struct Placement {
    /// Artwork canvas width (the destination rectangle width, rounded).
    pub canvas_w: u32,
    /// Artwork canvas height (the destination rectangle height, rounded).
    pub canvas_h: u32,
    /// Fitted artwork width after cover/contain scaling.
    pub fitted_w: u32,
    /// Fitted artwork height after cover/contain scaling.
    pub fitted_h: u32,
    /// Horizontal paste offset of the fitted artwork on the canvas.
    pub offset_x: u32,
    /// Vertical paste offset of the fitted artwork on the canvas.
    pub offset_y: u32,
    /// Transform from canvas space onto the background's corner quad.
    pub homography: Homography,
}

/// Fitted dimensions for scaling a `src_w` x `src_h` source into a
/// `dst_w` x `dst_h` target under `mode`.
///
/// Cover picks the scale that guarantees full coverage on the tighter axis
/// (overflow is cropped later); contain picks the opposite axis so the whole
/// source fits. Both keep the source aspect ratio and never return zero.
pub fn fit_size(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32, mode: FitMode) -> (u32, u32) {
    let r_src = src_w as f64 / src_h as f64;
    let r_dst = dst_w as f64 / dst_h as f64;
    let scale_by_width = match mode {
        FitMode::Cover => r_src < r_dst,
        FitMode::Contain => r_src > r_dst,
    };
    let (w, h) = if scale_by_width {
        let w = dst_w as f64;
        (w, (w / r_src).round())
    } else {
        let h = dst_h as f64;
        ((h * r_src).round(), h)
    };
    (w.max(1.0) as u32, h.max(1.0) as u32)
}

/// Compute the full placement of an `art_w` x `art_h` artwork into the frame
/// opening described by `corners`.
///
/// The destination rectangle takes its width from the TL-TR edge and its
/// height from the TL-BL edge. A photographed quad has unequal opposite
/// edges under perspective; the reference-edge convention is part of the
/// output contract and deliberately kept.
pub fn resolve_placement(
    art_w: u32,
    art_h: u32,
    corners: &Quad,
    margin_px: u32,
    fit: FitMode,
) -> FramefitResult<Placement> {
    if art_w == 0 || art_h == 0 {
        return Err(FramefitError::artwork_invalid("artwork has zero dimension"));
    }

    let dest_w = corners.top_edge().round() as i64;
    let dest_h = corners.left_edge().round() as i64;
    if dest_w < 2 || dest_h < 2 {
        return Err(FramefitError::degenerate_geometry(format!(
            "destination frame too small from corners: {dest_w}x{dest_h}"
        )));
    }
    let canvas_w = dest_w as u32;
    let canvas_h = dest_h as u32;

    let avail_w = canvas_w.saturating_sub(margin_px.saturating_mul(2)).max(1);
    let avail_h = canvas_h.saturating_sub(margin_px.saturating_mul(2)).max(1);
    let (fitted_w, fitted_h) = fit_size(art_w, art_h, avail_w, avail_h, fit);

    let homography = Homography::rect_to_quad(canvas_w as f64, canvas_h as f64, corners)?;

    Ok(Placement {
        canvas_w,
        canvas_h,
        fitted_w,
        fitted_h,
        offset_x: centered_offset(canvas_w, fitted_w, margin_px),
        offset_y: centered_offset(canvas_h, fitted_h, margin_px),
        homography,
    })
}

/// Center the fitted artwork on the canvas. While it fits inside the
/// margin-adjusted area the offset keeps the margin band clear; cover-mode
/// overflow pastes from the canvas origin and crops the far side.
fn centered_offset(canvas: u32, fitted: u32, margin: u32) -> u32 {
    let avail = canvas.saturating_sub(margin.saturating_mul(2));
    if fitted <= avail {
        margin + (avail - fitted) / 2
    } else {
        canvas.saturating_sub(fitted) / 2
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
