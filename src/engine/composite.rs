use image::imageops;

use crate::assets::decode;
use crate::engine::batch::build_worker_pool;
use crate::foundation::core::{FitMode, ImageRgba};
use crate::foundation::error::{FramefitError, FramefitResult};
use crate::geometry::fit::{Placement, resolve_placement};
use crate::raster::{blend, mask, warp};
use crate::template::descriptor::TemplateDescriptor;

/// Engine construction parameters.
///
/// All configuration is explicit engine state; nothing is read from the
/// environment, so parallel test execution stays deterministic.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Fit mode used when scaling artwork into the frame opening.
    pub fit: FitMode,
    /// Inset between the frame opening and the fitted artwork, in pixels.
    pub margin_px: u32,
    /// Feather radius override; `None` uses each template's manifest value.
    pub feather_px: Option<f32>,
    /// Blend opacity override; `None` uses each template's manifest value.
    pub opacity: Option<f32>,
    /// Worker threads for batch processing. Kept small: every in-flight job
    /// holds several background-resolution RGBA buffers.
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fit: FitMode::Contain,
            margin_px: 0,
            feather_px: None,
            opacity: None,
            workers: 3,
        }
    }
}

/// Composites artwork into template frame openings.
///
/// One engine serves any number of single or batch calls; it owns the
/// bounded worker pool and the configuration, and holds no per-call state.
pub struct CompositeEngine {
    pub(super) config: EngineConfig,
    pub(super) pool: rayon::ThreadPool,
}

impl std::fmt::Debug for CompositeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CompositeEngine {
    /// Build an engine, validating the worker configuration.
    pub fn new(config: EngineConfig) -> FramefitResult<Self> {
        let pool = build_worker_pool(config.workers)?;
        Ok(Self { config, pool })
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Composite `artwork_bytes` into a single template.
    ///
    /// Stages run Load -> Fit -> Warp -> Mask -> Blend -> Encode; the first
    /// failed stage short-circuits. On success returns PNG bytes with the
    /// template background's dimensions.
    #[tracing::instrument(skip_all, fields(template = %template.template_ref()))]
    pub fn composite_single(
        &self,
        artwork_bytes: &[u8],
        template: &TemplateDescriptor,
    ) -> FramefitResult<Vec<u8>> {
        let artwork = decode::decode_artwork(artwork_bytes)?;
        self.composite_prepared(&artwork, template)
    }

    /// Composite an already-decoded artwork (shared with the batch path,
    /// which decodes once up front).
    pub(super) fn composite_prepared(
        &self,
        artwork: &ImageRgba,
        template: &TemplateDescriptor,
    ) -> FramefitResult<Vec<u8>> {
        let placement = resolve_placement(
            artwork.width,
            artwork.height,
            &template.corners,
            self.config.margin_px,
            self.config.fit,
        )?;
        tracing::debug!(
            canvas_w = placement.canvas_w,
            canvas_h = placement.canvas_h,
            fitted_w = placement.fitted_w,
            fitted_h = placement.fitted_h,
            "resolved placement"
        );
        let canvas = build_artwork_canvas(artwork, &placement)?;

        let warped = warp::warp_perspective(
            &canvas,
            &placement.homography,
            template.background.width,
            template.background.height,
        )?;

        let feather = self.config.feather_px.unwrap_or(template.feather_px);
        let quad_mask = mask::build_mask(
            template.background.width,
            template.background.height,
            &template.corners,
            feather,
        );

        let opacity = self.config.opacity.unwrap_or(template.opacity);
        let composed = blend::blend(
            &template.background,
            &warped,
            &quad_mask,
            template.blend_mode,
            opacity,
        )?;

        decode::encode_png(&composed)
    }
}

/// Resize the artwork (Lanczos3) and center it on a transparent canvas the
/// size of the destination rectangle. The warp consumes this canvas whole,
/// so margin and centering are already baked in here.
fn build_artwork_canvas(artwork: &ImageRgba, placement: &Placement) -> FramefitResult<ImageRgba> {
    let src = image::RgbaImage::from_raw(artwork.width, artwork.height, artwork.data.clone())
        .ok_or_else(|| FramefitError::artwork_invalid("pixel buffer does not match dimensions"))?;
    let resized = imageops::resize(
        &src,
        placement.fitted_w,
        placement.fitted_h,
        imageops::FilterType::Lanczos3,
    );

    let mut canvas = image::RgbaImage::new(placement.canvas_w, placement.canvas_h);
    imageops::overlay(
        &mut canvas,
        &resized,
        i64::from(placement.offset_x),
        i64::from(placement.offset_y),
    );
    ImageRgba::from_raw(canvas.width(), canvas.height(), canvas.into_raw())
}
