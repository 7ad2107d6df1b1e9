use crate::assets::decode;
use crate::foundation::core::{BlendMode, ImageRgba, Quad, TemplateRef};
use crate::foundation::error::{FramefitError, FramefitResult};
use crate::template::manifest::TemplateManifest;

/// Validated template: background pixels plus frame geometry and blend
/// configuration.
///
/// Constructed once per batch (typically via
/// [`TemplateStore::load`](crate::TemplateStore::load)), read-only
/// thereafter, and discarded after the batch.
#[derive(Clone, Debug)]
pub struct TemplateDescriptor {
    /// Room folder the template belongs to.
    pub room: String,
    /// Template directory name within the room.
    pub id: String,
    /// Decoded background, RGBA8.
    pub background: ImageRgba,
    /// Frame-opening quad in background pixel coordinates.
    pub corners: Quad,
    /// Gaussian feather radius applied to the mask edge.
    pub feather_px: f32,
    /// Blend mode for the composite.
    pub blend_mode: BlendMode,
    /// Blend opacity in `[0, 1]`.
    pub opacity: f32,
}

impl TemplateDescriptor {
    /// Build a descriptor from a parsed manifest and raw background bytes,
    /// enforcing the manifest-level invariants.
    pub fn from_manifest(
        room: impl Into<String>,
        id: impl Into<String>,
        manifest: &TemplateManifest,
        background_bytes: &[u8],
    ) -> FramefitResult<Self> {
        let corners = Quad::from_points(&manifest.corners)?;
        let background = decode::decode_background(background_bytes)?;

        if let (Some(w), Some(h)) = (manifest.width, manifest.height)
            && (w, h) != (background.width, background.height)
        {
            tracing::warn!(
                manifest_w = w,
                manifest_h = h,
                decoded_w = background.width,
                decoded_h = background.height,
                "manifest dimensions disagree with decoded background; using decoded"
            );
        }

        let bg_w = f64::from(background.width);
        let bg_h = f64::from(background.height);
        let inside = corners
            .points()
            .iter()
            .all(|p| p.x >= 0.0 && p.y >= 0.0 && p.x <= bg_w && p.y <= bg_h);
        if !inside {
            return Err(FramefitError::manifest_invalid(format!(
                "corners extend outside the {bg_w}x{bg_h} background"
            )));
        }

        if !manifest.feather_px.is_finite() || manifest.feather_px < 0.0 {
            return Err(FramefitError::manifest_invalid(
                "feather_px must be finite and >= 0",
            ));
        }
        let opacity = manifest.blend.opacity;
        if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
            return Err(FramefitError::manifest_invalid(
                "blend.opacity must be within [0, 1]",
            ));
        }

        Ok(Self {
            room: room.into(),
            id: id.into(),
            background,
            corners,
            feather_px: manifest.feather_px,
            blend_mode: manifest.blend_mode(),
            opacity,
        })
    }

    /// Identity used for result correlation and error reporting.
    pub fn template_ref(&self) -> TemplateRef {
        TemplateRef {
            room: self.room.clone(),
            id: self.id.clone(),
        }
    }
}
