use crate::foundation::core::BlendMode;
use crate::foundation::error::{FramefitError, FramefitResult};

/// On-disk template manifest (`manifest.json`), one per template directory.
///
/// `width`/`height` are advisory; a mismatch with the decoded background is
/// tolerated, not fatal.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct TemplateManifest {
    /// Background image filename, relative to the template directory.
    pub background: String,
    /// Frame-opening corners `[TL, TR, BR, BL]` in background pixel
    /// coordinates.
    pub corners: Vec<[f64; 2]>,
    /// Advisory background width.
    #[serde(default)]
    pub width: Option<u32>,
    /// Advisory background height.
    #[serde(default)]
    pub height: Option<u32>,
    /// Gaussian feather radius for the mask edge, in pixels.
    #[serde(default)]
    pub feather_px: f32,
    /// Blend configuration; defaults to normal at full opacity.
    #[serde(default)]
    pub blend: BlendSpec,
}

/// Blend configuration block of a manifest.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct BlendSpec {
    /// Blend mode name; unrecognized names are treated as `"normal"`.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Blend opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

impl Default for BlendSpec {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            opacity: default_opacity(),
        }
    }
}

fn default_mode() -> String {
    "normal".to_string()
}

fn default_opacity() -> f32 {
    1.0
}

impl TemplateManifest {
    /// Parse manifest JSON bytes.
    pub fn from_json(bytes: &[u8]) -> FramefitResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| FramefitError::manifest_invalid(format!("manifest.json: {e}")))
    }

    /// Resolved blend mode, applying the documented fallback to normal.
    pub fn blend_mode(&self) -> BlendMode {
        BlendMode::parse(&self.blend.mode)
    }
}
