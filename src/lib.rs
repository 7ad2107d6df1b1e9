//! Framefit places rectangular artwork into photographed room scenes.
//!
//! Given a background photo and the four corners of a picture-frame opening,
//! the engine fits the artwork into the opening, perspective-warps it to the
//! photographed geometry, and blends it onto the background through a
//! feathered occupancy mask.
//!
//! # Pipeline overview
//!
//! 1. **Load**: decode artwork bytes to RGBA, EXIF orientation applied first
//! 2. **Fit**: scale the artwork (cover/contain) onto a canvas sized to the frame opening
//! 3. **Warp**: perspective-transform the canvas into background pixel space
//! 4. **Mask**: rasterize the frame opening, optionally Gaussian-feathered
//! 5. **Blend**: composite through the mask (normal or multiply) at the configured opacity
//! 6. **Encode**: serialize the background-sized composite as PNG
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: a given (artwork, template, config) triple always
//!   produces identical output bytes.
//! - **No IO in the pipeline**: template and artwork bytes are front-loaded
//!   (see [`TemplateStore`]); every pipeline stage is pure CPU.
//! - **Isolated failures**: one malformed template never aborts its batch
//!   siblings.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod engine;
mod foundation;
mod geometry;
mod raster;
mod template;

pub use assets::decode::{decode_artwork, encode_png};
pub use engine::batch::CompositeResult;
pub use engine::composite::{CompositeEngine, EngineConfig};
pub use foundation::core::{BlendMode, FitMode, ImageRgba, Point, Quad, TemplateRef, Vec2};
pub use foundation::error::{FramefitError, FramefitResult};
pub use geometry::fit::{Placement, fit_size, resolve_placement};
pub use geometry::homography::Homography;
pub use raster::blend::blend;
pub use raster::mask::build_mask;
pub use raster::warp::warp_perspective;
pub use template::descriptor::TemplateDescriptor;
pub use template::manifest::{BlendSpec, TemplateManifest};
pub use template::store::{TemplateEntry, TemplateStore};
