use crate::foundation::error::{FramefitError, FramefitResult};

pub use kurbo::{Point, Vec2};

/// Straight (non-premultiplied) RGBA8 pixel buffer, row-major, tightly packed.
///
/// All pipeline stages consume and produce this representation; decode never
/// premultiplies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major RGBA8 order, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl ImageRgba {
    /// Allocate a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> FramefitResult<Self> {
        let len = Self::expected_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Wrap an existing byte buffer, validating its length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> FramefitResult<Self> {
        let len = Self::expected_len(width, height)?;
        if data.len() != len {
            return Err(anyhow::anyhow!(
                "pixel buffer length {} does not match {width}x{height}",
                data.len()
            )
            .into());
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Read one pixel. Panics on out-of-bounds coordinates; intended for
    /// tests and debugging, not hot loops.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    fn expected_len(width: u32, height: u32) -> FramefitResult<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| anyhow::anyhow!("pixel buffer size overflow").into())
    }
}

/// Destination quadrilateral in background pixel coordinates, ordered
/// clockwise from the top-left: TL, TR, BR, BL.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    /// Top-left corner.
    pub tl: Point,
    /// Top-right corner.
    pub tr: Point,
    /// Bottom-right corner.
    pub br: Point,
    /// Bottom-left corner.
    pub bl: Point,
}

impl Quad {
    /// Build from explicit corners.
    pub fn new(tl: Point, tr: Point, br: Point, bl: Point) -> Self {
        Self { tl, tr, br, bl }
    }

    /// Build from a manifest corner list, which must hold exactly 4 points.
    pub fn from_points(points: &[[f64; 2]]) -> FramefitResult<Self> {
        let [tl, tr, br, bl]: [[f64; 2]; 4] = points.try_into().map_err(|_| {
            FramefitError::manifest_invalid(format!(
                "corners must be 4 points [TL, TR, BR, BL], got {}",
                points.len()
            ))
        })?;
        Ok(Self::new(
            Point::new(tl[0], tl[1]),
            Point::new(tr[0], tr[1]),
            Point::new(br[0], br[1]),
            Point::new(bl[0], bl[1]),
        ))
    }

    /// Corners in TL, TR, BR, BL order.
    pub fn points(&self) -> [Point; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    /// Length of the top reference edge `|TL - TR|`.
    pub fn top_edge(&self) -> f64 {
        self.tl.distance(self.tr)
    }

    /// Length of the left reference edge `|TL - BL|`.
    pub fn left_edge(&self) -> f64 {
        self.tl.distance(self.bl)
    }

    /// Reject duplicate or collinear corners and non-positive enclosed area.
    ///
    /// In image coordinates (y down) a valid clockwise quad turns the same
    /// way at every corner; a zero or negative cross product at any corner
    /// means a collapsed or mis-ordered quad.
    pub fn require_nondegenerate(&self) -> FramefitResult<()> {
        const EPS: f64 = 1e-6;
        let pts = self.points();
        for i in 0..4 {
            let a = pts[i];
            let b = pts[(i + 1) % 4];
            let c = pts[(i + 2) % 4];
            let cross = (b - a).cross(c - b);
            if cross <= EPS {
                return Err(FramefitError::degenerate_geometry(format!(
                    "corners {:?} are collinear or enclose no area",
                    pts
                )));
            }
        }
        Ok(())
    }
}

/// How composited layers are mixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Standard over-compositing.
    #[default]
    Normal,
    /// Channel product of background and foreground, mixed by mask alpha.
    Multiply,
}

impl BlendMode {
    /// Parse a manifest mode name. Unrecognized names fall back to
    /// [`BlendMode::Normal`]; the fallback is a defined behavior of the
    /// template format.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "multiply" => Self::Multiply,
            _ => Self::Normal,
        }
    }
}

/// How artwork is scaled into the frame opening.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FitMode {
    /// Scale so the artwork fully covers the opening, cropping overflow.
    Cover,
    /// Scale so the artwork fits entirely inside the opening.
    #[default]
    Contain,
}

/// Identity of a template within a batch, used to correlate results.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TemplateRef {
    /// Room folder the template lives under.
    pub room: String,
    /// Template directory name within the room.
    pub id: String,
}

impl std::fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.room, self.id)
    }
}
