use kurbo::Point;

use crate::foundation::core::Quad;
use crate::foundation::error::{FramefitError, FramefitResult};

const SINGULAR_EPS: f64 = 1e-10;

/// Row-major 3x3 projective transform.
///
/// Maps homogeneous source coordinates `[x, y, 1]` to destination
/// coordinates; the last matrix entry is normalized to 1 by the solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography([f64; 9]);

impl Homography {
    /// Solve the transform mapping the axis-aligned rectangle
    /// `(0,0)..(width,height)` onto `quad`.
    ///
    /// The correspondence order is the rectangle's TL, TR, BR, BL onto the
    /// quad's corners in the same order. Degenerate quads (duplicate or
    /// collinear corners, non-positive area) and singular systems yield
    /// [`FramefitError::DegenerateGeometry`], never a partial matrix.
    pub fn rect_to_quad(width: f64, height: f64, quad: &Quad) -> FramefitResult<Self> {
        quad.require_nondegenerate()?;
        let src = [
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ];
        Self::from_correspondences(&src, &quad.points())
    }

    /// Direct linear transform over exactly four point correspondences.
    ///
    /// With `h8` pinned to 1 the eight remaining coefficients satisfy a
    /// dense 8x8 linear system, one row pair per correspondence.
    pub fn from_correspondences(src: &[Point; 4], dst: &[Point; 4]) -> FramefitResult<Self> {
        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];
        for i in 0..4 {
            let (x, y) = (src[i].x, src[i].y);
            let (u, v) = (dst[i].x, dst[i].y);
            a[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -u * x, -u * y];
            b[2 * i] = u;
            a[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -v * x, -v * y];
            b[2 * i + 1] = v;
        }

        let h = solve_8x8(&mut a, &mut b)?;
        Ok(Self([h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0]))
    }

    /// Map a point. Returns `None` when the point lies on the transform's
    /// vanishing line (homogeneous w collapses to zero).
    pub fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let m = &self.0;
        let w = m[6] * x + m[7] * y + m[8];
        if w.abs() < SINGULAR_EPS {
            return None;
        }
        Some((
            (m[0] * x + m[1] * y + m[2]) / w,
            (m[3] * x + m[4] * y + m[5]) / w,
        ))
    }

    /// Inverse transform via the adjugate over the determinant.
    pub fn invert(&self) -> FramefitResult<Self> {
        let m = &self.0;
        let cof = [
            m[4] * m[8] - m[5] * m[7],
            m[5] * m[6] - m[3] * m[8],
            m[3] * m[7] - m[4] * m[6],
            m[2] * m[7] - m[1] * m[8],
            m[0] * m[8] - m[2] * m[6],
            m[1] * m[6] - m[0] * m[7],
            m[1] * m[5] - m[2] * m[4],
            m[2] * m[3] - m[0] * m[5],
            m[0] * m[4] - m[1] * m[3],
        ];
        let det = m[0] * cof[0] + m[1] * cof[1] + m[2] * cof[2];
        if det.abs() < SINGULAR_EPS {
            return Err(FramefitError::degenerate_geometry(
                "homography is not invertible",
            ));
        }
        Ok(Self([
            cof[0] / det,
            cof[3] / det,
            cof[6] / det,
            cof[1] / det,
            cof[4] / det,
            cof[7] / det,
            cof[2] / det,
            cof[5] / det,
            cof[8] / det,
        ]))
    }

    /// Raw row-major coefficients.
    pub fn coefficients(&self) -> [f64; 9] {
        self.0
    }
}

/// Gaussian elimination with partial pivoting. A vanishing pivot means the
/// correspondences admit no projective transform.
fn solve_8x8(a: &mut [[f64; 8]; 8], b: &mut [f64; 8]) -> FramefitResult<[f64; 8]> {
    let n = 8;
    for col in 0..n {
        let mut max_row = col;
        let mut max_val = a[col][col].abs();
        for row in (col + 1)..n {
            if a[row][col].abs() > max_val {
                max_val = a[row][col].abs();
                max_row = row;
            }
        }
        if max_row != col {
            a.swap(col, max_row);
            b.swap(col, max_row);
        }

        let pivot = a[col][col];
        if pivot.abs() < SINGULAR_EPS {
            return Err(FramefitError::degenerate_geometry(
                "homography system is singular",
            ));
        }

        for row in (col + 1)..n {
            let factor = a[row][col] / pivot;
            for j in col..n {
                a[row][j] -= factor * a[col][j];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0f64; 8];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i][j] * x[j];
        }
        x[i] = sum / a[i][i];
    }
    Ok(x)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/homography.rs"]
mod tests;
