//! Quadrilateral helpers for the perspective draw.

use crate::foundation::core::{Point, Rect};

/// Four corners in a single consistent winding order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    /// Build a quad from four corners.
    pub fn new(corners: [Point; 4]) -> Self {
        Self(corners)
    }

    /// Corners in order.
    pub fn corners(&self) -> &[Point; 4] {
        &self.0
    }

    /// Quad shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self(self.0.map(|p| Point::new(p.x + dx, p.y + dy)))
    }

    /// Axis-aligned bounding box of the corners.
    pub fn bounds(&self) -> Rect {
        let [a, b, c, d] = self.0;
        Rect::from_points(a, b).union_pt(c).union_pt(d)
    }

    /// `true` when `p` lies strictly inside the quad.
    ///
    /// The four edge cross products must share a sign (all positive or all negative), so both
    /// windings work. Points on an edge, and every point of a zero-area quad, are outside.
    pub fn contains_strict(&self, p: Point) -> bool {
        let mut pos = 0;
        let mut neg = 0;
        for i in 0..4 {
            let a = self.0[i];
            let b = self.0[(i + 1) % 4];
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            if cross > 0.0 {
                pos += 1;
            } else if cross < 0.0 {
                neg += 1;
            }
        }
        pos == 4 || neg == 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/quad.rs"]
mod tests;
