//! 2D coordinates and the footprint predicates used for device coincidence.

use crate::numeric::{Real, ensure_finite};
use crate::NxResult;

/// A point in the layout plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: Real,
    pub y: Real,
}

impl Coord {
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    /// Reject NaN/inf components.
    pub fn finite(self, what: &'static str) -> NxResult<Self> {
        ensure_finite(self.x, what)?;
        ensure_finite(self.y, what)?;
        Ok(self)
    }

    pub fn scale(self, factor: Real) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn distance(self, other: Coord) -> Real {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Arithmetic mean of a point set; `None` when empty.
    pub fn centroid(points: &[Coord]) -> Option<Coord> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as Real;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Coord::new(sx / n, sy / n))
    }
}

impl From<[Real; 2]> for Coord {
    fn from(p: [Real; 2]) -> Self {
        Coord::new(p[0], p[1])
    }
}

/// Distance from `p` to the segment `a`-`b`.
pub fn segment_distance(p: Coord, a: Coord, b: Coord) -> Real {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    p.distance(Coord::new(a.x + t * dx, a.y + t * dy))
}

/// Even-odd containment test; points within `tol` of the boundary count as inside.
///
/// The polygon is treated as implicitly closed. Fewer than three vertices
/// never contain anything.
pub fn polygon_contains(polygon: &[Coord], p: Coord, tol: Real) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let edges = polygon.iter().zip(polygon.iter().cycle().skip(1));
    let mut inside = false;
    for (&a, &b) in edges {
        if segment_distance(p, a, b) <= tol {
            return true;
        }
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}
