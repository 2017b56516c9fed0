//! Line segments and crossing searches
//!
//! Intersections are endpoint-exclusive: consecutive segments of a path
//! always share an endpoint, and that must not count as a crossing.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ALIGN_EPS, INTERSECT_EPS, PARALLEL_EPS};

/// A directed segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: DVec2,
    pub end: DVec2,
}

impl LineSegment {
    #[inline]
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// The same segment shifted by `offset`
    #[inline]
    pub fn translate(&self, offset: DVec2) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// This segment plus its copies at the four corners of a square with
    /// half-size `half`: the area a moving square sweeps, as five lines.
    pub fn widened(&self, half: f64) -> [LineSegment; 5] {
        [
            DVec2::ZERO,
            DVec2::new(-half, -half),
            DVec2::new(half, -half),
            DVec2::new(half, half),
            DVec2::new(-half, half),
        ]
        .map(|offset| self.translate(offset))
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        (self.start.x - self.end.x).abs() < ALIGN_EPS
    }

    /// Intersection point of two segments, excluding their endpoints
    ///
    /// Both parametric positions must lie strictly inside (eps, 1 - eps).
    /// Parallel and collinear segments never intersect.
    pub fn intersection(&self, other: &LineSegment) -> Option<DVec2> {
        let d1 = self.start - self.end;
        let d2 = other.start - other.end;
        let denom = d1.perp_dot(d2);
        if denom.abs() < PARALLEL_EPS {
            return None;
        }

        let w = self.start - other.start;
        let t = w.perp_dot(d2) / denom;
        let u = w.perp_dot(d1) / denom;

        let inside = |s: f64| s > INTERSECT_EPS && s < 1.0 - INTERSECT_EPS;
        if inside(t) && inside(u) {
            Some(self.start.lerp(self.end, t))
        } else {
            None
        }
    }

    #[inline]
    pub fn intersects(&self, other: &LineSegment) -> bool {
        self.intersection(other).is_some()
    }
}

/// Consecutive segments of a polyline
pub fn polyline_segments(points: &[DVec2]) -> Vec<LineSegment> {
    points
        .windows(2)
        .map(|pair| LineSegment::new(pair[0], pair[1]))
        .collect()
}

/// First pair of non-adjacent segments (index distance >= 2) that cross
pub fn first_crossing(segments: &[LineSegment]) -> Option<(usize, usize)> {
    for (i, a) in segments.iter().enumerate() {
        for (j, b) in segments.iter().enumerate().skip(i + 2) {
            if a.intersects(b) {
                return Some((i, j));
            }
        }
    }
    None
}

/// Whether any segment of one polyline crosses any segment of the other
pub fn polylines_cross(a: &[DVec2], b: &[DVec2]) -> bool {
    let b_segments = polyline_segments(b);
    polyline_segments(a)
        .iter()
        .any(|sa| b_segments.iter().any(|sb| sa.intersects(sb)))
}
