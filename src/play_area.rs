//! Play area polygon
//!
//! The corridor as one closed outline: the inner wall in order, then the
//! outer wall walked backwards.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Closed corridor outline, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    vertices: Vec<DVec2>,
}

impl PlayArea {
    pub fn new(inner: &[DVec2], outer: &[DVec2]) -> Self {
        let vertices = inner.iter().chain(outer.iter().rev()).copied().collect();
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    /// Bounding box as (min, max)
    pub fn bounding_box(&self) -> Option<(DVec2, DVec2)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
        )
    }

    /// Signed area by the shoelace formula
    ///
    /// Positive for counter-clockwise winding in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| self.vertices[i].perp_dot(self.vertices[(i + 1) % n]))
            .sum();
        twice / 2.0
    }
}
