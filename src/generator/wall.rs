//! Growing a single corridor wall
//!
//! A wall is an append-only polyline plus the last bounce it absorbed. New
//! bounces are joined either straight (same axis) or around a corner (axis
//! change). Every inserted corner goes through `add_curve`, which repairs
//! zero-width corners and detours around the square's path.

use glam::DVec2;

use super::bounce::{Axis, BouncePoint, Heading};
use super::geometry::LineSegment;
use super::routing::Join;
use crate::consts::{ALIGN_EPS, CORNER_NUDGE, DEGENERACY_EPS, DETOUR_CLEARANCE};
use crate::corner_point;
use crate::error::InvalidAttempt;
use crate::settings::GeneratorSettings;

/// What to do when a curve crosses the square's path on one leg only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingPolicy {
    /// Fail the attempt
    Reject,
    /// Keep the curve as is (used for the closing segment)
    Allow,
}

/// A pending curve: reach `end` via `corner` from the wall's last point
#[derive(Debug, Clone, Copy)]
struct CurveTask {
    corner: DVec2,
    end: DVec2,
    depth: usize,
}

/// One corridor wall under construction
#[derive(Debug)]
pub struct Wall {
    points: Vec<DVec2>,
    previous: BouncePoint,
    /// Square path segments, each with its corner-offset copies
    path: Vec<[LineSegment; 5]>,
    square_size: f64,
    max_repair_depth: usize,
}

impl Wall {
    /// Start a wall from a fixed seed polyline ending at `first`
    pub fn new(seed: &[DVec2], first: BouncePoint, path: &[BouncePoint], settings: &GeneratorSettings) -> Self {
        let half = settings.square_size / 2.0;
        let path = path
            .windows(2)
            .map(|pair| LineSegment::new(pair[0].pos, pair[1].pos).widened(half))
            .collect();

        let mut wall = Self {
            points: Vec::with_capacity(seed.len() + 1),
            previous: first,
            path,
            square_size: settings.square_size,
            max_repair_depth: settings.max_repair_depth,
        };
        for &p in seed {
            wall.push(p);
        }
        wall.push(first.pos);
        wall
    }

    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Last bounce absorbed by this wall
    #[inline]
    pub fn previous(&self) -> &BouncePoint {
        &self.previous
    }

    pub fn into_points(self) -> Vec<DVec2> {
        self.points
    }

    #[inline]
    fn last(&self) -> DVec2 {
        // Seeded walls are never empty
        self.points[self.points.len() - 1]
    }

    /// Append a point unless it coincides with the current last point
    fn push(&mut self, p: DVec2) {
        match self.points.last() {
            Some(last) if last.abs_diff_eq(p, ALIGN_EPS) => {}
            _ => self.points.push(p),
        }
    }

    /// Absorb the next bounce routed to this wall
    pub fn add_point(&mut self, bounce: BouncePoint, policy: CrossingPolicy) -> Result<(), InvalidAttempt> {
        match Join::between(self.previous.axis, bounce.axis) {
            Join::Straight => self.add_straight(bounce, policy)?,
            Join::Turn => self.add_turn(bounce, policy)?,
        }
        self.previous = bounce;
        Ok(())
    }

    /// Same-axis bounce: append directly when aligned, otherwise jog through
    /// the midpoint with two corners.
    fn add_straight(&mut self, bounce: BouncePoint, policy: CrossingPolicy) -> Result<(), InvalidAttempt> {
        let last = self.last();
        let aligned = match bounce.axis {
            Axis::Horizontal => (last.y - bounce.pos.y).abs() < ALIGN_EPS,
            Axis::Vertical => (last.x - bounce.pos.x).abs() < ALIGN_EPS,
        };
        if aligned {
            self.push(bounce.pos);
            return Ok(());
        }

        let midpoint = last.lerp(bounce.pos, 0.5);
        let first_corner = corner_point(self.previous.axis, self.previous.pos, midpoint);
        self.add_curve(first_corner, midpoint, policy)?;

        let second_axis = if changed_sides(&self.previous, &bounce) {
            bounce.axis
        } else {
            bounce.axis.invert()
        };
        let second_corner = corner_point(second_axis, midpoint, bounce.pos);
        self.add_curve(second_corner, bounce.pos, policy)
    }

    /// Axis change: one corner, shifted inward when the turn would pinch
    fn add_turn(&mut self, bounce: BouncePoint, policy: CrossingPolicy) -> Result<(), InvalidAttempt> {
        match pinch_adjustment(&self.previous, &bounce) {
            None => {
                let corner = corner_point(self.previous.axis, self.previous.pos, bounce.pos);
                self.add_curve(corner, bounce.pos, policy)
            }
            Some(direction) => {
                let shifted = bounce.pos - direction * (CORNER_NUDGE * self.square_size);
                let corner = corner_point(self.previous.axis, self.previous.pos, shifted);
                self.add_curve(corner, shifted, policy)?;
                self.push(bounce.pos);
                Ok(())
            }
        }
    }

    /// Whether `p` lies on the last wall segment's line, before its end
    ///
    /// Turning back there would fold the wall onto itself.
    pub fn would_be_zero_width(&self, p: DVec2) -> bool {
        let n = self.points.len();
        if n < 2 {
            return false;
        }
        let a = self.points[n - 2];
        let line = self.points[n - 1] - a;
        let mag_sq = line.length_squared();
        if mag_sq < DEGENERACY_EPS {
            return false;
        }

        let t = (p - a).dot(line) / mag_sq;
        let projected = a + line * t;
        p.distance(projected) <= DEGENERACY_EPS && t < 1.0
    }

    /// Insert `last -> corner -> end`, repairing as needed
    pub fn add_curve(&mut self, corner: DVec2, end: DVec2, policy: CrossingPolicy) -> Result<(), InvalidAttempt> {
        let mut pending = vec![CurveTask { corner, end, depth: 0 }];

        while let Some(CurveTask { mut corner, end, depth }) = pending.pop() {
            if depth > self.max_repair_depth {
                return Err(InvalidAttempt::RepairTooDeep(self.max_repair_depth));
            }

            let first_leg = LineSegment::new(self.last(), corner);
            let second_leg = LineSegment::new(corner, end);

            if self.would_be_zero_width(corner) {
                let nudge = (end - corner).normalize_or_zero() * (CORNER_NUDGE * self.square_size);
                self.push(self.last() + nudge);
                corner += nudge;
            }

            match self.path_crossings(&first_leg, &second_leg, policy)? {
                Some((hit_first, hit_second)) => {
                    let detour_start = self.last().lerp(hit_first, DETOUR_CLEARANCE);
                    let detour_end = end.lerp(hit_second, DETOUR_CLEARANCE);
                    let axis = if first_leg.is_vertical() { Axis::Horizontal } else { Axis::Vertical };
                    let elbow = corner_point(axis, detour_start, detour_end);

                    log::trace!("Detour at depth {}: {:?} -> {:?}", depth + 1, detour_start, detour_end);
                    // LIFO: the first half is finished before the second starts
                    pending.push(CurveTask { corner: detour_end, end, depth: depth + 1 });
                    pending.push(CurveTask { corner: detour_start, end: elbow, depth: depth + 1 });
                }
                None => {
                    self.push(corner);
                    self.push(end);
                }
            }
        }
        Ok(())
    }

    /// Find a path segment crossed by both legs of a curve
    ///
    /// Returns the crossing points on each leg. A path segment crossed by one
    /// leg only fails the attempt under `CrossingPolicy::Reject`.
    fn path_crossings(
        &self,
        first_leg: &LineSegment,
        second_leg: &LineSegment,
        policy: CrossingPolicy,
    ) -> Result<Option<(DVec2, DVec2)>, InvalidAttempt> {
        for (segment, copies) in self.path.iter().enumerate() {
            let mut hit_first = None;
            let mut hit_second = None;
            for copy in copies {
                if let Some(p) = first_leg.intersection(copy) {
                    hit_first = Some(p);
                }
                if let Some(p) = second_leg.intersection(copy) {
                    hit_second = Some(p);
                }
            }

            match (hit_first, hit_second) {
                (Some(a), Some(b)) => return Ok(Some((a, b))),
                (Some(_), None) | (None, Some(_)) if policy == CrossingPolicy::Reject => {
                    return Err(InvalidAttempt::AsymmetricCrossing { segment });
                }
                _ => {}
            }
        }
        Ok(None)
    }
}

/// Whether the square switched sides of the corridor between two same-axis
/// bounces, judged on the other axis's heading
fn changed_sides(previous: &BouncePoint, next: &BouncePoint) -> bool {
    let other = next.axis.invert();
    previous.heading.along(other) != next.heading.along(other)
}

/// Inward shift direction for a turn that would pinch the corridor
///
/// Applies when the heading flipped on the component the previous wall faces
/// while the travel direction disagrees with the new heading in a way a plain
/// corner cannot follow.
fn pinch_adjustment(previous: &BouncePoint, next: &BouncePoint) -> Option<DVec2> {
    if previous.heading.along(previous.axis) == next.heading.along(previous.axis) {
        return None;
    }
    let travel = Heading::toward(previous.pos, next.pos);
    let heading = next.heading;
    match previous.axis {
        Axis::Horizontal if travel.x == heading.x && travel.y != heading.y => {
            Some(DVec2::new(heading.x as f64, 0.0))
        }
        Axis::Vertical if travel.x != heading.x && travel.y == heading.y => {
            Some(DVec2::new(0.0, heading.y as f64))
        }
        _ => None,
    }
}
