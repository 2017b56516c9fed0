//! Bounce trajectory simulation
//!
//! The square starts at the origin moving diagonally into +x/+y at constant
//! speed. Each event reflects one velocity component. The resulting path
//! must not cross itself, or no pair of walls can enclose it.

use glam::DVec2;

use super::bounce::{BouncePoint, BounceTrack, Heading};
use super::geometry::{LineSegment, first_crossing};
use crate::error::InvalidAttempt;
use crate::settings::GeneratorSettings;

/// Simulated bounce points for one attempt
///
/// Only `simulate` builds one, so there are always at least two points and
/// the first two are vertical bounces.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    bounce_points: Vec<BouncePoint>,
    wall_bounce_points: Vec<BouncePoint>,
}

impl Trajectory {
    /// Square center at each bounce
    #[inline]
    pub fn bounce_points(&self) -> &[BouncePoint] {
        &self.bounce_points
    }

    /// Square edge against the wall at each bounce
    #[inline]
    pub fn wall_bounce_points(&self) -> &[BouncePoint] {
        &self.wall_bounce_points
    }

    pub fn into_parts(self) -> (Vec<BouncePoint>, Vec<BouncePoint>) {
        (self.bounce_points, self.wall_bounce_points)
    }
}

/// Run the bounce events and check the resulting path
pub fn simulate(track: &BounceTrack, settings: &GeneratorSettings) -> Result<Trajectory, InvalidAttempt> {
    let half = settings.square_size / 2.0;
    let mut pos = DVec2::ZERO;
    let mut vel = DVec2::splat(settings.square_speed);
    let mut last_time = 0.0;

    let mut bounce_points = Vec::with_capacity(track.len());
    let mut wall_bounce_points = Vec::with_capacity(track.len());

    for event in track.events() {
        pos += vel * (event.time - last_time);
        vel = event.axis.reflect(vel);

        let bounce = BouncePoint::new(pos, event.axis, Heading::from_velocity(vel));
        bounce_points.push(bounce);
        wall_bounce_points.push(bounce.to_wall(half));

        last_time = event.time;
    }

    let segments = path_segments(&bounce_points, half);
    if let Some((first, second)) = first_crossing(&segments) {
        log::debug!("Square path crosses itself: segments {} and {}", first, second);
        return Err(InvalidAttempt::SelfIntersectingPath { first, second });
    }
    if let Some((first, second)) = swept_overlap(&bounce_points, half) {
        log::debug!("Square sweeps across its own path: segments {} and {}", first, second);
        return Err(InvalidAttempt::SweptPathOverlap { first, second });
    }

    Ok(Trajectory {
        bounce_points,
        wall_bounce_points,
    })
}

/// Segments checked for self-intersection
///
/// Five segments cover the start region: the launch diagonal from the
/// square's starting corner, then the outline hugging the starting walls up
/// to the first two bounces. One segment follows per pair of bounce points.
fn path_segments(points: &[BouncePoint], half: f64) -> Vec<LineSegment> {
    let first = points[0].pos;
    let second = points[1].pos;
    let corner = DVec2::splat(-half);
    let left = DVec2::new(-half, second.y);
    let bottom = DVec2::new(first.x, -half);

    let mut segments = vec![
        LineSegment::new(corner, first),
        LineSegment::new(corner, left),
        LineSegment::new(left, second),
        LineSegment::new(corner, bottom),
        LineSegment::new(bottom, first),
    ];
    segments.extend(
        points
            .windows(2)
            .map(|pair| LineSegment::new(pair[0].pos, pair[1].pos)),
    );
    segments
}

/// First pair of non-adjacent path segments whose swept squares cross
///
/// Adjacent segments share a bounce, where the corner copies always meet.
fn swept_overlap(points: &[BouncePoint], half: f64) -> Option<(usize, usize)> {
    let swept: Vec<[LineSegment; 5]> = points
        .windows(2)
        .map(|pair| LineSegment::new(pair[0].pos, pair[1].pos).widened(half))
        .collect();
    for (i, a) in swept.iter().enumerate() {
        for (j, b) in swept.iter().enumerate().skip(i + 2) {
            if a.iter().any(|sa| b.iter().any(|sb| sa.intersects(sb))) {
                return Some((i, j));
            }
        }
    }
    None
}
