//! Build both corridor walls from a trajectory
//!
//! Walls are grown from the wall bounce points (the square's edge) and
//! checked against the bounce points (the square's center, widened to its
//! corners).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::bounce::BouncePoint;
use super::geometry::{first_crossing, polyline_segments, polylines_cross};
use super::routing::{Side, WallCursor};
use super::trajectory::Trajectory;
use super::wall::{CrossingPolicy, Wall};
use crate::error::InvalidAttempt;
use crate::settings::GeneratorSettings;

/// The finished inner and outer wall polylines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallPair {
    pub inner: Vec<DVec2>,
    pub outer: Vec<DVec2>,
}

/// Seed, route and close both walls
pub fn build_walls(trajectory: &Trajectory, settings: &GeneratorSettings) -> Result<WallPair, InvalidAttempt> {
    let size = settings.square_size;
    let half = size / 2.0;
    let targets = trajectory.wall_bounce_points();
    let path = trajectory.bounce_points();
    let (first, second) = (targets[0], targets[1]);

    // Both walls leave from the square's starting corner
    let start = DVec2::splat(-half);
    let mut inner = Wall::new(&[start, DVec2::new(first.pos.x, -half)], first, path, settings);
    let mut outer = Wall::new(
        &[
            start,
            DVec2::new(-half, second.pos.y - size),
            DVec2::new(second.pos.x, second.pos.y - size),
        ],
        second,
        path,
        settings,
    );

    let mut cursor = WallCursor::seeded();
    for (index, &bounce) in targets.iter().enumerate().skip(2) {
        cursor = cursor.advance(bounce.axis);
        log::trace!("Bounce {} ({:?}) -> {:?} wall", index, bounce.axis, cursor.side);
        wall_for(&mut inner, &mut outer, cursor.side).add_point(bounce, CrossingPolicy::Reject)?;
    }

    // Close the corridor: the other wall runs to the final bounce as if it
    // had been hit on the opposite axis.
    let closing = wall_for(&mut inner, &mut outer, cursor.closing_side());
    let last = targets[targets.len() - 1];
    let axis = last.axis.invert();
    let finish = BouncePoint::new(last.pos, axis, closing.previous().heading.reflect(axis));
    closing.add_point(finish, CrossingPolicy::Allow)?;

    let walls = WallPair {
        inner: inner.into_points(),
        outer: outer.into_points(),
    };
    walls.check()?;
    Ok(walls)
}

impl WallPair {
    /// Reject walls that cross themselves or each other
    pub fn check(&self) -> Result<(), InvalidAttempt> {
        for (side, points) in [(Side::Inner, &self.inner), (Side::Outer, &self.outer)] {
            if let Some((first, second)) = first_crossing(&polyline_segments(points)) {
                log::debug!("{:?} wall crosses itself: segments {} and {}", side, first, second);
                return Err(InvalidAttempt::SelfCrossingWall { side, first, second });
            }
        }
        if polylines_cross(&self.inner, &self.outer) {
            log::debug!("Inner and outer walls cross");
            return Err(InvalidAttempt::WallsCross);
        }
        Ok(())
    }
}

#[inline]
fn wall_for<'w>(inner: &'w mut Wall, outer: &'w mut Wall, side: Side) -> &'w mut Wall {
    match side {
        Side::Inner => inner,
        Side::Outer => outer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::bounce::{Axis, BounceEvent, BounceTrack};
    use crate::consts::CORNER_NUDGE;
    use crate::generator::trajectory::simulate;

    fn walls_for(events: &[(f64, Axis)]) -> WallPair {
        let track = BounceTrack::new(events.iter().map(|&(t, a)| BounceEvent::new(t, a)).collect()).unwrap();
        let settings = GeneratorSettings::default();
        let trajectory = simulate(&track, &settings).unwrap();
        build_walls(&trajectory, &settings).unwrap()
    }

    fn assert_points(actual: &[DVec2], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "points: {:?}", actual);
        for (a, &(x, y)) in actual.iter().zip(expected) {
            assert!(a.abs_diff_eq(DVec2::new(x, y), 1e-9), "{:?} != ({}, {})", a, x, y);
        }
    }

    #[test]
    fn test_two_bounce_corridor() {
        let walls = walls_for(&[(1.0, Axis::Vertical), (2.0, Axis::Vertical)]);

        // Inner wall gains the single closing corner, outer keeps its seed
        assert_points(
            &walls.inner,
            &[(-0.05, -0.05), (1.05, -0.05), (1.05, 1.0), (1.05, 2.0), (-0.05, 2.0)],
        );
        assert_points(&walls.outer, &[(-0.05, -0.05), (-0.05, 1.9), (-0.05, 2.0)]);
    }

    #[test]
    fn test_turn_stays_on_same_wall() {
        let walls = walls_for(&[(1.0, Axis::Vertical), (2.0, Axis::Vertical), (3.0, Axis::Horizontal)]);

        // The horizontal bounce turns the outer (left) wall into the ceiling
        assert_points(
            &walls.outer,
            &[(-0.05, -0.05), (-0.05, 1.9), (-0.05, 2.0), (-0.05, 3.05), (1.0, 3.05)],
        );
        // The inner wall closes the corridor with a jog through the midpoint
        assert_points(
            &walls.inner,
            &[
                (-0.05, -0.05),
                (1.05, -0.05),
                (1.05, 1.0),
                (1.05, 2.025),
                (1.025, 2.025),
                (1.0, 2.025),
                (1.0, 3.05),
            ],
        );
    }

    #[test]
    fn test_walls_are_simple_and_disjoint() {
        let walls = walls_for(&[(1.0, Axis::Vertical), (2.0, Axis::Vertical), (3.0, Axis::Horizontal)]);
        assert_eq!(first_crossing(&polyline_segments(&walls.inner)), None);
        assert_eq!(first_crossing(&polyline_segments(&walls.outer)), None);
        assert!(!polylines_cross(&walls.inner, &walls.outer));

        // Corridor is closed at both ends
        assert_eq!(walls.inner.first(), walls.outer.first());
        assert!(walls.inner.last().unwrap().abs_diff_eq(*walls.outer.last().unwrap(), 1e-12));
    }

    #[test]
    fn test_crossing_walls_fail_the_attempt() {
        // The outer wall's closing run cuts back across its own seed
        let track = BounceTrack::new(
            [
                (1.75, Axis::Vertical),
                (2.5, Axis::Vertical),
                (3.0, Axis::Vertical),
                (3.75, Axis::Horizontal),
                (5.75, Axis::Vertical),
            ]
            .iter()
            .map(|&(t, a)| BounceEvent::new(t, a))
            .collect(),
        )
        .unwrap();
        let settings = GeneratorSettings::default();
        let trajectory = simulate(&track, &settings).unwrap();
        let result = build_walls(&trajectory, &settings);
        assert!(
            matches!(result, Err(InvalidAttempt::SelfCrossingWall { .. } | InvalidAttempt::WallsCross)),
            "got {:?}",
            result
        );
    }

    #[test]
    fn test_check_rejects_crossed_walls() {
        let v = DVec2::new;
        let bow_tie = WallPair {
            inner: vec![v(0.0, 0.0), v(2.0, 2.0), v(2.0, 0.0), v(0.0, 2.0)],
            outer: vec![v(0.0, 0.0), v(-1.0, 0.0)],
        };
        assert_eq!(
            bow_tie.check(),
            Err(InvalidAttempt::SelfCrossingWall { side: Side::Inner, first: 0, second: 2 })
        );

        let crossed = WallPair {
            inner: vec![v(0.0, 0.0), v(2.0, 0.0)],
            outer: vec![v(1.0, -1.0), v(1.0, 1.0)],
        };
        assert_eq!(crossed.check(), Err(InvalidAttempt::WallsCross));
    }

    #[test]
    fn test_zero_width_turn_is_nudged() {
        // The fourth bounce lands below the inner wall's last corner, so the
        // turn would run back down the wall it came up
        let walls = walls_for(&[
            (1.0, Axis::Vertical),
            (1.5, Axis::Vertical),
            (2.0, Axis::Horizontal),
            (3.5, Axis::Horizontal),
        ]);
        let nudge = CORNER_NUDGE * GeneratorSettings::default().square_size;
        assert_points(
            &walls.inner,
            &[
                (-0.05, -0.05),
                (1.05, -0.05),
                (1.05, 1.0),
                (1.05 + nudge, 1.0),
                (1.05 + nudge, 0.45),
                (2.5, 0.45),
            ],
        );
        assert!(walls.inner.windows(2).all(|w| !w[0].abs_diff_eq(w[1], 1e-10)));
    }

    #[test]
    fn test_no_consecutive_duplicates() {
        let walls = walls_for(&[
            (1.0, Axis::Vertical),
            (2.0, Axis::Vertical),
            (3.0, Axis::Horizontal),
            (4.0, Axis::Vertical),
        ]);
        for wall in [&walls.inner, &walls.outer] {
            assert!(wall.windows(2).all(|w| !w[0].abs_diff_eq(w[1], 1e-10)));
        }
    }
}
