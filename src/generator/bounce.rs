//! Bounce events and bounce points
//!
//! A level is authored as a list of (time, axis) bounce events. Simulating
//! them yields bounce points: where the square's center is at each bounce
//! and which way it heads afterwards.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::sign;

/// Orientation of the wall a bounce happens against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Vertical wall: flips the x velocity
    #[serde(alias = "vert")]
    Vertical,
    /// Horizontal wall: flips the y velocity
    #[serde(alias = "horz")]
    Horizontal,
}

impl Axis {
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }

    /// Reflect a velocity off a wall of this orientation
    #[inline]
    pub fn reflect(self, velocity: DVec2) -> DVec2 {
        match self {
            Axis::Vertical => DVec2::new(-velocity.x, velocity.y),
            Axis::Horizontal => DVec2::new(velocity.x, -velocity.y),
        }
    }
}

/// Signs of the square's velocity after a bounce, each +1 or -1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    pub x: i8,
    pub y: i8,
}

impl Heading {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn from_velocity(velocity: DVec2) -> Self {
        Self::new(sign(velocity.x), sign(velocity.y))
    }

    /// Signs of the displacement from `from` to `to`
    pub fn toward(from: DVec2, to: DVec2) -> Self {
        Self::from_velocity(to - from)
    }

    pub fn reflect(self, axis: Axis) -> Self {
        match axis {
            Axis::Vertical => Self::new(-self.x, self.y),
            Axis::Horizontal => Self::new(self.x, -self.y),
        }
    }

    /// Sign on the component a wall of `axis` faces (x for vertical walls)
    #[inline]
    pub fn along(self, axis: Axis) -> i8 {
        match axis {
            Axis::Vertical => self.x,
            Axis::Horizontal => self.y,
        }
    }

    #[inline]
    pub fn as_vec(self) -> DVec2 {
        DVec2::new(self.x as f64, self.y as f64)
    }
}

/// An authored bounce: at `time` seconds the square hits a wall of `axis`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceEvent {
    pub time: f64,
    pub axis: Axis,
}

impl BounceEvent {
    pub const fn new(time: f64, axis: Axis) -> Self {
        Self { time, axis }
    }
}

/// A validated bounce-event sequence
///
/// Times are finite, positive and strictly increasing; there are at least
/// two events and the first two are vertical.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BounceTrack {
    events: Vec<BounceEvent>,
}

impl BounceTrack {
    pub fn new(events: Vec<BounceEvent>) -> Result<Self, EventError> {
        if events.len() < 2 {
            return Err(EventError::TooFew(events.len()));
        }
        if let Some(index) = events.iter().position(|e| !e.time.is_finite()) {
            return Err(EventError::NonFiniteTime { index });
        }
        if events[0].time <= 0.0 {
            return Err(EventError::NonPositiveStart(events[0].time));
        }
        if let Some(i) = events.windows(2).position(|w| w[1].time <= w[0].time) {
            return Err(EventError::NotIncreasing { index: i + 1 });
        }
        if events[0].axis != Axis::Vertical || events[1].axis != Axis::Vertical {
            return Err(EventError::MisalignedStart);
        }
        Ok(Self { events })
    }

    /// Replace the event times, keeping axes.
    ///
    /// Callers guarantee the new times keep every invariant.
    pub(crate) fn with_times(&self, times: impl IntoIterator<Item = f64>) -> Self {
        let events = self
            .events
            .iter()
            .zip(times)
            .map(|(e, time)| BounceEvent::new(time, e.axis))
            .collect();
        Self { events }
    }

    #[inline]
    pub fn events(&self) -> &[BounceEvent] {
        &self.events
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always false for a validated track
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Smallest gap between consecutive events, counting the gap from t = 0
    pub fn min_gap(&self) -> f64 {
        let first = self.events[0].time;
        self.events
            .windows(2)
            .map(|w| w[1].time - w[0].time)
            .fold(first, f64::min)
    }
}

impl<'de> Deserialize<'de> for BounceTrack {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let events = Vec::<BounceEvent>::deserialize(deserializer)?;
        BounceTrack::new(events).map_err(serde::de::Error::custom)
    }
}

/// The square at the moment of a bounce
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BouncePoint {
    pub pos: DVec2,
    pub axis: Axis,
    /// Velocity signs after the reflection
    pub heading: Heading,
}

impl BouncePoint {
    pub fn new(pos: DVec2, axis: Axis, heading: Heading) -> Self {
        Self { pos, axis, heading }
    }

    /// Where the square's edge touches the wall, rather than its center
    ///
    /// The wall sits behind the post-bounce heading, half a square away along
    /// the axis the wall faces.
    pub fn to_wall(&self, half_size: f64) -> Self {
        let offset = match self.axis {
            Axis::Vertical => DVec2::new(self.heading.x as f64, 0.0),
            Axis::Horizontal => DVec2::new(0.0, self.heading.y as f64),
        };
        Self::new(self.pos - offset * half_size, self.axis, self.heading)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.pos * factor, self.axis, self.heading)
    }
}

/// Input direction the player presses to take a bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arrow {
    Left,
    Right,
    Up,
    Down,
}

impl Arrow {
    /// Arrow for travelling from `from` into a bounce at `to`
    ///
    /// Screen y grows downward, so moving to a larger y is `Down`.
    pub fn for_bounce(from: DVec2, to: &BouncePoint) -> Self {
        match to.axis {
            Axis::Vertical if from.x < to.pos.x => Arrow::Right,
            Axis::Vertical => Arrow::Left,
            Axis::Horizontal if from.y < to.pos.y => Arrow::Down,
            Axis::Horizontal => Arrow::Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(time: f64, axis: Axis) -> BounceEvent {
        BounceEvent::new(time, axis)
    }

    #[test]
    fn test_axis_reflect() {
        let v = DVec2::new(1.0, 1.0);
        assert_eq!(Axis::Vertical.reflect(v), DVec2::new(-1.0, 1.0));
        assert_eq!(Axis::Horizontal.reflect(v), DVec2::new(1.0, -1.0));
        assert_eq!(Axis::Vertical.invert(), Axis::Horizontal);
    }

    #[test]
    fn test_heading_matches_velocity_reflection() {
        let v = DVec2::new(1.0, -1.0);
        let h = Heading::from_velocity(v);
        assert_eq!(h, Heading::new(1, -1));
        for axis in [Axis::Vertical, Axis::Horizontal] {
            assert_eq!(h.reflect(axis), Heading::from_velocity(axis.reflect(v)));
        }
        assert_eq!(h.along(Axis::Vertical), 1);
        assert_eq!(h.along(Axis::Horizontal), -1);
    }

    #[test]
    fn test_track_accepts_valid_events() {
        let track = BounceTrack::new(vec![
            ev(0.5, Axis::Vertical),
            ev(1.0, Axis::Vertical),
            ev(2.5, Axis::Horizontal),
        ])
        .unwrap();
        assert_eq!(track.len(), 3);
        assert!((track.min_gap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_track_rejections() {
        assert_eq!(
            BounceTrack::new(vec![ev(1.0, Axis::Vertical)]),
            Err(EventError::TooFew(1))
        );
        assert_eq!(
            BounceTrack::new(vec![ev(0.0, Axis::Vertical), ev(1.0, Axis::Vertical)]),
            Err(EventError::NonPositiveStart(0.0))
        );
        assert_eq!(
            BounceTrack::new(vec![ev(1.0, Axis::Vertical), ev(1.0, Axis::Vertical)]),
            Err(EventError::NotIncreasing { index: 1 })
        );
        assert_eq!(
            BounceTrack::new(vec![ev(1.0, Axis::Vertical), ev(f64::NAN, Axis::Vertical)]),
            Err(EventError::NonFiniteTime { index: 1 })
        );
        assert_eq!(
            BounceTrack::new(vec![ev(1.0, Axis::Vertical), ev(2.0, Axis::Horizontal)]),
            Err(EventError::MisalignedStart)
        );
    }

    #[test]
    fn test_track_json_validates() {
        let json = r#"[{"time": 1.0, "axis": "vert"}, {"time": 2.0, "axis": "vertical"}]"#;
        let track: BounceTrack = serde_json::from_str(json).unwrap();
        assert_eq!(track.events()[0].axis, Axis::Vertical);

        let bad = r#"[{"time": 1.0, "axis": "horz"}, {"time": 2.0, "axis": "vertical"}]"#;
        assert!(serde_json::from_str::<BounceTrack>(bad).is_err());
    }

    #[test]
    fn test_wall_point_sits_behind_heading() {
        let bp = BouncePoint::new(DVec2::new(1.0, 1.0), Axis::Vertical, Heading::new(-1, 1));
        let wall = bp.to_wall(0.05);
        assert!(wall.pos.abs_diff_eq(DVec2::new(1.05, 1.0), 1e-12));

        let bp = BouncePoint::new(DVec2::new(1.0, 3.0), Axis::Horizontal, Heading::new(1, -1));
        let wall = bp.to_wall(0.05);
        assert!(wall.pos.abs_diff_eq(DVec2::new(1.0, 3.05), 1e-12));
        assert_eq!(wall.heading, bp.heading);
    }

    #[test]
    fn test_arrow_for_bounce() {
        let right = BouncePoint::new(DVec2::new(1.0, 1.0), Axis::Vertical, Heading::new(-1, 1));
        assert_eq!(Arrow::for_bounce(DVec2::ZERO, &right), Arrow::Right);
        let down = BouncePoint::new(DVec2::new(1.0, 3.0), Axis::Horizontal, Heading::new(1, -1));
        assert_eq!(Arrow::for_bounce(DVec2::new(0.0, 2.0), &down), Arrow::Down);
        assert_eq!(Arrow::for_bounce(DVec2::new(0.0, 4.0), &down), Arrow::Up);
    }
}
