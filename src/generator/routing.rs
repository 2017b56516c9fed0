//! Which wall takes the next bounce, and how it joins
//!
//! The cursor is a small state machine over {Inner, Outer} x {Vertical,
//! Horizontal}. Two bounces in a row on the same axis means the square
//! crossed the corridor, so the other wall takes the second one. A change
//! of axis means the square turned a corner along the same wall.

use serde::{Deserialize, Serialize};

use super::bounce::Axis;

/// One of the two corridor walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Inner,
    Outer,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Inner => Side::Outer,
            Side::Outer => Side::Inner,
        }
    }
}

/// Routing state: the wall that took the last bounce and that bounce's axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallCursor {
    pub side: Side,
    pub axis: Axis,
}

impl WallCursor {
    /// State after the walls are seeded: the outer wall holds the second
    /// (vertical) bounce.
    pub const fn seeded() -> Self {
        Self {
            side: Side::Outer,
            axis: Axis::Vertical,
        }
    }

    /// Route the next bounce
    pub fn advance(self, axis: Axis) -> Self {
        let side = if axis == self.axis { self.side.opposite() } else { self.side };
        Self { side, axis }
    }

    /// Wall that closes the corridor after the last bounce
    #[inline]
    pub fn closing_side(self) -> Side {
        self.side.opposite()
    }
}

/// How a wall connects its previous bounce to the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Join {
    /// Same axis: the wall continues and may need a jog
    Straight,
    /// Axis changed: the wall turns a corner
    Turn,
}

impl Join {
    #[inline]
    pub fn between(previous: Axis, next: Axis) -> Self {
        if previous == next { Join::Straight } else { Join::Turn }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_axis_switches_wall() {
        let cursor = WallCursor::seeded().advance(Axis::Vertical);
        assert_eq!(cursor.side, Side::Inner);
        assert_eq!(cursor.axis, Axis::Vertical);
        assert_eq!(cursor.advance(Axis::Vertical).side, Side::Outer);
    }

    #[test]
    fn test_axis_change_keeps_wall() {
        let cursor = WallCursor::seeded().advance(Axis::Horizontal);
        assert_eq!(cursor.side, Side::Outer);
        assert_eq!(cursor.axis, Axis::Horizontal);
        assert_eq!(cursor.closing_side(), Side::Inner);
    }

    #[test]
    fn test_route_sequence() {
        let axes = [Axis::Horizontal, Axis::Horizontal, Axis::Vertical, Axis::Vertical];
        let sides: Vec<Side> = axes
            .iter()
            .scan(WallCursor::seeded(), |cursor, &axis| {
                *cursor = cursor.advance(axis);
                Some(cursor.side)
            })
            .collect();
        assert_eq!(sides, vec![Side::Outer, Side::Inner, Side::Inner, Side::Outer]);
    }

    #[test]
    fn test_join_between() {
        assert_eq!(Join::between(Axis::Vertical, Axis::Vertical), Join::Straight);
        assert_eq!(Join::between(Axis::Horizontal, Axis::Vertical), Join::Turn);
    }
}
