//! Deterministic level generation
//!
//! Everything here is a pure function of the bounce events and settings:
//! - No I/O, no RNG
//! - Each attempt owns its working state and drops it on failure
//! - Walls are append-only until frozen into `LevelGeometry`

pub mod bounce;
pub mod builder;
pub mod geometry;
pub mod routing;
pub mod trajectory;
pub mod wall;

pub use bounce::{Arrow, Axis, BounceEvent, BouncePoint, BounceTrack, Heading};
pub use builder::{WallPair, build_walls};
pub use geometry::{LineSegment, first_crossing, polyline_segments, polylines_cross};
pub use routing::{Join, Side, WallCursor};
pub use trajectory::{Trajectory, simulate};
