//! Bounce Corridor - level geometry for a bouncing-square rhythm game
//!
//! Core modules:
//! - `generator`: Deterministic generation (trajectory simulation, wall building)
//! - `level`: Level assembly, retries and render-space scaling
//! - `play_area`: Closed corridor polygon for rendering
//! - `settings`: Generator configuration
//! - `error`: Input, recoverable and fatal error types

pub mod error;
pub mod generator;
pub mod level;
pub mod play_area;
pub mod settings;

pub use error::{EventError, InvalidAttempt, LevelError};
pub use generator::{Axis, BounceEvent, BouncePoint, BounceTrack, Heading};
pub use level::{Level, LevelDef, LevelGeometry};
pub use play_area::PlayArea;
pub use settings::{GeneratorSettings, Perturbation};

use glam::DVec2;

/// Generator configuration constants
pub mod consts {
    /// Side length of the square in generator units
    pub const SQUARE_SIZE: f64 = 0.1;
    /// Per-axis speed of the square (velocity starts at (SPEED, SPEED))
    pub const SQUARE_SPEED: f64 = 1.0;
    /// Generator units to render-space pixels
    pub const RENDER_SCALE: f64 = 150.0;

    /// Threshold for zero-width wall corners
    pub const DEGENERACY_EPS: f64 = 1e-8;
    /// Collinearity / axis-alignment tolerance
    pub const ALIGN_EPS: f64 = 1e-10;
    /// Determinant below which two segments count as parallel
    pub const PARALLEL_EPS: f64 = 1e-10;
    /// Parametric margin that makes segment endpoints exclusive
    pub const INTERSECT_EPS: f64 = 1e-5;

    /// Corner shift, in multiples of the square size
    pub const CORNER_NUDGE: f64 = 1.5;
    /// Fraction of the way toward a path crossing used for detour corners
    pub const DETOUR_CLEARANCE: f64 = 0.25;
    /// Maximum nesting of detour repairs for a single curve
    pub const MAX_REPAIR_DEPTH: usize = 8;

    /// Attempt cap when retries are perturbed
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;
    /// Lives for levels that don't specify any
    pub const DEFAULT_LIVES: u8 = 3;
}

/// Sign of a coordinate as used by bounce headings (zero counts as negative)
#[inline]
pub fn sign(value: f64) -> i8 {
    if value > 0.0 { 1 } else { -1 }
}

/// Project a corner between `a` and `b`.
///
/// A vertical wall at `a` keeps `a.x` and takes `b.y`; a horizontal one keeps
/// `a.y` and takes `b.x`.
#[inline]
pub fn corner_point(axis: Axis, a: DVec2, b: DVec2) -> DVec2 {
    match axis {
        Axis::Vertical => DVec2::new(a.x, b.y),
        Axis::Horizontal => DVec2::new(b.x, a.y),
    }
}
