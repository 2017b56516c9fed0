//! Error types
//!
//! Three layers, kept apart so callers can tell them apart:
//! - `EventError`: the authored bounce events are malformed (input error)
//! - `InvalidAttempt`: one generation attempt failed and may be retried
//! - `LevelError`: what level assembly surfaces to the application

use thiserror::Error;

use crate::generator::Side;

/// Rejected bounce-event sequence
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventError {
    #[error("need at least 2 bounce events, got {0}")]
    TooFew(usize),

    #[error("bounce event {index} has a non-finite time")]
    NonFiniteTime { index: usize },

    #[error("first bounce must happen after time 0, got {0}")]
    NonPositiveStart(f64),

    #[error("bounce event {index} is not later than the one before it")]
    NotIncreasing { index: usize },

    #[error("the first two bounces must both be vertical")]
    MisalignedStart,
}

/// Recoverable failure of a single generation attempt
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidAttempt {
    #[error("square path crosses itself (segments {first} and {second})")]
    SelfIntersectingPath { first: usize, second: usize },

    #[error("square's corners sweep across its own path (segments {first} and {second})")]
    SweptPathOverlap { first: usize, second: usize },

    #[error("wall curve crosses square path segment {segment} on one leg only")]
    AsymmetricCrossing { segment: usize },

    #[error("curve repair exceeded depth {0}")]
    RepairTooDeep(usize),

    #[error("{side:?} wall crosses itself (segments {first} and {second})")]
    SelfCrossingWall { side: Side, first: usize, second: usize },

    #[error("inner and outer walls cross")]
    WallsCross,
}

/// Errors surfaced by level loading and generation
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid bounce events: {0}")]
    InvalidEvents(#[from] EventError),

    #[error("invalid generator settings: {0}")]
    InvalidSettings(String),

    /// Every attempt failed. The level is unplayable as authored.
    #[error("level \"{title}\" could not be generated after {attempts} attempt(s): {last}")]
    GenerationFailed {
        title: String,
        attempts: u32,
        last: InvalidAttempt,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LevelError>;
