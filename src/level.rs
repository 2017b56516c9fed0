//! Level assembly
//!
//! Runs simulate -> build for up to the attempt cap, then scales the result
//! to render space. Without perturbation every attempt would see the same
//! input, so one attempt is made and its failure is final.

use std::path::Path;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_LIVES;
use crate::error::{InvalidAttempt, LevelError, Result};
use crate::generator::{Arrow, BounceEvent, BouncePoint, BounceTrack, build_walls, simulate};
use crate::play_area::PlayArea;
use crate::settings::{GeneratorSettings, Perturbation};

fn default_lives() -> u8 {
    DEFAULT_LIVES
}

/// An authored level, as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub title: String,
    /// Music track played with the level
    #[serde(default)]
    pub audio_file: Option<String>,
    #[serde(default = "default_lives")]
    pub lives: u8,
    pub events: Vec<BounceEvent>,
}

impl LevelDef {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

/// Immutable corridor geometry, in render-space units once assembled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelGeometry {
    pub inner_wall: Vec<DVec2>,
    pub outer_wall: Vec<DVec2>,
    /// Square center at each bounce
    pub bounce_points: Vec<BouncePoint>,
    /// Square edge against the wall at each bounce
    pub wall_bounce_points: Vec<BouncePoint>,
}

impl LevelGeometry {
    /// Uniformly scale every coordinate
    pub fn scaled(&self, factor: f64) -> Self {
        let scale_points = |points: &[DVec2]| points.iter().map(|&p| p * factor).collect();
        let scale_bounces = |points: &[BouncePoint]| points.iter().map(|b| b.scaled(factor)).collect();
        Self {
            inner_wall: scale_points(&self.inner_wall),
            outer_wall: scale_points(&self.outer_wall),
            bounce_points: scale_bounces(&self.bounce_points),
            wall_bounce_points: scale_bounces(&self.wall_bounce_points),
        }
    }

    pub fn play_area(&self) -> PlayArea {
        PlayArea::new(&self.inner_wall, &self.outer_wall)
    }

    /// Arrow the player must press at each bounce, starting from the origin
    pub fn expected_inputs(&self) -> Vec<Arrow> {
        let mut from = DVec2::ZERO;
        self.bounce_points
            .iter()
            .map(|bounce| {
                let arrow = Arrow::for_bounce(from, bounce);
                from = bounce.pos;
                arrow
            })
            .collect()
    }
}

/// A generated, playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub title: String,
    pub audio_file: Option<String>,
    pub lives: u8,
    /// Events the geometry was generated from (perturbed if retried)
    pub track: BounceTrack,
    pub geometry: LevelGeometry,
    pub play_area: PlayArea,
    /// Attempts used, including the successful one
    pub attempts: u32,
}

impl Level {
    /// Generate a level, retrying as the settings allow
    pub fn generate(def: &LevelDef, settings: &GeneratorSettings) -> Result<Self> {
        settings.validate()?;
        let authored = BounceTrack::new(def.events.clone())?;

        let attempts = settings.effective_attempts();
        let mut attempt = 0;
        loop {
            let track = match &settings.perturbation {
                Some(p) if attempt > 0 => perturb(&authored, p, attempt),
                _ => authored.clone(),
            };
            attempt += 1;

            match build_geometry(&track, settings) {
                Ok(geometry) => {
                    log::info!("Level \"{}\" generated after {} attempt(s)", def.title, attempt);
                    let geometry = geometry.scaled(settings.render_scale);
                    let play_area = geometry.play_area();
                    return Ok(Self {
                        title: def.title.clone(),
                        audio_file: def.audio_file.clone(),
                        lives: def.lives,
                        track,
                        geometry,
                        play_area,
                        attempts: attempt,
                    });
                }
                Err(failure) if attempt >= attempts => {
                    log::warn!("Giving up on level \"{}\" after {} attempt(s): {}", def.title, attempt, failure);
                    return Err(LevelError::GenerationFailed {
                        title: def.title.clone(),
                        attempts: attempt,
                        last: failure,
                    });
                }
                Err(failure) => {
                    log::debug!("Level \"{}\" attempt {} failed: {}", def.title, attempt, failure);
                }
            }
        }
    }

    /// Expected input at each bounce
    pub fn expected_inputs(&self) -> Vec<Arrow> {
        self.geometry.expected_inputs()
    }
}

/// One unscaled generation attempt
pub fn build_geometry(
    track: &BounceTrack,
    settings: &GeneratorSettings,
) -> std::result::Result<LevelGeometry, InvalidAttempt> {
    let trajectory = simulate(track, settings)?;
    let walls = build_walls(&trajectory, settings)?;
    let (bounce_points, wall_bounce_points) = trajectory.into_parts();
    Ok(LevelGeometry {
        inner_wall: walls.inner,
        outer_wall: walls.outer,
        bounce_points,
        wall_bounce_points,
    })
}

/// Jitter every event time for retry `attempt`
///
/// Shifts stay below half the smallest gap, so times remain positive and
/// strictly increasing.
fn perturb(track: &BounceTrack, perturbation: &Perturbation, attempt: u32) -> BounceTrack {
    let mut rng = Pcg32::seed_from_u64(perturbation.seed.wrapping_add(attempt as u64));
    let reach = perturbation.max_shift * track.min_gap();
    let times: Vec<f64> = track
        .events()
        .iter()
        .map(|e| e.time + rng.random_range(-1.0f64..=1.0) * reach)
        .collect();
    track.with_times(times)
}
