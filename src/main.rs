//! Bounce Corridor entry point
//!
//! Generates the corridor for one level file and prints its geometry as JSON.
//!
//! Usage: `bounce-corridor <level.json> [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use bounce_corridor::{GeneratorSettings, Level, LevelDef, LevelError};

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(level_path) = args.first() else {
        eprintln!("usage: bounce-corridor <level.json> [settings.json]");
        return ExitCode::from(2);
    };

    match run(level_path, args.get(1).map(String::as_str)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(level_path: &str, settings_path: Option<&str>) -> Result<(), LevelError> {
    let def = LevelDef::load_from_file(level_path)?;
    let settings = match settings_path {
        Some(path) => GeneratorSettings::load_from_file(path)?,
        None => GeneratorSettings::default(),
    };

    let level = Level::generate(&def, &settings)?;
    log::info!(
        "\"{}\": {} bounces, {} inner / {} outer wall points, {} attempt(s)",
        level.title,
        level.track.len(),
        level.geometry.inner_wall.len(),
        level.geometry.outer_wall.len(),
        level.attempts
    );
    if let Some((min, max)) = level.play_area.bounding_box() {
        log::info!(
            "Play area spans {:?} to {:?}, signed area {:.1}",
            min,
            max,
            level.play_area.signed_area()
        );
    }
    log::debug!("Expected inputs: {:?}", level.expected_inputs());

    println!("{}", serde_json::to_string_pretty(&level)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is consumed directly by the web build
}
