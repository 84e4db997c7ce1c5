//! Config domain: RON tuning file loaded at startup.
//!
//! Every field in `assets/data/tuning.ron` is optional; missing blocks fall
//! back to the compiled-in defaults, and a file that fails to load entirely
//! logs a warning and leaves the defaults untouched.

use bevy::prelude::*;
use ron::Options;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::core::RendererMode;
use crate::sim::params::SimTuning;

pub const TUNING_PATH: &str = "assets/data/tuning.ron";

/// Error type for tuning load failures.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// On-disk shape of the tuning file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TuningFile {
    pub renderer: RendererMode,
    pub sim: SimTuning,
}

/// Resolved tuning as an app resource.
#[derive(Resource, Debug)]
pub struct LoadedTuning {
    pub sim: SimTuning,
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

pub fn load_tuning_file(path: &Path) -> Result<TuningFile, TuningLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;
    parse_tuning(&contents).map_err(|message| TuningLoadError {
        file: file_name,
        message,
    })
}

fn parse_tuning(contents: &str) -> Result<TuningFile, String> {
    ron_options()
        .from_str(contents)
        .map_err(|e| format!("Parse error: {}", e))
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let file = match load_tuning_file(Path::new(TUNING_PATH)) {
            Ok(file) => file,
            Err(e) => {
                warn!("{e}; using built-in tuning");
                TuningFile::default()
            }
        };
        let mode = file.renderer.resolve();
        info!("renderer mode: {mode:?}");
        app.insert_resource(LoadedTuning { sim: file.sim })
            .insert_resource(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_file_fills_in_defaults() {
        let file = parse_tuning("(sim: (hero: (max_hp: 150.0)))").unwrap();
        assert_eq!(file.sim.hero.max_hp, 150.0);
        // Untouched blocks keep the compiled-in values.
        assert_eq!(file.sim.boss.max_hp, 260.0);
        assert_eq!(file.sim.hero.speed, 4.4);
        assert_eq!(file.renderer, RendererMode::Auto);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let file = parse_tuning("()").unwrap();
        assert_eq!(file.sim.hero.max_hp, 120.0);
        assert_eq!(file.sim.impact.hit_stop_heavy, 0.09);
    }

    #[test]
    fn renderer_override_parses() {
        let file = parse_tuning("(renderer: Flat)").unwrap();
        assert!(file.renderer.is_flat());
    }

    #[test]
    fn garbage_reports_a_parse_error() {
        assert!(parse_tuning("(sim: nonsense!)").is_err());
    }
}
