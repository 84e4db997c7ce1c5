//! Core domain: run seed and renderer selection.

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;

/// Seed for the battle RNG. Fresh per launch by default; pin it through the
/// `MINOTAUR_ARENA_SEED` environment variable to replay a fight.
#[derive(Resource, Debug, Clone, Copy)]
pub struct RunSeed(pub u64);

impl Default for RunSeed {
    fn default() -> Self {
        let seed = std::env::var("MINOTAUR_ARENA_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| rand::rng().random());
        Self(seed)
    }
}

/// Which presentation the app runs. `Flat` is the top-down 2D rendition with
/// the reduced ruleset; `Auto` resolves at startup.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum RendererMode {
    #[default]
    Auto,
    Full,
    Flat,
}

impl RendererMode {
    pub fn is_flat(&self) -> bool {
        matches!(self, RendererMode::Flat)
    }

    /// Collapse `Auto` using the environment override, then the preference
    /// itself. A native build always has a working 3D renderer, so `Auto`
    /// lands on `Full`.
    pub fn resolve(self) -> RendererMode {
        let requested = match std::env::var("MINOTAUR_ARENA_RENDERER").ok().as_deref() {
            Some("flat") => RendererMode::Flat,
            Some("full") => RendererMode::Full,
            _ => self,
        };
        match requested {
            RendererMode::Auto => RendererMode::Full,
            other => other,
        }
    }
}
