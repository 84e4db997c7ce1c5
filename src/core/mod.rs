//! Core domain: frame ordering and run-wide resources.

pub mod resources;

use bevy::prelude::*;

pub use resources::{RendererMode, RunSeed};

/// Per-frame phases, chained so input is sampled before the simulation steps
/// and presentation always reads settled battle state.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub enum ArenaSet {
    Input,
    Step,
    Present,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunSeed>().configure_sets(
            Update,
            (ArenaSet::Input, ArenaSet::Step, ArenaSet::Present).chain(),
        );
    }
}
