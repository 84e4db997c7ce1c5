//! Scene domain: arena geometry, fighter visuals, and transform sync.
//!
//! The full renderer builds the 3D arena and articulated placeholder rigs,
//! then tries to swap in GLB models once they load. The flat renderer draws
//! the whole battle as top-down 2D shapes. Either way the simulation is the
//! single source of truth; these systems only copy state out of it.

pub mod arena;
pub mod flat;
pub mod model;
pub mod rig;

use bevy::prelude::*;

use crate::core::{ArenaSet, RendererMode};
use crate::sim::Battle;
use crate::sim::events::Fighter;

/// One occluder pillar: base position and radius on the arena plane.
#[derive(Component)]
pub struct Pillar {
    pub base: Vec2,
    pub radius: f32,
}

/// Root entity of a fighter's visual rig. Children carry the joints.
#[derive(Component)]
pub struct FighterRig {
    pub fighter: Fighter,
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        let mode = app
            .world()
            .get_resource::<RendererMode>()
            .copied()
            .unwrap_or_default();
        if mode.is_flat() {
            app.add_systems(Startup, flat::spawn_flat_scene).add_systems(
                Update,
                (flat::sync_flat_fighters, flat::tint_flat_fighters)
                    .in_set(ArenaSet::Present),
            );
            return;
        }
        app.init_resource::<model::ModelLoads>()
            .add_systems(
                Startup,
                (arena::spawn_arena, rig::spawn_rigs, model::begin_model_loads),
            )
            .add_systems(
                Update,
                (
                    sync_fighter_roots,
                    rig::pose_rigs,
                    model::swap_in_loaded_models,
                    model::measure_model_bounds,
                )
                    .in_set(ArenaSet::Present),
            );
    }
}

/// Copy simulation position, height, and facing onto each rig root.
pub(crate) fn sync_fighter_roots(
    battle: Res<Battle>,
    mut rigs: Query<(&FighterRig, &mut Transform)>,
) {
    for (rig, mut transform) in &mut rigs {
        let fighter = match rig.fighter {
            Fighter::Hero => &battle.0.hero,
            Fighter::Boss => &battle.0.boss,
        };
        transform.translation =
            Vec3::new(fighter.position.x, fighter.height, fighter.position.y);
        transform.rotation = Quat::from_rotation_y(fighter.facing_yaw);
    }
}
