//! Scene domain: optional GLB model swap with placeholder fallback.
//!
//! Model loads are fire-and-forget. On success the placeholder joints are
//! torn down and the scene is parented under the same rig root, so sync and
//! camera code never notice the difference; the model's measured footprint
//! feeds back into the simulation's collider radius. On failure the
//! placeholder simply stays.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::camera::primitives::Aabb;

use super::FighterRig;
use super::rig::Joint;
use crate::sim::Battle;
use crate::sim::events::Fighter;

const HERO_MODEL_PATH: &str = "models/hero.glb#Scene0";
const BOSS_MODEL_PATH: &str = "models/minotaur.glb#Scene0";

/// In-flight and settled model loads for both fighters.
#[derive(Resource, Default)]
pub struct ModelLoads {
    hero: SlotLoad,
    boss: SlotLoad,
}

#[derive(Default)]
struct SlotLoad {
    handle: Option<Handle<Scene>>,
    model_root: Option<Entity>,
    measured: bool,
    failed: bool,
}

impl ModelLoads {
    fn slot_mut(&mut self, fighter: Fighter) -> &mut SlotLoad {
        match fighter {
            Fighter::Hero => &mut self.hero,
            Fighter::Boss => &mut self.boss,
        }
    }
}

pub(crate) fn begin_model_loads(
    asset_server: Res<AssetServer>,
    mut loads: ResMut<ModelLoads>,
) {
    loads.hero.handle = Some(asset_server.load(HERO_MODEL_PATH));
    loads.boss.handle = Some(asset_server.load(BOSS_MODEL_PATH));
}

/// Watch the loads; swap a settled scene in under its rig root and drop the
/// placeholder joints. A failed load logs once and keeps the placeholder.
pub(crate) fn swap_in_loaded_models(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut loads: ResMut<ModelLoads>,
    rigs: Query<(Entity, &FighterRig)>,
    joints: Query<(Entity, &Joint)>,
) {
    for fighter in [Fighter::Hero, Fighter::Boss] {
        let slot = loads.slot_mut(fighter);
        if slot.model_root.is_some() || slot.failed {
            continue;
        }
        let Some(handle) = &slot.handle else {
            continue;
        };
        match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => {
                let Some(root) = rigs
                    .iter()
                    .find(|(_, rig)| rig.fighter == fighter)
                    .map(|(entity, _)| entity)
                else {
                    continue;
                };
                for (entity, joint) in &joints {
                    if joint.fighter == fighter {
                        commands.entity(entity).despawn();
                    }
                }
                let model = commands
                    .spawn((SceneRoot(handle.clone()), ChildOf(root)))
                    .id();
                slot.model_root = Some(model);
                info!("swapped in model for {fighter:?}");
            }
            Some(LoadState::Failed(_)) => {
                slot.failed = true;
                warn!("model load failed for {fighter:?}; keeping placeholder rig");
            }
            _ => {}
        }
    }
}

/// Once a swapped model has computed mesh bounds, derive a footprint radius
/// and feed it to the simulation. Runs until the first frame bounds exist.
pub(crate) fn measure_model_bounds(
    mut loads: ResMut<ModelLoads>,
    mut battle: ResMut<Battle>,
    children: Query<&Children>,
    bounds: Query<(&Aabb, &GlobalTransform)>,
    roots: Query<&GlobalTransform>,
) {
    for fighter in [Fighter::Hero, Fighter::Boss] {
        let slot = loads.slot_mut(fighter);
        let Some(model_root) = slot.model_root else {
            continue;
        };
        if slot.measured {
            continue;
        }
        let Ok(root_transform) = roots.get(model_root) else {
            continue;
        };
        let root_pos = root_transform.translation();

        let mut radius: f32 = 0.0;
        for entity in children.iter_descendants(model_root) {
            let Ok((aabb, global)) = bounds.get(entity) else {
                continue;
            };
            let center = global.transform_point(Vec3::from(aabb.center));
            let scale = global.scale().abs();
            let half = Vec3::from(aabb.half_extents) * scale;
            let planar_offset = Vec2::new(center.x - root_pos.x, center.z - root_pos.z);
            radius = radius.max(planar_offset.length() + half.x.max(half.z));
        }
        if radius > 0.0 {
            let radius = radius.clamp(0.3, 2.0);
            match fighter {
                Fighter::Hero => battle.0.set_hero_collider_radius(radius),
                Fighter::Boss => battle.0.set_boss_collider_radius(radius),
            }
            slot.measured = true;
            info!("measured {fighter:?} footprint radius {radius:.2}");
        }
    }
}
