//! Camera domain: lock-on follow rig, occlusion fade, and shake.
//!
//! The camera hangs behind the hero on the line away from the boss, eases
//! toward its target pose every frame, and publishes its yaw so input can be
//! rotated into world space. Pillars that slip between the lens and the hero
//! are faded to a ghost alpha instead of blocking the view.

use bevy::math::Vec3Swizzles;
use bevy::prelude::*;
use rand::Rng;

use crate::core::{ArenaSet, RendererMode};
use crate::feedback::FeedbackState;
use crate::scene::Pillar;
use crate::sim::Battle;

/// Offset from the hero in lock-on frame space (x strafe, y up, z back).
const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 5.4, 8.6);
/// Per-frame ease toward the target pose.
const FOLLOW_LERP: f32 = 0.09;
/// Look target height above the hero's feet.
const LOOK_HEIGHT: f32 = 1.2;
/// How far the look target leans from the hero toward the boss.
const LOOK_BOSS_BLEND: f32 = 0.22;
/// Alpha for pillars blocking the line to the hero.
const OCCLUDED_ALPHA: f32 = 0.25;
const FADE_RATE: f32 = 10.0;
const SHAKE_SCALE: f32 = 0.35;

/// Yaw of the camera's forward on the arena plane, consumed by input
/// mapping. Matches the combatant convention: 0 is +z.
#[derive(Resource, Debug)]
pub struct CameraYaw(pub f32);

impl Default for CameraYaw {
    fn default() -> Self {
        Self(std::f32::consts::PI)
    }
}

#[derive(Component)]
pub struct ArenaCamera;

pub struct ArenaCameraPlugin;

impl Plugin for ArenaCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraYaw>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                (drive_camera, fade_occluding_pillars).in_set(ArenaSet::Present),
            );
    }
}

pub(crate) fn spawn_camera(mut commands: Commands, mode: Res<RendererMode>) {
    if mode.is_flat() {
        // Top-down orthographic view; one world unit per 24 pixels.
        commands.spawn((
            Camera2d,
            Projection::Orthographic(OrthographicProjection {
                scale: 1.0 / 24.0,
                ..OrthographicProjection::default_2d()
            }),
        ));
        return;
    }
    commands.spawn((
        Camera3d::default(),
        ArenaCamera,
        Transform::from_translation(Vec3::new(0.0, 5.4, 16.6))
            .looking_at(Vec3::new(0.0, LOOK_HEIGHT, 8.0), Vec3::Y),
    ));
}

/// Follow + shake in one pass so the jitter never fights the ease.
pub(crate) fn drive_camera(
    battle: Res<Battle>,
    feedback: Res<FeedbackState>,
    mut camera_yaw: ResMut<CameraYaw>,
    mut cameras: Query<&mut Transform, With<ArenaCamera>>,
) {
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };
    let sim = &battle.0;
    let hero = Vec3::new(sim.hero.position.x, sim.hero.height, sim.hero.position.y);
    let boss = Vec3::new(sim.boss.position.x, 0.0, sim.boss.position.y);

    // Pivot away from the boss while it lives; hold the last frame once the
    // lock-on target is gone.
    let away = Vec3::new(hero.x - boss.x, 0.0, hero.z - boss.z);
    let pivot_yaw = if !sim.boss.dead && away.length_squared() > 1e-6 {
        away.x.atan2(away.z)
    } else {
        camera_yaw.0 + std::f32::consts::PI
    };

    let desired = hero + Quat::from_rotation_y(pivot_yaw) * FOLLOW_OFFSET;
    transform.translation = transform.translation.lerp(desired, FOLLOW_LERP);

    let head = hero + Vec3::Y * LOOK_HEIGHT;
    let look = head.lerp(boss + Vec3::Y * LOOK_HEIGHT, LOOK_BOSS_BLEND);
    transform.look_at(look, Vec3::Y);

    let forward = hero - transform.translation;
    if forward.xz().length_squared() > 1e-6 {
        camera_yaw.0 = forward.x.atan2(forward.z);
    }

    if feedback.shake > 0.0 {
        let mut rng = rand::rng();
        let jitter = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        ) * (feedback.shake * SHAKE_SCALE);
        transform.translation += jitter;
    }
}

/// Ghost any pillar sitting on the camera-to-hero line, and restore it once
/// it clears.
pub(crate) fn fade_occluding_pillars(
    time: Res<Time>,
    battle: Res<Battle>,
    cameras: Query<&Transform, With<ArenaCamera>>,
    pillars: Query<(&Pillar, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(camera) = cameras.single() else {
        return;
    };
    let cam = camera.translation.xz();
    let hero = battle.0.hero.position;
    let seg = hero - cam;
    let seg_len_sq = seg.length_squared();
    if seg_len_sq < 1e-6 {
        return;
    }

    let blend = (FADE_RATE * time.delta_secs()).min(1.0);
    for (pillar, material) in &pillars {
        let to_pillar = pillar.base - cam;
        let t = (to_pillar.dot(seg) / seg_len_sq).clamp(0.0, 1.0);
        let closest = cam + seg * t;
        let occluding =
            t > 0.0 && t < 1.0 && closest.distance(pillar.base) < pillar.radius + 0.6;
        let target = if occluding { OCCLUDED_ALPHA } else { 1.0 };

        if let Some(material) = materials.get_mut(&material.0) {
            let alpha = material.base_color.alpha();
            material
                .base_color
                .set_alpha(alpha + (target - alpha) * blend);
        }
    }
}
