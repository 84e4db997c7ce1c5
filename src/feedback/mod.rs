//! Feedback domain: screen shake, hit flash, telegraphs, and outcome
//! particles.
//!
//! Everything here is cosmetic and driven by drained simulation events plus
//! the boss's visible state. The flat renderer keeps only the state tracking
//! (the 2D tint and HUD read it); mesh effects are full-renderer only.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;

use crate::core::{ArenaSet, RendererMode};
use crate::scene::{FighterRig, rig::RigMaterial};
use crate::sim::combatant::CombatantState;
use crate::sim::events::{Fighter, HitKind, Outcome, SimEvent};
use crate::sim::{Battle, BattleEvent, BattleReset};

const SHAKE_CAP: f32 = 0.6;
const SHAKE_DECAY: f32 = 8.0;
const FLASH_TIME: f32 = 0.12;
const SHOCKWAVE_TIME: f32 = 0.42;
const SHOCKWAVE_MAX_RADIUS: f32 = 4.6;

/// Aggregate cosmetic state read by the camera, rig tint, and HUD.
#[derive(Resource, Debug, Default)]
pub struct FeedbackState {
    pub shake: f32,
    pub hero_flash: f32,
    pub boss_flash: f32,
    pub outcome: Option<Outcome>,
}

impl FeedbackState {
    fn flash_mut(&mut self, fighter: Fighter) -> &mut f32 {
        match fighter {
            Fighter::Hero => &mut self.hero_flash,
            Fighter::Boss => &mut self.boss_flash,
        }
    }
}

/// Expanding impact ring on the arena floor.
#[derive(Component)]
struct Shockwave {
    age: f32,
}

/// Warning ring shown under the boss during a special windup.
#[derive(Component)]
struct TelegraphRing;

/// Short-lived celebratory or mournful mote.
#[derive(Component)]
struct Particle {
    velocity: Vec3,
    life: f32,
    max_life: f32,
    gravity: f32,
}

const BURST_INTERVAL: f32 = 0.3;

/// Paces the outcome particle bursts. Bursts repeat for as long as the
/// outcome holds; only a reset stops them.
#[derive(Resource, Debug, Default)]
struct OutcomeFx {
    elapsed: f32,
    next_burst: f32,
}

impl OutcomeFx {
    /// Advance the pacing clock; true when the next burst is due.
    fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed < self.next_burst {
            return false;
        }
        self.next_burst = self.elapsed + BURST_INTERVAL;
        true
    }
}

fn shake_for(kind: HitKind) -> f32 {
    match kind {
        HitKind::Light => 0.12,
        HitKind::Heavy => 0.22,
        HitKind::BossMelee => 0.18,
        HitKind::Charge => 0.26,
        HitKind::Slam => 0.3,
    }
}

pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        let mode = app
            .world()
            .get_resource::<RendererMode>()
            .copied()
            .unwrap_or_default();
        app.init_resource::<FeedbackState>()
            .init_resource::<OutcomeFx>()
            .add_systems(
                Update,
                (track_events, decay_feedback, handle_reset).in_set(ArenaSet::Present),
            );
        if !mode.is_flat() {
            app.add_systems(
                Update,
                (
                    spawn_effect_meshes,
                    drive_telegraph_ring,
                    drive_shockwaves,
                    spawn_outcome_particles,
                    drive_particles,
                    flash_rig_materials,
                )
                    .in_set(ArenaSet::Present),
            );
        }
    }
}

/// Fold drained simulation events into the cosmetic state.
pub(crate) fn track_events(
    mut events: MessageReader<BattleEvent>,
    mut feedback: ResMut<FeedbackState>,
    mut fx: ResMut<OutcomeFx>,
) {
    for BattleEvent(event) in events.read() {
        match event {
            SimEvent::HitLanded { target, kind, .. } => {
                feedback.shake = (feedback.shake + shake_for(*kind)).min(SHAKE_CAP);
                *feedback.flash_mut(*target) = FLASH_TIME;
            }
            SimEvent::OutcomeChanged(outcome) => {
                feedback.outcome = Some(*outcome);
                *fx = OutcomeFx::default();
            }
            _ => {}
        }
    }
}

pub(crate) fn decay_feedback(time: Res<Time>, mut feedback: ResMut<FeedbackState>) {
    let dt = time.delta_secs();
    feedback.shake = (feedback.shake - feedback.shake * SHAKE_DECAY * dt).max(0.0);
    feedback.hero_flash = (feedback.hero_flash - dt).max(0.0);
    feedback.boss_flash = (feedback.boss_flash - dt).max(0.0);
}

/// A battle reset clears cosmetic state and tears down any live effects.
pub(crate) fn handle_reset(
    mut commands: Commands,
    mut resets: MessageReader<BattleReset>,
    mut feedback: ResMut<FeedbackState>,
    effects: Query<
        Entity,
        Or<(
            With<Shockwave>,
            With<Particle>,
            With<TelegraphRing>,
        )>,
    >,
) {
    if resets.read().next().is_none() {
        return;
    }
    *feedback = FeedbackState::default();
    for entity in &effects {
        commands.entity(entity).despawn();
    }
}

/// Spawn the floor ring for each slam impact event.
pub(crate) fn spawn_effect_meshes(
    mut commands: Commands,
    mut events: MessageReader<BattleEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for BattleEvent(event) in events.read() {
        let SimEvent::SlamShockwave { point } = event else {
            continue;
        };
        commands.spawn((
            Shockwave { age: 0.0 },
            Mesh3d(meshes.add(Annulus::new(0.82, 1.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(1.0, 0.6, 0.25, 0.9),
                emissive: LinearRgba::new(2.0, 1.0, 0.3, 1.0),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })),
            Transform::from_translation(Vec3::new(point.x, 0.04, point.y))
                .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
                .with_scale(Vec3::splat(0.4)),
        ));
    }
}

pub(crate) fn drive_shockwaves(
    time: Res<Time>,
    mut commands: Commands,
    mut waves: Query<(
        Entity,
        &mut Shockwave,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, mut wave, mut transform, material) in &mut waves {
        wave.age += time.delta_secs();
        let t = (wave.age / SHOCKWAVE_TIME).min(1.0);
        transform.scale = Vec3::splat(0.4 + t * SHOCKWAVE_MAX_RADIUS);
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(0.9 * (1.0 - t));
        }
        if wave.age >= SHOCKWAVE_TIME {
            commands.entity(entity).despawn();
        }
    }
}

/// Keep exactly one warning ring alive under the boss while it winds up a
/// charge or slam.
pub(crate) fn drive_telegraph_ring(
    time: Res<Time>,
    mut commands: Commands,
    battle: Res<Battle>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rings: Query<
        (Entity, &mut Transform, &MeshMaterial3d<StandardMaterial>),
        With<TelegraphRing>,
    >,
) {
    let sim = &battle.0;
    let winding = matches!(
        sim.boss.state,
        CombatantState::ChargeWindup | CombatantState::SlamWindup
    );

    if !winding {
        for (entity, _, _) in &rings {
            commands.entity(entity).despawn();
        }
        return;
    }

    // Slam warns at its true impact radius; the charge ring just marks the
    // launch point.
    let radius = if sim.boss.state == CombatantState::SlamWindup {
        sim.boss.collider_radius + sim.tuning.boss.slam.range + sim.hero.collider_radius
    } else {
        1.3
    };
    let pulse = 0.85 + (time.elapsed_secs() * 14.0).sin() * 0.15;
    let base = Vec3::new(sim.boss.position.x, 0.03, sim.boss.position.y);

    if let Some((_, mut transform, material)) = rings.iter_mut().next() {
        transform.translation = base;
        transform.scale = Vec3::splat(radius * pulse);
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(0.35 + 0.25 * pulse);
        }
        return;
    }
    commands.spawn((
        TelegraphRing,
        Mesh3d(meshes.add(Annulus::new(0.88, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.25, 0.15, 0.5),
            emissive: LinearRgba::new(1.6, 0.25, 0.1, 1.0),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::from_translation(base)
            .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
            .with_scale(Vec3::splat(radius)),
    ));
}

/// Victory gets rising embers over the boss's corpse; defeat gets gray ash
/// drifting down around the hero.
pub(crate) fn spawn_outcome_particles(
    time: Res<Time>,
    mut commands: Commands,
    battle: Res<Battle>,
    feedback: Res<FeedbackState>,
    mut fx: ResMut<OutcomeFx>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(outcome) = feedback.outcome else {
        return;
    };
    if !fx.tick(time.delta_secs()) {
        return;
    }

    let mut rng = rand::rng();
    let (center, count) = match outcome {
        Outcome::Win => (battle.0.boss.position, 10),
        Outcome::Lose => (battle.0.hero.position, 6),
        Outcome::None => return,
    };
    let mesh = meshes.add(Cuboid::new(0.09, 0.09, 0.09));
    for _ in 0..count {
        let offset = Vec3::new(
            rng.random_range(-1.2..1.2),
            rng.random_range(0.2..1.0),
            rng.random_range(-1.2..1.2),
        );
        let (velocity, gravity, color) = match outcome {
            Outcome::Win => (
                Vec3::new(
                    rng.random_range(-1.5..1.5),
                    rng.random_range(3.0..6.5),
                    rng.random_range(-1.5..1.5),
                ),
                -7.0,
                Color::srgb(1.0, rng.random_range(0.5..0.9), 0.2),
            ),
            _ => (
                Vec3::new(
                    rng.random_range(-0.4..0.4),
                    rng.random_range(-0.6..-0.2),
                    rng.random_range(-0.4..0.4),
                ),
                -0.2,
                Color::srgb(0.45, 0.45, 0.5),
            ),
        };
        let life = rng.random_range(0.8..1.6);
        commands.spawn((
            Particle {
                velocity,
                life,
                max_life: life,
                gravity,
            },
            Mesh3d(mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                emissive: color.to_linear() * 1.5,
                unlit: true,
                ..default()
            })),
            Transform::from_translation(
                Vec3::new(center.x, 0.0, center.y) + offset + Vec3::Y * 1.5,
            ),
        ));
    }
}

pub(crate) fn drive_particles(
    time: Res<Time>,
    mut commands: Commands,
    mut particles: Query<(Entity, &mut Particle, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut particle, mut transform) in &mut particles {
        particle.life -= dt;
        if particle.life <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        let gravity = particle.gravity;
        particle.velocity.y += gravity * dt;
        transform.translation += particle.velocity * dt;
        transform.scale = Vec3::splat((particle.life / particle.max_life).max(0.05));
    }
}

/// Drive each rig's shared placeholder material red while its flash timer
/// runs. A swapped-in model keeps its own materials; it still gets shake and
/// HUD feedback.
pub(crate) fn flash_rig_materials(
    feedback: Res<FeedbackState>,
    rigs: Query<(&FighterRig, &RigMaterial)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (rig, material) in &rigs {
        let flash = match rig.fighter {
            Fighter::Hero => feedback.hero_flash,
            Fighter::Boss => feedback.boss_flash,
        };
        if let Some(material) = materials.get_mut(&material.0) {
            let strength = (flash / FLASH_TIME).clamp(0.0, 1.0) * 6.0;
            material.emissive = LinearRgba::new(strength, strength * 0.15, strength * 0.1, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_bursts_keep_firing_long_after_the_transition() {
        let mut fx = OutcomeFx::default();
        let mut late_bursts = 0;
        let mut t = 0.0;
        while t < 30.0 {
            if fx.tick(0.016) && t > 10.0 {
                late_bursts += 1;
            }
            t += 0.016;
        }
        assert!(
            late_bursts > 50,
            "bursts persist at the pacing interval until a reset clears the outcome"
        );
    }

    #[test]
    fn bursts_respect_the_pacing_interval() {
        let mut fx = OutcomeFx::default();
        assert!(fx.tick(0.016), "first burst is immediate");
        assert!(!fx.tick(0.016));
        let mut elapsed = 0.0;
        while elapsed < BURST_INTERVAL {
            elapsed += 0.016;
            if fx.tick(0.016) {
                return;
            }
        }
        panic!("a burst is due within one interval");
    }
}
