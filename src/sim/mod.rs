//! Simulation domain: the battle core and its per-frame step.
//!
//! `BattleSimulation` owns both combatants, the arena bounds, the outcome,
//! and the AI random source. It is plain data stepped once per frame with a
//! fixed internal order (hero, then boss, then separation, then clamp), so
//! damage dealt by the hero in frame N is visible to the boss in frame N.
//! Tests construct it directly without a Bevy `App`.

use bevy::ecs::message::{Message, MessageWriter};
use bevy::math::Vec2;
use bevy::prelude::*;

pub mod boss;
pub mod combatant;
pub mod events;
pub mod movement;
pub mod params;
pub mod resolver;
pub mod rng;

#[cfg(test)]
mod tests;

use crate::core::{ArenaSet, RendererMode, RunSeed};
use crate::input::{HeldInput, IntentQueue};
use boss::BossMind;
use combatant::Combatant;
use events::{Outcome, SimEvent};
use params::{MAX_FRAME_DT, SimTuning};
use rng::SimRng;

/// Hero battle-start pose: near the south edge, facing the boss.
const HERO_START: Vec2 = Vec2::new(0.0, 8.0);
const HERO_START_YAW: f32 = std::f32::consts::PI;
const BOSS_START: Vec2 = Vec2::new(0.0, -7.0);
const BOSS_START_YAW: f32 = 0.0;

/// Per-frame input handed to the simulation step. `move_dir` is already
/// camera-relative and in arena-plane world space.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInput {
    pub move_dir: Vec2,
    pub run: bool,
    pub attack_light: bool,
    pub attack_heavy: bool,
    pub jump: bool,
}

/// The whole battle as one owned value; no globals, so parallel test
/// simulations never share state.
#[derive(Debug, Clone)]
pub struct BattleSimulation {
    pub tuning: SimTuning,
    pub hero: Combatant,
    pub boss: Combatant,
    pub mind: BossMind,
    pub outcome: Outcome,
    /// While positive, combat and AI are suspended (feedback keeps running).
    pub hit_stop: f32,
    /// Flat-renderer ruleset: light attack only, boss limited to chase+melee.
    pub reduced_rules: bool,
    pub rng: SimRng,
    events: Vec<SimEvent>,
}

impl BattleSimulation {
    pub fn new(tuning: SimTuning, seed: u64) -> Self {
        let hero = Combatant::new(
            tuning.hero.max_hp,
            tuning.hero.collider_radius,
            HERO_START,
            HERO_START_YAW,
        );
        let boss = Combatant::new(
            tuning.boss.max_hp,
            tuning.boss.collider_radius,
            BOSS_START,
            BOSS_START_YAW,
        );
        Self {
            tuning,
            hero,
            boss,
            mind: BossMind::default(),
            outcome: Outcome::None,
            hit_stop: 0.0,
            reduced_rules: false,
            rng: SimRng::seeded(seed),
            events: Vec::new(),
        }
    }

    /// Full in-place re-init; equivalent to battle start. In-flight asset
    /// loads settling afterwards only touch collider radii, which persist.
    pub fn reset(&mut self) {
        self.hero.reset(HERO_START, HERO_START_YAW);
        self.boss.reset(BOSS_START, BOSS_START_YAW);
        self.mind = BossMind::default();
        self.outcome = Outcome::None;
        self.hit_stop = 0.0;
        self.events.clear();
    }

    /// Advance one frame. `dt` is clamped to a safe non-negative bound before
    /// anything integrates. During hit-stop only the hit-stop timer ticks.
    ///
    /// Returns true when the queued intents in `input` reached the hero's
    /// action logic this frame. False means they went unheard (hit-stop, a
    /// hurt or stun flinch, a dead hero) and the caller should keep them
    /// buffered.
    pub fn step(&mut self, dt: f32, input: &StepInput) -> bool {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        if self.hit_stop > 0.0 {
            self.hit_stop = (self.hit_stop - dt).max(0.0);
            self.refresh_states();
            return false;
        }
        let consumed = self.update_hero(dt, input);
        self.update_boss(dt);
        self.resolve_separation();
        self.clamp_to_arena();
        self.refresh_states();
        consumed
    }

    /// Drain the one-shot events produced since the last call.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Collider estimate from a loaded model's bounds. Deliberately outside
    /// `reset`: the value describes the asset, not the battle.
    pub fn set_hero_collider_radius(&mut self, radius: f32) {
        self.hero.collider_radius = radius.max(0.1);
    }

    pub fn set_boss_collider_radius(&mut self, radius: f32) {
        self.boss.collider_radius = radius.max(0.1);
    }

    /// Edge distance between the two fighters: centers minus both radii.
    pub fn edge_distance(&self) -> f32 {
        let dist = self.hero.position.distance(self.boss.position);
        dist - (self.hero.collider_radius + self.boss.collider_radius)
    }

    fn refresh_states(&mut self) {
        self.hero.state = self.hero.display_state();
        self.boss.state = self.boss.display_state();
    }
}

/// The live battle as an app resource.
#[derive(Resource)]
pub struct Battle(pub BattleSimulation);

/// Re-published simulation events for feedback, audio, and UI systems.
#[derive(Debug)]
pub struct BattleEvent(pub SimEvent);

impl Message for BattleEvent {}

/// Emitted after a battle reset so presentation state can clear itself.
#[derive(Debug)]
pub struct BattleReset;

impl Message for BattleReset {}

pub struct SimPlugin;

impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        let tuning = app
            .world()
            .get_resource::<crate::config::LoadedTuning>()
            .map(|t| t.sim.clone())
            .unwrap_or_default();
        let seed = app
            .world()
            .get_resource::<RunSeed>()
            .map(|s| s.0)
            .unwrap_or(0);
        let mode = app
            .world()
            .get_resource::<RendererMode>()
            .copied()
            .unwrap_or_default();

        let mut battle = BattleSimulation::new(tuning, seed);
        battle.reduced_rules = mode.is_flat();
        info!(
            "battle ready (seed {seed}, {})",
            if battle.reduced_rules {
                "reduced rules"
            } else {
                "full rules"
            }
        );

        app.insert_resource(Battle(battle))
            .add_message::<BattleEvent>()
            .add_message::<BattleReset>()
            .add_systems(Update, run_simulation.in_set(ArenaSet::Step));
    }
}

/// One simulation step per rendered frame. Queued intents are cleared only
/// when the step reports it consumed them; a press landing during hit-stop
/// or a hurt flinch stays buffered and fires once the hero recovers.
pub(crate) fn run_simulation(
    time: Res<Time>,
    held: Res<HeldInput>,
    camera_yaw: Res<crate::camera::CameraYaw>,
    mut intents: ResMut<IntentQueue>,
    mut battle: ResMut<Battle>,
    mut battle_events: MessageWriter<BattleEvent>,
    mut resets: MessageWriter<BattleReset>,
) {
    let dt = time.delta_secs();

    if intents.reset {
        intents.clear();
        battle.0.reset();
        resets.write(BattleReset);
    }

    let move_dir = camera_relative_move(held.axis, camera_yaw.0);
    let input = StepInput {
        move_dir,
        run: held.run,
        attack_light: intents.attack_light,
        attack_heavy: intents.attack_heavy,
        jump: intents.jump,
    };

    if battle.0.step(dt, &input) {
        intents.clear();
    }

    for event in battle.0.take_events() {
        battle_events.write(BattleEvent(event));
    }
}

/// Rotate the raw WASD axis into arena-plane world space using the camera's
/// current yaw. Axis y is "away from the camera".
fn camera_relative_move(axis: Vec2, camera_yaw: f32) -> Vec2 {
    if axis.length_squared() < 1e-6 {
        return Vec2::ZERO;
    }
    let forward = Vec2::new(camera_yaw.sin(), camera_yaw.cos());
    let right = Vec2::new(-forward.y, forward.x);
    (forward * axis.y + right * axis.x).normalize_or_zero()
}
