//! Simulation domain: tuning parameters for combatants, AI, and feedback.

use serde::Deserialize;

/// Largest delta the simulation will integrate in one step. Frames stalled
/// longer than this are truncated rather than simulated.
pub const MAX_FRAME_DT: f32 = 0.033;

/// One attack move: timing, reach, and impact numbers.
///
/// `hit_fraction` is the progress through `duration` at which the single hit
/// test fires (wind-up before, follow-through after). The cone threshold is a
/// tuned per-move constant; the values intentionally do not follow a shared
/// formula.
#[derive(Debug, Clone, Deserialize)]
pub struct AttackSpec {
    pub duration: f32,
    pub hit_fraction: f32,
    pub damage: f32,
    /// Max edge distance (center distance minus both collider radii).
    pub range: f32,
    /// Min dot product between attacker forward and direction to target.
    pub cone: f32,
    pub knockback: f32,
    pub cooldown: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeroTuning {
    pub max_hp: f32,
    pub speed: f32,
    pub run_multiplier: f32,
    pub collider_radius: f32,
    pub arena_radius: f32,
    pub hurt_time: f32,
    /// Forward drift while a swing is active.
    pub attack_drift: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub lock_on_turn_rate: f32,
    pub light: AttackSpec,
    pub heavy: AttackSpec,
}

impl Default for HeroTuning {
    fn default() -> Self {
        Self {
            max_hp: 120.0,
            speed: 4.4,
            run_multiplier: 1.55,
            collider_radius: 0.5,
            arena_radius: 15.8,
            hurt_time: 0.2,
            attack_drift: 1.4,
            jump_velocity: 5.6,
            gravity: 16.0,
            lock_on_turn_rate: 7.5,
            light: AttackSpec {
                duration: 0.36,
                hit_fraction: 0.55,
                damage: 34.0,
                range: 0.95,
                cone: 0.2,
                knockback: 0.24,
                cooldown: 0.58,
            },
            heavy: AttackSpec {
                duration: 0.6,
                hit_fraction: 0.64,
                damage: 58.0,
                range: 1.15,
                cone: 0.12,
                knockback: 0.5,
                cooldown: 1.1,
            },
        }
    }
}

/// Charge dash parameters. Direction and travel distance are fixed at windup
/// start; travel comes from a ray-circle intersection with the arena wall.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChargeTuning {
    pub windup: f32,
    pub duration: f32,
    pub damage: f32,
    pub range: f32,
    pub cone: f32,
    pub knockback: f32,
    pub cooldown: f32,
    pub min_travel: f32,
    pub max_travel: f32,
    pub wall_margin: f32,
    pub max_speed: f32,
    /// Eligible band of edge distance.
    pub min_edge: f32,
    pub max_edge: f32,
    /// Per-frame launch probability: base + dt * rate.
    pub roll_base: f32,
    pub roll_rate: f32,
}

impl Default for ChargeTuning {
    fn default() -> Self {
        Self {
            windup: 0.48,
            duration: 0.92,
            damage: 30.0,
            range: 0.85,
            cone: 0.45,
            knockback: 0.9,
            cooldown: 4.5,
            min_travel: 1.4,
            max_travel: 9.6,
            wall_margin: 0.6,
            max_speed: 12.0,
            min_edge: 3.6,
            max_edge: 10.0,
            roll_base: 0.008,
            roll_rate: 0.75,
        }
    }
}

/// Ground slam: no forward motion, radial hit with no facing requirement,
/// stun on hit, cosmetic shockwave regardless of the hit.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SlamTuning {
    pub windup: f32,
    pub duration: f32,
    pub hit_fraction: f32,
    pub damage: f32,
    pub range: f32,
    pub knockback: f32,
    pub stun: f32,
    pub cooldown: f32,
    pub shockwave_time: f32,
    pub min_edge: f32,
    pub max_edge: f32,
    /// Close-range roll applies under `near_edge`.
    pub near_edge: f32,
    pub near_roll_base: f32,
    pub near_roll_rate: f32,
    pub far_roll_base: f32,
    pub far_roll_rate: f32,
}

impl Default for SlamTuning {
    fn default() -> Self {
        Self {
            windup: 0.78,
            duration: 0.48,
            hit_fraction: 0.62,
            damage: 20.0,
            range: 0.72,
            knockback: 0.55,
            stun: 1.0,
            cooldown: 6.0,
            shockwave_time: 0.42,
            min_edge: 0.35,
            max_edge: 3.0,
            near_edge: 1.2,
            near_roll_base: 0.03,
            near_roll_rate: 1.7,
            far_roll_base: 0.012,
            far_roll_rate: 0.8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossAiTuning {
    /// Decision timer re-roll bounds.
    pub decision_min: f32,
    pub decision_max: f32,
    /// Chance to flip strafe direction on a decision re-roll.
    pub strafe_flip_chance: f32,
    /// Desired-range factor re-roll bounds.
    pub desired_factor_min: f32,
    pub desired_factor_max: f32,
    /// Base engage distance scaled by the desired factor.
    pub base_engage: f32,
    pub strafe_min: f32,
    pub strafe_max: f32,
    /// Angular rate while turning toward the hero between actions.
    pub turn_rate: f32,
    /// Edge distance under which melee fires when off cooldown.
    pub melee_edge: f32,
    /// Chase band margin beyond desired range.
    pub chase_margin: f32,
    /// Closing-strafe band margin beyond desired range.
    pub close_margin: f32,
    /// Edge distance under which the boss intermittently backs off.
    pub crowd_edge: f32,
    pub burst_chance_rate: f32,
    pub burst_time: f32,
    pub burst_multiplier: f32,
    pub retreat_min: f32,
    pub retreat_max: f32,
}

impl Default for BossAiTuning {
    fn default() -> Self {
        Self {
            decision_min: 0.65,
            decision_max: 1.1,
            strafe_flip_chance: 0.28,
            desired_factor_min: 0.78,
            desired_factor_max: 0.96,
            base_engage: 2.8,
            strafe_min: 0.6,
            strafe_max: 1.4,
            turn_rate: 5.2,
            melee_edge: 0.72,
            chase_margin: 2.6,
            close_margin: 0.9,
            crowd_edge: 0.35,
            burst_chance_rate: 0.35,
            burst_time: 0.55,
            burst_multiplier: 1.65,
            retreat_min: 0.5,
            retreat_max: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub max_hp: f32,
    pub speed: f32,
    pub strafe_speed: f32,
    pub retreat_speed: f32,
    pub collider_radius: f32,
    pub arena_radius: f32,
    pub hurt_time: f32,
    pub melee: AttackSpec,
    pub charge: ChargeTuning,
    pub slam: SlamTuning,
    pub ai: BossAiTuning,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            max_hp: 260.0,
            speed: 3.2,
            strafe_speed: 2.2,
            retreat_speed: 2.4,
            collider_radius: 0.95,
            arena_radius: 15.4,
            hurt_time: 0.18,
            melee: AttackSpec {
                duration: 0.74,
                hit_fraction: 0.58,
                damage: 24.0,
                range: 1.05,
                cone: 0.15,
                knockback: 0.45,
                cooldown: 1.55,
            },
            charge: ChargeTuning::default(),
            slam: SlamTuning::default(),
            ai: BossAiTuning::default(),
        }
    }
}

/// Hit-stop lengths per impact weight, plus separation limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImpactTuning {
    pub hit_stop_light: f32,
    pub hit_stop_heavy: f32,
    pub hit_stop_boss: f32,
    pub hit_stop_slam: f32,
    pub separation_slack: f32,
    pub separation_max_push: f32,
}

impl Default for ImpactTuning {
    fn default() -> Self {
        Self {
            hit_stop_light: 0.05,
            hit_stop_heavy: 0.09,
            hit_stop_boss: 0.06,
            hit_stop_slam: 0.08,
            separation_slack: 0.05,
            separation_max_push: 0.12,
        }
    }
}

/// Root tuning block for the battle simulation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimTuning {
    pub hero: HeroTuning,
    pub boss: BossTuning,
    pub impact: ImpactTuning,
}
