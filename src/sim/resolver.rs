//! Simulation domain: attack gating, hit tests, damage, and death.

use bevy::math::Vec2;

use crate::sim::BattleSimulation;
use crate::sim::combatant::{Action, AttackKind, AttackPhase, Combatant, CombatantState};
use crate::sim::events::{Fighter, HitKind, Outcome, SimEvent};
use crate::sim::params::AttackSpec;

/// Advance an attack phase by `dt`. Returns `(fire, finished)`: `fire` is
/// true exactly on the windup -> active transition, which is the single
/// moment the hit test runs.
pub(crate) fn advance_attack_phase(
    phase: &mut AttackPhase,
    spec: &AttackSpec,
    dt: f32,
) -> (bool, bool) {
    match phase {
        AttackPhase::Windup { remaining } => {
            *remaining -= dt;
            if *remaining <= 0.0 {
                let spill = -*remaining;
                let active = (spec.duration * (1.0 - spec.hit_fraction) - spill).max(0.0);
                *phase = AttackPhase::Active {
                    remaining: active,
                    did_hit: true,
                };
                (true, active <= 0.0)
            } else {
                (false, false)
            }
        }
        AttackPhase::Active { remaining, .. } => {
            *remaining -= dt;
            (false, *remaining <= 0.0)
        }
    }
}

/// Distance + facing-cone melee hit test. The cone thresholds are tuned per
/// move and intentionally not derived from a shared rule.
fn melee_hit_connects(attacker: &Combatant, defender: &Combatant, spec: &AttackSpec) -> bool {
    let delta = defender.position - attacker.position;
    let dist = delta.length();
    let edge = dist - (attacker.collider_radius + defender.collider_radius);
    if edge > spec.range {
        return false;
    }
    let dir = if dist > 1e-4 {
        delta / dist
    } else {
        attacker.forward()
    };
    attacker.forward().dot(dir) >= spec.cone
}

/// Knockback + damage + hurt/stun application on a confirmed hit. A dead
/// defender is untouched; a killing blow transitions to the terminal state.
#[allow(clippy::too_many_arguments)]
fn apply_hit(
    defender: &mut Combatant,
    defender_id: Fighter,
    hit_dir: Vec2,
    damage: f32,
    knockback: f32,
    hurt_time: f32,
    stun_time: f32,
    outcome: &mut Outcome,
    events: &mut Vec<SimEvent>,
    attacker_id: Fighter,
    kind: HitKind,
) -> bool {
    if defender.dead {
        return false;
    }
    defender.position += hit_dir * knockback;
    let died = defender.take_damage(damage);
    if stun_time > 0.0 {
        defender.stun_timer = stun_time;
    } else {
        defender.hurt_timer = hurt_time;
    }
    events.push(SimEvent::HitLanded {
        attacker: attacker_id,
        target: defender_id,
        kind,
        damage,
        point: defender.position,
    });
    if died {
        defender.state = CombatantState::Dead;
        if *outcome == Outcome::None {
            *outcome = match defender_id {
                Fighter::Boss => Outcome::Win,
                Fighter::Hero => Outcome::Lose,
            };
            events.push(SimEvent::OutcomeChanged(*outcome));
        }
    }
    true
}

impl BattleSimulation {
    pub(crate) fn hero_attack_spec(&self, kind: AttackKind) -> &AttackSpec {
        match kind {
            AttackKind::Heavy => &self.tuning.hero.heavy,
            _ => &self.tuning.hero.light,
        }
    }

    /// Start an attack if the actor may. Rejected attempts leave every piece
    /// of combat state untouched: dead actor or opponent, cooldown still
    /// running, already committed, or (hero) airborne.
    pub fn try_attack(&mut self, actor: Fighter, kind: AttackKind) {
        let (attacker, opponent) = match actor {
            Fighter::Hero => (&self.hero, &self.boss),
            Fighter::Boss => (&self.boss, &self.hero),
        };
        if attacker.dead
            || opponent.dead
            || attacker.attack_cooldown > 0.0
            || !attacker.action.is_none()
            || attacker.hurt_timer > 0.0
            || attacker.stun_timer > 0.0
        {
            return;
        }
        if actor == Fighter::Hero && attacker.airborne {
            return;
        }

        let spec = match actor {
            Fighter::Hero => self.hero_attack_spec(kind),
            Fighter::Boss => &self.tuning.boss.melee,
        };
        let windup = spec.duration * spec.hit_fraction;
        let cooldown = spec.cooldown;

        let attacker = match actor {
            Fighter::Hero => &mut self.hero,
            Fighter::Boss => &mut self.boss,
        };
        attacker.action = Action::Attack {
            kind,
            phase: AttackPhase::Windup { remaining: windup },
        };
        attacker.attack_cooldown = cooldown;
        self.push_event(SimEvent::AttackStarted { actor, kind });
    }

    /// Hero swing connects: damage and shove the boss.
    pub(crate) fn perform_hero_hit_check(&mut self, kind: AttackKind) {
        let spec = match kind {
            AttackKind::Heavy => self.tuning.hero.heavy.clone(),
            _ => self.tuning.hero.light.clone(),
        };
        if !melee_hit_connects(&self.hero, &self.boss, &spec) {
            return;
        }
        let delta = self.boss.position - self.hero.position;
        let dir = delta.normalize_or_zero();
        let hit_kind = match kind {
            AttackKind::Heavy => HitKind::Heavy,
            _ => HitKind::Light,
        };
        let landed = apply_hit(
            &mut self.boss,
            Fighter::Boss,
            dir,
            spec.damage,
            spec.knockback,
            self.tuning.boss.hurt_time,
            0.0,
            &mut self.outcome,
            &mut self.events,
            Fighter::Hero,
            hit_kind,
        );
        if landed {
            self.hit_stop = match hit_kind {
                HitKind::Heavy => self.tuning.impact.hit_stop_heavy,
                _ => self.tuning.impact.hit_stop_light,
            };
        }
    }

    /// Boss melee swing connects: damage and shove the hero.
    pub(crate) fn perform_boss_hit_check(&mut self) {
        let spec = self.tuning.boss.melee.clone();
        if !melee_hit_connects(&self.boss, &self.hero, &spec) {
            return;
        }
        let dir = (self.hero.position - self.boss.position).normalize_or_zero();
        let landed = apply_hit(
            &mut self.hero,
            Fighter::Hero,
            dir,
            spec.damage,
            spec.knockback,
            self.tuning.hero.hurt_time,
            0.0,
            &mut self.outcome,
            &mut self.events,
            Fighter::Boss,
            HitKind::BossMelee,
        );
        if landed {
            self.hit_stop = self.tuning.impact.hit_stop_boss;
        }
    }

    /// Charge hit: alignment is measured against the frozen dash direction,
    /// not the boss's current facing.
    pub(crate) fn perform_charge_hit_check(&mut self, dash_dir: Vec2) -> bool {
        let charge = self.tuning.boss.charge.clone();
        let delta = self.hero.position - self.boss.position;
        let dist = delta.length();
        let edge = dist - (self.boss.collider_radius + self.hero.collider_radius);
        if edge > charge.range {
            return false;
        }
        let dir = if dist > 1e-4 { delta / dist } else { dash_dir };
        if dash_dir.dot(dir) < charge.cone {
            return false;
        }
        let landed = apply_hit(
            &mut self.hero,
            Fighter::Hero,
            dash_dir,
            charge.damage,
            charge.knockback,
            self.tuning.hero.hurt_time,
            0.0,
            &mut self.outcome,
            &mut self.events,
            Fighter::Boss,
            HitKind::Charge,
        );
        if landed {
            self.hit_stop = self.tuning.impact.hit_stop_boss;
        }
        landed
    }

    /// Slam impact: pure radial check, no facing requirement. The shockwave
    /// ring always plays; the stun only applies on an actual hit.
    pub(crate) fn perform_slam_hit_check(&mut self) {
        let slam = self.tuning.boss.slam.clone();
        self.push_event(SimEvent::SlamShockwave {
            point: self.boss.position,
        });
        let delta = self.hero.position - self.boss.position;
        let dist = delta.length();
        let edge = dist - (self.boss.collider_radius + self.hero.collider_radius);
        if edge > slam.range {
            return;
        }
        let dir = if dist > 1e-4 {
            delta / dist
        } else {
            self.boss.forward()
        };
        let landed = apply_hit(
            &mut self.hero,
            Fighter::Hero,
            dir,
            slam.damage,
            slam.knockback,
            self.tuning.hero.hurt_time,
            slam.stun,
            &mut self.outcome,
            &mut self.events,
            Fighter::Boss,
            HitKind::Slam,
        );
        if landed {
            self.hit_stop = self.tuning.impact.hit_stop_slam;
        }
    }
}
