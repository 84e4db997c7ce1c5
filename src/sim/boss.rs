//! Simulation domain: boss decision cascade and special-move execution.

use bevy::math::Vec2;

use crate::sim::BattleSimulation;
use crate::sim::combatant::{Action, AttackKind, turn_toward};
use crate::sim::events::{Fighter, SimEvent};
use crate::sim::resolver::advance_attack_phase;

/// Boss-only AI timers and special-move cooldowns. Reset wholesale with the
/// battle; the randomized fields re-roll on their own schedule.
#[derive(Debug, Clone)]
pub struct BossMind {
    pub decision_timer: f32,
    pub strafe_timer: f32,
    /// +1 or -1, orbit direction around the hero.
    pub strafe_dir: f32,
    /// Scales the base engage distance into the current desired range.
    pub desired_factor: f32,
    pub burst_timer: f32,
    pub retreat_timer: f32,
    pub retreating: bool,
    pub charge_cooldown: f32,
    pub slam_cooldown: f32,
}

impl Default for BossMind {
    fn default() -> Self {
        Self {
            decision_timer: 0.0,
            strafe_timer: 0.0,
            strafe_dir: 1.0,
            desired_factor: 0.87,
            burst_timer: 0.0,
            retreat_timer: 0.0,
            retreating: false,
            charge_cooldown: 0.0,
            slam_cooldown: 0.0,
        }
    }
}

impl BattleSimulation {
    /// Boss frame update. Priority: dead, hurt decay, idle-if-hero-dead,
    /// then the committed action (charge/slam/melee phases), then the
    /// decision cascade.
    pub(crate) fn update_boss(&mut self, dt: f32) {
        if self.boss.dead {
            return;
        }

        self.boss.attack_cooldown = (self.boss.attack_cooldown - dt).max(0.0);
        self.mind.charge_cooldown = (self.mind.charge_cooldown - dt).max(0.0);
        self.mind.slam_cooldown = (self.mind.slam_cooldown - dt).max(0.0);
        self.boss.moving = false;
        self.boss.strafing = false;

        // The flinch decays even once the hero is down, so a boss hurt at
        // the moment of victory settles back to idle.
        if self.boss.hurt_timer > 0.0 {
            self.boss.hurt_timer = (self.boss.hurt_timer - dt).max(0.0);
            if !self.hero.dead {
                return;
            }
        }

        if self.hero.dead {
            self.boss.action = Action::None;
            return;
        }

        match self.boss.action {
            Action::ChargeWindup {
                mut remaining,
                dir,
                travel,
            } => {
                remaining -= dt;
                if remaining <= 0.0 {
                    self.boss.action = Action::Charge {
                        remaining: self.tuning.boss.charge.duration,
                        dir,
                        travel,
                        moved: 0.0,
                        did_hit: false,
                    };
                    self.push_event(SimEvent::ChargeLaunched { dir });
                } else {
                    self.boss.action = Action::ChargeWindup {
                        remaining,
                        dir,
                        travel,
                    };
                }
            }
            Action::Charge { .. } => self.advance_charge(dt),
            Action::SlamWindup { mut remaining } => {
                remaining -= dt;
                if remaining <= 0.0 {
                    let slam = &self.tuning.boss.slam;
                    self.boss.action = Action::Slam {
                        impact_delay: slam.duration * slam.hit_fraction,
                        remaining: slam.duration,
                        did_hit: false,
                    };
                } else {
                    self.boss.action = Action::SlamWindup { remaining };
                }
            }
            Action::Slam {
                mut impact_delay,
                mut remaining,
                mut did_hit,
            } => {
                remaining -= dt;
                if !did_hit {
                    impact_delay -= dt;
                    if impact_delay <= 0.0 {
                        did_hit = true;
                        self.perform_slam_hit_check();
                    }
                }
                self.boss.action = if remaining <= 0.0 {
                    Action::None
                } else {
                    Action::Slam {
                        impact_delay,
                        remaining,
                        did_hit,
                    }
                };
            }
            Action::Attack { kind, mut phase } => {
                let spec = self.tuning.boss.melee.clone();
                let (fire, finished) = advance_attack_phase(&mut phase, &spec, dt);
                self.boss.action = if finished {
                    Action::None
                } else {
                    Action::Attack { kind, phase }
                };
                if fire {
                    self.perform_boss_hit_check();
                }
            }
            Action::None => self.boss_decide(dt),
        }
    }

    /// Charge dash: fixed direction and travel budget, capped per-frame
    /// step. Ends when the timer runs out, the budget is spent, the wall
    /// blocks progress, or the single hit has already connected.
    fn advance_charge(&mut self, dt: f32) {
        let Action::Charge {
            mut remaining,
            dir,
            travel,
            mut moved,
            mut did_hit,
        } = self.boss.action
        else {
            return;
        };

        let charge = self.tuning.boss.charge.clone();
        remaining -= dt;

        let speed = (travel / charge.duration).min(charge.max_speed);
        let step = (speed * dt).min((travel - moved).max(0.0));
        self.boss.position += dir * step;
        moved += step;

        // Wall contact: the clamp at end of frame will cancel any further
        // advance, so stop the dash here.
        let blocked =
            self.boss.position.length() >= self.tuning.boss.arena_radius - charge.wall_margin * 0.5;

        if !did_hit {
            did_hit = self.perform_charge_hit_check(dir);
        }

        self.boss.action = if remaining <= 0.0 || moved >= travel - 1e-3 || blocked || did_hit {
            Action::None
        } else {
            Action::Charge {
                remaining,
                dir,
                travel,
                moved,
                did_hit,
            }
        };
    }

    /// Uncommitted decision cascade, in strict priority order: melee, slam
    /// roll, charge roll, then movement bands. The probability gates are
    /// per-frame uniform rolls against `base + dt * rate`.
    fn boss_decide(&mut self, dt: f32) {
        let ai = self.tuning.boss.ai.clone();

        self.mind.decision_timer -= dt;
        if self.mind.decision_timer <= 0.0 {
            self.mind.decision_timer = self.rng.range(ai.decision_min, ai.decision_max);
            if self.rng.chance(ai.strafe_flip_chance) {
                self.mind.strafe_dir = -self.mind.strafe_dir;
            }
            self.mind.desired_factor = self.rng.range(ai.desired_factor_min, ai.desired_factor_max);
        }
        self.mind.strafe_timer -= dt;
        if self.mind.strafe_timer <= 0.0 {
            self.mind.strafe_timer = self.rng.range(ai.strafe_min, ai.strafe_max);
        }

        let to_hero = self.hero.position - self.boss.position;
        let dist = to_hero.length();
        if dist < 1e-4 {
            return;
        }
        let dir_to_hero = to_hero / dist;
        let edge = dist - (self.boss.collider_radius + self.hero.collider_radius);

        let target_yaw = dir_to_hero.x.atan2(dir_to_hero.y);
        self.boss.facing_yaw = turn_toward(self.boss.facing_yaw, target_yaw, ai.turn_rate * dt);

        // (a) Point-blank melee.
        if edge < ai.melee_edge && self.boss.attack_cooldown <= 0.0 {
            self.try_attack(Fighter::Boss, AttackKind::BossMelee);
            return;
        }

        // Reduced ruleset: straight chase, no specials, no footwork.
        if self.reduced_rules {
            if edge > ai.melee_edge * 0.8 {
                self.boss.position += dir_to_hero * self.tuning.boss.speed * dt;
                self.boss.moving = true;
            }
            return;
        }

        {
            // (b) Ground slam roll.
            let slam = &self.tuning.boss.slam;
            if self.mind.slam_cooldown <= 0.0 && edge > slam.min_edge && edge < slam.max_edge {
                let chance = if edge < slam.near_edge {
                    slam.near_roll_base + dt * slam.near_roll_rate
                } else {
                    slam.far_roll_base + dt * slam.far_roll_rate
                };
                if self.rng.chance(chance) {
                    self.start_slam();
                    return;
                }
            }

            // (c) Charge roll; never launched at an airborne or attacking
            // hero.
            let charge = &self.tuning.boss.charge;
            if self.mind.charge_cooldown <= 0.0
                && edge > charge.min_edge
                && edge < charge.max_edge
                && !self.hero.airborne
                && !self.hero.action.is_attack()
                && self.rng.chance(charge.roll_base + dt * charge.roll_rate)
            {
                self.start_charge(dir_to_hero);
                return;
            }
        }

        // (d) Movement bands relative to the current desired range.
        let desired = ai.base_engage * self.mind.desired_factor;
        let tangent = Vec2::new(-dir_to_hero.y, dir_to_hero.x) * self.mind.strafe_dir;

        if edge > desired + ai.chase_margin {
            let mut speed = self.tuning.boss.speed;
            if self.mind.burst_timer > 0.0 {
                self.mind.burst_timer -= dt;
                speed *= ai.burst_multiplier;
            } else if self.rng.chance(dt * ai.burst_chance_rate) {
                self.mind.burst_timer = ai.burst_time;
            }
            self.boss.position += dir_to_hero * speed * dt;
            self.boss.moving = true;
        } else if edge > desired + ai.close_margin {
            let blend = (dir_to_hero * 0.6 + tangent * 0.8).normalize_or_zero();
            self.boss.position += blend * self.tuning.boss.strafe_speed * dt;
            self.boss.strafing = true;
        } else if edge < ai.crowd_edge {
            self.mind.retreat_timer -= dt;
            if self.mind.retreat_timer <= 0.0 {
                self.mind.retreating = !self.mind.retreating;
                self.mind.retreat_timer = self.rng.range(ai.retreat_min, ai.retreat_max);
            }
            if self.mind.retreating {
                self.boss.position -= dir_to_hero * self.tuning.boss.retreat_speed * dt;
                self.boss.moving = true;
            }
        } else {
            self.boss.position += tangent * self.tuning.boss.strafe_speed * dt;
            self.boss.strafing = true;
        }
    }

    pub(crate) fn start_slam(&mut self) {
        let slam = &self.tuning.boss.slam;
        self.boss.action = Action::SlamWindup {
            remaining: slam.windup,
        };
        self.mind.slam_cooldown = slam.cooldown;
    }

    /// Freeze direction and plan the travel budget against the arena wall.
    /// The dash never re-aims.
    pub(crate) fn start_charge(&mut self, dir: Vec2) {
        let travel = self.plan_charge_travel(dir);
        let charge = &self.tuning.boss.charge;
        self.boss.action = Action::ChargeWindup {
            remaining: charge.windup,
            dir,
            travel,
        };
        self.mind.charge_cooldown = charge.cooldown;
        self.boss.facing_yaw = dir.x.atan2(dir.y);
    }

    /// Ray-circle intersection against the arena boundary, stopping short of
    /// the wall by the margin, clamped to the travel window.
    pub(crate) fn plan_charge_travel(&self, dir: Vec2) -> f32 {
        let charge = &self.tuning.boss.charge;
        let radius = self.tuning.boss.arena_radius - charge.wall_margin;
        let p = self.boss.position;
        let pd = p.dot(dir);
        let disc = pd * pd - (p.length_squared() - radius * radius);
        let travel = if disc > 0.0 {
            -pd + disc.sqrt()
        } else {
            charge.min_travel
        };
        travel.clamp(charge.min_travel, charge.max_travel)
    }
}
