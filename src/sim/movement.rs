//! Simulation domain: hero locomotion, jump physics, lock-on, separation.

use bevy::math::Vec2;

use crate::sim::combatant::{Action, AttackKind, turn_toward};
use crate::sim::events::{Fighter, SimEvent};
use crate::sim::resolver::advance_attack_phase;
use crate::sim::{BattleSimulation, StepInput};

impl BattleSimulation {
    /// Hero frame update. Priority order: dead, stun, hurt, active attack,
    /// then free movement. Returns true when the queued intents were offered
    /// to the action logic; the flinch early-outs return false so buffered
    /// presses survive until the hero can act on them.
    pub(crate) fn update_hero(&mut self, dt: f32, input: &StepInput) -> bool {
        if self.hero.dead {
            return false;
        }

        self.hero.attack_cooldown = (self.hero.attack_cooldown - dt).max(0.0);
        self.hero.moving = false;
        self.hero.strafing = false;

        // Vertical physics keeps integrating through hurt and stun so a
        // mid-air hit still comes back down.
        self.integrate_hero_vertical(dt);

        if self.hero.stun_timer > 0.0 {
            self.hero.stun_timer = (self.hero.stun_timer - dt).max(0.0);
            return false;
        }
        if self.hero.hurt_timer > 0.0 {
            self.hero.hurt_timer = (self.hero.hurt_timer - dt).max(0.0);
            return false;
        }

        if input.jump {
            self.try_hero_jump();
        }
        if input.attack_light {
            self.try_attack(Fighter::Hero, AttackKind::Light);
        }
        if input.attack_heavy {
            // Reduced ruleset has a single attack type.
            let kind = if self.reduced_rules {
                AttackKind::Light
            } else {
                AttackKind::Heavy
            };
            self.try_attack(Fighter::Hero, kind);
        }

        if let Action::Attack { kind, mut phase } = self.hero.action {
            let spec = self.hero_attack_spec(kind).clone();
            let (fire, finished) = advance_attack_phase(&mut phase, &spec, dt);
            self.hero.action = if finished {
                Action::None
            } else {
                Action::Attack { kind, phase }
            };
            if fire {
                self.perform_hero_hit_check(kind);
            }
            // Small forward drift so swings carry the hero into range.
            let drift = self.hero.forward() * (self.tuning.hero.attack_drift * dt);
            self.hero.position += drift;
            return true;
        }

        if input.move_dir.length_squared() > 1e-6 {
            let speed = self.tuning.hero.speed
                * if input.run {
                    self.tuning.hero.run_multiplier
                } else {
                    1.0
                };
            self.hero.position += input.move_dir * speed * dt;
            self.hero.moving = true;
        }

        self.update_hero_yaw(dt, input);
        true
    }

    /// Lock-on: track the boss while both live and the hero is free; fall
    /// back to facing the movement direction once the boss is down.
    fn update_hero_yaw(&mut self, dt: f32, input: &StepInput) {
        if !self.boss.dead {
            let to_boss = self.boss.position - self.hero.position;
            if to_boss.length_squared() > 1e-6 {
                let target_yaw = to_boss.x.atan2(to_boss.y);
                self.hero.facing_yaw = turn_toward(
                    self.hero.facing_yaw,
                    target_yaw,
                    self.tuning.hero.lock_on_turn_rate * dt,
                );
            }
        } else if self.hero.moving {
            self.hero.facing_yaw = input.move_dir.x.atan2(input.move_dir.y);
        }
    }

    fn try_hero_jump(&mut self) {
        if self.hero.airborne || !self.hero.action.is_none() {
            return;
        }
        self.hero.vertical_velocity = self.tuning.hero.jump_velocity;
        self.hero.airborne = true;
        self.push_event(SimEvent::Jumped);
    }

    fn integrate_hero_vertical(&mut self, dt: f32) {
        if !self.hero.airborne {
            return;
        }
        self.hero.height += self.hero.vertical_velocity * dt;
        self.hero.vertical_velocity -= self.tuning.hero.gravity * dt;
        if self.hero.height <= 0.0 {
            self.hero.height = 0.0;
            self.hero.vertical_velocity = 0.0;
            self.hero.airborne = false;
        }
    }

    /// Push overlapping colliders apart along the separating axis. A dead
    /// combatant is never moved; the survivor absorbs the full correction.
    /// The push is capped per frame so resolution never pops.
    pub(crate) fn resolve_separation(&mut self) {
        let slack = self.tuning.impact.separation_slack;
        let max_push = self.tuning.impact.separation_max_push;
        let delta = self.boss.position - self.hero.position;
        let dist = delta.length();
        let min_dist = self.hero.collider_radius + self.boss.collider_radius - slack;
        if dist >= min_dist {
            return;
        }
        let axis = if dist > 1e-4 {
            delta / dist
        } else {
            Vec2::new(0.0, 1.0)
        };
        let push = (min_dist - dist).min(max_push);
        match (self.hero.dead, self.boss.dead) {
            (false, false) => {
                self.hero.position -= axis * (push * 0.5);
                self.boss.position += axis * (push * 0.5);
            }
            (true, false) => self.boss.position += axis * push,
            (false, true) => self.hero.position -= axis * push,
            (true, true) => {}
        }
    }

    /// Both fighters stay inside their arena bound every frame, knockback
    /// and dashes included.
    pub(crate) fn clamp_to_arena(&mut self) {
        clamp_to_circle(&mut self.hero.position, self.tuning.hero.arena_radius);
        clamp_to_circle(&mut self.boss.position, self.tuning.boss.arena_radius);
    }
}

pub(crate) fn clamp_to_circle(position: &mut Vec2, radius: f32) {
    let len_sq = position.length_squared();
    if len_sq <= radius * radius {
        return;
    }
    *position *= radius / len_sq.sqrt();
}
