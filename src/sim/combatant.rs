//! Simulation domain: combatant state, actions, and attack phases.

use bevy::math::Vec2;

/// Which attack move an `Action::Attack` is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Light,
    Heavy,
    BossMelee,
}

/// Timed phases of a basic attack. The hit test fires exactly once, at the
/// windup -> active transition; `did_hit` keeps re-entry from double-applying
/// damage at any frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackPhase {
    Windup { remaining: f32 },
    Active { remaining: f32, did_hit: bool },
}

/// Current committed action of a combatant. At most one is active per frame;
/// `None` means the combatant is free to move or start something new.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Action {
    #[default]
    None,
    Attack {
        kind: AttackKind,
        phase: AttackPhase,
    },
    /// Telegraph before the dash. Direction and travel are frozen here and
    /// never re-aimed during the dash itself.
    ChargeWindup {
        remaining: f32,
        dir: Vec2,
        travel: f32,
    },
    Charge {
        remaining: f32,
        dir: Vec2,
        travel: f32,
        moved: f32,
        did_hit: bool,
    },
    SlamWindup {
        remaining: f32,
    },
    Slam {
        /// Counts down to the impact moment within the active phase.
        impact_delay: f32,
        remaining: f32,
        did_hit: bool,
    },
}

impl Action {
    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }

    pub fn is_attack(&self) -> bool {
        matches!(self, Action::Attack { .. })
    }
}

/// Display tag consumed by animation and HUD. Recomputed fresh every frame
/// from timers and the current action, never stored as history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombatantState {
    #[default]
    Idle,
    Run,
    Strafe,
    Attack,
    Hurt,
    Stun,
    ChargeWindup,
    Charge,
    SlamWindup,
    Slam,
    Jump,
    Dead,
}

/// One fighter in the arena. Hero and boss share this shape; boss-only AI
/// timers live in `BossMind`.
#[derive(Debug, Clone)]
pub struct Combatant {
    /// Arena-plane position (x, z).
    pub position: Vec2,
    /// Vertical offset above the arena floor (hero jump only).
    pub height: f32,
    pub vertical_velocity: f32,
    pub airborne: bool,
    /// Radians, 0 = +z.
    pub facing_yaw: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub dead: bool,
    pub action: Action,
    pub state: CombatantState,
    pub hurt_timer: f32,
    pub stun_timer: f32,
    pub attack_cooldown: f32,
    /// Moving under direct input this frame (display only).
    pub moving: bool,
    pub strafing: bool,
    pub collider_radius: f32,
}

impl Combatant {
    pub fn new(max_hp: f32, collider_radius: f32, position: Vec2, facing_yaw: f32) -> Self {
        Self {
            position,
            height: 0.0,
            vertical_velocity: 0.0,
            airborne: false,
            facing_yaw,
            hp: max_hp,
            max_hp,
            dead: false,
            action: Action::None,
            state: CombatantState::Idle,
            hurt_timer: 0.0,
            stun_timer: 0.0,
            attack_cooldown: 0.0,
            moving: false,
            strafing: false,
            collider_radius,
        }
    }

    /// Full in-place re-init to battle-start values. Collider radius is
    /// derived from the loaded model and survives the reset.
    pub fn reset(&mut self, position: Vec2, facing_yaw: f32) {
        self.position = position;
        self.height = 0.0;
        self.vertical_velocity = 0.0;
        self.airborne = false;
        self.facing_yaw = facing_yaw;
        self.hp = self.max_hp;
        self.dead = false;
        self.action = Action::None;
        self.state = CombatantState::Idle;
        self.hurt_timer = 0.0;
        self.stun_timer = 0.0;
        self.attack_cooldown = 0.0;
        self.moving = false;
        self.strafing = false;
    }

    /// Unit forward vector on the arena plane.
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.facing_yaw.sin(), self.facing_yaw.cos())
    }

    pub fn hp_percent(&self) -> f32 {
        if self.max_hp <= 0.0 {
            return 0.0;
        }
        self.hp / self.max_hp
    }

    /// Clamped damage application. Returns true when this call killed the
    /// combatant. No-op once dead.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.dead {
            return false;
        }
        self.hp = (self.hp - amount).max(0.0);
        if self.hp <= 0.0 {
            self.dead = true;
            self.action = Action::None;
            return true;
        }
        false
    }

    /// Committed to an action, hurt, or stunned: decision logic must wait.
    pub fn is_committed(&self) -> bool {
        !self.action.is_none() || self.hurt_timer > 0.0 || self.stun_timer > 0.0
    }

    /// Display tag for the current frame.
    pub fn display_state(&self) -> CombatantState {
        if self.dead {
            return CombatantState::Dead;
        }
        if self.stun_timer > 0.0 {
            return CombatantState::Stun;
        }
        if self.hurt_timer > 0.0 {
            return CombatantState::Hurt;
        }
        match self.action {
            Action::Attack { .. } => CombatantState::Attack,
            Action::ChargeWindup { .. } => CombatantState::ChargeWindup,
            Action::Charge { .. } => CombatantState::Charge,
            Action::SlamWindup { .. } => CombatantState::SlamWindup,
            Action::Slam { .. } => CombatantState::Slam,
            Action::None => {
                if self.airborne {
                    CombatantState::Jump
                } else if self.strafing {
                    CombatantState::Strafe
                } else if self.moving {
                    CombatantState::Run
                } else {
                    CombatantState::Idle
                }
            }
        }
    }
}

/// Wrap an angle difference to the shortest path in (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % std::f32::consts::TAU;
    if a > std::f32::consts::PI {
        a -= std::f32::consts::TAU;
    } else if a < -std::f32::consts::PI {
        a += std::f32::consts::TAU;
    }
    a
}

/// Rotate `yaw` toward `target_yaw` by at most `max_step` radians along the
/// shortest path.
pub fn turn_toward(yaw: f32, target_yaw: f32, max_step: f32) -> f32 {
    let diff = wrap_angle(target_yaw - yaw);
    yaw + diff.clamp(-max_step, max_step)
}
