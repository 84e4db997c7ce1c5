//! Simulation domain: per-frame outputs for the presentation layer.

use bevy::math::Vec2;

use crate::sim::combatant::AttackKind;

/// Which combatant an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fighter {
    Hero,
    Boss,
}

/// Battle result. Set exactly once when a combatant dies; cleared only by an
/// explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    None,
    Win,
    Lose,
}

/// One-shot simulation events drained by feedback, audio, and UI each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    HitLanded {
        attacker: Fighter,
        target: Fighter,
        kind: HitKind,
        damage: f32,
        point: Vec2,
    },
    AttackStarted {
        actor: Fighter,
        kind: AttackKind,
    },
    Jumped,
    ChargeLaunched {
        dir: Vec2,
    },
    /// Cosmetic ring; fires at slam impact regardless of whether it landed.
    SlamShockwave {
        point: Vec2,
    },
    OutcomeChanged(Outcome),
}

/// Impact weight of a landed hit, used to pick hit-stop, shake, and cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Light,
    Heavy,
    BossMelee,
    Charge,
    Slam,
}
