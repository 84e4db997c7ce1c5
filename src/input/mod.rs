//! Input domain: held movement state and buffered one-shot intents.
//!
//! Movement and run are sampled fresh every frame. Attacks, jump, and reset
//! are edge-triggered into `IntentQueue` and stay buffered until a
//! simulation step actually consumes them, so a press during hit-stop is
//! not lost.

use bevy::prelude::*;

use crate::core::ArenaSet;

/// Hold the attack button at least this long to release a heavy swing.
pub const HEAVY_PRESS_SECS: f32 = 0.24;

/// Continuous input for the current frame. `axis` is the raw keyboard axis
/// (x right, y away from the camera), rotated into world space by the
/// simulation.
#[derive(Resource, Debug, Default)]
pub struct HeldInput {
    pub axis: Vec2,
    pub run: bool,
}

/// Buffered one-shot intents.
#[derive(Resource, Debug, Default)]
pub struct IntentQueue {
    pub attack_light: bool,
    pub attack_heavy: bool,
    pub jump: bool,
    pub reset: bool,
}

impl IntentQueue {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// How long the attack button has been held, if it is down.
#[derive(Resource, Debug, Default)]
struct AttackPress {
    held_for: Option<f32>,
}

/// A tap is a light attack; anything held to the threshold is heavy. The
/// swing is committed on release so the two never both fire.
pub fn press_is_heavy(held_secs: f32) -> bool {
    held_secs >= HEAVY_PRESS_SECS
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeldInput>()
            .init_resource::<IntentQueue>()
            .init_resource::<AttackPress>()
            .add_systems(
                Update,
                (sample_held_input, collect_intents).in_set(ArenaSet::Input),
            );
    }
}

pub(crate) fn sample_held_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut held: ResMut<HeldInput>,
) {
    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    held.axis = axis;
    held.run = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
}

pub(crate) fn collect_intents(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut press: ResMut<AttackPress>,
    mut intents: ResMut<IntentQueue>,
) {
    let attack_down = keys.pressed(KeyCode::KeyJ) || mouse.pressed(MouseButton::Left);
    if attack_down {
        let held = press.held_for.get_or_insert(0.0);
        *held += time.delta_secs();
    } else if let Some(held) = press.held_for.take() {
        if press_is_heavy(held) {
            intents.attack_heavy = true;
        } else {
            intents.attack_light = true;
        }
    }

    if keys.just_pressed(KeyCode::Space) {
        intents.jump = true;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        intents.reset = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_is_light_hold_is_heavy() {
        assert!(!press_is_heavy(0.0));
        assert!(!press_is_heavy(0.1));
        assert!(press_is_heavy(HEAVY_PRESS_SECS));
        assert!(press_is_heavy(1.5));
    }

    #[test]
    fn clear_drops_every_intent() {
        let mut intents = IntentQueue {
            attack_light: true,
            attack_heavy: true,
            jump: true,
            reset: true,
        };
        intents.clear();
        assert!(!intents.attack_light && !intents.attack_heavy);
        assert!(!intents.jump && !intents.reset);
    }
}
