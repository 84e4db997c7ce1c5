//! UI domain: hero HUD health bar and status line.

use bevy::prelude::*;

use crate::sim::Battle;
use crate::sim::combatant::CombatantState;

pub(crate) const HERO_HEALTHBAR_WIDTH: f32 = 220.0;
pub(crate) const HERO_HEALTHBAR_HEIGHT: f32 = 20.0;
pub(crate) const HERO_HEALTHBAR_PADDING: f32 = 16.0;

/// Marker for the hero's health bar fill element
#[derive(Component)]
pub struct HeroHealthBarFill;

/// Marker for the hero's status line under the bar
#[derive(Component)]
pub struct HeroStatusText;

pub(crate) fn spawn_hero_hud(mut commands: Commands) {
    // Root container positioned at top-left
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HERO_HEALTHBAR_PADDING),
                top: Val::Px(HERO_HEALTHBAR_PADDING),
                width: Val::Px(HERO_HEALTHBAR_WIDTH),
                height: Val::Px(HERO_HEALTHBAR_HEIGHT),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
        ))
        .with_children(|parent| {
            parent.spawn((
                HeroHealthBarFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.2, 0.8, 0.3)),
            ));
        });

    commands.spawn((
        HeroStatusText,
        Text::new("IDLE"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(0.85, 0.85, 0.85, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HERO_HEALTHBAR_PADDING),
            top: Val::Px(HERO_HEALTHBAR_PADDING + HERO_HEALTHBAR_HEIGHT + 6.0),
            ..default()
        },
    ));
}

pub(crate) fn update_hero_hud(
    battle: Res<Battle>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<HeroHealthBarFill>>,
    mut status_query: Query<&mut Text, With<HeroStatusText>>,
) {
    let hero = &battle.0.hero;
    let percent = hero.hp_percent();

    for (mut node, mut bg_color) in &mut fill_query {
        node.width = Val::Percent(percent * 100.0);

        // Color gradient: green -> yellow -> red
        let color = if percent > 0.5 {
            let t = (percent - 0.5) * 2.0;
            Color::srgb(1.0 - t * 0.8, 0.8, 0.3 * (1.0 - t))
        } else {
            let t = percent * 2.0;
            Color::srgb(0.9, 0.2 + t * 0.6, 0.2)
        };
        bg_color.0 = color;
    }

    for mut text in &mut status_query {
        let label = state_label(hero.state);
        if text.0 != label {
            text.0 = label.to_string();
        }
    }
}

/// Player-facing status strings; multi-word states get real spacing.
fn state_label(state: CombatantState) -> &'static str {
    match state {
        CombatantState::Idle => "IDLE",
        CombatantState::Run => "RUNNING",
        CombatantState::Strafe => "STRAFING",
        CombatantState::Attack => "ATTACKING",
        CombatantState::Hurt => "HURT",
        CombatantState::Stun => "STUNNED",
        CombatantState::ChargeWindup => "CHARGE WINDUP",
        CombatantState::Charge => "CHARGING",
        CombatantState::SlamWindup => "SLAM WINDUP",
        CombatantState::Slam => "SLAMMING",
        CombatantState::Jump => "JUMPING",
        CombatantState::Dead => "DOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_reads_as_words() {
        let states = [
            CombatantState::Idle,
            CombatantState::Run,
            CombatantState::Strafe,
            CombatantState::Attack,
            CombatantState::Hurt,
            CombatantState::Stun,
            CombatantState::ChargeWindup,
            CombatantState::Charge,
            CombatantState::SlamWindup,
            CombatantState::Slam,
            CombatantState::Jump,
            CombatantState::Dead,
        ];
        for state in states {
            let label = state_label(state);
            assert!(!label.is_empty());
            assert!(
                label
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c == ' '),
                "label {label:?} is upper-case words, not a debug tag"
            );
        }
    }
}
