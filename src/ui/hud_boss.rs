//! UI domain: boss HUD health bar with name plate.

use bevy::prelude::*;

use crate::sim::Battle;

pub(crate) const BOSS_HEALTHBAR_WIDTH: f32 = 460.0;
pub(crate) const BOSS_HEALTHBAR_HEIGHT: f32 = 16.0;

/// Marker for the boss's health bar fill element
#[derive(Component)]
pub struct BossHealthBarFill;

pub(crate) fn spawn_boss_hud(mut commands: Commands) {
    // Centered column at the top of the screen
    commands
        .spawn((Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            right: Val::Px(0.0),
            top: Val::Px(14.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(4.0),
            ..default()
        },))
        .with_children(|parent| {
            parent.spawn((
                Text::new("MINOTAUR"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.75, 0.6)),
            ));
            parent
                .spawn((
                    Node {
                        width: Val::Px(BOSS_HEALTHBAR_WIDTH),
                        height: Val::Px(BOSS_HEALTHBAR_HEIGHT),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.1, 0.05, 0.05, 0.8)),
                    BorderColor::all(Color::srgb(0.4, 0.25, 0.2)),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        BossHealthBarFill,
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.75, 0.15, 0.1)),
                    ));
                });
        });
}

pub(crate) fn update_boss_hud(
    battle: Res<Battle>,
    mut fill_query: Query<&mut Node, With<BossHealthBarFill>>,
) {
    let percent = battle.0.boss.hp_percent();
    for mut node in &mut fill_query {
        node.width = Val::Percent(percent * 100.0);
    }
}
