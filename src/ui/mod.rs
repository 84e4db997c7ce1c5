//! UI domain: battle HUD and outcome banner.

mod banner;
mod hud_boss;
mod hud_hero;

use bevy::prelude::*;

use crate::core::ArenaSet;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (
                hud_hero::spawn_hero_hud,
                hud_boss::spawn_boss_hud,
                spawn_controls_hint,
            ),
        )
        .add_systems(
            Update,
            (
                hud_hero::update_hero_hud,
                hud_boss::update_boss_hud,
                banner::update_banner,
            )
                .in_set(ArenaSet::Present),
        );
    }
}

fn spawn_controls_hint(mut commands: Commands) {
    commands.spawn((
        Text::new("WASD move | Shift run | J tap light, hold heavy | Space jump | R restart"),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::srgba(0.8, 0.8, 0.8, 0.6)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(12.0),
            ..default()
        },
    ));
}
