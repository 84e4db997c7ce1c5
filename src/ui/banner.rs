//! UI domain: outcome banner overlay.

use bevy::prelude::*;

use crate::feedback::FeedbackState;
use crate::sim::events::Outcome;

/// Marker for the outcome banner overlay
#[derive(Component)]
pub struct BannerUI;

/// Spawn the banner when the battle ends and tear it down after a reset
/// clears the outcome.
pub(crate) fn update_banner(
    mut commands: Commands,
    feedback: Res<FeedbackState>,
    existing: Query<Entity, With<BannerUI>>,
) {
    match feedback.outcome {
        Some(outcome) => {
            if !existing.is_empty() {
                return;
            }
            let (title, color) = match outcome {
                Outcome::Win => ("THE BEAST FALLS", Color::srgb(0.95, 0.8, 0.3)),
                _ => ("YOU FELL", Color::srgb(0.8, 0.15, 0.15)),
            };
            commands
                .spawn((
                    BannerUI,
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(0.0),
                        right: Val::Px(0.0),
                        top: Val::Px(0.0),
                        bottom: Val::Px(0.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        flex_direction: FlexDirection::Column,
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
                    ZIndex(100),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new(title),
                        TextFont {
                            font_size: 64.0,
                            ..default()
                        },
                        TextColor(color),
                        Node {
                            margin: UiRect::bottom(Val::Px(30.0)),
                            ..default()
                        },
                    ));
                    parent.spawn((
                        Text::new("Press [R] to fight again"),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.6, 0.6, 0.6)),
                    ));
                });
        }
        None => {
            for entity in &existing {
                commands.entity(entity).despawn();
            }
        }
    }
}
