//! Scene domain: top-down 2D rendition for the flat renderer mode.
//!
//! Circles for fighters, a tick for facing, tint for state. World x maps to
//! screen x and world z to negative screen y, so "away from the start
//! camera" is up.

use bevy::prelude::*;

use crate::sim::Battle;
use crate::sim::combatant::CombatantState;
use crate::sim::events::Fighter;

#[derive(Component)]
pub struct FlatFighter {
    pub fighter: Fighter,
}

const HERO_COLOR: Color = Color::srgb(0.35, 0.7, 0.85);
const BOSS_COLOR: Color = Color::srgb(0.75, 0.3, 0.22);

pub(crate) fn spawn_flat_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // Arena disc and rim.
    commands.spawn((
        Mesh2d(meshes.add(Circle::new(15.8))),
        MeshMaterial2d(materials.add(Color::srgb(0.15, 0.13, 0.11))),
    ));
    commands.spawn((
        Mesh2d(meshes.add(Annulus::new(15.8, 16.1))),
        MeshMaterial2d(materials.add(Color::srgb(0.8, 0.5, 0.2))),
        Transform::from_xyz(0.0, 0.0, 0.1),
    ));

    for (fighter, radius, color, z) in [
        (Fighter::Hero, 0.5, HERO_COLOR, 1.0),
        (Fighter::Boss, 0.95, BOSS_COLOR, 0.9),
    ] {
        let body = commands
            .spawn((
                FlatFighter { fighter },
                Mesh2d(meshes.add(Circle::new(radius))),
                MeshMaterial2d(materials.add(color)),
                Transform::from_xyz(0.0, 0.0, z),
            ))
            .id();
        // Facing tick.
        commands.spawn((
            Mesh2d(meshes.add(Rectangle::new(0.12, 0.4))),
            MeshMaterial2d(materials.add(Color::srgb(0.95, 0.95, 0.9))),
            Transform::from_xyz(0.0, radius + 0.1, 0.05),
            ChildOf(body),
        ));
    }
}

pub(crate) fn sync_flat_fighters(
    battle: Res<Battle>,
    mut fighters: Query<(&FlatFighter, &mut Transform)>,
) {
    for (flat, mut transform) in &mut fighters {
        let fighter = match flat.fighter {
            Fighter::Hero => &battle.0.hero,
            Fighter::Boss => &battle.0.boss,
        };
        transform.translation.x = fighter.position.x;
        transform.translation.y = -fighter.position.y;
        transform.rotation =
            Quat::from_rotation_z(fighter.facing_yaw + std::f32::consts::PI);
        // A jumping hero reads as a slightly bigger circle.
        let scale = 1.0 + fighter.height * 0.15;
        transform.scale = Vec3::splat(scale);
    }
}

pub(crate) fn tint_flat_fighters(
    battle: Res<Battle>,
    fighters: Query<(&FlatFighter, &MeshMaterial2d<ColorMaterial>)>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (flat, material) in &fighters {
        let (fighter, base) = match flat.fighter {
            Fighter::Hero => (&battle.0.hero, HERO_COLOR),
            Fighter::Boss => (&battle.0.boss, BOSS_COLOR),
        };
        let color = match fighter.state {
            CombatantState::Dead => Color::srgb(0.35, 0.35, 0.35),
            CombatantState::Hurt => Color::srgb(1.0, 0.9, 0.85),
            CombatantState::Stun => Color::srgb(0.95, 0.85, 0.3),
            CombatantState::Attack | CombatantState::Slam => Color::srgb(1.0, 0.6, 0.3),
            _ => base,
        };
        if let Some(material) = materials.get_mut(&material.0) {
            material.color = color;
        }
    }
}
