//! Scene domain: static arena geometry and lighting.

use bevy::prelude::*;

use super::Pillar;

const GROUND_RADIUS: f32 = 17.0;
const RUNE_RING_RADIUS: f32 = 16.2;
const PILLAR_RING_RADIUS: f32 = 15.4;
const PILLAR_COUNT: usize = 10;
const PILLAR_RADIUS: f32 = 0.45;
const PILLAR_HEIGHT: f32 = 3.4;

pub(crate) fn spawn_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let flat = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);

    // Sand floor.
    commands.spawn((
        Mesh3d(meshes.add(Circle::new(GROUND_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.42, 0.36, 0.28),
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::from_rotation(flat),
    ));

    // Faintly glowing rune ring just inside the wall.
    commands.spawn((
        Mesh3d(meshes.add(Annulus::new(RUNE_RING_RADIUS - 0.25, RUNE_RING_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.55, 0.2),
            emissive: LinearRgba::new(1.4, 0.7, 0.15, 1.0),
            unlit: false,
            ..default()
        })),
        Transform::from_rotation(flat).with_translation(Vec3::Y * 0.02),
    ));

    // Pillar ring. Blend alpha so the camera can ghost whichever pillar
    // blocks the view.
    let pillar_mesh = meshes.add(Cylinder::new(PILLAR_RADIUS, PILLAR_HEIGHT));
    for i in 0..PILLAR_COUNT {
        let angle = i as f32 / PILLAR_COUNT as f32 * std::f32::consts::TAU;
        let base = Vec2::new(angle.cos(), angle.sin()) * PILLAR_RING_RADIUS;
        commands.spawn((
            Pillar {
                base,
                radius: PILLAR_RADIUS,
            },
            Mesh3d(pillar_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(0.55, 0.52, 0.48, 1.0),
                perceptual_roughness: 0.8,
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::from_translation(Vec3::new(base.x, PILLAR_HEIGHT * 0.5, base.y)),
        ));
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 14.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    // Torch-warm fill at the arena center.
    commands.spawn((
        PointLight {
            intensity: 600_000.0,
            color: Color::srgb(1.0, 0.75, 0.5),
            range: 40.0,
            ..default()
        },
        Transform::from_xyz(0.0, 8.0, 0.0),
    ));
    commands.insert_resource(GlobalAmbientLight {
        color: Color::srgb(0.6, 0.65, 0.8),
        brightness: 220.0,
        ..default()
    });
}
