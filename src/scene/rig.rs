//! Scene domain: articulated placeholder rigs and procedural posing.
//!
//! Each fighter gets a small hierarchy of primitive meshes hung off named
//! joints. Posing is purely cosmetic: every frame a target angle set is
//! derived from the fighter's display state and eased into, so a swapped-in
//! model that lacks a joint simply loses that channel and nothing else.

use bevy::prelude::*;

use super::FighterRig;
use crate::sim::Battle;
use crate::sim::combatant::{Action, AttackPhase, Combatant, CombatantState};
use crate::sim::events::Fighter;

/// Closed set of joints the poser drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointSlot {
    Torso,
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

/// A poseable joint. Meshes hang below it so rotation pivots at the joint,
/// not the mesh center.
#[derive(Component)]
pub struct Joint {
    pub fighter: Fighter,
    pub slot: JointSlot,
    pub rest: Vec3,
}

/// Shared material of a rig's placeholder parts, kept around for hit flash.
#[derive(Component)]
pub struct RigMaterial(pub Handle<StandardMaterial>);

/// Target joint angles for one frame. Arms and legs pitch about x; the torso
/// additionally dips.
#[derive(Debug, Clone, Copy, Default)]
struct Pose {
    left_arm: f32,
    right_arm: f32,
    left_leg: f32,
    right_leg: f32,
    torso_pitch: f32,
    torso_dip: f32,
    head_pitch: f32,
}

const POSE_EASE: f32 = 14.0;

pub(crate) fn spawn_rigs(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_hero_rig(&mut commands, &mut meshes, &mut materials);
    spawn_boss_rig(&mut commands, &mut meshes, &mut materials);
}

fn spawn_hero_rig(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let skin = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.5, 0.75),
        perceptual_roughness: 0.6,
        ..default()
    });
    let steel = materials.add(StandardMaterial {
        base_color: Color::srgb(0.75, 0.78, 0.82),
        metallic: 0.8,
        perceptual_roughness: 0.3,
        ..default()
    });

    let root = commands
        .spawn((
            FighterRig {
                fighter: Fighter::Hero,
            },
            RigMaterial(skin.clone()),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let torso = spawn_joint(commands, root, Fighter::Hero, JointSlot::Torso, Vec3::new(0.0, 0.95, 0.0));
    commands.spawn((
        Mesh3d(meshes.add(Capsule3d::new(0.26, 0.55))),
        MeshMaterial3d(skin.clone()),
        ChildOf(torso),
    ));

    let head = spawn_joint(commands, root, Fighter::Hero, JointSlot::Head, Vec3::new(0.0, 1.62, 0.0));
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(0.2))),
        MeshMaterial3d(skin.clone()),
        ChildOf(head),
    ));

    for (slot, x) in [(JointSlot::LeftArm, -0.38), (JointSlot::RightArm, 0.38)] {
        let shoulder = spawn_joint(commands, root, Fighter::Hero, slot, Vec3::new(x, 1.38, 0.0));
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.1, 0.5, 0.1))),
            MeshMaterial3d(skin.clone()),
            Transform::from_xyz(0.0, -0.25, 0.0),
            ChildOf(shoulder),
        ));
        if slot == JointSlot::RightArm {
            // Sword hangs from the weapon hand.
            commands.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.05, 0.8, 0.05))),
                MeshMaterial3d(steel.clone()),
                Transform::from_xyz(0.0, -0.7, 0.12),
                ChildOf(shoulder),
            ));
        }
    }

    for (slot, x) in [(JointSlot::LeftLeg, -0.16), (JointSlot::RightLeg, 0.16)] {
        let hip = spawn_joint(commands, root, Fighter::Hero, slot, Vec3::new(x, 0.72, 0.0));
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.12, 0.6, 0.12))),
            MeshMaterial3d(skin.clone()),
            Transform::from_xyz(0.0, -0.3, 0.0),
            ChildOf(hip),
        ));
    }
}

fn spawn_boss_rig(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let hide = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.26, 0.2),
        perceptual_roughness: 0.85,
        ..default()
    });
    let horn = materials.add(StandardMaterial {
        base_color: Color::srgb(0.85, 0.8, 0.7),
        perceptual_roughness: 0.5,
        ..default()
    });

    let root = commands
        .spawn((
            FighterRig {
                fighter: Fighter::Boss,
            },
            RigMaterial(hide.clone()),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let torso = spawn_joint(commands, root, Fighter::Boss, JointSlot::Torso, Vec3::new(0.0, 1.45, 0.0));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.9, 1.1, 0.6))),
        MeshMaterial3d(hide.clone()),
        ChildOf(torso),
    ));

    let head = spawn_joint(commands, root, Fighter::Boss, JointSlot::Head, Vec3::new(0.0, 2.3, 0.1));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.45, 0.4, 0.45))),
        MeshMaterial3d(hide.clone()),
        ChildOf(head),
    ));
    for x in [-0.3_f32, 0.3] {
        commands.spawn((
            Mesh3d(meshes.add(Cone::new(0.08, 0.5))),
            MeshMaterial3d(horn.clone()),
            Transform::from_xyz(x, 0.25, 0.0)
                .with_rotation(Quat::from_rotation_z(-x.signum() * 0.5)),
            ChildOf(head),
        ));
    }

    for (slot, x) in [(JointSlot::LeftArm, -0.65), (JointSlot::RightArm, 0.65)] {
        let shoulder = spawn_joint(commands, root, Fighter::Boss, slot, Vec3::new(x, 1.9, 0.0));
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.22, 0.8, 0.22))),
            MeshMaterial3d(hide.clone()),
            Transform::from_xyz(0.0, -0.4, 0.0),
            ChildOf(shoulder),
        ));
    }
    for (slot, x) in [(JointSlot::LeftLeg, -0.28), (JointSlot::RightLeg, 0.28)] {
        let hip = spawn_joint(commands, root, Fighter::Boss, slot, Vec3::new(x, 0.9, 0.0));
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.26, 0.9, 0.26))),
            MeshMaterial3d(hide.clone()),
            Transform::from_xyz(0.0, -0.45, 0.0),
            ChildOf(hip),
        ));
    }
}

fn spawn_joint(
    commands: &mut Commands,
    root: Entity,
    fighter: Fighter,
    slot: JointSlot,
    rest: Vec3,
) -> Entity {
    commands
        .spawn((
            Joint {
                fighter,
                slot,
                rest,
            },
            Transform::from_translation(rest),
            Visibility::default(),
            ChildOf(root),
        ))
        .id()
}

/// Ease every joint toward the pose its fighter's state asks for.
pub(crate) fn pose_rigs(
    time: Res<Time>,
    battle: Res<Battle>,
    mut joints: Query<(&Joint, &mut Transform)>,
) {
    let t = time.elapsed_secs();
    let blend = (POSE_EASE * time.delta_secs()).min(1.0);
    let hero_pose = compute_pose(&battle.0.hero, t);
    let boss_pose = compute_pose(&battle.0.boss, t);

    for (joint, mut transform) in &mut joints {
        let pose = match joint.fighter {
            Fighter::Hero => &hero_pose,
            Fighter::Boss => &boss_pose,
        };
        let (pitch, dip) = match joint.slot {
            JointSlot::Torso => (pose.torso_pitch, pose.torso_dip),
            JointSlot::Head => (pose.head_pitch, 0.0),
            JointSlot::LeftArm => (pose.left_arm, 0.0),
            JointSlot::RightArm => (pose.right_arm, 0.0),
            JointSlot::LeftLeg => (pose.left_leg, 0.0),
            JointSlot::RightLeg => (pose.right_leg, 0.0),
        };
        let target = Quat::from_rotation_x(pitch);
        transform.rotation = transform.rotation.slerp(target, blend);
        let target_y = joint.rest.y + dip;
        transform.translation.y += (target_y - transform.translation.y) * blend;
    }
}

fn compute_pose(fighter: &Combatant, t: f32) -> Pose {
    let mut pose = Pose::default();
    match fighter.state {
        CombatantState::Idle => {
            let sway = (t * 1.8).sin() * 0.06;
            pose.left_arm = sway;
            pose.right_arm = -sway;
            pose.torso_dip = (t * 2.2).sin() * 0.02;
        }
        CombatantState::Run | CombatantState::Strafe => {
            let swing = (t * 9.0).sin() * 0.7;
            pose.left_leg = swing;
            pose.right_leg = -swing;
            pose.left_arm = -swing * 0.5;
            pose.right_arm = swing * 0.5;
            pose.torso_pitch = 0.12;
        }
        CombatantState::Attack => {
            // Raised through the windup, swung through the follow-through.
            let winding = matches!(
                fighter.action,
                Action::Attack {
                    phase: AttackPhase::Windup { .. },
                    ..
                }
            );
            pose.right_arm = if winding { -2.1 } else { 0.9 };
            pose.torso_pitch = if winding { -0.1 } else { 0.3 };
        }
        CombatantState::Hurt => {
            pose.torso_pitch = -0.3;
            pose.head_pitch = -0.25;
            pose.left_arm = -0.4;
            pose.right_arm = -0.4;
        }
        CombatantState::Stun => {
            pose.head_pitch = (t * 14.0).sin() * 0.25;
            pose.torso_pitch = -0.15;
            pose.left_arm = 0.5;
            pose.right_arm = -0.5;
        }
        CombatantState::ChargeWindup => {
            pose.torso_pitch = -0.35;
            pose.head_pitch = -0.4;
            pose.left_arm = -0.6;
            pose.right_arm = -0.6;
        }
        CombatantState::Charge => {
            pose.torso_pitch = 0.5;
            pose.head_pitch = 0.2;
            pose.left_arm = 0.8;
            pose.right_arm = 0.8;
        }
        CombatantState::SlamWindup => {
            pose.left_arm = -2.7;
            pose.right_arm = -2.7;
            pose.torso_pitch = -0.2;
        }
        CombatantState::Slam => {
            pose.left_arm = 0.6;
            pose.right_arm = 0.6;
            pose.torso_pitch = 0.45;
        }
        CombatantState::Jump => {
            pose.left_leg = -0.5;
            pose.right_leg = 0.4;
            pose.left_arm = -0.3;
            pose.right_arm = -0.3;
        }
        CombatantState::Dead => {
            pose.torso_pitch = -1.4;
            pose.head_pitch = -0.6;
            pose.left_arm = -1.2;
            pose.right_arm = -1.2;
            pose.torso_dip = -0.5;
        }
    }
    pose
}
