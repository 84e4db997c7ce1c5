use bevy::math::Vec2;

use super::*;
use super::combatant::{Action, AttackKind, AttackPhase, CombatantState, turn_toward, wrap_angle};
use super::events::{Fighter, HitKind, Outcome, SimEvent};
use super::params::{AttackSpec, SimTuning};
use super::resolver::advance_attack_phase;

fn battle(seed: u64) -> BattleSimulation {
    BattleSimulation::new(SimTuning::default(), seed)
}

/// Hero and boss adjacent, hero facing the boss, at the given edge distance.
fn battle_at_edge(seed: u64, edge: f32) -> BattleSimulation {
    let mut sim = battle(seed);
    let dist = sim.hero.collider_radius + sim.boss.collider_radius + edge;
    sim.hero.position = Vec2::ZERO;
    sim.hero.facing_yaw = std::f32::consts::PI;
    sim.boss.position = Vec2::new(0.0, -dist);
    sim.boss.facing_yaw = 0.0;
    sim
}

#[test]
fn attack_phase_fires_once_at_hit_fraction() {
    let spec = AttackSpec {
        duration: 0.36,
        hit_fraction: 0.55,
        damage: 34.0,
        range: 0.95,
        cone: 0.2,
        knockback: 0.24,
        cooldown: 0.58,
    };
    let mut phase = AttackPhase::Windup {
        remaining: spec.duration * spec.hit_fraction,
    };
    let (fire, finished) = advance_attack_phase(&mut phase, &spec, 0.1);
    assert!(!fire && !finished);
    let (fire, finished) = advance_attack_phase(&mut phase, &spec, 0.1);
    assert!(fire, "hit fires at the windup -> active transition");
    assert!(!finished);
    // Already in the active phase; no second fire.
    let (fire, finished) = advance_attack_phase(&mut phase, &spec, 0.2);
    assert!(!fire);
    assert!(finished);
}

#[test]
fn light_hit_applies_spec_damage_and_knockback() {
    let mut sim = battle_at_edge(1, 0.2);
    let boss_before = sim.boss.position;

    sim.perform_hero_hit_check(AttackKind::Light);

    assert_eq!(sim.boss.hp, 260.0 - 34.0);
    assert!(sim.boss.hurt_timer > 0.0);
    assert!(
        (sim.boss.position.distance(boss_before) - 0.24).abs() < 1e-4,
        "knockback displaces the boss by exactly the tuned amount"
    );
    assert!((sim.hit_stop - 0.05).abs() < 1e-6);
    let events = sim.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::HitLanded {
            attacker: Fighter::Hero,
            kind: HitKind::Light,
            ..
        }
    )));
}

#[test]
fn light_swing_lands_at_most_once() {
    let mut sim = battle_at_edge(2, 0.2);
    let mut hero_hits = 0;
    for frame in 0..100 {
        let input = StepInput {
            attack_light: frame == 0,
            ..Default::default()
        };
        sim.step(0.016, &input);
        for event in sim.take_events() {
            if matches!(
                event,
                SimEvent::HitLanded {
                    attacker: Fighter::Hero,
                    ..
                }
            ) {
                hero_hits += 1;
            }
        }
    }
    assert_eq!(hero_hits, 1, "one buffered press, one swing, one hit");
}

#[test]
fn attack_rejected_on_cooldown_leaves_state_untouched() {
    let mut sim = battle_at_edge(3, 0.2);
    sim.hero.attack_cooldown = 0.5;
    sim.try_attack(Fighter::Hero, AttackKind::Light);
    assert!(sim.hero.action.is_none());
    assert_eq!(sim.hero.attack_cooldown, 0.5);
    assert!(sim.take_events().is_empty());
}

#[test]
fn attack_rejected_while_committed_or_airborne() {
    let mut sim = battle_at_edge(4, 0.2);
    sim.try_attack(Fighter::Hero, AttackKind::Light);
    let committed = sim.hero.action;
    sim.try_attack(Fighter::Hero, AttackKind::Heavy);
    assert_eq!(sim.hero.action, committed, "no mid-swing cancel");

    let mut sim = battle_at_edge(5, 0.2);
    sim.hero.airborne = true;
    sim.try_attack(Fighter::Hero, AttackKind::Light);
    assert!(sim.hero.action.is_none());
}

#[test]
fn slam_hit_damages_stuns_and_rings() {
    let mut sim = battle_at_edge(6, 0.5);
    sim.perform_slam_hit_check();

    assert_eq!(sim.hero.hp, 120.0 - 20.0);
    assert!(
        sim.hero.stun_timer >= 0.9,
        "slam stuns well past a normal hurt flinch"
    );
    assert!((sim.hit_stop - 0.08).abs() < 1e-6);
    let events = sim.take_events();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, SimEvent::SlamShockwave { .. }))
    );

    // The stun shows up as the display state on the next step.
    sim.step(0.016, &StepInput::default());
    assert_eq!(sim.hero.state, CombatantState::Stun);
}

#[test]
fn slam_shockwave_plays_even_on_a_miss() {
    let mut sim = battle_at_edge(7, 2.5);
    sim.perform_slam_hit_check();
    assert_eq!(sim.hero.hp, 120.0, "out of radius, no damage");
    let events = sim.take_events();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, SimEvent::SlamShockwave { .. }))
    );
}

#[test]
fn charge_travel_is_clamped_to_window() {
    let mut sim = battle(8);
    let charge = sim.tuning.boss.charge.clone();

    // Mid-arena, long runway: clamped to the max.
    sim.boss.position = Vec2::new(0.0, -7.0);
    let travel = sim.plan_charge_travel(Vec2::new(0.0, 1.0));
    assert_eq!(travel, charge.max_travel);

    // Facing the nearby wall: clamped up to the min.
    sim.boss.position = Vec2::new(0.0, 14.0);
    let travel = sim.plan_charge_travel(Vec2::new(0.0, 1.0));
    assert_eq!(travel, charge.min_travel);
}

#[test]
fn charge_misses_a_sideways_hero() {
    let mut sim = battle(9);
    sim.boss.position = Vec2::ZERO;
    // In range but perpendicular to the dash line.
    sim.hero.position = Vec2::new(2.0, 0.0);
    let landed = sim.perform_charge_hit_check(Vec2::new(0.0, 1.0));
    assert!(!landed);
    assert_eq!(sim.hero.hp, 120.0);
}

#[test]
fn charge_connects_along_the_dash_line() {
    let mut sim = battle(10);
    sim.boss.position = Vec2::ZERO;
    sim.hero.position = Vec2::new(0.0, 2.0);
    let landed = sim.perform_charge_hit_check(Vec2::new(0.0, 1.0));
    assert!(landed);
    assert_eq!(sim.hero.hp, 120.0 - 30.0);
}

#[test]
fn health_stays_in_range_over_a_long_fight() {
    let mut sim = battle(11);
    let input = StepInput {
        move_dir: Vec2::new(0.0, -1.0),
        run: true,
        attack_light: true,
        ..Default::default()
    };
    for _ in 0..2000 {
        sim.step(0.016, &input);
        for c in [&sim.hero, &sim.boss] {
            assert!(c.hp.is_finite());
            assert!(c.hp >= 0.0 && c.hp <= c.max_hp);
        }
        sim.take_events();
    }
}

#[test]
fn fighters_never_leave_the_arena() {
    let mut sim = battle(12);
    let input = StepInput {
        move_dir: Vec2::new(0.0, 1.0),
        run: true,
        ..Default::default()
    };
    for _ in 0..600 {
        sim.step(0.016, &input);
        assert!(sim.hero.position.length() <= sim.tuning.hero.arena_radius + 1e-3);
        assert!(sim.boss.position.length() <= sim.tuning.boss.arena_radius + 1e-3);
        sim.take_events();
    }
}

#[test]
fn death_is_terminal_and_outcome_set_once() {
    let mut sim = battle_at_edge(13, 0.2);
    sim.hero.hp = 10.0;
    sim.boss.facing_yaw = 0.0;
    sim.perform_boss_hit_check();
    assert!(sim.hero.dead);
    assert_eq!(sim.outcome, Outcome::Lose);

    // A later boss kill cannot flip an already-decided battle.
    sim.boss.take_damage(1000.0);
    assert!(sim.boss.dead);
    assert_eq!(sim.outcome, Outcome::Lose);

    // Dead fighters take no further damage and start no actions.
    sim.hero.take_damage(50.0);
    assert_eq!(sim.hero.hp, 0.0);
    sim.try_attack(Fighter::Hero, AttackKind::Light);
    assert!(sim.hero.action.is_none());
    for _ in 0..30 {
        sim.step(0.016, &StepInput::default());
        assert!(sim.hero.dead && sim.boss.dead);
    }
}

#[test]
fn reset_restores_battle_start_but_keeps_collider_radii() {
    let mut sim = battle(14);
    sim.set_hero_collider_radius(0.7);
    sim.hero.take_damage(80.0);
    sim.boss.take_damage(1000.0);
    sim.hero.position = Vec2::new(3.0, 3.0);
    sim.hero.stun_timer = 0.4;
    sim.hit_stop = 0.05;
    sim.outcome = Outcome::Win;

    sim.reset();

    assert_eq!(sim.hero.hp, sim.hero.max_hp);
    assert_eq!(sim.boss.hp, sim.boss.max_hp);
    assert!(!sim.hero.dead && !sim.boss.dead);
    assert_eq!(sim.hero.position, HERO_START);
    assert_eq!(sim.boss.position, BOSS_START);
    assert_eq!(sim.outcome, Outcome::None);
    assert_eq!(sim.hit_stop, 0.0);
    assert!(sim.hero.action.is_none() && sim.boss.action.is_none());
    assert_eq!(sim.hero.stun_timer, 0.0);
    assert_eq!(sim.hero.collider_radius, 0.7, "asset-derived radius persists");
    assert!(sim.take_events().is_empty());
}

#[test]
fn frame_delta_is_clamped() {
    let mut sim = battle(15);
    let start = sim.hero.position;
    let input = StepInput {
        move_dir: Vec2::new(0.0, -1.0),
        ..Default::default()
    };
    // A stalled 10 second frame integrates as one clamped step.
    sim.step(10.0, &input);
    let moved = sim.hero.position.distance(start);
    assert!(moved <= sim.tuning.hero.speed * params::MAX_FRAME_DT + 1e-4);

    // Negative deltas never rewind the battle.
    let before = sim.hero.position;
    sim.step(-1.0, &input);
    assert_eq!(sim.hero.position, before);
}

#[test]
fn hit_stop_suspends_combat_but_not_its_own_timer() {
    let mut sim = battle_at_edge(16, 0.2);
    sim.hit_stop = 0.06;
    let hero_before = sim.hero.position;
    let boss_before = sim.boss.position;
    let input = StepInput {
        move_dir: Vec2::new(1.0, 0.0),
        run: true,
        attack_light: true,
        ..Default::default()
    };
    assert!(
        !sim.step(0.016, &input),
        "a paused step never consumes queued intents"
    );
    assert_eq!(sim.hero.position, hero_before);
    assert_eq!(sim.boss.position, boss_before);
    assert!(sim.hero.action.is_none());
    assert!((sim.hit_stop - 0.044).abs() < 1e-6);
}

#[test]
fn separation_never_moves_a_dead_fighter() {
    let mut sim = battle(17);
    sim.hero.position = Vec2::ZERO;
    sim.boss.position = Vec2::new(0.0, 0.5);
    sim.hero.dead = true;
    sim.resolve_separation();
    assert_eq!(sim.hero.position, Vec2::ZERO);
    assert!(sim.boss.position.y > 0.5, "survivor absorbs the full push");
}

#[test]
fn separation_push_is_capped_per_frame() {
    let mut sim = battle(18);
    sim.hero.position = Vec2::ZERO;
    sim.boss.position = Vec2::new(0.0, 0.2);
    let before = sim.hero.position.distance(sim.boss.position);
    sim.resolve_separation();
    let after = sim.hero.position.distance(sim.boss.position);
    let cap = sim.tuning.impact.separation_max_push;
    assert!(after - before <= cap + 1e-5);
}

#[test]
fn press_during_hurt_flinch_fires_after_recovery() {
    let mut sim = battle_at_edge(24, 0.2);
    sim.hero.hurt_timer = 0.1;
    let input = StepInput {
        attack_light: true,
        ..Default::default()
    };
    assert!(
        !sim.step(0.016, &input),
        "a flinching hero leaves the press buffered"
    );
    assert!(sim.hero.action.is_none());

    // The queue is retained, so the same intent keeps arriving until the
    // hero can act on it.
    let mut consumed = false;
    for _ in 0..20 {
        if sim.step(0.016, &input) {
            consumed = true;
            break;
        }
    }
    assert!(consumed);
    assert!(sim.hero.action.is_attack());
}

#[test]
fn boss_flinch_decays_after_victory() {
    let mut sim = battle_at_edge(22, 0.2);
    sim.boss.hurt_timer = 0.18;
    sim.hero.take_damage(1000.0);
    for _ in 0..30 {
        sim.step(0.016, &StepInput::default());
    }
    assert_eq!(sim.boss.hurt_timer, 0.0);
    assert_eq!(sim.boss.state, CombatantState::Idle);
}

#[test]
fn reduced_rules_boss_never_charges_or_slams() {
    let mut sim = battle(23);
    sim.reduced_rules = true;
    // The boss closes from far range to melee, crossing both the charge and
    // slam eligibility bands with every cooldown clear.
    for _ in 0..2000 {
        sim.step(0.016, &StepInput::default());
        assert!(
            matches!(sim.boss.action, Action::None | Action::Attack { .. }),
            "reduced rules allow chase and melee only"
        );
        sim.take_events();
    }
}

#[test]
fn reduced_ruleset_maps_heavy_to_light() {
    let mut sim = battle_at_edge(19, 3.0);
    sim.reduced_rules = true;
    let input = StepInput {
        attack_heavy: true,
        ..Default::default()
    };
    sim.step(0.016, &input);
    assert!(matches!(
        sim.hero.action,
        Action::Attack {
            kind: AttackKind::Light,
            ..
        }
    ));
}

#[test]
fn identical_seeds_replay_identically() {
    let input = StepInput {
        move_dir: Vec2::new(0.3, -1.0).normalize(),
        run: true,
        attack_light: true,
        ..Default::default()
    };
    let mut a = battle(42);
    let mut b = battle(42);
    for _ in 0..500 {
        a.step(0.016, &input);
        b.step(0.016, &input);
        a.take_events();
        b.take_events();
    }
    assert_eq!(a.hero.position, b.hero.position);
    assert_eq!(a.boss.position, b.boss.position);
    assert_eq!(a.hero.hp, b.hero.hp);
    assert_eq!(a.boss.hp, b.boss.hp);
}

#[test]
fn yaw_wrapping_takes_the_short_way_around() {
    assert!((wrap_angle(3.0 * std::f32::consts::PI) - std::f32::consts::PI).abs() < 1e-5);
    assert!(wrap_angle(-0.1) < 0.0);
    // Across the +/-PI seam the turn goes forward, not the long way back.
    let turned = turn_toward(3.0, -3.0, 0.1);
    assert!(turned > 3.0);
}

#[test]
fn boss_idles_once_the_hero_is_down() {
    let mut sim = battle_at_edge(20, 0.2);
    sim.hero.take_damage(1000.0);
    for _ in 0..60 {
        sim.step(0.016, &StepInput::default());
    }
    assert!(sim.boss.action.is_none());
    assert_eq!(sim.boss.state, CombatantState::Idle);
}

#[test]
fn jump_rises_and_lands() {
    let mut sim = battle(21);
    sim.step(
        0.016,
        &StepInput {
            jump: true,
            ..Default::default()
        },
    );
    assert!(sim.hero.airborne);
    assert!(
        sim.take_events()
            .iter()
            .any(|e| matches!(e, SimEvent::Jumped))
    );
    for _ in 0..120 {
        sim.step(0.016, &StepInput::default());
    }
    assert!(!sim.hero.airborne);
    assert_eq!(sim.hero.height, 0.0);
}
