//! Combat domain: tests for the player action machine, enemy AI and hit
//! arbitration.

use std::time::Duration;

use bevy::prelude::*;

use super::ai::{EnemyAttack, think, think_boss};
use super::arbitration::{resolve_hostile_attacks, resolve_player_attacks};
use super::components::{Projectile, Projectiles};
use super::systems::process_player_combat;
use super::*;
use crate::core::{
    Body, CorePlugin, Defeated, Facing, FrameSet, GameplaySet, Health, HitFreeze, Invulnerable,
    PlayerStep, overlaps, rect_at,
};
use crate::effects::{CameraShake, FlashRequest, HitFreezeRequest, ParticleRequest, ParticleShape};
use crate::movement::systems::{latch_input, read_input};
use crate::movement::{InputLatch, MovementState, Player, PlayerInput, VerticalInput};
use crate::test_utils::{init_messages, read_messages, run_system_once, world_with_time};

fn ctx() -> AttackContext {
    AttackContext {
        origin: Vec2::new(100.0, 500.0),
        facing: Facing::Right,
        vertical: VerticalInput::Neutral,
        airborne: false,
    }
}

fn ctx_with(vertical: VerticalInput, airborne: bool) -> AttackContext {
    AttackContext {
        vertical,
        airborne,
        ..ctx()
    }
}

// -----------------------------------------------------------------------------
// Light combo tests
// -----------------------------------------------------------------------------

#[test]
fn test_three_light_presses_reach_finisher() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();

    let first = combat.press_light(&ctx(), &tuning).expect("first hit");
    assert_eq!(combat.combo.count, 1);
    assert_eq!(first.damage, 10);
    assert!(!first.finisher);

    combat.tick(0.35, &tuning);
    let second = combat.press_light(&ctx(), &tuning).expect("second hit");
    assert_eq!(combat.combo.count, 2);
    assert_eq!(second.damage, 12);

    combat.tick(0.35, &tuning);
    let third = combat.press_light(&ctx(), &tuning).expect("finisher");
    assert_eq!(combat.combo.count, 3);
    assert!(third.finisher);
    assert_eq!(third.damage, 20);
    assert_eq!(combat.combo.timer, 0.0);
}

#[test]
fn test_combo_resets_after_finisher_expires() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    for _ in 0..3 {
        combat.press_light(&ctx(), &tuning);
        combat.tick(0.35, &tuning);
    }
    assert_eq!(combat.combo.count, 0);

    combat.press_light(&ctx(), &tuning);
    assert_eq!(combat.combo.count, 1);
}

#[test]
fn test_combo_count_stays_in_range() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    for _ in 0..20 {
        combat.press_light(&ctx(), &tuning);
        assert!(combat.combo.count <= MAX_COMBO);
        combat.tick(0.1, &tuning);
    }
}

#[test]
fn test_light_press_ignored_during_recovery() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    combat.press_light(&ctx(), &tuning);
    combat.tick(0.1, &tuning);

    assert!(combat.press_light(&ctx(), &tuning).is_none());
    assert_eq!(combat.combo.count, 1);
}

#[test]
fn test_combo_expires_after_window() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    combat.press_light(&ctx(), &tuning);
    combat.tick(0.5, &tuning);
    assert_eq!(combat.combo.count, 1);
    combat.tick(0.4, &tuning);
    assert_eq!(combat.combo.count, 0);
}

#[test]
fn test_up_attack_resets_combo() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    combat.press_light(&ctx(), &tuning);
    combat.tick(0.35, &tuning);

    let attack = combat
        .press_light(&ctx_with(VerticalInput::Up, false), &tuning)
        .expect("up attack");
    assert_eq!(attack.kind, AttackKind::Up);
    assert_eq!(attack.damage, 12);
    assert_eq!(combat.combo.count, 0);
}

#[test]
fn test_down_attack_only_in_air() {
    let tuning = CombatTuning::default();

    let mut grounded = PlayerCombat::default();
    let attack = grounded
        .press_light(&ctx_with(VerticalInput::Down, false), &tuning)
        .expect("attack");
    assert_eq!(attack.kind, AttackKind::Light);

    let mut airborne = PlayerCombat::default();
    let attack = airborne
        .press_light(&ctx_with(VerticalInput::Down, true), &tuning)
        .expect("attack");
    assert_eq!(attack.kind, AttackKind::Down);
    assert_eq!(airborne.combo.count, 0);
}

#[test]
fn test_light_hitbox_mirrors_when_facing_left() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    let left = AttackContext {
        facing: Facing::Left,
        ..ctx()
    };
    let attack = combat.press_light(&left, &tuning).expect("attack");

    assert_eq!(attack.hitbox.min, Vec2::new(100.0 - 45.0, 509.0));
    assert_eq!(attack.hitbox.size(), Vec2::new(45.0, 30.0));
}

// -----------------------------------------------------------------------------
// Charged heavy tests
// -----------------------------------------------------------------------------

#[test]
fn test_heavy_release_below_minimum_is_discarded() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    assert!(combat.press_heavy(&tuning));
    combat.tick(0.2, &tuning);

    assert!(combat.release_heavy(&ctx(), &tuning).is_none());
    assert!(!combat.is_charging());
    assert_eq!(combat.charge_time(), 0.0);
    assert_eq!(combat.action, PlayerAction::Idle);
}

#[test]
fn test_full_charge_hits_upper_multiplier() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    combat.press_heavy(&tuning);
    combat.tick(1.0, &tuning);
    combat.tick(1.0, &tuning);
    assert_eq!(combat.charge_time(), tuning.charge.max_time);

    let attack = combat.release_heavy(&ctx(), &tuning).expect("heavy");
    assert_eq!(attack.kind, AttackKind::Heavy);
    assert_eq!(attack.charge, Some(ChargeTier::Full));
    assert_eq!(attack.damage, 50);
    assert!(combat.is_attacking());
}

#[test]
fn test_partial_charge_is_partial_tier() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    combat.press_heavy(&tuning);
    combat.tick(0.75, &tuning);

    let attack = combat.release_heavy(&ctx(), &tuning).expect("heavy");
    assert_eq!(attack.charge, Some(ChargeTier::Partial));
    // 1.5 + 0.5 * 1.0 = 2.0
    assert_eq!(attack.damage, 40);
}

#[test]
fn test_launcher_applies_damage_penalty() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    combat.press_heavy(&tuning);
    combat.tick(1.5, &tuning);

    let attack = combat
        .release_heavy(&ctx_with(VerticalInput::Up, false), &tuning)
        .expect("launcher");
    assert_eq!(attack.kind, AttackKind::Up);
    // 12 * 2.5 * 0.8
    assert_eq!(attack.damage, 24);
}

#[test]
fn test_release_without_charge_does_nothing() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    assert!(combat.release_heavy(&ctx(), &tuning).is_none());
    assert_eq!(combat.action, PlayerAction::Idle);
}

#[test]
fn test_damage_truncates_toward_zero() {
    let tuning = CombatTuning::default();
    let attack = Attack::new(
        AttackKind::Light,
        &tuning.light,
        Vec2::ZERO,
        Facing::Right,
        10.0,
        1.99,
    );
    assert_eq!(attack.damage, 19);
}

// -----------------------------------------------------------------------------
// Buff and dash tests
// -----------------------------------------------------------------------------

#[test]
fn test_buff_applies_to_next_attack_only() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    assert!(combat.activate_buff(&tuning));
    assert!(!combat.activate_buff(&tuning));

    let buffed = combat.press_light(&ctx(), &tuning).expect("attack");
    assert_eq!(buffed.damage, 15);
    assert!(!combat.buff_active);

    combat.tick(0.35, &tuning);
    let plain = combat.press_light(&ctx(), &tuning).expect("attack");
    assert_eq!(plain.damage, 12);
}

#[test]
fn test_dash_cannot_be_cancelled_early() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    assert!(combat.activate_dash(&tuning));
    combat.tick(0.05, &tuning);

    assert!(combat.press_light(&ctx(), &tuning).is_none());
    assert!(combat.is_dashing());
}

#[test]
fn test_dash_cancels_into_attack_near_end() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    combat.activate_dash(&tuning);
    combat.tick(0.14, &tuning);

    let attack = combat.press_light(&ctx(), &tuning);
    assert!(attack.is_some());
    assert!(!combat.is_dashing());
    assert_eq!(combat.dash_end_lag, 0.0);
}

#[test]
fn test_dash_end_lag_follows_expiry() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    combat.activate_dash(&tuning);
    combat.tick(0.2, &tuning);

    assert!(!combat.is_dashing());
    assert!(combat.tick_end_lag(0.05));
    assert!(combat.tick_end_lag(0.05));
    assert!(!combat.tick_end_lag(0.05));
    assert!(!combat.activate_dash(&tuning));
}

// -----------------------------------------------------------------------------
// Parry tests
// -----------------------------------------------------------------------------

#[test]
fn test_parry_perfect_window() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    assert!(combat.press_parry(&tuning));
    combat.tick(0.05, &tuning);
    assert!(combat.is_perfect_parry(&tuning));

    combat.tick(0.1, &tuning);
    assert!(combat.is_parrying());
    assert!(!combat.is_perfect_parry(&tuning));
}

#[test]
fn test_parry_expires_into_cooldown() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    combat.press_parry(&tuning);
    combat.tick(0.4, &tuning);

    assert!(!combat.is_parrying());
    assert!(!combat.press_parry(&tuning));
    combat.tick(0.6, &tuning);
    assert!(combat.press_parry(&tuning));
}

#[test]
fn test_parry_rejected_while_attacking() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    combat.press_light(&ctx(), &tuning);
    assert!(!combat.press_parry(&tuning));
}

#[test]
fn test_attacks_rejected_while_parrying() {
    let tuning = CombatTuning::default();
    let mut combat = PlayerCombat::default();
    combat.press_parry(&tuning);
    assert!(combat.press_light(&ctx(), &tuning).is_none());
    assert!(!combat.press_heavy(&tuning));
    assert!(!combat.activate_dash(&tuning));
}

// -----------------------------------------------------------------------------
// Attack lifetime tests
// -----------------------------------------------------------------------------

#[test]
fn test_attack_inactive_at_exact_duration() {
    let tuning = CombatTuning::default();
    let mut attack = Attack::new(
        AttackKind::Heavy,
        &tuning.heavy,
        Vec2::ZERO,
        Facing::Right,
        20.0,
        1.0,
    );
    attack.tick(0.25);
    assert!(attack.is_active());
    attack.tick(0.25);
    assert!(!attack.is_active());
}

#[test]
fn test_active_attacks_purges_expired() {
    let tuning = CombatTuning::default();
    let light = Attack::new(AttackKind::Light, &tuning.light, Vec2::ZERO, Facing::Right, 10.0, 1.0);
    let heavy = Attack::new(AttackKind::Heavy, &tuning.heavy, Vec2::ZERO, Facing::Right, 20.0, 1.0);
    let mut attacks = ActiveAttacks(vec![light, heavy]);

    attacks.tick(0.3);
    assert_eq!(attacks.0.len(), 1);
    assert_eq!(attacks.0[0].kind, AttackKind::Heavy);
}

// -----------------------------------------------------------------------------
// Enemy AI tests
// -----------------------------------------------------------------------------

fn grunt_at(x: f32) -> (EnemyAi, Hostile, Body) {
    (
        EnemyAi::new(EnemyArchetype::Grunt, 100.0, 50.0),
        Hostile::new(HostileKind::Enemy(EnemyArchetype::Grunt), 0),
        Body::new(Vec2::new(x, 540.0), Vec2::new(40.0, 60.0)),
    )
}

#[test]
fn test_patrol_turns_at_range_edge() {
    let tuning = EnemyTuning::default();
    let (mut ai, mut hostile, mut body) = grunt_at(160.0);

    let attack = think(&mut ai, &mut hostile, &mut body, Vec2::new(2000.0, 0.0), 0.016, &tuning.grunt);

    assert!(attack.is_none());
    assert_eq!(hostile.heading, Facing::Left);
    assert_eq!(body.velocity.x, -tuning.grunt.patrol_speed);
    assert_eq!(ai.state, AiState::Patrol);
}

#[test]
fn test_patrol_heading_back_does_not_flip() {
    let tuning = EnemyTuning::default();
    let (mut ai, mut hostile, mut body) = grunt_at(160.0);
    hostile.heading = Facing::Left;

    think(&mut ai, &mut hostile, &mut body, Vec2::new(2000.0, 0.0), 0.016, &tuning.grunt);

    assert_eq!(hostile.heading, Facing::Left);
}

#[test]
fn test_patrol_detects_player() {
    let tuning = EnemyTuning::default();
    let (mut ai, mut hostile, mut body) = grunt_at(100.0);

    think(&mut ai, &mut hostile, &mut body, Vec2::new(300.0, 0.0), 0.016, &tuning.grunt);
    assert_eq!(ai.state, AiState::Chase);
}

#[test]
fn test_attack_state_swings_toward_target() {
    let tuning = EnemyTuning::default();
    let (mut ai, mut hostile, mut body) = grunt_at(100.0);
    ai.state = AiState::Attack;

    let attack = think(&mut ai, &mut hostile, &mut body, Vec2::new(150.0, 0.0), 0.016, &tuning.grunt);

    let Some(EnemyAttack::Swing(swing)) = attack else {
        panic!("expected a swing, got {:?}", attack);
    };
    assert_eq!(swing.hitbox.min, Vec2::new(140.0, 550.0));
    assert_eq!(swing.damage, 10);
    assert_eq!(ai.attack_timer, tuning.grunt.attack_cooldown);

    let again = think(&mut ai, &mut hostile, &mut body, Vec2::new(150.0, 0.0), 0.016, &tuning.grunt);
    assert!(again.is_none());
}

#[test]
fn test_chase_gives_up_beyond_range() {
    let tuning = EnemyTuning::default();
    let (mut ai, mut hostile, mut body) = grunt_at(100.0);
    ai.state = AiState::Chase;

    think(&mut ai, &mut hostile, &mut body, Vec2::new(700.0, 0.0), 0.016, &tuning.grunt);
    assert_eq!(ai.state, AiState::Patrol);
}

#[test]
fn test_ranged_retreats_and_fires() {
    let tuning = EnemyTuning::default();
    let mut ai = EnemyAi::new(EnemyArchetype::Ranged, 100.0, 50.0);
    let mut hostile = Hostile::new(HostileKind::Enemy(EnemyArchetype::Ranged), 0);
    let mut body = Body::new(Vec2::new(100.0, 540.0), Vec2::new(36.0, 56.0));
    ai.state = AiState::Chase;

    think(&mut ai, &mut hostile, &mut body, Vec2::new(160.0, 0.0), 0.016, &tuning.ranged);
    assert_eq!(ai.state, AiState::Retreat);
    assert!(body.velocity.x < 0.0);

    ai.state = AiState::Attack;
    let attack = think(&mut ai, &mut hostile, &mut body, Vec2::new(318.0, 0.0), 0.016, &tuning.ranged);
    let Some(EnemyAttack::Shot(shot)) = attack else {
        panic!("expected a projectile, got {:?}", attack);
    };
    assert!(shot.velocity.x > 0.0);
    assert_eq!(shot.damage, tuning.ranged.attack_damage);
}

// -----------------------------------------------------------------------------
// Boss tests
// -----------------------------------------------------------------------------

#[test]
fn test_boss_enters_phase_two_once() {
    let tuning = BossTuning::default();
    let mut ai = BossAi::default();
    let mut health = Health::new(200);

    health.take_damage(99);
    assert!(!ai.check_phase(&health, &tuning));
    health.take_damage(1);
    assert!(ai.check_phase(&health, &tuning));
    assert_eq!(ai.phase, BossPhase::Phase2);
    assert!(!ai.check_phase(&health, &tuning));
    assert_eq!(ai.attack_cooldown(&tuning), 1.2);
}

#[test]
fn test_boss_pattern_cycles_damage_and_width() {
    let tuning = BossTuning::default();
    let mut ai = BossAi::default();
    let mut hostile = Hostile::new(HostileKind::Boss, 0);
    let mut body = Body::new(Vec2::new(2300.0, 520.0), Vec2::new(60.0, 80.0));
    let target = Vec2::new(2370.0, 0.0);

    let first = think_boss(&mut ai, &mut hostile, &mut body, target, 0.016, &tuning).expect("swing");
    assert_eq!(first.damage, 20);
    assert_eq!(first.hitbox.width(), 80.0);
    assert_eq!(first.hitbox.min.x, 2360.0);

    assert!(think_boss(&mut ai, &mut hostile, &mut body, target, 0.016, &tuning).is_none());
    ai.attack_timer = 0.0;
    let second = think_boss(&mut ai, &mut hostile, &mut body, target, 0.016, &tuning).expect("swing");
    assert_eq!(second.damage, 25);
    ai.attack_timer = 0.0;
    let third = think_boss(&mut ai, &mut hostile, &mut body, target, 0.016, &tuning).expect("swing");
    assert_eq!(third.damage, 15);
    assert_eq!(third.hitbox.width(), 70.0);
}

#[test]
fn test_boss_approaches_from_distance() {
    let tuning = BossTuning::default();
    let mut ai = BossAi::default();
    let mut hostile = Hostile::new(HostileKind::Boss, 0);
    let mut body = Body::new(Vec2::new(2300.0, 520.0), Vec2::new(60.0, 80.0));

    let swing = think_boss(&mut ai, &mut hostile, &mut body, Vec2::new(2100.0, 0.0), 0.016, &tuning);
    assert!(swing.is_none());
    assert_eq!(hostile.heading, Facing::Left);
    assert_eq!(body.velocity.x, -tuning.phase_one.speed);
}

// -----------------------------------------------------------------------------
// Knockback tests
// -----------------------------------------------------------------------------

#[test]
fn test_knockback_pushes_against_heading() {
    let knockback = Knockback {
        vertical: 200.0,
        horizontal: 150.0,
        immune: false,
    };
    let mut body = Body::new(Vec2::ZERO, Vec2::splat(10.0));
    knockback.apply(&mut body, Facing::Right);
    assert_eq!(body.velocity, Vec2::new(-150.0, -200.0));
}

// -----------------------------------------------------------------------------
// Arbitration system tests
// -----------------------------------------------------------------------------

fn arbitration_world() -> World {
    let mut world = World::new();
    world.insert_resource(CombatTuning::default());
    init_messages::<DamageEvent>(&mut world);
    init_messages::<DeathEvent>(&mut world);
    init_messages::<ParryEvent>(&mut world);
    init_messages::<HitFreezeRequest>(&mut world);
    init_messages::<CameraShake>(&mut world);
    init_messages::<FlashRequest>(&mut world);
    init_messages::<ParticleRequest>(&mut world);
    world
}

fn spawn_player(world: &mut World, combat: PlayerCombat, attacks: Vec<Attack>) -> Entity {
    world
        .spawn((
            Player,
            Body::new(Vec2::new(100.0, 500.0), Vec2::new(32.0, 48.0)),
            Health::new(100),
            Invulnerable::default(),
            combat,
            ActiveAttacks(attacks),
        ))
        .id()
}

fn spawn_enemy(world: &mut World, archetype: EnemyArchetype, swing: Option<Swing>) -> Entity {
    let tuning = EnemyTuning::default();
    let stats = tuning.archetype(archetype);
    let mut hostile = Hostile::new(HostileKind::Enemy(archetype), 0);
    hostile.swing = swing;
    world
        .spawn((
            hostile,
            Body::new(Vec2::new(140.0, 490.0), Vec2::new(stats.width, stats.height)),
            Health::new(stats.max_health),
            Invulnerable::default(),
            Knockback {
                vertical: stats.knockback_vertical,
                horizontal: stats.knockback_horizontal,
                immune: stats.knockback_immune,
            },
        ))
        .id()
}

fn swing_over_player() -> Swing {
    Swing {
        hitbox: rect_at(Vec2::new(110.0, 510.0), Vec2::new(45.0, 40.0)),
        damage: 10,
        remaining: 0.1,
        parried: false,
    }
}

fn light_attack_over_enemy() -> Attack {
    let tuning = CombatTuning::default();
    Attack::new(
        AttackKind::Light,
        &tuning.light,
        Vec2::new(100.0, 500.0),
        Facing::Right,
        10.0,
        1.0,
    )
}

#[test]
fn test_perfect_parry_blocks_all_damage() {
    let mut world = arbitration_world();
    let combat = PlayerCombat {
        action: PlayerAction::Parrying {
            elapsed: 0.05,
            remaining: 0.3,
        },
        ..default()
    };
    let player = spawn_player(&mut world, combat, Vec::new());
    let enemy = spawn_enemy(&mut world, EnemyArchetype::Grunt, Some(swing_over_player()));

    run_system_once(&mut world, resolve_hostile_attacks);

    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(100));
    assert_eq!(world.get::<Health>(enemy).map(|h| h.current), Some(50));
    let parries = read_messages::<ParryEvent>(&mut world);
    assert_eq!(parries.len(), 1);
    assert!(parries[0].perfect);
    let freezes = read_messages::<HitFreezeRequest>(&mut world);
    assert_eq!(freezes.len(), 1);
    assert_eq!(freezes[0].duration, 0.10);
    assert!(
        world
            .get::<Hostile>(enemy)
            .and_then(|h| h.active_swing())
            .is_none()
    );
}

#[test]
fn test_enemy_swing_damages_player_once() {
    let mut world = arbitration_world();
    let player = spawn_player(&mut world, PlayerCombat::default(), Vec::new());
    spawn_enemy(&mut world, EnemyArchetype::Grunt, Some(swing_over_player()));

    run_system_once(&mut world, resolve_hostile_attacks);
    run_system_once(&mut world, resolve_hostile_attacks);

    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(90));
    assert_eq!(read_messages::<DamageEvent>(&mut world).len(), 1);
    assert_eq!(read_messages::<CameraShake>(&mut world).len(), 1);
}

#[test]
fn test_tank_takes_damage_without_knockback() {
    let mut world = arbitration_world();
    spawn_player(&mut world, PlayerCombat::default(), vec![light_attack_over_enemy()]);
    let tank = spawn_enemy(&mut world, EnemyArchetype::Tank, None);
    world
        .get_mut::<Body>(tank)
        .expect("tank body")
        .velocity = Vec2::new(30.0, 0.0);

    run_system_once(&mut world, resolve_player_attacks);

    assert_eq!(world.get::<Health>(tank).map(|h| h.current), Some(110));
    assert_eq!(
        world.get::<Body>(tank).map(|b| b.velocity),
        Some(Vec2::new(30.0, 0.0))
    );
}

#[test]
fn test_grunt_is_knocked_back() {
    let mut world = arbitration_world();
    spawn_player(&mut world, PlayerCombat::default(), vec![light_attack_over_enemy()]);
    let grunt = spawn_enemy(&mut world, EnemyArchetype::Grunt, None);

    run_system_once(&mut world, resolve_player_attacks);

    assert_eq!(world.get::<Health>(grunt).map(|h| h.current), Some(40));
    assert_eq!(
        world.get::<Body>(grunt).map(|b| b.velocity),
        Some(Vec2::new(-150.0, -200.0))
    );
}

#[test]
fn test_expired_attack_is_ignored() {
    let mut world = arbitration_world();
    let mut attack = light_attack_over_enemy();
    attack.elapsed = attack.duration;
    spawn_player(&mut world, PlayerCombat::default(), vec![attack]);
    let grunt = spawn_enemy(&mut world, EnemyArchetype::Grunt, None);

    run_system_once(&mut world, resolve_player_attacks);

    assert_eq!(world.get::<Health>(grunt).map(|h| h.current), Some(50));
}

#[test]
fn test_lethal_hit_defeats_enemy() {
    let mut world = arbitration_world();
    let mut attack = light_attack_over_enemy();
    attack.damage = 80;
    spawn_player(&mut world, PlayerCombat::default(), vec![attack]);
    let grunt = spawn_enemy(&mut world, EnemyArchetype::Grunt, None);

    run_system_once(&mut world, resolve_player_attacks);

    assert_eq!(world.get::<Health>(grunt).map(|h| h.current), Some(0));
    assert!(world.get::<Defeated>(grunt).is_some());
    assert_eq!(read_messages::<DeathEvent>(&mut world).len(), 1);
}

#[test]
fn test_fixture_hitboxes_overlap() {
    let attack = light_attack_over_enemy();
    let enemy = rect_at(Vec2::new(140.0, 490.0), Vec2::new(40.0, 60.0));
    assert!(overlaps(&attack.hitbox, &enemy));
}

fn spawn_boss(world: &mut World, swing: Option<Swing>) -> Entity {
    let tuning = BossTuning::default();
    let mut hostile = Hostile::new(HostileKind::Boss, 1);
    hostile.swing = swing;
    world
        .spawn((
            hostile,
            Body::new(Vec2::new(140.0, 470.0), Vec2::new(tuning.width, tuning.height)),
            Health::new(tuning.max_health),
            Invulnerable::default(),
            Knockback {
                vertical: tuning.knockback_vertical,
                horizontal: tuning.knockback_horizontal,
                immune: false,
            },
        ))
        .id()
}

fn parrying(elapsed: f32) -> PlayerCombat {
    PlayerCombat {
        action: PlayerAction::Parrying {
            elapsed,
            remaining: 0.35 - elapsed,
        },
        ..default()
    }
}

fn assert_single_shake(world: &mut World, intensity: f32, duration: f32) {
    let shakes = read_messages::<CameraShake>(world);
    assert_eq!(shakes.len(), 1);
    assert_eq!(shakes[0].intensity, intensity);
    assert_eq!(shakes[0].duration, duration);
}

fn assert_single_freeze(world: &mut World, duration: f32) {
    let freezes = read_messages::<HitFreezeRequest>(world);
    assert_eq!(freezes.len(), 1);
    assert_eq!(freezes[0].duration, duration);
}

#[test]
fn test_one_attack_hits_two_targets_in_same_tick() {
    let mut world = arbitration_world();
    spawn_player(&mut world, PlayerCombat::default(), vec![light_attack_over_enemy()]);
    let first = spawn_enemy(&mut world, EnemyArchetype::Grunt, None);
    let second = spawn_enemy(&mut world, EnemyArchetype::Grunt, None);

    run_system_once(&mut world, resolve_player_attacks);

    assert_eq!(world.get::<Health>(first).map(|h| h.current), Some(40));
    assert_eq!(world.get::<Health>(second).map(|h| h.current), Some(40));
    assert_eq!(read_messages::<DamageEvent>(&mut world).len(), 2);
}

#[test]
fn test_same_attack_waits_for_invulnerability_to_expire() {
    let mut world = arbitration_world();
    spawn_player(&mut world, PlayerCombat::default(), vec![light_attack_over_enemy()]);
    let grunt = spawn_enemy(&mut world, EnemyArchetype::Grunt, None);

    run_system_once(&mut world, resolve_player_attacks);
    run_system_once(&mut world, resolve_player_attacks);
    assert_eq!(world.get::<Health>(grunt).map(|h| h.current), Some(40));

    world.get_mut::<Invulnerable>(grunt).expect("grunt").timer = 0.0;
    run_system_once(&mut world, resolve_player_attacks);
    assert_eq!(world.get::<Health>(grunt).map(|h| h.current), Some(30));
}

#[test]
fn test_normal_parry_uses_lighter_feedback() {
    let mut world = arbitration_world();
    let player = spawn_player(&mut world, parrying(0.2), Vec::new());
    spawn_enemy(&mut world, EnemyArchetype::Grunt, Some(swing_over_player()));

    run_system_once(&mut world, resolve_hostile_attacks);

    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(100));
    let parries = read_messages::<ParryEvent>(&mut world);
    assert_eq!(parries.len(), 1);
    assert!(!parries[0].perfect);
    assert_single_freeze(&mut world, 0.06);
    assert_single_shake(&mut world, 5.0, 0.15);
}

#[test]
fn test_boss_perfect_parry_feedback() {
    let mut world = arbitration_world();
    let player = spawn_player(&mut world, parrying(0.05), Vec::new());
    let boss = spawn_boss(&mut world, Some(swing_over_player()));

    run_system_once(&mut world, resolve_hostile_attacks);

    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(100));
    assert_eq!(world.get::<Health>(boss).map(|h| h.current), Some(200));
    assert!(read_messages::<ParryEvent>(&mut world)[0].perfect);
    assert_single_freeze(&mut world, 0.12);
    assert_single_shake(&mut world, 12.0, 0.28);
}

#[test]
fn test_boss_normal_parry_feedback() {
    let mut world = arbitration_world();
    spawn_player(&mut world, parrying(0.2), Vec::new());
    spawn_boss(&mut world, Some(swing_over_player()));

    run_system_once(&mut world, resolve_hostile_attacks);

    assert!(!read_messages::<ParryEvent>(&mut world)[0].perfect);
    assert_single_freeze(&mut world, 0.08);
    assert_single_shake(&mut world, 8.0, 0.2);
}

#[test]
fn test_boss_swing_hits_player_harder_shake() {
    let mut world = arbitration_world();
    let player = spawn_player(&mut world, PlayerCombat::default(), Vec::new());
    spawn_boss(&mut world, Some(swing_over_player()));

    run_system_once(&mut world, resolve_hostile_attacks);

    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(90));
    assert_single_shake(&mut world, 15.0, 0.4);
    assert!(read_messages::<HitFreezeRequest>(&mut world).is_empty());
}

#[test]
fn test_player_hit_on_boss_shakes_and_knocks_back() {
    let mut world = arbitration_world();
    spawn_player(&mut world, PlayerCombat::default(), vec![light_attack_over_enemy()]);
    let boss = spawn_boss(&mut world, None);

    run_system_once(&mut world, resolve_player_attacks);

    assert_eq!(world.get::<Health>(boss).map(|h| h.current), Some(190));
    assert_eq!(
        world.get::<Body>(boss).map(|b| b.velocity),
        Some(Vec2::new(-100.0, -150.0))
    );
    assert_single_shake(&mut world, 10.0, 0.25);
}

#[test]
fn test_parry_deflects_projectile() {
    let mut world = arbitration_world();
    let player = spawn_player(&mut world, parrying(0.05), Vec::new());
    let ranged = spawn_enemy(&mut world, EnemyArchetype::Ranged, None);
    world.entity_mut(ranged).insert(Projectiles(vec![Projectile {
        position: Vec2::new(110.0, 515.0),
        velocity: Vec2::new(-250.0, 0.0),
        size: Vec2::new(12.0, 12.0),
        damage: 8,
        lifetime: 1.0,
        parried: false,
    }]));

    run_system_once(&mut world, resolve_hostile_attacks);

    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(100));
    assert_eq!(read_messages::<ParryEvent>(&mut world).len(), 1);
    let projectiles = world.get::<Projectiles>(ranged).expect("projectiles");
    assert!(projectiles.0[0].parried);
    assert!(!projectiles.0[0].is_alive());

    // A deflected projectile cannot hit once the parry ends
    world.get_mut::<PlayerCombat>(player).expect("player").action = PlayerAction::Idle;
    run_system_once(&mut world, resolve_hostile_attacks);
    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(100));
}

#[test]
fn test_invulnerable_player_gets_no_hit_feedback() {
    let mut world = arbitration_world();
    let player = spawn_player(&mut world, PlayerCombat::default(), Vec::new());
    world
        .get_mut::<Invulnerable>(player)
        .expect("player")
        .grant(0.5);
    spawn_enemy(&mut world, EnemyArchetype::Grunt, Some(swing_over_player()));

    run_system_once(&mut world, resolve_hostile_attacks);

    assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(100));
    assert!(read_messages::<CameraShake>(&mut world).is_empty());
    assert!(read_messages::<DamageEvent>(&mut world).is_empty());
    assert!(read_messages::<FlashRequest>(&mut world).is_empty());
}

// -----------------------------------------------------------------------------
// Player combat system tests
// -----------------------------------------------------------------------------

fn combat_player(world: &mut World) -> Entity {
    world
        .spawn((
            Player,
            Body::new(Vec2::new(100.0, 500.0), Vec2::new(32.0, 48.0)),
            MovementState::default(),
            PlayerCombat::default(),
            ActiveAttacks::default(),
            Invulnerable::default(),
        ))
        .id()
}

#[test]
fn test_combo_step_drives_burst_size() {
    let mut world = world_with_time(0.016);
    let mut tuning = CombatTuning::default();
    tuning.combo.steps[0].particles = 9;
    world.insert_resource(tuning);
    world.insert_resource(PlayerInput {
        light_pressed: true,
        ..default()
    });
    init_messages::<ParticleRequest>(&mut world);
    combat_player(&mut world);

    run_system_once(&mut world, process_player_combat);

    let particles = read_messages::<ParticleRequest>(&mut world);
    let burst = particles
        .iter()
        .find(|p| p.shape == ParticleShape::Burst)
        .expect("light attack burst");
    assert_eq!(burst.count, 9);
}

// -----------------------------------------------------------------------------
// Schedule tests
// -----------------------------------------------------------------------------

fn combat_app() -> App {
    let mut app = App::new();
    app.add_plugins(CorePlugin)
        .insert_resource(Time::<()>::default())
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<InputLatch>()
        .init_resource::<PlayerInput>()
        .init_resource::<CombatTuning>()
        .add_message::<ParticleRequest>()
        .add_systems(Update, latch_input.in_set(FrameSet::Effects))
        .add_systems(Update, read_input.in_set(GameplaySet::Input))
        .add_systems(Update, process_player_combat.in_set(PlayerStep::Actions));
    // Without a time plugin this delta repeats every update
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(0.1));
    app
}

fn step(app: &mut App) {
    app.update();
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
}

#[test]
fn test_heavy_release_during_hit_freeze_throws_after_freeze() {
    let mut app = combat_app();
    let player = combat_player(app.world_mut());

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyK);
    for _ in 0..4 {
        step(&mut app);
    }
    let charged = app.world().get::<PlayerCombat>(player).expect("player").charge_time();
    assert!(charged >= 0.35, "charge {charged}");

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(KeyCode::KeyK);
    app.world_mut().resource_mut::<HitFreeze>().trigger(0.25);
    step(&mut app);
    step(&mut app);

    // Frozen: no charge gained, release not yet applied
    let combat = app.world().get::<PlayerCombat>(player).expect("player");
    assert!(combat.is_charging());
    assert_eq!(combat.charge_time(), charged);

    step(&mut app);

    let combat = app.world().get::<PlayerCombat>(player).expect("player");
    assert!(matches!(
        combat.action,
        PlayerAction::Attacking {
            kind: AttackKind::Heavy,
            ..
        }
    ));
    assert_eq!(app.world().get::<ActiveAttacks>(player).map(|a| a.0.len()), Some(1));
}

#[test]
fn test_parry_pressed_during_hit_freeze_starts_after_freeze() {
    let mut app = combat_app();
    let player = combat_player(app.world_mut());

    app.world_mut().resource_mut::<HitFreeze>().trigger(0.15);
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyP);
    step(&mut app);
    assert!(!app.world().get::<PlayerCombat>(player).expect("player").is_parrying());

    step(&mut app);
    assert!(app.world().get::<PlayerCombat>(player).expect("player").is_parrying());
}
