//! UI domain: tests for HUD bars and the combo counter.

use bevy::prelude::*;

use super::hud_boss::{
    BossHealthBar, BossHealthFill, hide_defeated_boss_healthbar, spawn_boss_healthbar,
    update_boss_healthbar,
};
use super::hud_player::{
    ChargeBar, ChargeFill, ComboCounter, ComboCountText, CooldownFill, HudAbility,
    PlayerHealthFill, combo_size, cooldown_fraction, update_charge_bar, update_combo_counter,
    update_cooldown_bars, update_player_healthbar,
};
use crate::combat::{BossAi, CombatTuning, PlayerAction, PlayerCombat};
use crate::core::{Defeated, Health};
use crate::movement::Player;
use crate::test_utils::run_system_once;

fn fill_node() -> Node {
    Node {
        width: Val::Percent(100.0),
        ..default()
    }
}

fn width_of(world: &World, entity: Entity) -> Option<Val> {
    world.get::<Node>(entity).map(|node| node.width)
}

// -----------------------------------------------------------------------------
// Pure helpers
// -----------------------------------------------------------------------------

#[test]
fn test_cooldown_fraction() {
    assert_eq!(cooldown_fraction(0.0, 5.0), 1.0);
    assert_eq!(cooldown_fraction(-0.01, 5.0), 1.0);
    assert_eq!(cooldown_fraction(2.5, 5.0), 0.5);
    assert_eq!(cooldown_fraction(5.0, 5.0), 0.0);
    assert_eq!(cooldown_fraction(1.0, 0.0), 1.0);
}

#[test]
fn test_combo_circle_grows_per_step() {
    assert_eq!(combo_size(1), 80.0);
    assert_eq!(combo_size(3), 120.0);
}

// -----------------------------------------------------------------------------
// Player HUD
// -----------------------------------------------------------------------------

#[test]
fn test_health_bar_tracks_player_health() {
    let mut world = World::new();
    let mut health = Health::new(100);
    health.take_damage(50);
    world.spawn((Player, health));
    let fill = world.spawn((PlayerHealthFill, fill_node())).id();

    run_system_once(&mut world, update_player_healthbar);

    assert_eq!(width_of(&world, fill), Some(Val::Percent(50.0)));
}

#[test]
fn test_cooldown_bars_follow_each_ability() {
    let mut world = World::new();
    world.insert_resource(CombatTuning::default());
    world.spawn((
        Player,
        PlayerCombat {
            dash_cooldown: 2.5,
            ..default()
        },
    ));
    let dash = world
        .spawn((CooldownFill(HudAbility::Dash), fill_node(), BackgroundColor(Color::WHITE)))
        .id();
    let parry = world
        .spawn((CooldownFill(HudAbility::Parry), fill_node(), BackgroundColor(Color::WHITE)))
        .id();

    run_system_once(&mut world, update_cooldown_bars);

    assert_eq!(width_of(&world, dash), Some(Val::Percent(50.0)));
    assert_eq!(width_of(&world, parry), Some(Val::Percent(100.0)));
    assert_eq!(
        world.get::<BackgroundColor>(parry).map(|c| c.0),
        Some(HudAbility::Parry.color())
    );
}

fn combo_world(count: u8) -> (World, Entity, Entity) {
    let mut world = World::new();
    world.insert_resource(CombatTuning::default());
    let mut combat = PlayerCombat::default();
    combat.combo.count = count;
    combat.combo.timer = 0.4;
    world.spawn((Player, combat));
    let counter = world
        .spawn((
            ComboCounter,
            Node::default(),
            BackgroundColor(Color::WHITE),
            BorderColor::all(Color::WHITE),
            Visibility::Hidden,
        ))
        .id();
    let text = world.spawn((ComboCountText, Text::new("1"))).id();
    (world, counter, text)
}

#[test]
fn test_combo_counter_shows_running_combo() {
    let (mut world, counter, text) = combo_world(2);

    run_system_once(&mut world, update_combo_counter);

    assert_eq!(world.get::<Visibility>(counter), Some(&Visibility::Visible));
    assert_eq!(width_of(&world, counter), Some(Val::Px(combo_size(2))));
    assert_eq!(world.get::<Text>(text).map(|t| t.0.as_str()), Some("2"));
}

#[test]
fn test_combo_counter_hidden_without_combo() {
    let (mut world, counter, _) = combo_world(0);

    run_system_once(&mut world, update_combo_counter);

    assert_eq!(world.get::<Visibility>(counter), Some(&Visibility::Hidden));
}

#[test]
fn test_charge_bar_only_while_charging() {
    let mut world = World::new();
    world.insert_resource(CombatTuning::default());
    let player = world
        .spawn((
            Player,
            PlayerCombat {
                action: PlayerAction::ChargingHeavy { elapsed: 0.75 },
                ..default()
            },
        ))
        .id();
    let bar = world.spawn((ChargeBar, Visibility::Hidden)).id();
    let fill = world
        .spawn((ChargeFill, fill_node(), BackgroundColor(Color::WHITE)))
        .id();

    run_system_once(&mut world, update_charge_bar);
    assert_eq!(world.get::<Visibility>(bar), Some(&Visibility::Visible));
    assert_eq!(width_of(&world, fill), Some(Val::Percent(50.0)));

    world
        .get_mut::<PlayerCombat>(player)
        .expect("player")
        .action = PlayerAction::Idle;
    run_system_once(&mut world, update_charge_bar);
    assert_eq!(world.get::<Visibility>(bar), Some(&Visibility::Hidden));
}

// -----------------------------------------------------------------------------
// Boss HUD
// -----------------------------------------------------------------------------

#[test]
fn test_boss_bar_spawned_once_and_tracks_health() {
    let mut world = World::new();
    let mut health = Health::new(200);
    health.take_damage(50);
    let boss = world.spawn((BossAi::default(), health)).id();

    run_system_once(&mut world, spawn_boss_healthbar);
    run_system_once(&mut world, spawn_boss_healthbar);

    let mut bars = world.query::<&BossHealthBar>();
    assert_eq!(bars.iter(&world).filter(|bar| bar.owner == boss).count(), 1);

    run_system_once(&mut world, update_boss_healthbar);
    let mut fills = world.query::<(&BossHealthFill, &Node)>();
    let (_, node) = fills.single(&world).expect("one boss fill");
    assert_eq!(node.width, Val::Percent(75.0));
}

#[test]
fn test_boss_bar_hidden_after_defeat() {
    let mut world = World::new();
    let boss = world.spawn((BossAi::default(), Health::new(200))).id();
    let bar = world
        .spawn((BossHealthBar { owner: boss }, Visibility::Inherited))
        .id();

    run_system_once(&mut world, hide_defeated_boss_healthbar);
    assert_eq!(world.get::<Visibility>(bar), Some(&Visibility::Inherited));

    world.entity_mut(boss).insert(Defeated);
    run_system_once(&mut world, hide_defeated_boss_healthbar);
    assert_eq!(world.get::<Visibility>(bar), Some(&Visibility::Hidden));
}
