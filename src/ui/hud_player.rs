//! UI domain: player health, ability cooldowns, combo counter and heavy charge.

use bevy::prelude::*;

use crate::combat::{CombatTuning, MAX_COMBO, PlayerCombat};
use crate::core::Health;
use crate::movement::Player;

pub(crate) const HUD_PADDING: f32 = 15.0;
const BAR_WIDTH: f32 = 180.0;
const BAR_HEIGHT: f32 = 14.0;
const BAR_SPACING: f32 = 22.0;
const ICON_GAP: f32 = 5.0;

const CHARGE_BAR_WIDTH: f32 = 200.0;
const CHARGE_BAR_HEIGHT: f32 = 20.0;
const CHARGE_BAR_BOTTOM: f32 = 80.0;

const COMBO_BASE_SIZE: f32 = 60.0;
const COMBO_SIZE_STEP: f32 = 20.0;

const BAR_BACKGROUND: Color = Color::srgb(0.16, 0.16, 0.16);
const HEALTH_COLOR: Color = Color::srgb(0.78, 0.2, 0.2);
const COMBO_RING: Color = Color::srgb(0.39, 1.0, 0.39);

/// Ability whose cooldown a HUD bar tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudAbility {
    Parry,
    Buff,
    Dash,
}

impl HudAbility {
    pub const ALL: [HudAbility; 3] = [HudAbility::Parry, HudAbility::Buff, HudAbility::Dash];

    pub fn color(self) -> Color {
        match self {
            HudAbility::Parry => Color::srgb(0.39, 0.71, 1.0),
            HudAbility::Buff => Color::srgb(0.59, 0.59, 1.0),
            HudAbility::Dash => Color::srgb(0.39, 1.0, 0.78),
        }
    }

    /// (remaining, full) cooldown in seconds.
    pub fn cooldown(self, combat: &PlayerCombat, tuning: &CombatTuning) -> (f32, f32) {
        match self {
            HudAbility::Parry => (combat.parry_cooldown, tuning.parry.cooldown),
            HudAbility::Buff => (combat.buff_cooldown, tuning.buff.cooldown),
            HudAbility::Dash => (combat.dash_cooldown, tuning.dash.cooldown),
        }
    }
}

/// Marker for the player's health bar fill
#[derive(Component)]
pub struct PlayerHealthFill;

#[derive(Component)]
pub struct CooldownFill(pub HudAbility);

/// Circle in the middle of the screen while a combo is running.
#[derive(Component)]
pub struct ComboCounter;

#[derive(Component)]
pub struct ComboCountText;

#[derive(Component)]
pub struct ChargeBar;

#[derive(Component)]
pub struct ChargeFill;

/// Recharged share of a cooldown: 0 just used, 1 ready.
pub fn cooldown_fraction(remaining: f32, full: f32) -> f32 {
    if full <= 0.0 {
        return 1.0;
    }
    (1.0 - remaining / full).clamp(0.0, 1.0)
}

pub fn combo_size(count: u8) -> f32 {
    COMBO_BASE_SIZE + f32::from(count) * COMBO_SIZE_STEP
}

pub fn combo_color(count: u8) -> Color {
    match count {
        1 => Color::srgba(1.0, 0.78, 0.39, 0.78),
        2 => Color::srgba(1.0, 0.59, 0.2, 0.86),
        MAX_COMBO => Color::srgb(1.0, 0.2, 0.2),
        _ => Color::srgba(1.0, 1.0, 1.0, 0.78),
    }
}

/// Red while starting, orange past half, yellow at full charge.
pub fn charge_color(level: f32) -> Color {
    if level >= 1.0 {
        Color::srgb(1.0, 1.0, 0.0)
    } else if level >= 0.5 {
        Color::srgb(1.0, 0.59, 0.2)
    } else {
        Color::srgb(1.0, 0.39, 0.39)
    }
}

fn bar_node(top: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(HUD_PADDING + BAR_HEIGHT + ICON_GAP),
        top: Val::Px(top),
        width: Val::Px(BAR_WIDTH),
        height: Val::Px(BAR_HEIGHT),
        border: UiRect::all(Val::Px(1.0)),
        ..default()
    }
}

fn fill_node() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    }
}

pub(crate) fn spawn_player_hud(mut commands: Commands) {
    // Health bar, top-left
    commands
        .spawn((
            bar_node(HUD_PADDING),
            BackgroundColor(BAR_BACKGROUND),
            BorderColor::all(HEALTH_COLOR),
        ))
        .with_children(|parent| {
            parent.spawn((PlayerHealthFill, fill_node(), BackgroundColor(HEALTH_COLOR)));
        });

    // One cooldown bar per ability, each with a colour swatch on its left
    let mut top = HUD_PADDING + BAR_SPACING + 8.0;
    for ability in HudAbility::ALL {
        commands.spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(top),
                width: Val::Px(BAR_HEIGHT),
                height: Val::Px(BAR_HEIGHT),
                ..default()
            },
            BackgroundColor(ability.color()),
        ));
        commands
            .spawn((
                bar_node(top),
                BackgroundColor(BAR_BACKGROUND),
                BorderColor::all(Color::srgb(0.39, 0.39, 0.39)),
            ))
            .with_children(|parent| {
                parent.spawn((CooldownFill(ability), fill_node(), BackgroundColor(ability.color())));
            });
        top += BAR_SPACING;
    }

    // Combo counter, centred above the middle of the screen
    commands
        .spawn((
            ComboCounter,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(50.0),
                top: Val::Percent(50.0),
                width: Val::Px(combo_size(1)),
                height: Val::Px(combo_size(1)),
                border: UiRect::all(Val::Px(3.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(combo_color(1)),
            BorderColor::all(COMBO_RING),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                ComboCountText,
                Text::new("1"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });

    // Heavy charge, bottom centre
    commands
        .spawn((
            ChargeBar,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(CHARGE_BAR_BOTTOM),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-CHARGE_BAR_WIDTH / 2.0)),
                width: Val::Px(CHARGE_BAR_WIDTH),
                height: Val::Px(CHARGE_BAR_HEIGHT),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(BAR_BACKGROUND),
            BorderColor::all(Color::srgb(0.39, 0.39, 0.39)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((ChargeFill, fill_node(), BackgroundColor(charge_color(0.0))));
        });
}

pub(crate) fn update_player_healthbar(
    player_query: Query<&Health, With<Player>>,
    mut fill_query: Query<&mut Node, With<PlayerHealthFill>>,
) {
    let Ok(health) = player_query.single() else {
        return;
    };
    for mut node in &mut fill_query {
        node.width = Val::Percent(health.percent().clamp(0.0, 1.0) * 100.0);
    }
}

pub(crate) fn update_cooldown_bars(
    tuning: Res<CombatTuning>,
    player_query: Query<&PlayerCombat, With<Player>>,
    mut fill_query: Query<(&CooldownFill, &mut Node, &mut BackgroundColor)>,
) {
    let Ok(combat) = player_query.single() else {
        return;
    };
    for (fill, mut node, mut bg_color) in &mut fill_query {
        let (remaining, full) = fill.0.cooldown(combat, &tuning);
        let fraction = cooldown_fraction(remaining, full);
        node.width = Val::Percent(fraction * 100.0);

        // Dimmed while recharging
        let alpha = if fraction >= 1.0 { 1.0 } else { 0.55 };
        bg_color.0 = fill.0.color().with_alpha(alpha);
    }
}

pub(crate) fn update_combo_counter(
    tuning: Res<CombatTuning>,
    player_query: Query<&PlayerCombat, With<Player>>,
    mut counter_query: Query<
        (&mut Node, &mut BackgroundColor, &mut BorderColor, &mut Visibility),
        With<ComboCounter>,
    >,
    mut text_query: Query<&mut Text, With<ComboCountText>>,
) {
    let Ok(combat) = player_query.single() else {
        return;
    };
    let count = combat.combo.count;

    for (mut node, mut bg_color, mut border, mut visibility) in &mut counter_query {
        if count == 0 {
            *visibility = Visibility::Hidden;
            continue;
        }
        *visibility = Visibility::Visible;

        let size = combo_size(count);
        node.width = Val::Px(size);
        node.height = Val::Px(size);
        node.margin = UiRect {
            left: Val::Px(-size / 2.0),
            top: Val::Px(-100.0),
            ..default()
        };
        bg_color.0 = combo_color(count);

        // Ring fades as the combo window runs out
        let window = tuning.combo.window.max(f32::EPSILON);
        let remaining = (combat.combo.timer / window).clamp(0.0, 1.0);
        *border = BorderColor::all(COMBO_RING.with_alpha(remaining));
    }

    if count > 0 {
        for mut text in &mut text_query {
            text.0 = count.to_string();
        }
    }
}

pub(crate) fn update_charge_bar(
    tuning: Res<CombatTuning>,
    player_query: Query<&PlayerCombat, With<Player>>,
    mut bar_query: Query<&mut Visibility, With<ChargeBar>>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<ChargeFill>>,
) {
    let Ok(combat) = player_query.single() else {
        return;
    };
    let charging = combat.is_charging();
    for mut visibility in &mut bar_query {
        *visibility = if charging {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if !charging {
        return;
    }

    let level = (combat.charge_time() / tuning.charge.max_time.max(f32::EPSILON)).min(1.0);
    for (mut node, mut bg_color) in &mut fill_query {
        node.width = Val::Percent(level * 100.0);
        bg_color.0 = charge_color(level);
    }
}
