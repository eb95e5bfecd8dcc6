//! UI domain: boss health bar.

use bevy::prelude::*;

use crate::combat::BossAi;
use crate::core::{Defeated, Health};
use crate::ui::hud_player::HUD_PADDING;

const BOSS_HEALTHBAR_WIDTH: f32 = 500.0;
const BOSS_HEALTHBAR_HEIGHT: f32 = 16.0;

/// Root of a boss health bar, hidden once its owner is defeated.
#[derive(Component)]
pub struct BossHealthBar {
    pub owner: Entity,
}

#[derive(Component)]
pub struct BossHealthFill {
    pub owner: Entity,
}

/// Darkens as the boss approaches and passes its phase threshold.
pub fn boss_bar_color(percent: f32) -> Color {
    if percent > 0.5 {
        Color::srgb(0.78, 0.31, 0.16)
    } else if percent > 0.25 {
        Color::srgb(0.9, 0.4, 0.1)
    } else {
        Color::srgb(0.6, 0.0, 0.0)
    }
}

pub(crate) fn spawn_boss_healthbar(
    mut commands: Commands,
    boss_query: Query<Entity, Added<BossAi>>,
    existing_bars: Query<&BossHealthBar>,
) {
    for boss_entity in &boss_query {
        if existing_bars.iter().any(|bar| bar.owner == boss_entity) {
            continue;
        }

        // Top centre: name label over the bar
        commands
            .spawn((
                BossHealthBar { owner: boss_entity },
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(HUD_PADDING),
                    left: Val::Percent(50.0),
                    margin: UiRect::left(Val::Px(-BOSS_HEALTHBAR_WIDTH / 2.0)),
                    width: Val::Px(BOSS_HEALTHBAR_WIDTH),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(4.0),
                    ..default()
                },
                Visibility::Inherited,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new("EXECUTIONER"),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                ));
                parent
                    .spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Px(BOSS_HEALTHBAR_HEIGHT),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgba(0.05, 0.05, 0.05, 0.9)),
                        BorderColor::all(Color::srgb(0.6, 0.1, 0.1)),
                    ))
                    .with_children(|bar| {
                        bar.spawn((
                            BossHealthFill { owner: boss_entity },
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(boss_bar_color(1.0)),
                        ));
                    });
            });
        info!("Boss health bar shown for {:?}", boss_entity);
    }
}

pub(crate) fn update_boss_healthbar(
    boss_query: Query<&Health, With<BossAi>>,
    mut fill_query: Query<(&BossHealthFill, &mut Node, &mut BackgroundColor)>,
) {
    for (fill, mut node, mut bg_color) in &mut fill_query {
        if let Ok(health) = boss_query.get(fill.owner) {
            let percent = health.percent().clamp(0.0, 1.0);
            node.width = Val::Percent(percent * 100.0);
            bg_color.0 = boss_bar_color(percent);
        }
    }
}

/// Hide the bar once the boss is down or gone.
pub(crate) fn hide_defeated_boss_healthbar(
    boss_query: Query<Has<Defeated>, With<BossAi>>,
    mut bar_query: Query<(&BossHealthBar, &mut Visibility)>,
) {
    for (bar, mut visibility) in &mut bar_query {
        let defeated = boss_query.get(bar.owner).unwrap_or(true);
        if defeated {
            *visibility = Visibility::Hidden;
        }
    }
}
