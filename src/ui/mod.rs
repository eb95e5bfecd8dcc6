//! UI domain: in-run HUD for the player and the boss.

mod hud_boss;
mod hud_player;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::core::FrameSet;
use crate::ui::hud_boss::{
    hide_defeated_boss_healthbar, spawn_boss_healthbar, update_boss_healthbar,
};
use crate::ui::hud_player::{
    spawn_player_hud, update_charge_bar, update_combo_counter, update_cooldown_bars,
    update_player_healthbar,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player_hud).add_systems(
            Update,
            (
                update_player_healthbar,
                update_cooldown_bars,
                update_combo_counter,
                update_charge_bar,
                spawn_boss_healthbar,
                update_boss_healthbar,
                hide_defeated_boss_healthbar,
            )
                .in_set(FrameSet::Render),
        );
    }
}
