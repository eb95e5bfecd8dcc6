//! Debug domain: hotkeys and the gizmo overlay.

use bevy::prelude::*;

use crate::combat::components::Projectiles;
use crate::combat::{ActiveAttacks, Hostile};
use crate::content::LevelDef;
use crate::core::{Body, Defeated, Health, Invulnerable};
use crate::debug::state::DebugState;
use crate::movement::{MovementState, Player};
use crate::presentation::sim_to_world;
use crate::world::LevelGeometry;

const BODY_COLOR: Color = Color::srgb(0.2, 0.9, 0.3);
const PLATFORM_COLOR: Color = Color::srgb(0.5, 0.5, 0.9);
const ATTACK_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);
const SWING_COLOR: Color = Color::srgb(1.0, 0.25, 0.25);
const PROJECTILE_COLOR: Color = Color::srgb(1.0, 0.5, 0.1);
const LEDGE_COLOR: Color = Color::srgb(0.3, 0.9, 1.0);

/// Toggle the overlay with F1 or backtick key
pub(crate) fn toggle_overlay(keyboard: Res<ButtonInput<KeyCode>>, mut debug_state: ResMut<DebugState>) {
    if keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote) {
        debug_state.overlay_visible = !debug_state.overlay_visible;
        info!("[DEBUG] Overlay {}", if debug_state.overlay_visible { "ON" } else { "OFF" });
    }
}

/// Handle keyboard shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    level: Res<LevelDef>,
    mut debug_state: ResMut<DebugState>,
    mut player_query: Query<(&mut Body, &mut MovementState), (With<Player>, Without<Defeated>)>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    // Ctrl+I: Toggle invincibility
    if ctrl && keyboard.just_pressed(KeyCode::KeyI) {
        debug_state.invincible = !debug_state.invincible;
        info!(
            "[DEBUG] Invincibility {}",
            if debug_state.invincible { "ON" } else { "OFF" }
        );
    }

    // T: Warp to the boss arena
    if !ctrl && keyboard.just_pressed(KeyCode::KeyT) {
        for (mut body, mut state) in &mut player_query {
            teleport(&mut body, &mut state, Vec2::from(level.boss_arena));
            info!("[DEBUG] Warping to boss arena at {:?}", body.position);
        }
    }
}

/// Drop the player at `position` in a fresh airborne state.
pub(crate) fn teleport(body: &mut Body, state: &mut MovementState, position: Vec2) {
    body.position = position;
    body.velocity = Vec2::ZERO;
    *state = MovementState {
        facing: state.facing,
        ..default()
    };
}

/// Apply invincibility effect to player
pub(crate) fn apply_invincibility(
    debug_state: Res<DebugState>,
    mut player_query: Query<(&mut Health, &mut Invulnerable), With<Player>>,
) {
    if !debug_state.invincible {
        return;
    }

    for (mut health, mut invuln) in &mut player_query {
        // Keep invulnerability frames active
        invuln.timer = invuln.timer.max(0.1);
        health.current = health.max;
    }
}

fn draw_rect(gizmos: &mut Gizmos, rect: Rect, color: Color) {
    let center = sim_to_world(rect.center(), 0.0).truncate();
    gizmos.rect_2d(Isometry2d::from_translation(center), rect.size(), color);
}

/// Outline every collider and hitbox in play
pub(crate) fn draw_debug_overlay(
    mut gizmos: Gizmos,
    debug_state: Res<DebugState>,
    level: Res<LevelGeometry>,
    bodies: Query<&Body, Without<Defeated>>,
    players: Query<(&ActiveAttacks, &MovementState), With<Player>>,
    hostiles: Query<(&Hostile, Option<&Projectiles>), Without<Defeated>>,
) {
    if !debug_state.overlay_visible {
        return;
    }

    for platform in &level.platforms {
        draw_rect(&mut gizmos, platform.bounds(), PLATFORM_COLOR);
    }
    for body in &bodies {
        draw_rect(&mut gizmos, body.bounds(), BODY_COLOR);
    }

    for (attacks, state) in &players {
        for attack in attacks.active() {
            draw_rect(&mut gizmos, attack.hitbox, ATTACK_COLOR);
        }
        let anchor = state
            .ledge_anchor()
            .or(state.ledge_candidate.map(|candidate| candidate.anchor));
        if let Some(anchor) = anchor {
            let center = sim_to_world(anchor, 0.0).truncate();
            gizmos.circle_2d(Isometry2d::from_translation(center), 4.0, LEDGE_COLOR);
        }
    }

    for (hostile, projectiles) in &hostiles {
        if let Some(swing) = hostile.active_swing() {
            draw_rect(&mut gizmos, swing.hitbox, SWING_COLOR);
        }
        for projectile in projectiles.into_iter().flat_map(|p| p.0.iter()) {
            if projectile.is_alive() {
                draw_rect(&mut gizmos, projectile.bounds(), PROJECTILE_COLOR);
            }
        }
    }
}
