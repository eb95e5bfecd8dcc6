//! World domain: platform collision resolution.
//!
//! Every overlapping platform is resolved along the side with the smallest
//! penetration. Overlaps and directional gates are measured against the
//! body as it entered the tick; corrections accumulate per axis, so a later
//! platform never undoes an earlier platform's correction on the other axis.

use bevy::prelude::*;

use super::components::Platform;
use crate::core::{Body, overlaps};

/// Horizontal distance from a platform edge within which a head-bump
/// counts as reaching for that ledge.
pub const LEDGE_EDGE_PROXIMITY: f32 = 40.0;
/// Ledge anchors sit this far inside the platform edge.
pub const LEDGE_ANCHOR_INSET: f32 = 5.0;

/// Which side of the body a wall contact is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Horizontal sign pointing away from the wall.
    pub fn away_sign(self) -> f32 {
        match self {
            WallSide::Left => 1.0,
            WallSide::Right => -1.0,
        }
    }

    /// Horizontal sign pointing into the wall.
    pub fn toward_sign(self) -> f32 {
        -self.away_sign()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactReport {
    pub grounded: bool,
    pub wall: Option<WallSide>,
    /// Top corner of a ledge the body bumped its head under.
    pub ledge: Option<Vec2>,
    /// Velocity of the platform that grounded the body.
    pub ground_velocity: Vec2,
}

impl ContactReport {
    /// Grounded wins: wall and ledge contacts are dropped when grounded.
    pub fn with_precedence(mut self) -> Self {
        if self.grounded {
            self.wall = None;
            self.ledge = None;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Raw per-platform contacts, before precedence is applied.
    pub contacts: ContactReport,
}

/// Resolve `body` against `platforms` in the order given.
pub fn resolve_platform_collisions<'a>(
    body: &Body,
    platforms: impl IntoIterator<Item = &'a Platform>,
) -> Resolution {
    let bounds = body.bounds();
    let entry_velocity = body.velocity;
    let mut position = body.position;
    let mut velocity = body.velocity;
    let mut contacts = ContactReport::default();

    for platform in platforms {
        let rect = platform.bounds();
        if !overlaps(&bounds, &rect) {
            continue;
        }

        let overlap_left = bounds.max.x - rect.min.x;
        let overlap_right = rect.max.x - bounds.min.x;
        let overlap_top = bounds.max.y - rect.min.y;
        let overlap_bottom = rect.max.y - bounds.min.y;
        let min_overlap = overlap_left
            .min(overlap_right)
            .min(overlap_top)
            .min(overlap_bottom);

        if min_overlap == overlap_top && entry_velocity.y > 0.0 {
            position.y = rect.min.y - body.size.y;
            velocity.y = 0.0;
            contacts.grounded = true;
            contacts.ground_velocity = platform.velocity;
        } else if platform.one_way {
            continue;
        } else if min_overlap == overlap_bottom && entry_velocity.y < 0.0 {
            position.y = rect.max.y;
            velocity.y = 0.0;
            if !contacts.grounded {
                let center_x = bounds.center().x;
                if (center_x - rect.min.x).abs() < LEDGE_EDGE_PROXIMITY {
                    contacts.ledge = Some(Vec2::new(rect.min.x + LEDGE_ANCHOR_INSET, rect.min.y));
                } else if (center_x - rect.max.x).abs() < LEDGE_EDGE_PROXIMITY {
                    contacts.ledge = Some(Vec2::new(rect.max.x - LEDGE_ANCHOR_INSET, rect.min.y));
                }
            }
        } else if min_overlap == overlap_left && !contacts.grounded {
            // Pushed out to the left: the wall is on the body's right.
            position.x = rect.min.x - body.size.x;
            velocity.x = 0.0;
            contacts.wall = Some(WallSide::Right);
        } else if min_overlap == overlap_right && !contacts.grounded {
            position.x = rect.max.x;
            velocity.x = 0.0;
            contacts.wall = Some(WallSide::Left);
        }
    }

    Resolution {
        position,
        velocity,
        contacts,
    }
}
