//! Movement domain: the player's locomotion state machine.

use bevy::prelude::*;

use crate::core::{Body, Facing};
use crate::movement::MovementTuning;
use crate::world::{ContactReport, WallSide};

#[derive(Component, Debug)]
pub struct Player;

/// Exclusive contact state. Precedence when several contacts are reported
/// in one tick: grounded, then wall, then ledge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Locomotion {
    Grounded,
    #[default]
    Airborne,
    WallAttached {
        side: WallSide,
    },
    LedgeHanging {
        anchor: Vec2,
        /// Remaining pull-up time once a pull-up has started.
        pull_up: Option<f32>,
    },
}

/// A ledge reported by a head-bump, remembered briefly so it can be grabbed
/// once the player starts falling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgeCandidate {
    pub anchor: Vec2,
    pub remaining: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpOutcome {
    WallJump { side: WallSide },
    Jump { count: u8 },
    Buffered,
}

/// What the contact report changed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactOutcome {
    pub landed: bool,
    pub buffered_jump: Option<JumpOutcome>,
    pub wall_grabbed: Option<WallSide>,
    pub ledge_grabbed: Option<Vec2>,
}

#[derive(Component, Debug, Clone, Default)]
pub struct MovementState {
    pub locomotion: Locomotion,
    pub facing: Facing,
    /// Jumps used since last touching ground, wall or ledge.
    pub jump_count: u8,
    pub coyote_timer: f32,
    /// A jump is buffered while this is positive.
    pub jump_buffer_timer: f32,
    /// Grace window for wall-jumping after leaving a wall.
    pub wall_stick_timer: f32,
    pub last_wall: Option<WallSide>,
    pub ledge_grab_cooldown: f32,
    pub ledge_candidate: Option<LedgeCandidate>,
    /// Velocity of the platform under the player, for carrying.
    pub ground_velocity: Vec2,
}

impl MovementState {
    pub fn is_grounded(&self) -> bool {
        matches!(self.locomotion, Locomotion::Grounded)
    }

    pub fn wall_side(&self) -> Option<WallSide> {
        match self.locomotion {
            Locomotion::WallAttached { side } => Some(side),
            _ => None,
        }
    }

    pub fn is_hanging(&self) -> bool {
        matches!(self.locomotion, Locomotion::LedgeHanging { .. })
    }

    pub fn is_pulling_up(&self) -> bool {
        matches!(
            self.locomotion,
            Locomotion::LedgeHanging {
                pull_up: Some(_),
                ..
            }
        )
    }

    pub fn ledge_anchor(&self) -> Option<Vec2> {
        match self.locomotion {
            Locomotion::LedgeHanging { anchor, .. } => Some(anchor),
            _ => None,
        }
    }

    pub fn has_buffered_jump(&self) -> bool {
        self.jump_buffer_timer > 0.0
    }

    /// Resolve a jump press: wall-jump, then ground/coyote/air jump, else buffer.
    pub fn jump(&mut self, body: &mut Body, tuning: &MovementTuning) -> JumpOutcome {
        let wall = match self.locomotion {
            Locomotion::WallAttached { side } => Some(side),
            _ if self.wall_stick_timer > 0.0 => self.last_wall,
            _ => None,
        };

        if let Some(side) = wall {
            let away = side.away_sign();
            body.velocity = Vec2::new(away * tuning.wall_jump_horizontal, -tuning.wall_jump_vertical);
            self.facing = Facing::from_sign(away).unwrap_or(self.facing);
            self.locomotion = Locomotion::Airborne;
            self.wall_stick_timer = 0.0;
            self.last_wall = None;
            self.jump_count = 1;
            self.coyote_timer = 0.0;
            self.jump_buffer_timer = 0.0;
            return JumpOutcome::WallJump { side };
        }

        if self.is_grounded() || self.coyote_timer > 0.0 || self.jump_count < tuning.max_jumps {
            body.velocity.y = -tuning.jump_velocity;
            self.jump_count = (self.jump_count + 1).min(tuning.max_jumps.max(1));
            self.locomotion = Locomotion::Airborne;
            self.coyote_timer = 0.0;
            self.jump_buffer_timer = 0.0;
            return JumpOutcome::Jump {
                count: self.jump_count,
            };
        }

        self.jump_buffer_timer = tuning.jump_buffer_time;
        JumpOutcome::Buffered
    }

    /// Touch down. Fires a buffered jump if one is pending.
    pub fn land(&mut self, body: &mut Body, tuning: &MovementTuning) -> Option<JumpOutcome> {
        self.locomotion = Locomotion::Grounded;
        self.jump_count = 0;
        self.wall_stick_timer = 0.0;
        self.last_wall = None;
        self.ledge_candidate = None;
        self.coyote_timer = tuning.coyote_time;

        if self.has_buffered_jump() {
            self.jump_buffer_timer = 0.0;
            return Some(self.jump(body, tuning));
        }
        None
    }

    /// Attach to a wall unless moving away from it while still rising.
    pub fn try_grab_wall(
        &mut self,
        side: WallSide,
        input_x: f32,
        body: &Body,
        tuning: &MovementTuning,
    ) -> bool {
        if self.is_grounded() {
            return false;
        }
        let toward_wall = input_x * side.toward_sign() > 0.0;
        let neutral = input_x == 0.0;
        if !(toward_wall || neutral || body.velocity.y > 0.0) {
            return false;
        }

        self.locomotion = Locomotion::WallAttached { side };
        self.last_wall = Some(side);
        self.wall_stick_timer = tuning.wall_stick_time;
        self.jump_count = 0;
        true
    }

    /// Hang from a ledge. Only while airborne, falling and off cooldown.
    pub fn try_grab_ledge(&mut self, anchor: Vec2, body: &mut Body, tuning: &MovementTuning) -> bool {
        if !matches!(self.locomotion, Locomotion::Airborne)
            || body.velocity.y <= 0.0
            || self.ledge_grab_cooldown > 0.0
        {
            return false;
        }

        body.velocity = Vec2::ZERO;
        self.jump_count = 0;
        self.ledge_grab_cooldown = tuning.ledge_grab_cooldown;
        self.ledge_candidate = None;
        self.locomotion = Locomotion::LedgeHanging {
            anchor,
            pull_up: None,
        };
        true
    }

    /// Start climbing onto the ledge currently held.
    pub fn pull_up(&mut self, body: &mut Body, tuning: &MovementTuning) -> bool {
        let Locomotion::LedgeHanging {
            anchor,
            pull_up: None,
        } = self.locomotion
        else {
            return false;
        };

        let duration = tuning.pull_up_duration.max(f32::EPSILON);
        body.velocity = Vec2::new(0.0, -tuning.pull_up_height / duration);
        self.locomotion = Locomotion::LedgeHanging {
            anchor,
            pull_up: Some(duration),
        };
        true
    }

    /// Feed this tick's collision contacts back into the state machine.
    pub fn apply_contacts(
        &mut self,
        contacts: &ContactReport,
        input_x: f32,
        body: &mut Body,
        tuning: &MovementTuning,
    ) -> ContactOutcome {
        let mut outcome = ContactOutcome::default();

        if contacts.grounded {
            outcome.landed = !self.is_grounded();
            outcome.buffered_jump = self.land(body, tuning);
            self.ground_velocity = contacts.ground_velocity;
            return outcome;
        }

        self.ground_velocity = Vec2::ZERO;
        if self.is_grounded() {
            // Walked off an edge; coyote time keeps counting down.
            self.locomotion = Locomotion::Airborne;
        }
        if self.is_pulling_up() {
            return outcome;
        }

        match contacts.wall {
            Some(side) => {
                let was_attached = self.wall_side() == Some(side);
                if self.try_grab_wall(side, input_x, body, tuning) {
                    if !was_attached {
                        outcome.wall_grabbed = Some(side);
                    }
                } else if self.wall_side().is_some() {
                    self.locomotion = Locomotion::Airborne;
                }
            }
            None => {
                if self.wall_side().is_some() {
                    self.locomotion = Locomotion::Airborne;
                }
            }
        }

        if let Some(anchor) = contacts.ledge {
            self.ledge_candidate = Some(LedgeCandidate {
                anchor,
                remaining: tuning.ledge_memory_time,
            });
        }
        if let Some(candidate) = self.ledge_candidate
            && self.try_grab_ledge(candidate.anchor, body, tuning)
        {
            outcome.ledge_grabbed = Some(candidate.anchor);
        }

        outcome
    }

    /// Count down timers. Returns true when a pull-up finished this tick.
    pub fn tick(&mut self, dt: f32, body: &mut Body, tuning: &MovementTuning) -> bool {
        if self.coyote_timer > 0.0 {
            self.coyote_timer -= dt;
        }
        if self.jump_buffer_timer > 0.0 {
            self.jump_buffer_timer -= dt;
        }
        if self.wall_stick_timer > 0.0 {
            self.wall_stick_timer -= dt;
        }
        if self.ledge_grab_cooldown > 0.0 {
            self.ledge_grab_cooldown -= dt;
        }
        if let Some(candidate) = self.ledge_candidate.as_mut() {
            candidate.remaining -= dt;
            if candidate.remaining <= 0.0 {
                self.ledge_candidate = None;
            }
        }

        let Locomotion::LedgeHanging {
            anchor,
            pull_up: Some(remaining),
        } = self.locomotion
        else {
            return false;
        };

        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.locomotion = Locomotion::LedgeHanging {
                anchor,
                pull_up: Some(remaining),
            };
            return false;
        }

        // Stand on the ledge.
        body.velocity = Vec2::ZERO;
        body.position = Vec2::new(anchor.x - body.size.x / 2.0, anchor.y - body.size.y);
        self.jump_buffer_timer = 0.0;
        self.land(body, tuning);
        true
    }

    /// Turn toward non-zero horizontal input.
    pub fn face_input(&mut self, input_x: f32) {
        if let Some(facing) = Facing::from_sign(input_x) {
            self.facing = facing;
        }
    }
}

/// Accelerate toward `input_x * max_speed`, or decelerate toward zero
/// without input.
pub fn approach_horizontal(current: f32, input_x: f32, dt: f32, tuning: &MovementTuning) -> f32 {
    if input_x != 0.0 {
        let target = input_x * tuning.max_speed;
        let step = tuning.accel * dt;
        if current < target {
            (current + step).min(target)
        } else {
            (current - step).max(target)
        }
    } else {
        let step = tuning.decel * dt;
        if current > 0.0 {
            (current - step).max(0.0)
        } else {
            (current + step).min(0.0)
        }
    }
}
