//! Demo autopilot
//!
//! Reads the live tiles ahead of the player and produces the keys a human
//! would press: jump holes and low obstacles, drag under tall ones, and
//! strafe onto narrow ground.

use super::input::RunInput;
use super::lifecycle::TileLifecycle;
use super::player::Player;
use super::track::{Segment, TileKind};
use crate::consts::{HIGH_OBSTACLE_SIZE, PLAYER_DEPTH, TOTAL_OBSTACLE_SIZE};

/// Jump when the hazard's near face is at most this far past the player's front
pub const JUMP_LEAD: f32 = 0.8;
/// Start dragging this far before a tall obstacle
pub const DRAG_LEAD: f32 = 3.0;
/// How far ahead to look for narrow ground
pub const STEER_LOOKAHEAD: f32 = 3.0;
/// Lateral slack before strafing
pub const STEER_TOLERANCE: f32 = 0.05;

/// Keys for this frame
pub fn autopilot_input(player: &Player, tiles: &TileLifecycle) -> RunInput {
    let mut input = RunInput::default();
    if player.is_dead() {
        return input;
    }

    let z = player.position.z;
    let front = player.bounds().max.z;
    let half_depth = tiles.tile_depth() / 2.0;

    let current = tiles.segment_at(z);
    let next = tiles.segment_at(z + tiles.tile_depth());
    for segment in [current, next].into_iter().flatten() {
        match segment.kind {
            TileKind::Hole => {
                let gap = segment.z - half_depth - front;
                // Body still over the previous tile until the back edge passes
                if gap > -PLAYER_DEPTH / 2.0 && gap <= JUMP_LEAD {
                    input.up = true;
                }
            }
            TileKind::GroundWithTotalObstacle => {
                let gap = segment.z - TOTAL_OBSTACLE_SIZE[2] / 2.0 - front;
                if (-0.01..=JUMP_LEAD).contains(&gap) {
                    input.up = true;
                }
            }
            TileKind::GroundWithHighObstacle => {
                let gap = segment.z - HIGH_OBSTACLE_SIZE[2] / 2.0 - front;
                if gap > -(HIGH_OBSTACLE_SIZE[2] + PLAYER_DEPTH) && gap <= DRAG_LEAD {
                    input.down = true;
                }
            }
            TileKind::NormalGround | TileKind::SmallGround => {}
        }
    }

    let target_x = steer_target(current, tiles.segment_at(z + STEER_LOOKAHEAD));
    let dx = target_x - player.position.x;
    if dx > STEER_TOLERANCE {
        input.right = true;
    } else if dx < -STEER_TOLERANCE {
        input.left = true;
    }

    input
}

/// Stay on narrow ground while on it, line up with it when it is coming, center otherwise
fn steer_target(current: Option<&Segment>, ahead: Option<&Segment>) -> f32 {
    let narrow = |segment: Option<&Segment>| {
        segment
            .filter(|s| s.kind == TileKind::SmallGround)
            .and_then(|s| s.ground_x)
    };
    narrow(current).or_else(|| narrow(ahead)).unwrap_or(0.0)
}
