//! Endless Runner - procedural 3D runner core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (player movement, track generation, tile streaming)
//! - `session`: Input shell (key state, pause, level selection)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Error types for the fallible outer surfaces

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use session::{Key, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Reference frame rate the engine's animation ratio is normalized to
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Divisor applied to the engine animation ratio to get the frame time ratio
    pub const ANIMATION_RATIO_DIVISOR: f32 = 50.0;
    /// Longest frame we integrate in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const DEFAULT_SPEED: f32 = 15.0;
    pub const DRAG_SPEED_FACTOR: f32 = 1.5;
    pub const JUMP_SPEED_FACTOR: f32 = 1.5;
    /// Lateral speed is the forward speed divided by this
    pub const LATERAL_SPEED_DIVISOR: f32 = 5.0;
    pub const GRAVITY: f32 = -12.0;
    pub const JUMP_FORCE: f32 = 0.8;
    pub const JUMP_MAX_ALTITUDE: f32 = 3.2;
    /// Added to the last altitude when a jump peaks
    pub const JUMP_EXIT_ALTITUDE_BUMP: f32 = 1.0;
    pub const RESTING_ALTITUDE: f32 = 0.25;
    pub const DEATH_ALTITUDE: f32 = -2.0;

    /// Player hitbox (width, height, depth)
    pub const PLAYER_WIDTH: f32 = 0.333_333_3;
    pub const PLAYER_HEIGHT: f32 = 0.5;
    pub const PLAYER_DEPTH: f32 = 0.333_333_3;
    /// Vertical hitbox scale while dragging
    pub const DRAG_SCALE_Y: f32 = 0.5;

    /// Travelled distance wraps at this value
    pub const DISTANCE_CYCLE: f32 = 100.0;
    /// Old tiles are reclaimed once the cyclic distance drops to this
    pub const RECLAIM_THRESHOLD: f32 = 10.0;
    /// New tiles are generated once the cyclic distance reaches this
    pub const GENERATE_THRESHOLD: f32 = 70.0;

    /// Track defaults
    pub const TILE_DEPTH: f32 = 10.0;
    pub const TILES_PER_BATCH: u32 = 10;
    pub const TILE_WIDTH: f32 = 1.0;
    pub const TILE_HEIGHT: f32 = 1.0;
    /// Tiles sit with their top face at y = 0
    pub const TILE_Y: f32 = -0.5;
    pub const SMALL_TILE_WIDTH: f32 = 0.3333;
    /// Lateral offset of a small tile from the track center
    pub const SMALL_TILE_OFFSET: f32 = 0.3333;

    /// Waist-height obstacle that must be jumped
    pub const TOTAL_OBSTACLE_SIZE: [f32; 3] = [1.0, 0.25, 0.25];
    pub const TOTAL_OBSTACLE_Y: f32 = 0.125;
    /// Tall obstacle that must be dragged under
    pub const HIGH_OBSTACLE_SIZE: [f32; 3] = [2.0, 2.0, 0.25];
    pub const HIGH_OBSTACLE_Y: f32 = 1.5;
}

/// Convert a frame delta (seconds) to the normalized frame time ratio.
///
/// At the reference frame rate the engine animation ratio is 1.0; the
/// simulation works with that ratio divided by [`consts::ANIMATION_RATIO_DIVISOR`].
#[inline]
pub fn frame_time_ratio_from_delta(dt: f32) -> f32 {
    let dt = dt.clamp(0.0, consts::MAX_FRAME_DT);
    dt * consts::REFERENCE_FPS / consts::ANIMATION_RATIO_DIVISOR
}

/// Wrap a cyclic distance into `[0, cycle)`
#[inline]
pub fn wrap_distance(distance: f32, cycle: f32) -> f32 {
    let wrapped = distance.rem_euclid(cycle);
    // rem_euclid can round up to `cycle` for tiny negative inputs
    if wrapped >= cycle { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time_ratio_at_reference_rate() {
        let ratio = frame_time_ratio_from_delta(1.0 / 60.0);
        assert!((ratio - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_frame_time_ratio_clamps_long_frames() {
        assert_eq!(frame_time_ratio_from_delta(5.0), frame_time_ratio_from_delta(0.1));
        assert_eq!(frame_time_ratio_from_delta(-1.0), 0.0);
    }

    #[test]
    fn test_wrap_distance() {
        assert!((wrap_distance(103.0, 100.0) - 3.0).abs() < 1e-5);
        assert_eq!(wrap_distance(100.0, 100.0), 0.0);
        assert!((wrap_distance(42.5, 100.0) - 42.5).abs() < 1e-6);
    }
}
