//! Player movement and status state machine
//!
//! One call to [`Player::advance`] per frame. The order of the checks inside a
//! frame matters:
//!
//! 1. collision-resolved move (gravity, jump, forward run)
//! 2. lateral strafe (grounded only)
//! 3. distance accounting
//! 4. altitude check (`FALLING_DOWN`, `last_altitude`)
//! 5. dragging (may snap back to the resting altitude)
//! 6. jump start / jump peak
//! 7. death
//!
//! Dragging is evaluated while `JUMPING` is still set on the peak frame, and
//! the peak bumps `last_altitude` so the following frame reads `FALLING_DOWN`.
//! Together they keep the drag release from snapping an airborne player down.

use std::fmt;

use glam::Vec3;

use super::input::{FrameContext, RunInput};
use super::scene::{Aabb, Hud, Scene, ellipsoid_from_bounds};
use super::status::Status;
use crate::consts::*;
use crate::settings::Settings;
use crate::wrap_distance;

type DeathCallback = Box<dyn FnMut()>;

/// The runner
pub struct Player {
    /// Center of the hitbox (x lateral, y vertical, z forward)
    pub position: Vec3,
    pub statuses: Status,
    /// Current forward speed
    pub speed: f32,
    /// Cyclic distance in `[0, DISTANCE_CYCLE)`, drives tile streaming
    pub travelled_distance: f32,
    /// Monotonic distance, shown as the score
    pub total_travelled_distance: f32,
    /// Altitude at the end of the previous frame
    pub last_altitude: f32,
    pub coins: u32,
    /// Hitbox scale (y halves while dragging)
    pub scaling: Vec3,
    /// Collision ellipsoid radii, derived from the scaled bounding box
    pub ellipsoid: Vec3,
    /// Indestructible: no gravity and no death callback
    pub god_mode: bool,
    size: Vec3,
    tuning: Settings,
    on_death: Option<DeathCallback>,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("position", &self.position)
            .field("statuses", &self.statuses)
            .field("speed", &self.speed)
            .field("travelled_distance", &self.travelled_distance)
            .field("total_travelled_distance", &self.total_travelled_distance)
            .field("last_altitude", &self.last_altitude)
            .field("coins", &self.coins)
            .field("god_mode", &self.god_mode)
            .finish_non_exhaustive()
    }
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        let mut player = Self {
            position: Vec3::new(0.0, settings.resting_altitude, 0.0),
            statuses: Status::default(),
            speed: settings.default_speed,
            travelled_distance: 0.0,
            total_travelled_distance: 0.0,
            last_altitude: settings.resting_altitude,
            coins: 0,
            scaling: Vec3::ONE,
            ellipsoid: Vec3::ZERO,
            god_mode: settings.god_mode,
            size: Vec3::new(PLAYER_WIDTH, PLAYER_HEIGHT, PLAYER_DEPTH),
            tuning: settings.clone(),
            on_death: None,
        };
        player.refresh_ellipsoid();
        player
    }

    /// Register the callback invoked once per death (never in god mode)
    pub fn set_on_death(&mut self, callback: impl FnMut() + 'static) {
        self.on_death = Some(Box::new(callback));
    }

    #[inline]
    pub fn has(&self, status: Status) -> bool {
        self.statuses.contains(status)
    }

    #[inline]
    pub fn set_status(&mut self, status: Status, value: bool) {
        self.statuses.set(status, value);
    }

    pub fn is_dead(&self) -> bool {
        self.has(Status::DEAD)
    }

    /// World-space bounding box of the scaled hitbox
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.size * self.scaling)
    }

    /// Ellipsoid from the scaled hitbox, independent of where the player stands
    fn refresh_ellipsoid(&mut self) {
        let local = Aabb::from_center_size(Vec3::ZERO, self.size * self.scaling);
        self.ellipsoid = ellipsoid_from_bounds(&local);
    }

    /// Push the initial HUD texts
    pub fn publish_hud(&self, hud: &mut impl Hud) {
        hud.publish_score(&format!("Meters: {}", self.total_travelled_distance.floor() as u64));
        hud.publish_coins(&format!("Coins: {}", self.coins));
    }

    /// Advance one frame
    pub fn advance<S, H>(&mut self, ctx: &FrameContext, scene: &S, hud: &mut H)
    where
        S: Scene + ?Sized,
        H: Hud + ?Sized,
    {
        if self.is_dead() {
            return;
        }

        let ratio = ctx.frame_time_ratio;
        let gravity = if self.god_mode { 0.0 } else { self.tuning.gravity_delta() };
        let jump = if self.has(Status::JUMPING) && !self.has(Status::FALLING_DOWN) {
            self.tuning.jump_force
        } else {
            0.0
        };
        let mut run = self.speed * ratio;
        if self.has(Status::JUMPING) {
            run *= JUMP_SPEED_FACTOR;
        }

        self.position = scene.move_with_collision(self.position, self.ellipsoid, Vec3::new(0.0, gravity + jump, run));

        self.apply_lateral_input(ratio, &ctx.input);
        self.accumulate_distance(ratio, hud);
        self.check_altitude();
        self.check_dragging(ctx.input.down);
        self.check_jump(ctx.input.up);
        self.check_death();
    }

    fn apply_lateral_input(&mut self, ratio: f32, input: &RunInput) {
        if self.statuses.is_airborne() {
            return;
        }
        let lateral = (self.speed / LATERAL_SPEED_DIVISOR) * ratio;
        if input.left {
            self.position.x -= lateral;
        }
        if input.right {
            self.position.x += lateral;
        }
    }

    fn accumulate_distance<H: Hud + ?Sized>(&mut self, ratio: f32, hud: &mut H) {
        if self.travelled_distance >= DISTANCE_CYCLE {
            self.travelled_distance = 0.0;
        }

        let step = self.speed * ratio;
        self.travelled_distance = wrap_distance(self.travelled_distance + step, DISTANCE_CYCLE);
        self.total_travelled_distance += step;

        hud.publish_score(&format!("Meters: {}", self.total_travelled_distance.floor() as u64));
    }

    fn check_altitude(&mut self) {
        let falling = self.position.y < self.last_altitude;
        self.set_status(Status::FALLING_DOWN, falling);
        self.last_altitude = self.position.y;
    }

    fn check_dragging(&mut self, down: bool) {
        if down {
            self.set_status(Status::DRAGGING, true);
            self.scaling.y = DRAG_SCALE_Y;
            self.speed = self.tuning.drag_speed();
        } else {
            if !self.statuses.is_airborne() {
                self.position.y = self.tuning.resting_altitude;
            }
            self.set_status(Status::DRAGGING, false);
            self.scaling.y = 1.0;
            self.speed = self.tuning.default_speed;
        }
        self.refresh_ellipsoid();
    }

    fn check_jump(&mut self, up: bool) {
        if up && !self.statuses.is_airborne() {
            self.set_status(Status::JUMPING, true);
            log::trace!("Jump at z={:.2}", self.position.z);
        }

        if self.has(Status::JUMPING) && self.position.y >= self.tuning.jump_max_altitude {
            // Next frame's altitude check must read FALLING_DOWN
            self.last_altitude += JUMP_EXIT_ALTITUDE_BUMP;
            self.set_status(Status::JUMPING, false);
        }
    }

    fn check_death(&mut self) {
        if self.position.y > self.tuning.death_altitude || self.is_dead() {
            return;
        }

        self.set_status(Status::DEAD, true);
        log::info!(
            "Player died at z={:.1} after {:.0} meters",
            self.position.z,
            self.total_travelled_distance
        );

        if self.god_mode {
            return;
        }
        if let Some(on_death) = self.on_death.as_mut() {
            on_death();
        }
    }

    /// Pick up a coin
    pub fn keep_coin(&mut self, hud: &mut impl Hud) {
        self.coins += 1;
        hud.publish_coins(&format!("Coins: {}", self.coins));
    }

    /// Back to the start line without recreating the player.
    ///
    /// Coins are kept.
    pub fn reset(&mut self) {
        self.statuses.remove(Status::DEAD | Status::JUMPING | Status::FALLING_DOWN | Status::DRAGGING);
        self.statuses.insert(Status::RUNNING);

        self.position = Vec3::new(0.0, self.tuning.resting_altitude, 0.0);
        self.last_altitude = self.tuning.resting_altitude;
        self.travelled_distance = 0.0;
        self.total_travelled_distance = 0.0;

        self.scaling = Vec3::ONE;
        self.speed = self.tuning.default_speed;
        self.refresh_ellipsoid();

        log::info!("Player reset");
    }
}
