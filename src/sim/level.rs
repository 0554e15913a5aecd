//! Level loop
//!
//! Owns the scene, the player, the track generator and the tile lifecycle,
//! and runs them in a fixed order once per frame.

use serde::{Deserialize, Serialize};

use super::input::FrameContext;
use super::lifecycle::{LifecycleEvent, TileLifecycle};
use super::player::Player;
use super::scene::{Hud, Scene};
use super::track::TrackGenerator;
use crate::settings::Settings;

/// End-of-run numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub frames: u64,
    pub meters: u64,
    pub coins: u32,
    pub tiles_generated: u32,
    pub live_tiles: usize,
    pub dead: bool,
}

/// A running level
#[derive(Debug)]
pub struct Level<S: Scene, H: Hud> {
    settings: Settings,
    seed: u64,
    scene: S,
    hud: H,
    player: Player,
    track: TrackGenerator,
    tiles: TileLifecycle,
    frames: u64,
}

impl<S: Scene, H: Hud> Level<S, H> {
    /// Lay the first batch of track and place the player on it
    pub fn start(settings: &Settings, mut scene: S, mut hud: H) -> Self {
        let seed = settings.resolve_seed();
        let mut track = TrackGenerator::new(settings, seed);
        let mut tiles = TileLifecycle::new(settings.tile_depth);
        tiles.track(track.generate_batch(&mut scene));

        let player = Player::new(settings);
        player.publish_hud(&mut hud);

        log::info!("Level started (seed {seed}, god mode: {})", settings.god_mode);

        Self {
            settings: settings.clone(),
            seed,
            scene,
            hud,
            player,
            track,
            tiles,
            frames: 0,
        }
    }

    /// Run one frame: move the player, then stream tiles from the post-move distance
    pub fn frame(&mut self, ctx: &FrameContext) -> LifecycleEvent {
        self.frames += 1;
        self.player.advance(ctx, &self.scene, &mut self.hud);
        self.tiles
            .on_frame(self.player.travelled_distance, &mut self.track, &mut self.scene)
    }

    /// Start over on a fresh copy of the same track.
    ///
    /// Indices are unique within one run only: the new generator starts again
    /// at 1, after every live tile of the previous run has been disposed.
    pub fn retry(&mut self) {
        self.tiles.clear(&mut self.scene);
        self.track = TrackGenerator::new(&self.settings, self.seed);
        self.tiles.track(self.track.generate_batch(&mut self.scene));

        self.player.reset();
        self.player.publish_hud(&mut self.hud);
        self.frames = 0;
    }

    /// Credit a coin pickup reported by the engine
    pub fn keep_coin(&mut self) {
        self.player.keep_coin(&mut self.hud);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn tiles(&self) -> &TileLifecycle {
        &self.tiles
    }

    pub fn track(&self) -> &TrackGenerator {
        &self.track
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed,
            frames: self.frames,
            meters: self.player.total_travelled_distance.floor() as u64,
            coins: self.player.coins,
            tiles_generated: self.track.generated_tiles_number(),
            live_tiles: self.tiles.len(),
            dead: self.player.is_dead(),
        }
    }
}
