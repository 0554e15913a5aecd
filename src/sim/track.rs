//! Procedural track generation
//!
//! The track is a sequence of tiles, one per index, laid end to end along +z.
//! Each batch draws tile kinds uniformly, with one constraint: two
//! non-normal tiles (holes or obstacles) never follow each other.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::scene::{MeshHandle, Scene, SolidBox};
use crate::consts::*;
use crate::settings::Settings;

const TILE_COLOR: Vec3 = Vec3::new(0.5, 0.5, 0.5);
const TILE_COLOR_EVEN: Vec3 = Vec3::new(0.8, 0.3, 0.3);
const OBSTACLE_COLOR: Vec3 = Vec3::ONE;

/// Tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Full-width ground
    NormalGround,
    /// Narrow ground on one side; the player must strafe onto it
    SmallGround,
    /// No ground at all
    Hole,
    /// Ground with a low obstacle spanning the width (jump it)
    GroundWithTotalObstacle,
    /// Ground with a tall obstacle (drag under it)
    GroundWithHighObstacle,
}

impl TileKind {
    pub const ALL: [TileKind; 5] = [
        TileKind::NormalGround,
        TileKind::SmallGround,
        TileKind::Hole,
        TileKind::GroundWithTotalObstacle,
        TileKind::GroundWithHighObstacle,
    ];

    pub fn is_normal(self) -> bool {
        self == TileKind::NormalGround
    }
}

/// One generated tile and the geometry created for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based generation index
    pub index: u32,
    pub kind: TileKind,
    /// Center of the tile along the track
    pub z: f32,
    /// Ground box (absent for holes)
    pub ground: Option<MeshHandle>,
    /// Obstacle box, if the kind has one
    pub obstacle: Option<MeshHandle>,
    /// Lateral center of the walkable ground, if any
    pub ground_x: Option<f32>,
}

impl Segment {
    /// Geometry handles owned by this segment
    pub fn handles(&self) -> impl Iterator<Item = MeshHandle> {
        self.ground.into_iter().chain(self.obstacle)
    }
}

pub fn ground_tile_name(index: u32) -> String {
    format!("groundTile{index}")
}

pub fn obstacle_tile_name(index: u32) -> String {
    format!("obstacleTile{index}")
}

/// Generates tiles in batches, never reusing an index
#[derive(Debug, Clone)]
pub struct TrackGenerator {
    seed: u64,
    rng: Pcg32,
    last_tile_kind: TileKind,
    generated_tiles_number: u32,
    tile_depth: f32,
    tiles_per_batch: u32,
}

impl TrackGenerator {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            // Forces the first tile of a track to be normal ground
            last_tile_kind: TileKind::Hole,
            generated_tiles_number: 0,
            tile_depth: settings.tile_depth,
            tiles_per_batch: settings.tiles_per_batch,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Index of the most recently generated tile (0 before the first batch)
    pub fn generated_tiles_number(&self) -> u32 {
        self.generated_tiles_number
    }

    pub fn last_tile_kind(&self) -> TileKind {
        self.last_tile_kind
    }

    pub fn tiles_per_batch(&self) -> u32 {
        self.tiles_per_batch
    }

    pub fn tile_depth(&self) -> f32 {
        self.tile_depth
    }

    /// Track position of a tile's center
    pub fn tile_z(&self, index: u32) -> f32 {
        (index.saturating_sub(1)) as f32 * self.tile_depth
    }

    /// Generate the next batch of tiles
    pub fn generate_batch<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Vec<Segment> {
        let first = self.generated_tiles_number + 1;
        let segments: Vec<Segment> = (0..self.tiles_per_batch).map(|_| self.generate_next(scene)).collect();

        log::debug!(
            "Generated tiles {}..={} (holes: {}, obstacles: {})",
            first,
            self.generated_tiles_number,
            segments.iter().filter(|s| s.kind == TileKind::Hole).count(),
            segments.iter().filter(|s| s.obstacle.is_some()).count()
        );
        segments
    }

    fn generate_next<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Segment {
        self.generated_tiles_number += 1;

        let mut kind = TileKind::ALL[self.rng.random_range(0..TileKind::ALL.len())];
        if !self.last_tile_kind.is_normal() && !kind.is_normal() {
            kind = TileKind::NormalGround;
        }
        self.last_tile_kind = kind;

        self.build(scene, self.generated_tiles_number, kind)
    }

    fn build<S: Scene + ?Sized>(&mut self, scene: &mut S, index: u32, kind: TileKind) -> Segment {
        let z = self.tile_z(index);
        let mut segment = Segment {
            index,
            kind,
            z,
            ground: None,
            obstacle: None,
            ground_x: None,
        };

        match kind {
            TileKind::NormalGround => {
                segment.ground = Some(self.create_tile(scene, index, TILE_WIDTH, 0.0));
                segment.ground_x = Some(0.0);
            }
            TileKind::SmallGround => {
                let x = if self.rng.random_range(1..=100) <= 50 {
                    -SMALL_TILE_OFFSET
                } else {
                    SMALL_TILE_OFFSET
                };
                segment.ground = Some(self.create_tile(scene, index, SMALL_TILE_WIDTH, x));
                segment.ground_x = Some(x);
            }
            // A hole is just the absence of a tile at this index
            TileKind::Hole => {}
            TileKind::GroundWithTotalObstacle => {
                segment.ground = Some(self.create_tile(scene, index, TILE_WIDTH, 0.0));
                segment.ground_x = Some(0.0);
                segment.obstacle = Some(Self::create_obstacle(
                    scene,
                    index,
                    Vec3::from_array(TOTAL_OBSTACLE_SIZE),
                    Vec3::new(0.0, TOTAL_OBSTACLE_Y, z),
                ));
            }
            TileKind::GroundWithHighObstacle => {
                segment.ground = Some(self.create_tile(scene, index, TILE_WIDTH, 0.0));
                segment.ground_x = Some(0.0);
                segment.obstacle = Some(Self::create_obstacle(
                    scene,
                    index,
                    Vec3::from_array(HIGH_OBSTACLE_SIZE),
                    Vec3::new(0.0, HIGH_OBSTACLE_Y, z),
                ));
            }
        }

        log::trace!("Tile {index}: {kind:?} at z={z}");
        segment
    }

    fn create_tile<S: Scene + ?Sized>(&self, scene: &mut S, index: u32, width: f32, x: f32) -> MeshHandle {
        // Alternate colors so consecutive tiles are distinguishable
        let color = if index % 2 == 0 { TILE_COLOR_EVEN } else { TILE_COLOR };
        scene.create_solid_box(SolidBox {
            name: ground_tile_name(index),
            size: Vec3::new(width, TILE_HEIGHT, self.tile_depth),
            position: Vec3::new(x, TILE_Y, self.tile_z(index)),
            color,
        })
    }

    fn create_obstacle<S: Scene + ?Sized>(scene: &mut S, index: u32, size: Vec3, position: Vec3) -> MeshHandle {
        scene.create_solid_box(SolidBox {
            name: obstacle_tile_name(index),
            size,
            position,
            color: OBSTACLE_COLOR,
        })
    }
}
