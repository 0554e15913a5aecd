//! Tile streaming: generate ahead, reclaim behind
//!
//! Driven by the player's cyclic travelled distance. A latch gives the two
//! actions a hysteresis band: reclaiming arms generation once the distance
//! wraps low, and generating disarms it once the distance passes the upper
//! threshold. Each fires at most once per distance cycle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::scene::Scene;
use super::track::{Segment, TileKind, TrackGenerator};
use crate::consts::{GENERATE_THRESHOLD, RECLAIM_THRESHOLD};

/// What the lifecycle did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    Idle,
    /// Segments in `[from, to)` were reclaimed
    Reclaimed { from: i64, to: i64, disposed: usize },
    /// Segments `first..=last` were generated
    Generated { first: u32, last: u32 },
}

/// Owns every live segment, keyed by index
#[derive(Debug, Clone)]
pub struct TileLifecycle {
    segments: BTreeMap<u32, Segment>,
    can_generate_more_tiles: bool,
    tile_depth: f32,
}

impl TileLifecycle {
    pub fn new(tile_depth: f32) -> Self {
        Self {
            segments: BTreeMap::new(),
            can_generate_more_tiles: false,
            tile_depth,
        }
    }

    pub fn can_generate_more_tiles(&self) -> bool {
        self.can_generate_more_tiles
    }

    pub fn tile_depth(&self) -> f32 {
        self.tile_depth
    }

    /// Take ownership of freshly generated segments
    pub fn track(&mut self, segments: impl IntoIterator<Item = Segment>) {
        for segment in segments {
            if let Some(old) = self.segments.insert(segment.index, segment) {
                log::error!("Segment index {} generated twice", old.index);
            }
        }
    }

    /// Per-frame check against the post-move travelled distance
    pub fn on_frame<S: Scene + ?Sized>(
        &mut self,
        travelled_distance: f32,
        track: &mut TrackGenerator,
        scene: &mut S,
    ) -> LifecycleEvent {
        if travelled_distance <= RECLAIM_THRESHOLD && !self.can_generate_more_tiles {
            let event = self.reclaim_stale(track, scene);
            self.can_generate_more_tiles = true;
            event
        } else if travelled_distance >= GENERATE_THRESHOLD && self.can_generate_more_tiles {
            let first = track.generated_tiles_number() + 1;
            let segments = track.generate_batch(scene);
            self.track(segments);
            self.can_generate_more_tiles = false;
            LifecycleEvent::Generated {
                first,
                last: track.generated_tiles_number(),
            }
        } else {
            LifecycleEvent::Idle
        }
    }

    /// Dispose the batch before last: indices `[n - 2b, n - b)`.
    ///
    /// Indices below 1, holes, and already reclaimed segments have nothing to dispose.
    pub fn reclaim_stale<S: Scene + ?Sized>(&mut self, track: &TrackGenerator, scene: &mut S) -> LifecycleEvent {
        let newest = i64::from(track.generated_tiles_number());
        let batch = i64::from(track.tiles_per_batch());
        let (from, to) = (newest - 2 * batch, newest - batch);

        let disposed = self.dispose_range(from, to, scene);
        log::debug!("Reclaimed tiles [{from}, {to}): {disposed} meshes disposed");
        LifecycleEvent::Reclaimed { from, to, disposed }
    }

    fn dispose_range<S: Scene + ?Sized>(&mut self, from: i64, to: i64, scene: &mut S) -> usize {
        let lo = from.max(1);
        if to <= lo {
            return 0;
        }
        let (lo, hi) = (lo as u32, to as u32);

        let stale: Vec<u32> = self.segments.range(lo..hi).map(|(&index, _)| index).collect();
        let mut disposed = 0;
        for index in stale {
            if let Some(segment) = self.segments.remove(&index) {
                for handle in segment.handles() {
                    scene.dispose(handle);
                    disposed += 1;
                }
            }
        }
        disposed
    }

    /// Dispose every live segment and disarm generation
    pub fn clear<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        for segment in std::mem::take(&mut self.segments).into_values() {
            for handle in segment.handles() {
                scene.dispose(handle);
            }
        }
        self.can_generate_more_tiles = false;
    }

    /// Live segment by index
    pub fn get(&self, index: u32) -> Option<&Segment> {
        self.segments.get(&index)
    }

    /// Live segment whose depth range contains `z`
    pub fn segment_at(&self, z: f32) -> Option<&Segment> {
        let index = ((z + self.tile_depth / 2.0) / self.tile_depth).floor();
        if index < 0.0 {
            return None;
        }
        self.segments.get(&(index as u32 + 1))
    }

    /// Kind of the tile under `z`, if it is live
    pub fn kind_at(&self, z: f32) -> Option<TileKind> {
        self.segment_at(z).map(|s| s.kind)
    }

    /// Live segments in index order
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn lowest_index(&self) -> Option<u32> {
        self.segments.keys().next().copied()
    }
}
