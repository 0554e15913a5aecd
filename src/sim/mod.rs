//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame timing passed in explicitly
//! - Seeded RNG only
//! - Stable iteration order (by tile index)
//! - No rendering or platform dependencies; the engine sits behind [`Scene`] and [`Hud`]

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod level;
pub mod lifecycle;
pub mod player;
pub mod scene;
pub mod status;
pub mod track;
pub mod world;

pub use autopilot::autopilot_input;
pub use collision::{Axis, SweepResult, resolve_motion, sweep_axis};
pub use input::{FrameContext, RunInput};
pub use level::{Level, RunSummary};
pub use lifecycle::{LifecycleEvent, TileLifecycle};
pub use player::Player;
pub use scene::{Aabb, Hud, MeshHandle, Scene, SolidBox, ellipsoid_from_bounds};
pub use status::Status;
pub use track::{Segment, TileKind, TrackGenerator};
pub use world::{HeadlessHud, HeadlessScene};
