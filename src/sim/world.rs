//! Headless scene and HUD
//!
//! In-memory implementations of the collaborator traits. They hold named
//! boxes and resolve motion with [`collision::resolve_motion`], which is
//! enough to run and test the whole loop without a rendering engine.

use std::collections::{BTreeMap, HashMap};

use glam::Vec3;

use super::collision;
use super::scene::{Aabb, Hud, MeshHandle, Scene, SolidBox};

/// Scene with no rendering: a set of named solid boxes
#[derive(Debug, Default)]
pub struct HeadlessScene {
    boxes: BTreeMap<MeshHandle, SolidBox>,
    names: HashMap<String, MeshHandle>,
    next_id: u32,
    disposed: u64,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live box for a handle
    pub fn get(&self, handle: MeshHandle) -> Option<&SolidBox> {
        self.boxes.get(&handle)
    }

    /// Number of live boxes
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Total boxes disposed over the scene's lifetime
    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }

    /// Live boxes in creation order
    pub fn boxes(&self) -> impl Iterator<Item = &SolidBox> {
        self.boxes.values()
    }
}

impl Scene for HeadlessScene {
    fn create_solid_box(&mut self, desc: SolidBox) -> MeshHandle {
        let handle = MeshHandle(self.next_id);
        self.next_id += 1;

        if let Some(previous) = self.names.insert(desc.name.clone(), handle) {
            log::warn!("Box name {} reused; dropping previous geometry", desc.name);
            self.boxes.remove(&previous);
        }
        log::trace!("Created {} at {:?}", desc.name, desc.position);
        self.boxes.insert(handle, desc);
        handle
    }

    fn find_by_name(&self, name: &str) -> Option<MeshHandle> {
        self.names.get(name).copied()
    }

    fn dispose(&mut self, handle: MeshHandle) {
        if let Some(desc) = self.boxes.remove(&handle) {
            if self.names.get(&desc.name) == Some(&handle) {
                self.names.remove(&desc.name);
            }
            self.disposed += 1;
            log::trace!("Disposed {}", desc.name);
        }
    }

    fn move_with_collision(&self, position: Vec3, ellipsoid: Vec3, delta: Vec3) -> Vec3 {
        let mover = Aabb::from_center_size(position, ellipsoid * 2.0);
        let solids: Vec<Aabb> = self.boxes.values().map(SolidBox::bounds).collect();
        position + collision::resolve_motion(mover, delta, &solids)
    }
}

/// HUD that keeps the latest texts and logs changes
#[derive(Debug, Clone, Default)]
pub struct HeadlessHud {
    pub score_text: String,
    pub coins_text: String,
}

impl Hud for HeadlessHud {
    fn publish_score(&mut self, text: &str) {
        if self.score_text != text {
            log::trace!("{text}");
            self.score_text.clear();
            self.score_text.push_str(text);
        }
    }

    fn publish_coins(&mut self, text: &str) {
        if self.coins_text != text {
            log::debug!("{text}");
            self.coins_text.clear();
            self.coins_text.push_str(text);
        }
    }
}
