//! Player status flags
//!
//! Statuses are combinable booleans (a player can be running and falling at
//! the same time), so they live in a bitset rather than an enum.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Status: u8 {
        const RUNNING = 1 << 0;
        const JUMPING = 1 << 1;
        const DRAGGING = 1 << 2;
        const FALLING_DOWN = 1 << 3;
        const DEAD = 1 << 4;
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::RUNNING
    }
}

impl Status {
    /// In the air, either rising from a jump or falling
    #[inline]
    pub fn is_airborne(self) -> bool {
        self.intersects(Status::JUMPING | Status::FALLING_DOWN)
    }
}
