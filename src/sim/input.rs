//! Per-frame input and timing passed explicitly into the simulation

/// Directional key state for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunInput {
    /// Jump
    pub up: bool,
    /// Drag (crouch) while held
    pub down: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
}

/// Everything the simulation reads from the host for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Normalized elapsed-time factor; all forward and lateral motion scales by it
    pub frame_time_ratio: f32,
    pub input: RunInput,
}

impl FrameContext {
    pub fn new(frame_time_ratio: f32, input: RunInput) -> Self {
        Self {
            frame_time_ratio,
            input,
        }
    }
}
