//! Session shell
//!
//! Owns raw key state, the pause flag and the ordered list of levels, and
//! forwards each host frame to the current level.

use crate::settings::Settings;
use crate::sim::{FrameContext, Hud, Level, LifecycleEvent, RunInput, Scene, autopilot_input};

/// Directional keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// W / S / A / D by key code
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            87 => Some(Key::Up),
            83 => Some(Key::Down),
            65 => Some(Key::Left),
            68 => Some(Key::Right),
            _ => None,
        }
    }
}

/// Top-level run state
#[derive(Debug)]
pub struct Session<S: Scene, H: Hud> {
    levels: Vec<Settings>,
    current_level_number: usize,
    level: Option<Level<S, H>>,
    keys: RunInput,
    paused: bool,
    autopilot: bool,
}

impl<S: Scene, H: Hud> Session<S, H> {
    pub fn new(levels: Vec<Settings>) -> Self {
        let levels = if levels.is_empty() {
            vec![Settings::default()]
        } else {
            levels
        };
        Self {
            levels,
            current_level_number: 0,
            level: None,
            keys: RunInput::default(),
            paused: false,
            autopilot: false,
        }
    }

    /// Start the first level
    pub fn start(&mut self, scene: S, hud: H) -> &mut Level<S, H> {
        self.launch(0, scene, hud)
    }

    /// Start a level by its 1-based number
    pub fn start_level(&mut self, number: usize, scene: S, hud: H) -> Option<&mut Level<S, H>> {
        if number == 0 || number > self.levels.len() {
            log::warn!("No level {number} (have {})", self.levels.len());
            return None;
        }
        Some(self.launch(number - 1, scene, hud))
    }

    fn launch(&mut self, index: usize, scene: S, hud: H) -> &mut Level<S, H> {
        self.current_level_number = index + 1;
        self.keys = RunInput::default();
        self.paused = false;
        log::info!("Starting level {}", self.current_level_number);
        self.level.insert(Level::start(&self.levels[index], scene, hud))
    }

    /// Advance the current level by one frame, unless paused
    pub fn frame(&mut self, frame_time_ratio: f32) -> Option<LifecycleEvent> {
        if self.paused {
            return None;
        }
        let level = self.level.as_mut()?;
        let input = if self.autopilot {
            autopilot_input(level.player(), level.tiles())
        } else {
            self.keys
        };
        Some(level.frame(&FrameContext::new(frame_time_ratio, input)))
    }

    pub fn key_down(&mut self, key: Key) {
        self.set_key(key, true);
    }

    pub fn key_up(&mut self, key: Key) {
        self.set_key(key, false);
    }

    /// Raw key event by code; returns whether the code is bound
    pub fn key_event(&mut self, code: u32, pressed: bool) -> bool {
        match Key::from_key_code(code) {
            Some(key) => {
                self.set_key(key, pressed);
                true
            }
            None => false,
        }
    }

    fn set_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Up => self.keys.up = pressed,
            Key::Down => self.keys.down = pressed,
            Key::Left => self.keys.left = pressed,
            Key::Right => self.keys.right = pressed,
        }
    }

    /// Current key state
    pub fn input(&self) -> RunInput {
        self.keys
    }

    pub fn pause(&mut self) {
        if !self.paused {
            log::info!("Paused");
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            log::info!("Resumed");
        }
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {enabled}");
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn levels(&self) -> &[Settings] {
        &self.levels
    }

    /// 1-based; 0 before any level has started
    pub fn current_level_number(&self) -> usize {
        self.current_level_number
    }

    pub fn level(&self) -> Option<&Level<S, H>> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut Level<S, H>> {
        self.level.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{HeadlessHud, HeadlessScene};

    type TestSession = Session<HeadlessScene, HeadlessHud>;

    fn seeded(seed: u64) -> Settings {
        Settings {
            seed: Some(seed),
            ..Default::default()
        }
    }

    fn started() -> TestSession {
        let mut session = TestSession::new(vec![seeded(1), seeded(2)]);
        session.start(HeadlessScene::new(), HeadlessHud::default());
        session
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_key_code(87), Some(Key::Up));
        assert_eq!(Key::from_key_code(83), Some(Key::Down));
        assert_eq!(Key::from_key_code(65), Some(Key::Left));
        assert_eq!(Key::from_key_code(68), Some(Key::Right));
        assert_eq!(Key::from_key_code(32), None);
    }

    #[test]
    fn test_key_down_up_tracking() {
        let mut session = started();
        session.key_down(Key::Left);
        assert!(session.key_event(87, true));
        assert!(!session.key_event(13, true));
        assert_eq!(
            session.input(),
            RunInput {
                up: true,
                left: true,
                ..Default::default()
            }
        );

        session.key_up(Key::Left);
        session.key_event(87, false);
        assert_eq!(session.input(), RunInput::default());
    }

    #[test]
    fn test_keys_reach_the_player() {
        let mut session = started();
        session.key_down(Key::Right);
        session.frame(0.02);
        let x = session.level().map(|l| l.player().position.x).unwrap_or_default();
        assert!((x - 0.06).abs() < 1e-5);
    }

    #[test]
    fn test_start_selects_first_level() {
        let mut session = TestSession::new(vec![seeded(1), seeded(2)]);
        assert_eq!(session.current_level_number(), 0);
        assert!(session.frame(0.02).is_none());

        let seed = session.start(HeadlessScene::new(), HeadlessHud::default()).seed();
        assert_eq!(seed, 1);
        assert_eq!(session.current_level_number(), 1);
        assert_eq!(session.levels().len(), 2);
    }

    #[test]
    fn test_start_level_by_number() {
        let mut session = TestSession::new(vec![seeded(1), seeded(2)]);
        let level = session.start_level(2, HeadlessScene::new(), HeadlessHud::default());
        assert_eq!(level.map(|l| l.seed()), Some(2));
        assert_eq!(session.current_level_number(), 2);

        assert!(session.start_level(3, HeadlessScene::new(), HeadlessHud::default()).is_none());
        assert!(session.start_level(0, HeadlessScene::new(), HeadlessHud::default()).is_none());
        assert_eq!(session.current_level_number(), 2);
    }

    #[test]
    fn test_empty_level_list_gets_default() {
        let session = TestSession::new(Vec::new());
        assert_eq!(session.levels(), &[Settings::default()]);
    }

    #[test]
    fn test_pause_skips_frames() {
        let mut session = started();
        session.frame(0.02);
        session.pause();
        assert!(session.is_paused());
        assert!(session.frame(0.02).is_none());
        assert_eq!(session.level().map(|l| l.frames()), Some(1));

        session.resume();
        assert!(!session.is_paused());
        assert!(session.frame(0.02).is_some());
        assert_eq!(session.level().map(|l| l.frames()), Some(2));
    }

    #[test]
    fn test_autopilot_overrides_keys() {
        let mut session = started();
        session.set_autopilot(true);
        assert!(session.autopilot());
        session.key_down(Key::Left);
        session.frame(0.02);
        // Segment 1 is always normal ground: nothing to dodge
        let x = session.level().map(|l| l.player().position.x);
        assert_eq!(x, Some(0.0));
    }
}
