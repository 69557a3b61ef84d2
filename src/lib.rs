//! Fruit Slice - a hand-tracked arcade slicing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (objects, spawning, slicing, game state)
//! - `channel`: Latest-wins hand-off of the fingertip position
//! - `tracking`: Fingertip source running on its own thread
//! - `render`: Draw lists and renderer backends
//! - `game_loop`: Fixed-rate frame orchestration
//! - `tuning`: Data-driven game balance

pub mod channel;
pub mod error;
pub mod game_loop;
pub mod logging;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tracking;
pub mod tuning;

pub use channel::PositionChannel;
pub use error::GameError;
pub use game_loop::{FramePacer, GameLoop, SessionSummary};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the render-and-physics loop
    pub const TARGET_FPS: u32 = 60;

    /// Fruit bounding square side (pixels)
    pub const FRUIT_SIZE: i32 = 150;
    /// Bomb bounding square side (pixels)
    pub const BOMB_SIZE: i32 = 50;

    /// Chance per frame that the spawner adds an object
    pub const SPAWN_CHANCE: f64 = 0.02;
    /// Chance that a spawned object is a fruit rather than a bomb
    pub const FRUIT_CHANCE: f64 = 0.7;
    /// Maximum simultaneous live objects
    pub const MAX_OBJECTS: usize = 15;
    /// Rise speed range (pixels/frame, inclusive)
    pub const MIN_SPEED: i32 = 4;
    pub const MAX_SPEED: i32 = 7;
    /// Leftmost spawn x
    pub const SPAWN_MARGIN: i32 = 50;

    /// Objects above this y are gone for good
    pub const OFFSCREEN_Y: i32 = -50;
    /// Missed-fruit cap shown in the HUD
    pub const MAX_MISSED: u32 = 10;

    /// Fixed frame the tracker used to scale into, regardless of the display
    pub const REFERENCE_WIDTH: i32 = 1920;
    pub const REFERENCE_HEIGHT: i32 = 1080;

    /// Cursor marker radius (pixels)
    pub const CURSOR_RADIUS: i32 = 10;
}

/// Screen extent in pixels. The origin is the top-left corner, y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Center point, where the cursor starts
    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Clamp a point onto a pixel of the screen, `0..width` by `0..height`
    #[inline]
    pub fn clamp(&self, p: IVec2) -> IVec2 {
        let max_x = (self.width - 1).max(0);
        let max_y = (self.height - 1).max(0);
        IVec2::new(p.x.clamp(0, max_x), p.y.clamp(0, max_y))
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(consts::REFERENCE_WIDTH, consts::REFERENCE_HEIGHT)
    }
}
