//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`GameState`]; the loop threads it
//! through [`super::tick`] once per frame.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::objects::ObjectSet;
use super::spawner::ObjectSpawner;
use crate::Bounds;
use crate::error::GameError;
use crate::tuning::Tuning;

/// Fruit artwork choice. Opaque to the simulation, carried through to the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitVisual {
    Cherry,
    Orange,
    Watermelon,
    Strawberry,
}

impl FruitVisual {
    /// The fixed palette the spawner draws from
    pub const ALL: [FruitVisual; 4] = [
        FruitVisual::Cherry,
        FruitVisual::Orange,
        FruitVisual::Watermelon,
        FruitVisual::Strawberry,
    ];
}

/// What an object is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Fruit { visual: FruitVisual },
    Bomb,
}

impl ObjectKind {
    #[inline]
    pub fn is_fruit(&self) -> bool {
        matches!(self, ObjectKind::Fruit { .. })
    }

    #[inline]
    pub fn is_bomb(&self) -> bool {
        matches!(self, ObjectKind::Bomb)
    }
}

/// A rising fruit or bomb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: u32,
    pub kind: ObjectKind,
    /// Top-left corner of the bounding square
    pub pos: IVec2,
    /// Side of the bounding square
    pub size: i32,
    /// Pixels moved up per frame
    pub speed: i32,
    pub sliced: bool,
}

impl GameObject {
    pub fn new(id: u32, kind: ObjectKind, pos: IVec2, size: i32, speed: i32) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            speed,
            sliced: false,
        }
    }

    /// Apply one frame of constant upward motion
    #[inline]
    pub fn rise(&mut self) {
        self.pos.y -= self.speed;
    }
}

/// Score and miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameStats {
    pub score: u32,
    pub missed: u32,
    pub max_missed: u32,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    BombSliced,
    UserQuit,
    /// Only reachable with `Tuning::end_on_max_missed`
    MissLimit,
}

/// Top-level session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Terminated(TerminationReason),
}

impl GamePhase {
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }
}

/// Things that happened during a frame, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Spawned { id: u32, kind: ObjectKind },
    FruitSliced { id: u32 },
    FruitMissed { id: u32 },
    BombSliced { id: u32 },
    /// A bomb left the screen untouched
    BombCleared { id: u32 },
    Terminated(TerminationReason),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub spawner: ObjectSpawner,
    pub bounds: Bounds,
    pub objects: ObjectSet,
    /// Last known cursor position, sticky across frames without input
    pub cursor: IVec2,
    pub stats: GameStats,
    pub phase: GamePhase,
    /// Frames simulated so far
    pub frame: u64,
}

impl GameState {
    /// Create a new session with the given seed.
    ///
    /// Fails on an empty play field or tuning the spawner cannot roll with.
    pub fn new(seed: u64, bounds: Bounds, tuning: Tuning) -> Result<Self, GameError> {
        if bounds.width <= 0 || bounds.height <= 0 {
            return Err(GameError::InvalidDisplay {
                width: bounds.width,
                height: bounds.height,
            });
        }
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawner: ObjectSpawner::from_tuning(&tuning)?,
            stats: GameStats {
                max_missed: tuning.max_missed,
                ..Default::default()
            },
            tuning,
            bounds,
            objects: ObjectSet::new(),
            cursor: bounds.center(),
            phase: GamePhase::Running,
            frame: 0,
        })
    }

    /// Give the spawner a roll against the current population
    pub fn maybe_spawn(&mut self) -> Option<GameEvent> {
        self.spawner
            .maybe_spawn(&mut self.objects, self.bounds, &mut self.rng)
    }
}
