//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, integer pixel motion
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, threading or platform dependencies

pub mod collision;
pub mod objects;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, point_hits_square};
pub use objects::ObjectSet;
pub use spawner::ObjectSpawner;
pub use state::{
    FruitVisual, GameEvent, GameObject, GamePhase, GameState, GameStats, ObjectKind,
    TerminationReason,
};
pub use tick::{TickInput, tick};
