//! Data-driven game balance
//!
//! Every knob defaults to the values in [`crate::consts`], so an empty
//! `"tuning": {}` block in a settings file plays the stock game.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Spawn, motion and scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-frame chance of a spawn attempt succeeding
    pub spawn_chance: f64,
    /// Chance that a spawned object is a fruit
    pub fruit_chance: f64,
    /// Population cap enforced by the spawner
    pub max_objects: usize,
    /// Inclusive rise speed range (pixels/frame)
    pub min_speed: i32,
    pub max_speed: i32,
    pub fruit_size: i32,
    pub bomb_size: i32,
    /// Leftmost spawn x
    pub spawn_margin: i32,
    /// Objects with y below this are removed
    pub offscreen_y: i32,
    /// Missed-fruit cap shown in the HUD
    pub max_missed: u32,
    /// End the session once `max_missed` fruit got away.
    /// Off by default: the cap is only displayed.
    pub end_on_max_missed: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_chance: SPAWN_CHANCE,
            fruit_chance: FRUIT_CHANCE,
            max_objects: MAX_OBJECTS,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            fruit_size: FRUIT_SIZE,
            bomb_size: BOMB_SIZE,
            spawn_margin: SPAWN_MARGIN,
            offscreen_y: OFFSCREEN_Y,
            max_missed: MAX_MISSED,
            end_on_max_missed: false,
        }
    }
}

impl Tuning {
    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidTuning(msg));

        for (name, p) in [
            ("spawn_chance", self.spawn_chance),
            ("fruit_chance", self.fruit_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} must be within [0, 1], got {p}"));
            }
        }
        if self.max_objects == 0 {
            return invalid("max_objects must be at least 1".into());
        }
        if self.min_speed <= 0 || self.min_speed > self.max_speed {
            return invalid(format!(
                "speed range {}..={} must be positive and non-empty",
                self.min_speed, self.max_speed
            ));
        }
        if self.fruit_size <= 0 || self.bomb_size <= 0 {
            return invalid(format!(
                "object sizes must be positive (fruit {}, bomb {})",
                self.fruit_size, self.bomb_size
            ));
        }
        Ok(())
    }
}
