//! Probabilistic fruit/bomb spawning

use glam::IVec2;
use rand::Rng;

use super::objects::ObjectSet;
use super::state::{FruitVisual, GameEvent, GameObject, ObjectKind};
use crate::Bounds;
use crate::error::GameError;
use crate::tuning::Tuning;

/// Spawn policy: one roll per frame, capped population
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSpawner {
    spawn_chance: f64,
    fruit_chance: f64,
    max_objects: usize,
    min_speed: i32,
    max_speed: i32,
    fruit_size: i32,
    bomb_size: i32,
    margin: i32,
}

impl ObjectSpawner {
    /// Spawn policy for validated `tuning`
    pub fn from_tuning(tuning: &Tuning) -> Result<Self, GameError> {
        tuning.validate()?;
        Ok(Self {
            spawn_chance: tuning.spawn_chance,
            fruit_chance: tuning.fruit_chance,
            max_objects: tuning.max_objects,
            min_speed: tuning.min_speed,
            max_speed: tuning.max_speed,
            fruit_size: tuning.fruit_size,
            bomb_size: tuning.bomb_size,
            margin: tuning.spawn_margin,
        })
    }

    /// Maybe add one object at the bottom edge of `bounds`.
    ///
    /// Succeeds with `spawn_chance` while the set is below `max_objects`.
    /// The x range depends on the chosen kind's own width.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &self,
        objects: &mut ObjectSet,
        bounds: Bounds,
        rng: &mut R,
    ) -> Option<GameEvent> {
        if !(rng.random::<f64>() < self.spawn_chance && objects.len() < self.max_objects) {
            return None;
        }

        let is_fruit = rng.random::<f64>() < self.fruit_chance;
        let size = if is_fruit {
            self.fruit_size
        } else {
            self.bomb_size
        };

        let lo = self.margin;
        let hi = (bounds.width - size).max(lo);
        let x = rng.random_range(lo..=hi);
        let speed = rng.random_range(self.min_speed..=self.max_speed);
        let kind = if is_fruit {
            ObjectKind::Fruit {
                visual: FruitVisual::ALL[rng.random_range(0..FruitVisual::ALL.len())],
            }
        } else {
            ObjectKind::Bomb
        };

        let id = objects.next_id();
        objects.insert(GameObject::new(
            id,
            kind,
            IVec2::new(x, bounds.height),
            size,
            speed,
        ));
        log::trace!("spawned {:?} #{} at x={} speed={}", kind, id, x, speed);

        Some(GameEvent::Spawned { id, kind })
    }
}
