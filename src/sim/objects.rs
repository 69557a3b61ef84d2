//! Live object collection and the per-frame motion/slice pass

use glam::IVec2;

use super::collision::point_hits_square;
use super::state::{GameEvent, GameObject, GameStats, ObjectKind};

/// In-flight fruit and bombs, kept in spawn order
#[derive(Debug, Clone, Default)]
pub struct ObjectSet {
    objects: Vec<GameObject>,
    next_id: u32,
}

impl ObjectSet {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new object ID
    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub fn insert(&mut self, object: GameObject) {
        self.objects.push(object);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    /// Objects that should still be drawn
    pub fn visible(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter().filter(|o| !o.sliced)
    }

    pub fn get(&self, id: u32) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Move every object up one frame and resolve slices against `cursor`.
    ///
    /// Per object, in spawn order: rise by `speed`; past `offscreen_y` it is
    /// dropped (an unsliced fruit counts as missed); otherwise a cursor inside
    /// its box slices it. Sliced fruit score and leave the set at once. A
    /// sliced bomb stays flagged in the set and makes this return `true`.
    /// The rest of the set is still processed after a bomb hit.
    pub fn advance(
        &mut self,
        cursor: IVec2,
        offscreen_y: i32,
        stats: &mut GameStats,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        let mut bomb_hit = false;

        self.objects.retain_mut(|obj| {
            obj.rise();

            // Off-screen wins over a slice on the same frame
            if obj.pos.y < offscreen_y {
                match obj.kind {
                    ObjectKind::Fruit { .. } if !obj.sliced => {
                        stats.missed += 1;
                        events.push(GameEvent::FruitMissed { id: obj.id });
                    }
                    ObjectKind::Bomb if !obj.sliced => {
                        events.push(GameEvent::BombCleared { id: obj.id });
                    }
                    _ => {}
                }
                return false;
            }

            if obj.sliced || !point_hits_square(cursor, obj.pos, obj.size) {
                return true;
            }

            obj.sliced = true;
            match obj.kind {
                ObjectKind::Fruit { .. } => {
                    stats.score += 1;
                    events.push(GameEvent::FruitSliced { id: obj.id });
                    false
                }
                ObjectKind::Bomb => {
                    bomb_hit = true;
                    events.push(GameEvent::BombSliced { id: obj.id });
                    true
                }
            }
        });

        bomb_hit
    }
}
