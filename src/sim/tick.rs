//! Per-frame simulation step
//!
//! One call per rendered frame. Motion is in pixels per frame, so there is
//! no timestep argument.

use glam::IVec2;

use super::state::{GameEvent, GamePhase, GameState, TerminationReason};

/// Inputs sampled for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fresh cursor position, if the tracker delivered one since last frame
    pub cursor: Option<IVec2>,
    /// Window close or escape
    pub quit: bool,
}

/// Advance the game by one frame and report what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !state.phase.is_running() {
        return events;
    }

    if input.quit {
        terminate(state, TerminationReason::UserQuit, &mut events);
        return events;
    }

    state.frame += 1;

    if let Some(cursor) = input.cursor {
        state.cursor = cursor;
    }

    if let Some(spawned) = state.maybe_spawn() {
        events.push(spawned);
    }

    let bomb_hit = state.objects.advance(
        state.cursor,
        state.tuning.offscreen_y,
        &mut state.stats,
        &mut events,
    );

    if bomb_hit {
        terminate(state, TerminationReason::BombSliced, &mut events);
    } else if state.tuning.end_on_max_missed && state.stats.missed >= state.stats.max_missed {
        terminate(state, TerminationReason::MissLimit, &mut events);
    }

    events
}

fn terminate(state: &mut GameState, reason: TerminationReason, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::Terminated(reason);
    events.push(GameEvent::Terminated(reason));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bounds;
    use crate::sim::state::{FruitVisual, GameObject, ObjectKind};
    use crate::tuning::Tuning;

    fn quiet_state() -> GameState {
        let tuning = Tuning {
            spawn_chance: 0.0,
            ..Default::default()
        };
        GameState::new(12345, Bounds::new(1280, 720), tuning).unwrap()
    }

    fn add(state: &mut GameState, kind: ObjectKind, x: i32, y: i32, size: i32, speed: i32) -> u32 {
        let id = state.objects.next_id();
        state
            .objects
            .insert(GameObject::new(id, kind, IVec2::new(x, y), size, speed));
        id
    }

    const FRUIT: ObjectKind = ObjectKind::Fruit {
        visual: FruitVisual::Watermelon,
    };

    #[test]
    fn test_cursor_is_sticky() {
        let mut state = quiet_state();
        let start = state.cursor;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.cursor, start);

        let input = TickInput {
            cursor: Some(IVec2::new(5, 6)),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.cursor, IVec2::new(5, 6));

        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.cursor, IVec2::new(5, 6));
    }

    #[test]
    fn test_fruit_slice_scores() {
        let mut state = quiet_state();
        let id = add(&mut state, FRUIT, 100, 100, 150, 5);

        let input = TickInput {
            cursor: Some(IVec2::new(150, 150)),
            ..Default::default()
        };
        let events = tick(&mut state, &input);

        assert_eq!(events, vec![GameEvent::FruitSliced { id }]);
        assert_eq!(state.stats.score, 1);
        assert!(state.objects.is_empty());
        assert!(state.phase.is_running());
    }

    #[test]
    fn test_bomb_ends_game_same_frame() {
        let mut state = quiet_state();
        let cursor = state.cursor;
        let id = add(&mut state, ObjectKind::Bomb, cursor.x - 10, cursor.y - 6, 50, 4);

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(
            events,
            vec![
                GameEvent::BombSliced { id },
                GameEvent::Terminated(TerminationReason::BombSliced),
            ]
        );
        assert_eq!(
            state.phase,
            GamePhase::Terminated(TerminationReason::BombSliced)
        );

        // Nothing moves after termination
        let frame = state.frame;
        let y = state.objects.get(id).unwrap().pos.y;
        assert!(tick(&mut state, &TickInput::default()).is_empty());
        assert_eq!(state.frame, frame);
        assert_eq!(state.objects.get(id).unwrap().pos.y, y);
    }

    #[test]
    fn test_quit_stops_before_update() {
        let mut state = quiet_state();
        let id = add(&mut state, FRUIT, 10, 300, 150, 5);

        let input = TickInput {
            cursor: Some(IVec2::new(1, 1)),
            quit: true,
        };
        let events = tick(&mut state, &input);

        assert_eq!(
            events,
            vec![GameEvent::Terminated(TerminationReason::UserQuit)]
        );
        assert_eq!(state.objects.get(id).unwrap().pos.y, 300);
        assert_eq!(state.cursor, Bounds::new(1280, 720).center());
    }

    #[test]
    fn test_miss_cap_is_inert_by_default() {
        let mut state = quiet_state();
        for i in 0..12 {
            add(&mut state, FRUIT, 20 * i, -49, 150, 5);
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.stats.missed, 12);
        assert!(state.phase.is_running());
    }

    #[test]
    fn test_miss_cap_ends_game_when_enabled() {
        let mut state = quiet_state();
        state.tuning.end_on_max_missed = true;
        for i in 0..10 {
            add(&mut state, FRUIT, 20 * i, -49, 150, 5);
        }
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(
            state.phase,
            GamePhase::Terminated(TerminationReason::MissLimit)
        );
        assert_eq!(
            events.last(),
            Some(&GameEvent::Terminated(TerminationReason::MissLimit))
        );
    }

    #[test]
    fn test_population_never_exceeds_cap() {
        let tuning = Tuning {
            spawn_chance: 1.0,
            ..Default::default()
        };
        let mut state = GameState::new(4, Bounds::new(1920, 1080), tuning).unwrap();
        // Park the cursor where nothing can reach it
        state.cursor = IVec2::new(0, 1080);
        for _ in 0..600 {
            tick(&mut state, &TickInput::default());
            assert!(state.objects.len() <= 15);
            if !state.phase.is_running() {
                break;
            }
        }
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning {
            spawn_chance: 0.2,
            ..Default::default()
        };
        let mut state1 = GameState::new(99999, Bounds::default(), tuning.clone()).unwrap();
        let mut state2 = GameState::new(99999, Bounds::default(), tuning).unwrap();

        let inputs = [
            TickInput {
                cursor: Some(IVec2::new(500, 500)),
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                cursor: Some(IVec2::new(900, 200)),
                ..Default::default()
            },
        ];

        for _ in 0..100 {
            for input in &inputs {
                let e1 = tick(&mut state1, input);
                let e2 = tick(&mut state2, input);
                assert_eq!(e1, e2);
            }
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.stats, state2.stats);
        assert_eq!(state1.objects.len(), state2.objects.len());
    }
}
