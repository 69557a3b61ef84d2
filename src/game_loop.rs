//! Fixed-rate frame orchestration
//!
//! Per frame: poll quit -> take the newest cursor -> [`tick`] -> present ->
//! wait out the rest of the frame budget. The loop owns the [`GameState`]
//! and only shares the [`PositionChannel`] with the tracker.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::channel::PositionChannel;
use crate::error::GameError;
use crate::render::{Frame, Renderer};
use crate::sim::{GameEvent, GamePhase, GameState, TerminationReason, TickInput, tick};

/// Caps frame duration to a target rate. Best effort: slow frames are not
/// made up for.
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_time: Option<Duration>,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_time: (fps > 0).then(|| Duration::from_secs(1) / fps),
            frame_start: Instant::now(),
        }
    }

    /// No waiting at all
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    pub fn frame_time(&self) -> Option<Duration> {
        self.frame_time
    }

    /// Sleep until the current frame has used its budget, then start the next
    pub fn wait(&mut self) {
        if let Some(frame_time) = self.frame_time {
            let elapsed = self.frame_start.elapsed();
            if elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
        }
        self.frame_start = Instant::now();
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub reason: TerminationReason,
    pub score: u32,
    pub missed: u32,
    pub frames: u64,
}

/// The game loop: owns the session state, reads the position channel
pub struct GameLoop {
    state: GameState,
    positions: Arc<PositionChannel>,
    pacer: FramePacer,
}

impl GameLoop {
    pub fn new(state: GameState, positions: Arc<PositionChannel>, pacer: FramePacer) -> Self {
        Self {
            state,
            positions,
            pacer,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Run one frame. Returns the termination reason once the session ends.
    ///
    /// The frame that slices a bomb is still presented; a quit frame is not.
    pub fn step(
        &mut self,
        renderer: &mut dyn Renderer,
    ) -> Result<Option<TerminationReason>, GameError> {
        if let GamePhase::Terminated(reason) = self.state.phase {
            return Ok(Some(reason));
        }

        let input = TickInput {
            quit: renderer.quit_requested(),
            cursor: self.positions.try_take(),
        };
        let events = tick(&mut self.state, &input);
        log_events(&events);

        if let GamePhase::Terminated(TerminationReason::UserQuit) = self.state.phase {
            return Ok(Some(TerminationReason::UserQuit));
        }

        renderer.present(&Frame::capture(&self.state))?;

        match self.state.phase {
            GamePhase::Terminated(reason) => Ok(Some(reason)),
            GamePhase::Running => {
                self.pacer.wait();
                Ok(None)
            }
        }
    }

    /// Run frames until the session ends
    pub fn run(&mut self, renderer: &mut dyn Renderer) -> Result<SessionSummary, GameError> {
        log::info!(
            "Game started: {}x{}, seed {}",
            self.state.bounds.width,
            self.state.bounds.height,
            self.state.seed
        );

        let reason = loop {
            if let Some(reason) = self.step(renderer)? {
                break reason;
            }
        };

        let summary = self.summary(reason);
        log::info!(
            "Game over ({:?}) after {} frames: score {}, missed {}",
            summary.reason,
            summary.frames,
            summary.score,
            summary.missed
        );
        Ok(summary)
    }

    fn summary(&self, reason: TerminationReason) -> SessionSummary {
        SessionSummary {
            reason,
            score: self.state.stats.score,
            missed: self.state.stats.missed,
            frames: self.state.frame,
        }
    }
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::Spawned { .. } => log::trace!("{:?}", event),
            GameEvent::Terminated(reason) => log::debug!("Session terminated: {:?}", reason),
            _ => log::debug!("{:?}", event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bounds;
    use crate::render::{DrawCommand, HeadlessRenderer, RenderError};
    use crate::sim::{FruitVisual, GameObject, ObjectKind};
    use crate::tuning::Tuning;
    use glam::IVec2;

    fn quiet_loop() -> (GameLoop, Arc<PositionChannel>) {
        let tuning = Tuning {
            spawn_chance: 0.0,
            ..Default::default()
        };
        let state = GameState::new(7, Bounds::new(1280, 720), tuning).unwrap();
        let channel = Arc::new(PositionChannel::new());
        let game = GameLoop::new(state, Arc::clone(&channel), FramePacer::unlimited());
        (game, channel)
    }

    fn add(game: &mut GameLoop, kind: ObjectKind, x: i32, y: i32, size: i32, speed: i32) -> u32 {
        let objects = &mut game.state_mut().objects;
        let id = objects.next_id();
        objects.insert(GameObject::new(id, kind, IVec2::new(x, y), size, speed));
        id
    }

    fn cursor_of(frame: &Frame) -> Option<IVec2> {
        frame.commands.iter().find_map(|c| match c {
            DrawCommand::Cursor { pos, .. } => Some(*pos),
            _ => None,
        })
    }

    #[test]
    fn test_quit_ends_without_presenting() {
        let (mut game, _channel) = quiet_loop();
        let mut renderer = HeadlessRenderer::with_budget(3);

        let summary = game.run(&mut renderer).unwrap();

        assert_eq!(summary.reason, TerminationReason::UserQuit);
        assert_eq!(renderer.presented(), 3);
        assert_eq!(summary.frames, 3);
    }

    #[test]
    fn test_bomb_frame_is_last() {
        let (mut game, channel) = quiet_loop();
        add(&mut game, ObjectKind::Bomb, 100, 400, 50, 5);
        channel.publish(IVec2::new(120, 200));
        let mut renderer = HeadlessRenderer::unbounded().recording();

        // Bomb reaches the cursor on frame 40: y = 400 - 5 * 40 = 200
        let summary = game.run(&mut renderer).unwrap();

        assert_eq!(summary.reason, TerminationReason::BombSliced);
        assert_eq!(summary.frames, 40);
        assert_eq!(renderer.presented(), 40);
        // The sliced bomb is not in the final frame
        assert_eq!(renderer.last_frame().unwrap().object_count(), 0);

        // Further steps do nothing
        assert_eq!(
            game.step(&mut renderer).unwrap(),
            Some(TerminationReason::BombSliced)
        );
        assert_eq!(renderer.presented(), 40);
    }

    #[test]
    fn test_cursor_follows_channel_and_sticks() {
        let (mut game, channel) = quiet_loop();
        let mut renderer = HeadlessRenderer::unbounded().recording();

        game.step(&mut renderer).unwrap();
        channel.publish(IVec2::new(10, 20));
        channel.publish(IVec2::new(30, 40));
        game.step(&mut renderer).unwrap();
        game.step(&mut renderer).unwrap();

        let cursors: Vec<_> = renderer.frames().iter().filter_map(cursor_of).collect();
        assert_eq!(
            cursors,
            vec![IVec2::new(640, 360), IVec2::new(30, 40), IVec2::new(30, 40)]
        );
    }

    #[test]
    fn test_slicing_scores_through_loop() {
        let (mut game, channel) = quiet_loop();
        let fruit = ObjectKind::Fruit {
            visual: FruitVisual::Orange,
        };
        add(&mut game, fruit, 100, 100, 150, 5);
        channel.publish(IVec2::new(150, 150));
        let mut renderer = HeadlessRenderer::with_budget(1).recording();

        let summary = game.run(&mut renderer).unwrap();

        assert_eq!(summary.score, 1);
        let frame = &renderer.frames()[0];
        assert_eq!(frame.object_count(), 0);
        assert!(frame.texts().any(|t| t == "Score: 1"));
    }

    #[test]
    fn test_render_failure_is_fatal() {
        struct Broken;
        impl Renderer for Broken {
            fn quit_requested(&mut self) -> bool {
                false
            }
            fn present(&mut self, _frame: &Frame) -> Result<(), RenderError> {
                Err(RenderError::Present("lost surface".into()))
            }
        }

        let (mut game, _channel) = quiet_loop();
        let err = game.run(&mut Broken).unwrap_err();
        assert!(matches!(err, GameError::Render(_)));
    }

    #[test]
    fn test_pacer_caps_frame_rate() {
        let mut pacer = FramePacer::new(100);
        assert_eq!(pacer.frame_time(), Some(Duration::from_millis(10)));
        let start = Instant::now();
        for _ in 0..5 {
            pacer.wait();
        }
        assert!(start.elapsed() >= Duration::from_millis(40));
        assert_eq!(FramePacer::unlimited().frame_time(), None);
    }
}
