//! Fingertip tracking - the producer side of the position hand-off.
//!
//! Hand-landmark detection is a black box behind [`FingertipDetector`]:
//! each call looks at one camera frame and reports zero or one normalized
//! fingertip coordinate. [`spawn_position_source`] runs a detector on its own
//! thread, maps its output to screen pixels and publishes into a
//! [`PositionChannel`]. The game loop never waits on any of this.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Bounds;
use crate::channel::PositionChannel;
use crate::consts::{REFERENCE_HEIGHT, REFERENCE_WIDTH};
use crate::error::GameError;

// ════════════════════════════════════════════════════════════════════════════
// Detector capability
// ════════════════════════════════════════════════════════════════════════════

/// Why a detector stopped producing
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("camera frame unavailable: {0}")]
    Unavailable(String),
    #[error("detector input exhausted")]
    Exhausted,
}

/// One camera frame in, at most one fingertip out.
///
/// Coordinates are normalized to `[0, 1]` with the origin at the top-left of
/// the camera image. Values slightly outside that range are allowed and get
/// clamped by the mapping.
pub trait FingertipDetector: Send + 'static {
    fn detect(&mut self) -> Result<Option<Vec2>, SourceError>;
}

// ════════════════════════════════════════════════════════════════════════════
// Mapping to screen space
// ════════════════════════════════════════════════════════════════════════════

/// Tracker options from the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingSettings {
    /// Flip x so the cursor follows the hand like a mirror
    pub mirror: bool,
    /// Scale into a fixed 1920x1080 frame instead of the real display
    pub legacy_reference_frame: bool,
    /// Pause between detector polls (ms)
    pub poll_interval_ms: u64,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            mirror: true,
            legacy_reference_frame: false,
            poll_interval_ms: 10,
        }
    }
}

/// Normalized detector coordinates to screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapping {
    /// Frame the normalized coordinates are scaled into
    pub target: Bounds,
    /// Rectangle results are clamped to
    pub display: Bounds,
    pub mirror: bool,
}

impl ScreenMapping {
    pub fn new(display: Bounds, settings: &TrackingSettings) -> Self {
        let target = if settings.legacy_reference_frame {
            Bounds::new(REFERENCE_WIDTH, REFERENCE_HEIGHT)
        } else {
            display
        };
        Self {
            target,
            display,
            mirror: settings.mirror,
        }
    }

    /// Scale, truncate toward zero, clamp onto a display pixel
    pub fn map(&self, normalized: Vec2) -> IVec2 {
        let nx = if self.mirror {
            1.0 - normalized.x
        } else {
            normalized.x
        };
        let x = (nx * self.target.width as f32) as i32;
        let y = (normalized.y * self.target.height as f32) as i32;
        self.display.clamp(IVec2::new(x, y))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Producer thread
// ════════════════════════════════════════════════════════════════════════════

/// Cooperative stop flag shared between the game and the tracker thread
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Owner's handle on a running position source
#[derive(Debug)]
pub struct TrackingHandle {
    stop: StopSignal,
    thread: JoinHandle<()>,
}

impl TrackingHandle {
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// True once the thread has returned (stopped or gave up)
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ask the tracker to stop and wait for it to release its detector
    pub fn shutdown(self) -> Result<(), GameError> {
        self.stop.request();
        self.thread.join().map_err(|_| GameError::TrackingPanicked)
    }

    /// Shut down once the game has produced `outcome`.
    ///
    /// A game error is returned in preference to a tracker failure, which is
    /// then only logged.
    pub fn shutdown_after<T>(self, outcome: Result<T, GameError>) -> Result<T, GameError> {
        match (self.shutdown(), outcome) {
            (Ok(()), outcome) => outcome,
            (Err(e), Ok(_)) => Err(e),
            (Err(e), Err(game_err)) => {
                log::error!("{}", e);
                Err(game_err)
            }
        }
    }
}

/// Run `detector` on a dedicated thread, publishing mapped positions.
///
/// The loop polls the stop signal before every detection and sleeps
/// `poll_interval` between polls. A detector error ends the thread; the game
/// keeps whatever cursor it had.
pub fn spawn_position_source<D: FingertipDetector>(
    mut detector: D,
    mapping: ScreenMapping,
    channel: Arc<PositionChannel>,
    poll_interval: Duration,
) -> Result<TrackingHandle, GameError> {
    let stop = StopSignal::new();
    let thread_stop = stop.clone();

    let thread = thread::Builder::new()
        .name("position-source".into())
        .spawn(move || {
            log::info!("Position source started");
            while !thread_stop.is_requested() {
                match detector.detect() {
                    Ok(Some(normalized)) => channel.publish(mapping.map(normalized)),
                    Ok(None) => {}
                    Err(e) => {
                        log::warn!("Position source stopped: {}", e);
                        break;
                    }
                }
                if !poll_interval.is_zero() {
                    thread::sleep(poll_interval);
                }
            }
            log::info!(
                "Position source finished ({} published, {} overwritten)",
                channel.published(),
                channel.overwritten()
            );
            // `detector` drops here, releasing the camera
        })
        .map_err(GameError::TrackingSpawn)?;

    Ok(TrackingHandle { stop, thread })
}

// ════════════════════════════════════════════════════════════════════════════
// Bundled detectors
// ════════════════════════════════════════════════════════════════════════════

/// Replays a fixed script, then reports [`SourceError::Exhausted`]
#[derive(Debug, Clone)]
pub struct ScriptedDetector {
    script: std::vec::IntoIter<Option<Vec2>>,
}

impl ScriptedDetector {
    pub fn new(script: Vec<Option<Vec2>>) -> Self {
        Self {
            script: script.into_iter(),
        }
    }
}

impl FingertipDetector for ScriptedDetector {
    fn detect(&mut self) -> Result<Option<Vec2>, SourceError> {
        self.script.next().ok_or(SourceError::Exhausted)
    }
}

/// Synthetic fingertip tracing a figure-eight, paced like a camera
#[derive(Debug, Clone)]
pub struct SweepDetector {
    step: u32,
    frame_time: Duration,
}

impl SweepDetector {
    /// `camera_fps` = how often a frame is "captured"
    pub fn new(camera_fps: u32) -> Self {
        Self {
            step: 0,
            frame_time: Duration::from_secs(1) / camera_fps.max(1),
        }
    }

    /// Position at a given capture index, within [0.1, 0.9]²
    pub fn position_at(step: u32) -> Vec2 {
        let t = step as f32 * 0.02;
        Vec2::new(0.5 + 0.4 * t.sin(), 0.5 + 0.4 * (2.0 * t).sin() * 0.5)
    }
}

impl FingertipDetector for SweepDetector {
    fn detect(&mut self) -> Result<Option<Vec2>, SourceError> {
        thread::sleep(self.frame_time);
        let p = Self::position_at(self.step);
        self.step = self.step.wrapping_add(1);
        Ok(Some(p))
    }
}

/// Uses pointer positions forwarded by a window as the "camera".
///
/// Waits up to `timeout` for the next position so the stop signal is still
/// polled regularly. A closed sender counts as the camera going away.
#[derive(Debug)]
pub struct PointerDetector {
    rx: Receiver<Vec2>,
    timeout: Duration,
}

impl PointerDetector {
    pub fn new(rx: Receiver<Vec2>) -> Self {
        Self {
            rx,
            timeout: Duration::from_millis(50),
        }
    }
}

impl FingertipDetector for PointerDetector {
    fn detect(&mut self) -> Result<Option<Vec2>, SourceError> {
        match self.rx.recv_timeout(self.timeout) {
            Ok(p) => {
                // Only the newest pointer sample matters
                let latest = self.rx.try_iter().last().unwrap_or(p);
                Ok(Some(latest))
            }
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                Err(SourceError::Unavailable("pointer input closed".into()))
            }
        }
    }
}
