//! Renderer without a display, for tests and unattended runs

use super::{Frame, RenderError, Renderer};

/// Counts (and optionally keeps) frames, asks to quit after a budget
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frame_budget: Option<u64>,
    presented: u64,
    keep_frames: bool,
    frames: Vec<Frame>,
}

impl HeadlessRenderer {
    /// Runs until the game ends on its own
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Requests quit once `frames` frames have been presented
    pub fn with_budget(frames: u64) -> Self {
        Self {
            frame_budget: Some(frames),
            ..Default::default()
        }
    }

    /// Keep a copy of every presented frame
    pub fn recording(mut self) -> Self {
        self.keep_frames = true;
        self
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Renderer for HeadlessRenderer {
    fn quit_requested(&mut self) -> bool {
        self.frame_budget
            .is_some_and(|budget| self.presented >= budget)
    }

    fn present(&mut self, frame: &Frame) -> Result<(), RenderError> {
        self.presented += 1;
        if self.keep_frames {
            self.frames.push(frame.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget() {
        let mut r = HeadlessRenderer::with_budget(2);
        assert!(!r.quit_requested());
        r.present(&Frame::default()).unwrap();
        assert!(!r.quit_requested());
        r.present(&Frame::default()).unwrap();
        assert!(r.quit_requested());
        assert_eq!(r.presented(), 2);
        assert!(r.frames().is_empty());
    }

    #[test]
    fn test_recording() {
        let mut r = HeadlessRenderer::unbounded().recording();
        r.present(&Frame::default()).unwrap();
        assert_eq!(r.frames().len(), 1);
        assert!(!r.quit_requested());
    }
}
