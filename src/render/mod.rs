//! Renderer capability
//!
//! The simulation never draws. Each frame it is flattened into a [`Frame`],
//! an ordered draw list, and handed to whatever [`Renderer`] the binary
//! picked.

pub mod headless;
#[cfg(feature = "window")]
pub mod window;

pub use headless::HeadlessRenderer;
#[cfg(feature = "window")]
pub use window::WindowRenderer;

use glam::IVec2;
use thiserror::Error;

use crate::consts::CURSOR_RADIUS;
use crate::sim::{FruitVisual, GameState, ObjectKind};

/// Presenting failed. Fatal for the session.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("display unavailable: {0}")]
    Display(String),
    #[error("frame rejected: {0}")]
    Present(String),
}

/// One draw call, in painter's order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Background,
    Fruit {
        pos: IVec2,
        size: i32,
        visual: FruitVisual,
    },
    Bomb {
        pos: IVec2,
        size: i32,
    },
    Text {
        pos: IVec2,
        text: String,
    },
    Cursor {
        pos: IVec2,
        radius: i32,
    },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Background, live objects in spawn order, HUD text, cursor
    pub fn capture(state: &GameState) -> Self {
        let mut commands = Vec::with_capacity(state.objects.len() + 4);
        commands.push(DrawCommand::Background);

        for obj in state.objects.visible() {
            commands.push(match obj.kind {
                ObjectKind::Fruit { visual } => DrawCommand::Fruit {
                    pos: obj.pos,
                    size: obj.size,
                    visual,
                },
                ObjectKind::Bomb => DrawCommand::Bomb {
                    pos: obj.pos,
                    size: obj.size,
                },
            });
        }

        commands.push(DrawCommand::Text {
            pos: IVec2::new(20, 20),
            text: format!("Score: {}", state.stats.score),
        });
        commands.push(DrawCommand::Text {
            pos: IVec2::new(20, 70),
            text: format!("Missed: {}/{}", state.stats.missed, state.stats.max_missed),
        });
        commands.push(DrawCommand::Cursor {
            pos: state.cursor,
            radius: CURSOR_RADIUS,
        });

        Self { commands }
    }

    /// Number of fruit and bomb draw calls
    pub fn object_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fruit { .. } | DrawCommand::Bomb { .. }))
            .count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A display surface plus its quit signal
pub trait Renderer {
    /// Window closed or escape pressed since the last call
    fn quit_requested(&mut self) -> bool;

    /// Draw and show one frame
    fn present(&mut self, frame: &Frame) -> Result<(), RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bounds;
    use crate::sim::GameObject;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_order_and_hud() {
        let mut state = GameState::new(1, Bounds::new(800, 600), Tuning::default()).unwrap();
        let id = state.objects.next_id();
        state.objects.insert(GameObject::new(
            id,
            ObjectKind::Fruit {
                visual: FruitVisual::Strawberry,
            },
            IVec2::new(10, 20),
            150,
            5,
        ));
        let id = state.objects.next_id();
        state
            .objects
            .insert(GameObject::new(id, ObjectKind::Bomb, IVec2::new(30, 40), 50, 5));
        state.stats.score = 3;
        state.stats.missed = 2;

        let frame = Frame::capture(&state);

        assert_eq!(frame.commands.len(), 6);
        assert_eq!(frame.commands[0], DrawCommand::Background);
        assert!(matches!(frame.commands[1], DrawCommand::Fruit { size: 150, .. }));
        assert!(matches!(frame.commands[2], DrawCommand::Bomb { size: 50, .. }));
        let texts: Vec<_> = frame.texts().collect();
        assert_eq!(texts, vec!["Score: 3", "Missed: 2/10"]);
        assert_eq!(
            frame.commands[5],
            DrawCommand::Cursor {
                pos: IVec2::new(400, 300),
                radius: 10
            }
        );
    }

    #[test]
    fn test_sliced_objects_not_drawn() {
        let mut state = GameState::new(1, Bounds::new(800, 600), Tuning::default()).unwrap();
        let id = state.objects.next_id();
        let mut bomb = GameObject::new(id, ObjectKind::Bomb, IVec2::new(30, 40), 50, 5);
        bomb.sliced = true;
        state.objects.insert(bomb);

        assert_eq!(Frame::capture(&state).object_count(), 0);
    }
}
