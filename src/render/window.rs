//! Software-rendered game window using `minifb`.
//!
//! Draws into a `u32` ARGB framebuffer the size of the display. Fruit art is
//! not loaded from disk; each palette entry is a colored disc. Escape or
//! closing the window is the quit signal.

use std::sync::mpsc::Sender;

use glam::{IVec2, Vec2};
use minifb::{Key, MouseMode, Window, WindowOptions};

use super::{DrawCommand, Frame, RenderError, Renderer};
use crate::Bounds;
use crate::sim::FruitVisual;

const BG_COLOR: u32 = 0xFFF2E6C9;
const TEXT_COLOR: u32 = 0xFF000000;
const BOMB_COLOR: u32 = 0xFFFF0000;
const CURSOR_COLOR: u32 = 0xFFFF0000;
/// Bitmap glyphs are 3x5 cells scaled up to roughly a 50px font
const TEXT_SCALE: usize = 7;

fn fruit_color(visual: FruitVisual) -> (u32, u32) {
    // (flesh, rind)
    match visual {
        FruitVisual::Cherry => (0xFFB3001B, 0xFF5C000E),
        FruitVisual::Orange => (0xFFFF9F1C, 0xFFCC6A00),
        FruitVisual::Watermelon => (0xFFFF4F6D, 0xFF2D8C3C),
        FruitVisual::Strawberry => (0xFFE63946, 0xFF3A7D44),
    }
}

pub struct WindowRenderer {
    window: Window,
    buf: Vec<u32>,
    width: usize,
    height: usize,
    pointer_tx: Option<Sender<Vec2>>,
}

impl WindowRenderer {
    /// Open a borderless window covering `bounds`
    pub fn new(bounds: Bounds, borderless: bool) -> Result<Self, RenderError> {
        let width = bounds.width.max(1) as usize;
        let height = bounds.height.max(1) as usize;
        let window = Window::new(
            "Fruit Slice",
            width,
            height,
            WindowOptions {
                borderless,
                resize: false,
                topmost: borderless,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| RenderError::Display(e.to_string()))?;

        Ok(Self {
            window,
            buf: vec![BG_COLOR; width * height],
            width,
            height,
            pointer_tx: None,
        })
    }

    /// Forward normalized mouse positions, e.g. to a `PointerDetector`
    pub fn with_pointer(mut self, tx: Sender<Vec2>) -> Self {
        self.pointer_tx = Some(tx);
        self
    }

    fn forward_pointer(&mut self) {
        let Some(tx) = &self.pointer_tx else {
            return;
        };
        if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let p = Vec2::new(x / self.width as f32, y / self.height as f32);
            if tx.send(p).is_err() {
                // Tracker is gone, stop feeding it
                self.pointer_tx = None;
            }
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    fn fill_rect(&mut self, pos: IVec2, w: i32, h: i32, color: u32) {
        let x0 = (pos.x.max(0) as usize).min(self.width);
        let y0 = (pos.y.max(0) as usize).min(self.height);
        let x1 = ((pos.x + w).max(0) as usize).min(self.width);
        let y1 = ((pos.y + h).max(0) as usize).min(self.height);
        if x1 <= x0 {
            return;
        }
        for row in y0..y1 {
            self.buf[row * self.width + x0..row * self.width + x1].fill(color);
        }
    }

    fn fill_circle(&mut self, center: IVec2, radius: i32, color: u32) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(center.x + dx, center.y + dy, color);
                }
            }
        }
    }

    fn draw_fruit(&mut self, pos: IVec2, size: i32, visual: FruitVisual) {
        let (flesh, rind) = fruit_color(visual);
        let r = size / 2;
        let center = pos + IVec2::splat(r);
        self.fill_circle(center, r, rind);
        self.fill_circle(center, r * 4 / 5, flesh);
    }

    fn draw_text(&mut self, text: &str, pos: IVec2) {
        let cell = TEXT_SCALE as i32;
        let mut cx = pos.x;
        for ch in text.chars() {
            for (row, bits) in glyph(ch).iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        let at = IVec2::new(cx + col * cell, pos.y + row as i32 * cell);
                        self.fill_rect(at, cell, cell, TEXT_COLOR);
                    }
                }
            }
            cx += 4 * cell;
        }
    }
}

impl Renderer for WindowRenderer {
    fn quit_requested(&mut self) -> bool {
        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            return true;
        }
        self.forward_pointer();
        false
    }

    fn present(&mut self, frame: &Frame) -> Result<(), RenderError> {
        for command in &frame.commands {
            match command {
                DrawCommand::Background => self.buf.fill(BG_COLOR),
                DrawCommand::Fruit { pos, size, visual } => self.draw_fruit(*pos, *size, *visual),
                DrawCommand::Bomb { pos, size } => self.fill_rect(*pos, *size, *size, BOMB_COLOR),
                DrawCommand::Text { pos, text } => self.draw_text(text, *pos),
                DrawCommand::Cursor { pos, radius } => {
                    self.fill_circle(*pos, *radius, CURSOR_COLOR)
                }
            }
        }

        self.window
            .update_with_buffer(&self.buf, self.width, self.height)
            .map_err(|e| RenderError::Present(e.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 bitmap font, just the HUD characters
// ────────────────────────────────────────────────────────────────────────────

fn glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'S' | 's' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'C' | 'c' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'O' | 'o' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'R' | 'r' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'E' | 'e' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'M' | 'm' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'I' | 'i' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'D' | 'd' => [0b110, 0b101, 0b101, 0b101, 0b110],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        ' ' => [0b000; 5],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000],
    }
}
