//! Canvas 2D rendering
//!
//! Games draw through the [`Canvas`] trait. In the browser it is backed by a
//! `CanvasRenderingContext2d`; tests record into a [`DisplayList`].

mod arena;
mod display_list;
mod invaders;

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

pub use display_list::{DisplayList, DrawCmd};

use glam::Vec2;

/// Straight RGBA, each channel 0..=1
pub type Color = [f32; 4];

/// CSS color string for a canvas style (`rgba(r, g, b, a)`)
pub fn css(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Build a color from a `0xRRGGBB` literal
pub const fn rgb(hex: u32) -> Color {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

pub const fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgb};

    // Arena
    pub const ARENA_TRAIL: Color = [43.0 / 255.0, 43.0 / 255.0, 43.0 / 255.0, 0.3];
    pub const ARENA_GRID: Color = rgb(0x3d3d3d);
    pub const PLAYER: Color = rgb(0x0099ff);
    pub const PLAYER_RING: Color = [1.0, 1.0, 1.0, 0.5];
    pub const SUPER_GLOW: Color = rgb(0xffd700);
    pub const SHOT: Color = rgb(0x00ffff);
    pub const SUPER_SHOT: Color = rgb(0xffc107);
    pub const ENEMY: Color = rgb(0xff4444);
    pub const HEALTH_BACK: Color = rgb(0xff0000);
    pub const HEALTH_FILL: Color = rgb(0x00ff00);
    pub const GEM: Color = rgb(0xd630d6);
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.6];

    // Wave game
    pub const WAVE_BACKGROUND: Color = rgb(0x0f172a);
    pub const WAVE_FOREGROUND: Color = rgb(0xe2e8f0);
    pub const PINK: Color = rgb(0xe879f9);
    pub const CYAN: Color = rgb(0x22d3ee);
    pub const YELLOW: Color = rgb(0xfacc15);
    pub const GREEN: Color = rgb(0x22c55e);
    pub const RED: Color = rgb(0xef4444);
    pub const SCANLINE: Color = [0.0, 0.0, 0.0, 0.2];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Immediate-mode 2D drawing surface
pub trait Canvas {
    /// Surface size in CSS pixels
    fn size(&self) -> (f32, f32);
    /// Resize the backing store. The surface is cleared.
    fn set_size(&mut self, width: u32, height: u32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    /// Punch a transparent hole
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    /// Independent segments stroked in one path
    fn stroke_lines(&mut self, segments: &[(Vec2, Vec2)], line_width: f32, color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Color);
}

/// Something that can paint itself onto a canvas
pub trait Draw {
    fn draw(&self, canvas: &mut dyn Canvas, now_ms: f64);
}
