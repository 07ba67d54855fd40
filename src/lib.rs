//! Desktop Arcade - a simulated desktop with two canvas arcade games
//!
//! Core modules:
//! - `sim`: Deterministic game simulation (arena shooter, alien waves, collisions, input)
//! - `driver`: Frame-loop driver that schedules ticks, spawners and draws
//! - `renderer`: Immediate-mode 2D drawing (Canvas 2D on the web, display list in tests)
//! - `platform`: Browser/native scheduling, storage and WASM bindings
//! - `desktop`: Window manager and dock
//! - `shell`: Fake terminal command table
//! - `tuning`: Data-driven game balance
//! - `settings`: Wallpaper preference (cookie + LocalStorage)

pub mod desktop;
pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod shell;
pub mod sim;
pub mod tuning;

pub use driver::{Command, Driver, Effect};
pub use settings::{Preferences, Wallpaper};
pub use tuning::{ArenaTuning, WaveTuning};

use glam::Vec2;

/// Desktop and surface constants
pub mod consts {
    /// Nominal frame time (display refresh) in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Height of the top menu bar; windows may never be dragged above it
    pub const TOP_BAR_HEIGHT: f32 = 28.0;
    /// Space reserved for the dock at the bottom of the screen
    pub const DOCK_RESERVE: f32 = 70.0;

    /// Window size floor
    pub const MIN_WINDOW_WIDTH: f32 = 300.0;
    pub const MIN_WINDOW_HEIGHT: f32 = 200.0;

    /// New windows cascade from this origin, stepping per existing window
    pub const CASCADE_ORIGIN: (f32, f32) = (100.0, 80.0);
    pub const CASCADE_STEP: f32 = 30.0;

    /// The wave game draws onto a fixed-size surface
    pub const WAVE_SURFACE_WIDTH: f32 = 600.0;
    pub const WAVE_SURFACE_HEIGHT: f32 = 400.0;

    /// Distance slack for circle contact ("touching or overlapping")
    pub const CONTACT_EPSILON: f32 = 1.0;
}

/// Unit vector pointing from `from` toward `to` (zero if they coincide)
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Aim angle (radians) from `from` toward `to`
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Convert a heading angle and speed to a velocity vector
#[inline]
pub fn velocity_from_angle(theta: f32, speed: f32) -> Vec2 {
    Vec2::new(theta.cos() * speed, theta.sin() * speed)
}
