//! Platform abstraction layer
//!
//! The game loop never talks to the browser directly. It asks a [`Scheduler`]
//! for animation frames and interval timers, and the host calls back into the
//! driver with the token it was handed. Tests and the native demo use
//! [`ManualScheduler`]; the WASM build uses `requestAnimationFrame` and
//! `setInterval`.

mod manual;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use manual::ManualScheduler;

/// Identifies one requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Identifies one running interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// Frame and timer source for a game session
pub trait Scheduler {
    /// Ask for one callback on the next display refresh
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
    /// Start a repeating timer firing every `period_ms`
    fn start_interval(&mut self, period_ms: u32) -> TimerToken;
    fn cancel_interval(&mut self, token: TimerToken);
}
