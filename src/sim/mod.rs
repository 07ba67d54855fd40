//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per display frame
//! - Seeded RNG only
//! - Stable iteration order (insertion order, entity ids are monotonic)
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod input;
pub mod invaders;

pub use arena::{ArenaHud, ArenaInput, ArenaState, Enemy, Gem, Player, Projectile};
pub use collision::{Aabb, circles_touch, clamp_circle, out_of_surface};
pub use input::{Cooldown, InputSampler, Key};
pub use invaders::{Alien, AlienKind, Bullet, Cannon, WaveHud, WaveInput, WaveState};

use serde::{Deserialize, Serialize};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player health depleted, or the aliens reached the player's line
    GameOver,
    /// Every alien destroyed
    Victory,
}

/// Timer-driven spawner identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnKind {
    Enemy,
    Gem,
}

/// A spawner and the period of its interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawner {
    pub kind: SpawnKind,
    pub period_ms: u32,
}
