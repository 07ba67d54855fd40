//! Alien wave simulation
//!
//! A cannon slides along the bottom of a fixed 600x400 surface while a rank
//! of aliens sweeps side to side in lockstep, dropping a row each time any of
//! them touches a side margin.

use serde::Serialize;

use super::collision::Aabb;
use super::input::{Cooldown, InputSampler, Key};
use super::{Outcome, Spawner};
use crate::consts::{WAVE_SURFACE_HEIGHT, WAVE_SURFACE_WIDTH};
use crate::driver::{Command, Game};
use crate::tuning::WaveTuning;

/// Alien silhouettes, assigned per row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlienKind {
    Squid,
    Crab,
    Octopus,
}

impl AlienKind {
    pub fn for_row(row: u32) -> Self {
        match row % 3 {
            0 => AlienKind::Squid,
            1 => AlienKind::Crab,
            _ => AlienKind::Octopus,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alien {
    pub rect: Aabb,
    pub kind: AlienKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub rect: Aabb,
    /// Vertical speed per tick (negative = up)
    pub dy: f32,
}

/// The player's cannon
#[derive(Debug, Clone, PartialEq)]
pub struct Cannon {
    pub rect: Aabb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaveHud {
    pub score: u32,
    pub outcome: Option<Outcome>,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaveInput {
    /// -1 left, +1 right, 0 idle
    pub direction: f32,
    /// Fire held (rate-limited by the cooldown)
    pub fire: bool,
}

impl WaveInput {
    pub fn sample(input: &mut InputSampler) -> Self {
        // Edge-triggered actions mean nothing here; drop them so they don't pile up
        input.take_presses();
        input.take_clicks();
        Self {
            direction: input.axis(Key::ArrowLeft, Key::ArrowRight),
            fire: input.is_held(Key::Space),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WaveState {
    pub tuning: WaveTuning,
    pub width: f32,
    pub height: f32,
    pub cannon: Cannon,
    pub bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    /// +1 sweeping right, -1 sweeping left
    pub direction: f32,
    pub fire: Cooldown,
    pub score: u32,
    pub outcome: Option<Outcome>,
    pub time_ticks: u64,
}

impl Default for WaveState {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveState {
    pub fn new() -> Self {
        Self::with_tuning(WaveTuning::default())
    }

    pub fn with_tuning(tuning: WaveTuning) -> Self {
        let (width, height) = (WAVE_SURFACE_WIDTH, WAVE_SURFACE_HEIGHT);
        let cannon = Cannon {
            rect: Aabb::new(
                width / 2.0 - tuning.player_width / 2.0,
                height - tuning.player_inset,
                tuning.player_width,
                tuning.player_height,
            ),
        };
        let aliens = build_rank(&tuning);
        Self {
            fire: Cooldown::new(tuning.fire_cooldown_ms),
            tuning,
            width,
            height,
            cannon,
            bullets: Vec::new(),
            aliens,
            direction: 1.0,
            score: 0,
            outcome: None,
            time_ticks: 0,
        }
    }

    pub fn restart(&mut self) {
        *self = Self::with_tuning(self.tuning.clone());
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn hud(&self) -> WaveHud {
        WaveHud {
            score: self.score,
            outcome: self.outcome,
        }
    }

    /// Line the aliens must not reach
    #[inline]
    pub fn defense_line(&self) -> f32 {
        self.cannon.rect.y
    }

    /// Fire a bullet from the cannon's turret
    pub fn fire_bullet(&mut self) {
        let t = &self.tuning;
        let rect = Aabb::new(
            self.cannon.rect.x + self.cannon.rect.width / 2.0 - t.bullet_width / 2.0,
            self.cannon.rect.y,
            t.bullet_width,
            t.bullet_height,
        );
        self.bullets.push(Bullet {
            rect,
            dy: -t.bullet_speed,
        });
    }
}

fn build_rank(tuning: &WaveTuning) -> Vec<Alien> {
    let (ox, oy) = tuning.alien_origin;
    let (gx, gy) = tuning.alien_gap;
    let mut aliens = Vec::with_capacity((tuning.alien_rows * tuning.alien_cols) as usize);
    for row in 0..tuning.alien_rows {
        for col in 0..tuning.alien_cols {
            aliens.push(Alien {
                rect: Aabb::new(
                    ox + col as f32 * (tuning.alien_width + gx),
                    oy + row as f32 * (tuning.alien_height + gy),
                    tuning.alien_width,
                    tuning.alien_height,
                ),
                kind: AlienKind::for_row(row),
            });
        }
    }
    aliens
}

/// Advance the wave game by one frame. `now_ms` drives the fire cooldown.
pub fn tick(state: &mut WaveState, input: &WaveInput, now_ms: f64) {
    if !state.is_active() {
        return;
    }
    state.time_ticks += 1;

    // 1. Cannon movement, clamped to the surface
    {
        let max_x = (state.width - state.cannon.rect.width).max(0.0);
        let rect = &mut state.cannon.rect;
        rect.x = (rect.x + input.direction * state.tuning.player_speed).clamp(0.0, max_x);
    }

    // 2. Held fire, rate-limited
    if input.fire && state.fire.try_fire(now_ms) {
        state.fire_bullet();
    }

    // 3. Bullets
    let ceiling = state.tuning.bullet_ceiling;
    for bullet in &mut state.bullets {
        bullet.rect.y += bullet.dy;
    }
    state.bullets.retain(|b| b.rect.y > ceiling);

    // 4. Lockstep sweep
    let margin = state.tuning.side_margin;
    let right_limit = state.width - margin;
    let hit_wall = state.aliens.iter().any(|a| {
        (state.direction > 0.0 && a.rect.right() > right_limit)
            || (state.direction < 0.0 && a.rect.x < margin)
    });
    if hit_wall {
        state.direction = -state.direction;
        for alien in &mut state.aliens {
            alien.rect.y += state.tuning.alien_drop;
        }
    }
    let dx = state.tuning.alien_speed * state.direction;
    for alien in &mut state.aliens {
        alien.rect.x += dx;
    }
    let line = state.defense_line();
    let invaded = state.aliens.iter().any(|a| a.rect.bottom() >= line);

    // 5. Bullet vs alien: both removed
    let mut hits = 0;
    state.bullets.retain(|bullet| {
        match state.aliens.iter().position(|a| a.rect.overlaps(&bullet.rect)) {
            Some(idx) => {
                state.aliens.remove(idx);
                hits += 1;
                false
            }
            None => true,
        }
    });
    state.score += hits * state.tuning.alien_score;

    // Terminal conditions, recorded once
    if invaded {
        state.outcome = Some(Outcome::GameOver);
        log::info!("invaders: overrun, final score {}", state.score);
    } else if state.aliens.is_empty() {
        state.outcome = Some(Outcome::Victory);
        log::info!("invaders: victory, score {}", state.score);
    }
}

impl Game for WaveState {
    type Hud = WaveHud;

    fn name(&self) -> &'static str {
        "invaders"
    }

    fn spawners(&self) -> Vec<Spawner> {
        Vec::new()
    }

    fn spawn(&mut self, _kind: super::SpawnKind) {}

    fn step(&mut self, input: &mut InputSampler, now_ms: f64) -> Option<Outcome> {
        let input = WaveInput::sample(input);
        tick(self, &input, now_ms);
        self.outcome
    }

    fn restart(&mut self) {
        WaveState::restart(self);
    }

    /// The wave surface is fixed; container changes only move it on screen
    fn resize(&mut self, _width: f32, _height: f32) {}

    fn fixed_surface(&self) -> Option<(u32, u32)> {
        Some((WAVE_SURFACE_WIDTH as u32, WAVE_SURFACE_HEIGHT as u32))
    }

    fn hud(&self) -> WaveHud {
        WaveState::hud(self)
    }

    fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn shortcut(&self, key: Key) -> Option<Command> {
        match key {
            Key::Q | Key::Escape => Some(Command::Exit),
            _ => None,
        }
    }

    fn controls(&self) -> &'static str {
        "Game Controls:\n\nArrows - Move\nSpace - Fire\nQ / Esc - Quit"
    }
}
