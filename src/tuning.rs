//! Data-driven game balance
//!
//! Every number that shapes how the games feel lives here. Defaults match the
//! shipped behaviour; a host may override any subset from JSON.

use serde::{Deserialize, Serialize};

/// Arena shooter balance (speeds are pixels per tick, periods in ms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub player_radius: f32,
    pub player_speed: f32,
    pub player_max_health: u32,

    pub shot_speed: f32,
    pub shot_radius: f32,
    pub shot_damage: u32,
    pub shot_pierce: u32,

    pub super_speed: f32,
    pub super_radius: f32,
    pub super_damage: u32,
    pub super_pierce: u32,
    /// Number of projectiles in the super fan
    pub super_count: u32,
    /// Total angular window of the fan (radians)
    pub super_spread: f32,

    /// Charge gained per registered hit
    pub charge_per_hit: u32,
    /// Charge needed to fire the super (also the cap)
    pub charge_max: u32,
    /// Fraction of projectile velocity applied to an enemy as knockback
    pub knockback: f32,

    pub enemy_radius: f32,
    pub enemy_health: u32,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    /// Health drained per tick for each touching enemy
    pub contact_damage: u32,

    pub gem_radius: f32,
    /// Gems spawn within ± this many pixels of the surface center
    pub gem_jitter: f32,
    /// Phase advance per tick for the floating animation
    pub gem_spin: f32,
    pub gem_score: u32,

    pub enemy_spawn_ms: u32,
    pub gem_spawn_ms: u32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            player_radius: 20.0,
            player_speed: 5.0,
            player_max_health: 100,

            shot_speed: 15.0,
            shot_radius: 5.0,
            shot_damage: 10,
            shot_pierce: 1,

            super_speed: 25.0,
            super_radius: 12.0,
            super_damage: 20,
            super_pierce: 5,
            super_count: 5,
            super_spread: 0.5,

            charge_per_hit: 10,
            charge_max: 100,
            knockback: 0.5,

            enemy_radius: 20.0,
            enemy_health: 20,
            enemy_min_speed: 1.0,
            enemy_max_speed: 3.0,
            contact_damage: 2,

            gem_radius: 8.0,
            gem_jitter: 150.0,
            gem_spin: 0.05,
            gem_score: 1,

            enemy_spawn_ms: 1200,
            gem_spawn_ms: 2500,
        }
    }
}

/// Alien wave balance (speeds are pixels per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    /// Distance from the player's top edge to the bottom of the surface
    pub player_inset: f32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    /// Minimum time between shots while fire is held
    pub fire_cooldown_ms: f64,
    /// Bullets are discarded once above this y
    pub bullet_ceiling: f32,

    pub alien_width: f32,
    pub alien_height: f32,
    pub alien_rows: u32,
    pub alien_cols: u32,
    pub alien_origin: (f32, f32),
    pub alien_gap: (f32, f32),
    pub alien_speed: f32,
    pub alien_drop: f32,
    /// Side margin that triggers reverse + drop
    pub side_margin: f32,
    pub alien_score: u32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            player_width: 30.0,
            player_height: 20.0,
            player_speed: 5.0,
            player_inset: 30.0,

            bullet_width: 4.0,
            bullet_height: 10.0,
            bullet_speed: 7.0,
            fire_cooldown_ms: 300.0,
            bullet_ceiling: -20.0,

            alien_width: 24.0,
            alien_height: 18.0,
            alien_rows: 4,
            alien_cols: 8,
            alien_origin: (50.0, 50.0),
            alien_gap: (15.0, 15.0),
            alien_speed: 1.0,
            alien_drop: 20.0,
            side_margin: 10.0,
            alien_score: 100,
        }
    }
}

impl ArenaTuning {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Host-supplied overrides, if any
    pub fn from_overrides(json: Option<&str>) -> Result<Self, serde_json::Error> {
        json.map_or_else(|| Ok(Self::default()), Self::from_json)
    }
}

impl WaveTuning {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Host-supplied overrides, if any
    pub fn from_overrides(json: Option<&str>) -> Result<Self, serde_json::Error> {
        json.map_or_else(|| Ok(Self::default()), Self::from_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let tuning = ArenaTuning::from_json(r#"{ "player_speed": 7.5 }"#).unwrap();
        assert_eq!(tuning.player_speed, 7.5);
        assert_eq!(tuning.enemy_spawn_ms, 1200);
        assert_eq!(tuning.super_count, 5);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(WaveTuning::from_json("{ not json").is_err());
    }

    #[test]
    fn overrides_are_optional() {
        assert_eq!(ArenaTuning::from_overrides(None).unwrap(), ArenaTuning::default());
        let wave = WaveTuning::from_overrides(Some(r#"{ "fire_cooldown_ms": 150.0 }"#)).unwrap();
        assert_eq!(wave.fire_cooldown_ms, 150.0);
        assert!(ArenaTuning::from_overrides(Some("[]")).is_err());
    }

    #[test]
    fn wave_defaults_build_a_full_rank() {
        let tuning = WaveTuning::default();
        assert_eq!(tuning.alien_rows * tuning.alien_cols, 32);
        assert_eq!(tuning.fire_cooldown_ms, 300.0);
    }
}
