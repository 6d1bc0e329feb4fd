//! Arena Survivor - tick-driven simulation core for a top-down wave-survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, combat, wave director, tick loop)
//! - `highscores`: Leaderboard records for the persistence collaborator
//!
//! Rendering, input capture, storage and loop scheduling are external
//! collaborators: the host feeds a [`sim::TickInput`] into [`sim::tick`] once
//! per logical frame and reads the mutated [`sim::GameState`] back.

pub mod highscores;
pub mod sim;

pub use highscores::{HighScores, RunRecord};
pub use sim::{GameEvent, GameState, TickInput, tick};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical simulation rate (ticks per second)
    pub const TICK_RATE: u64 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 960.0;
    pub const ARENA_HEIGHT: f32 = 540.0;
    /// Distance from the map edge to the playable field
    pub const ARENA_MARGIN: f32 = 25.0;
    /// Extra slack beyond the playfield before projectiles are discarded
    pub const PROJECTILE_PADDING: f32 = 40.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_BASE_SPEED: f32 = 1.5;
    pub const PLAYER_MAX_HEALTH: i32 = 100;

    /// Melee (sword)
    pub const MELEE_REACH: f32 = 32.0;
    pub const MELEE_REACH_PER_LEVEL: f32 = 0.25;
    pub const MELEE_HIT_RADIUS: f32 = 14.0;
    pub const MELEE_SWING_TICKS: u32 = 18;
    pub const MELEE_COOLDOWN: u32 = 24;
    /// Extra damage vs non-boss enemies so weak swarms stay clearable
    pub const MELEE_SWARM_BONUS: i32 = 2;

    /// Ranged (bow)
    pub const ARROW_SPEED: f32 = 6.0;
    pub const ARROW_DAMAGE: i32 = 1;
    pub const ARROW_LIFETIME: u32 = 120;
    pub const ARROW_RADIUS: f32 = 3.0;
    pub const RANGED_COOLDOWN: u32 = 30;
    /// Angular offset between successive arrow pairs (15 degrees)
    pub const SPREAD_STEP: f32 = 15.0 * std::f32::consts::PI / 180.0;

    /// Area (bomb)
    pub const BOMB_SPEED: f32 = 4.0;
    pub const BOMB_BASE_DAMAGE: i32 = 3;
    pub const BOMB_DAMAGE_PER_LEVEL: i32 = 2;
    pub const BOMB_BASE_BLAST: f32 = 40.0;
    pub const BOMB_BLAST_PER_LEVEL: f32 = 15.0;
    pub const BOMB_FLIGHT_TICKS: u32 = 30;
    pub const BOMB_RADIUS: f32 = 4.0;
    pub const AREA_COOLDOWN: u32 = 90;

    /// Dodge roll
    pub const DODGE_TICKS: u32 = 12;
    pub const DODGE_SPEED: f32 = 5.0;
    pub const DODGE_COOLDOWN: u32 = 45;

    /// Post-hit windows (independent counters: invuln gates damage, flash is cosmetic)
    pub const INVULN_TICKS: u32 = 30;
    pub const FLASH_TICKS: u32 = 10;

    /// Upgrade catalog effects
    pub const UPGRADE_SPEED_BONUS: f32 = 0.25;
    pub const VITALITY_MAX_HEALTH: i32 = 150;

    /// Leveling curve
    pub const EXP_BASE_THRESHOLD: u32 = 100;
    pub const EXP_THRESHOLD_GROWTH: f32 = 1.2;
    pub const LEVEL_HEALTH_GAIN: i32 = 5;
    pub const LEVEL_SPEED_GAIN: f32 = 0.05;

    /// Kill drops: ghosts sometimes leave a snack, bosses a big heal
    pub const GHOST_DROP_CHANCE: f32 = 0.3;
    pub const GHOST_DROP_HEAL: i32 = 20;
    pub const BOSS_DROP_CHANCE: f32 = 0.1;
    pub const BOSS_DROP_HEAL: i32 = 50;

    /// Pickups
    pub const FOOD_HEAL: i32 = 20;
    pub const FOOD_RADIUS: f32 = 6.0;
    pub const PEDESTAL_RADIUS: f32 = 12.0;
    pub const MAX_FOOD: usize = 8;
    pub const FOOD_SPAWN_INTERVAL: u64 = 300;
    pub const INITIAL_FOOD: usize = 4;

    /// Trickle spawning
    pub const ENEMY_SPAWN_INTERVAL: u64 = 180;
    pub const ENEMY_SPAWN_INTERVAL_MIN: u64 = 48;
    pub const ENEMY_SPAWN_INTERVAL_STEP: u64 = 18;
    pub const MAX_ENEMIES_BASE: usize = 12;
    pub const MAX_ENEMIES_PER_WAVE: usize = 2;

    /// Boss encounter triggers: elapsed ticks or wave kills, whichever first
    pub const BOSS_TIME_TRIGGER_TICKS: u64 = 60 * TICK_RATE;
    pub const BOSS_KILL_TRIGGER: u32 = 10;
    pub const BOSS_CAP: u32 = 4;
    pub const FINAL_WAVE: u32 = 10;

    /// Contact damage lands only on ticks where `tick % cadence == 0`
    pub const CONTACT_DAMAGE_CADENCE: u64 = 30;
    /// Per-wave difficulty multiplier step applied to enemy stats at spawn
    pub const WAVE_DIFFICULTY_STEP: f32 = 0.15;

    /// Cosmetic particle cap
    pub const MAX_PARTICLES: usize = 256;
}

/// Rotate a vector by `radians` counter-clockwise
#[inline]
pub fn rotate_vec(v: Vec2, radians: f32) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Normalize `v`, falling back to `default` for degenerate vectors
#[inline]
pub fn normalize_or(v: Vec2, default: Vec2) -> Vec2 {
    let n = v.normalize_or_zero();
    if n == Vec2::ZERO { default } else { n }
}

/// Clamp a circle center so the entity stays on the playable field
#[inline]
pub fn clamp_to_playfield(pos: Vec2, radius: f32) -> Vec2 {
    use consts::*;
    Vec2::new(
        pos.x.clamp(ARENA_MARGIN + radius, ARENA_WIDTH - ARENA_MARGIN - radius),
        pos.y.clamp(ARENA_MARGIN + radius, ARENA_HEIGHT - ARENA_MARGIN - radius),
    )
}

/// True once a point has left the playfield plus projectile padding
#[inline]
pub fn out_of_bounds(pos: Vec2) -> bool {
    use consts::*;
    let pad = ARENA_MARGIN - PROJECTILE_PADDING;
    pos.x < pad
        || pos.y < pad
        || pos.x > ARENA_WIDTH - pad
        || pos.y > ARENA_HEIGHT - pad
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_vec_quarter_turn() {
        let v = rotate_vec(Vec2::new(1.0, 0.0), FRAC_PI_2);
        assert!((v.x).abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_or_zero_length_fallback() {
        let v = normalize_or(Vec2::ZERO, Vec2::new(0.0, 1.0));
        assert_eq!(v, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_clamp_to_playfield() {
        let p = clamp_to_playfield(Vec2::new(-50.0, 10_000.0), 10.0);
        assert_eq!(p.x, consts::ARENA_MARGIN + 10.0);
        assert_eq!(p.y, consts::ARENA_HEIGHT - consts::ARENA_MARGIN - 10.0);
    }

    #[test]
    fn test_out_of_bounds_padding() {
        assert!(!out_of_bounds(Vec2::new(0.0, 0.0)));
        assert!(out_of_bounds(Vec2::new(-60.0, 100.0)));
        assert!(out_of_bounds(Vec2::new(100.0, consts::ARENA_HEIGHT + 60.0)));
    }
}
