//! Enemy stats, spawning and steering
//!
//! No pathfinding: skeletons and bosses steer straight at the player; ghosts
//! wander, occasionally re-aiming at the player. Stats are scaled once at
//! spawn time by the wave difficulty multiplier and stay fixed for the
//! entity's lifetime.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Enemy, EnemyKind};
use crate::consts::*;
use crate::{clamp_to_playfield, normalize_or};

/// Difficulty multiplier applied to hp and speed at spawn
pub fn difficulty_multiplier(wave: u32) -> f32 {
    1.0 + WAVE_DIFFICULTY_STEP * wave.saturating_sub(1) as f32
}

/// Base stats per kind: (radius, speed, hp, contact damage, exp, score)
fn base_stats(kind: EnemyKind) -> (f32, f32, i32, i32, u32, u64) {
    match kind {
        EnemyKind::Skeleton => (6.0, 0.8, 1, 10, 20, 10),
        EnemyKind::Ghost => (7.0, 0.6, 1, 5, 10, 5),
        EnemyKind::Boss => (16.0, 1.0, 7, 30, 50, 100),
    }
}

/// Build an enemy for the given wave
pub fn spawn(id: u32, kind: EnemyKind, pos: Vec2, wave: u32) -> Enemy {
    let (radius, speed, hp, contact_damage, exp_reward, score_reward) = base_stats(kind);
    let mult = difficulty_multiplier(wave);
    let hp = (hp as f32 * mult).ceil() as i32;
    Enemy {
        id,
        kind,
        pos,
        radius,
        speed: speed * mult,
        hp,
        max_hp: hp,
        contact_damage,
        exp_reward,
        score_reward,
        flash_ticks: 0,
        dead: false,
        wander_dir: Vec2::ZERO,
        wander_ticks: 0,
    }
}

/// Advance one tick of enemy movement
pub fn steer(e: &mut Enemy, player_pos: Vec2, rng: &mut Pcg32) {
    if e.dead {
        return;
    }
    e.flash_ticks = e.flash_ticks.saturating_sub(1);

    let dir = match e.kind {
        EnemyKind::Ghost => {
            if e.wander_ticks == 0 {
                e.wander_dir = if rng.random::<f32>() < 0.1 {
                    normalize_or(player_pos - e.pos, Vec2::new(0.0, 1.0))
                } else {
                    let angle = rng.random_range(0.0..std::f32::consts::TAU);
                    Vec2::new(angle.cos(), angle.sin())
                };
                e.wander_ticks = rng.random_range(20..=60);
            }
            e.wander_ticks -= 1;
            e.wander_dir
        }
        // Zero-length guard: an enemy sitting on the player stays put
        _ => normalize_or(player_pos - e.pos, Vec2::ZERO),
    };

    e.pos = clamp_to_playfield(e.pos + dir * e.speed, e.radius);
}

/// Apply damage; returns true only on the hp <= 0 transition.
///
/// The caller owns one-time death-reward handling; a dead enemy absorbs no
/// further damage.
pub fn hurt(e: &mut Enemy, amount: i32) -> bool {
    if e.dead {
        return false;
    }
    e.hp -= amount;
    e.flash_ticks = FLASH_TICKS;
    if e.hp <= 0 {
        e.dead = true;
        return true;
    }
    false
}
