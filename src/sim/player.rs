//! Player operations and the progression ledger
//!
//! The player is a plain record ([`Player`]); everything it can do lives here
//! as free functions. Derived weapon stats are recomputed on read from the
//! upgrade levels rather than stored.

use glam::Vec2;

use super::state::{MoveDir, Player, Projectile, ProjectileKind, Upgrade, WeaponKind};
use crate::consts::*;
use crate::{clamp_to_playfield, normalize_or, rotate_vec};

/// Melee damage for the current sword level (base 2, every other level adds an extra point)
pub fn melee_damage(p: &Player) -> i32 {
    2 + p.melee_level as i32 + (p.melee_level / 2) as i32
}

/// Melee arc reach; each level extends it by 25%
pub fn melee_reach(p: &Player) -> f32 {
    MELEE_REACH * (1.0 + MELEE_REACH_PER_LEVEL * p.melee_level as f32)
}

/// Bomb damage for the current area level
pub fn area_damage(p: &Player) -> i32 {
    BOMB_BASE_DAMAGE + BOMB_DAMAGE_PER_LEVEL * p.area_level as i32
}

/// Bomb blast radius for the current area level
pub fn blast_radius(p: &Player) -> f32 {
    BOMB_BASE_BLAST + BOMB_BLAST_PER_LEVEL * p.area_level as f32
}

/// Effective movement speed
pub fn speed(p: &Player) -> f32 {
    p.base_speed + p.speed_bonus
}

/// Integrate one tick of movement and advance all player timers.
///
/// While dodging, motion is locked to `last_move` at [`DODGE_SPEED`] and the
/// intent is ignored.
pub fn update(p: &mut Player, intent: Option<MoveDir>) {
    if p.is_dodging() {
        p.pos = clamp_to_playfield(p.pos + p.last_move * DODGE_SPEED, p.radius);
    } else if let Some(dir) = intent {
        let v = dir.as_vec();
        p.facing = v;
        p.last_move = v;
        p.pos = clamp_to_playfield(p.pos + v * speed(p), p.radius);
    }

    p.melee_cooldown = p.melee_cooldown.saturating_sub(1);
    p.ranged_cooldown = p.ranged_cooldown.saturating_sub(1);
    p.area_cooldown = p.area_cooldown.saturating_sub(1);
    p.dodge_cooldown = p.dodge_cooldown.saturating_sub(1);
    p.dodge_ticks = p.dodge_ticks.saturating_sub(1);
    p.invuln_ticks = p.invuln_ticks.saturating_sub(1);
    p.flash_ticks = p.flash_ticks.saturating_sub(1);
    if p.swing_ticks > 0 {
        p.swing_ticks -= 1;
        if p.swing_ticks == 0 {
            p.swing_struck.clear();
        }
    }
}

/// Attempt the equipped weapon's primary action.
///
/// Returns the projectiles to hand to the run controller (empty for melee and
/// for every rejected attempt). Rejections are normal no-ops: no weapon, mid
/// dodge, own cooldown running, or a swing already open.
pub fn use_primary(p: &mut Player) -> Vec<Projectile> {
    let Some(weapon) = p.weapon else {
        return Vec::new();
    };
    if p.is_dodging() {
        return Vec::new();
    }

    match weapon {
        WeaponKind::Sword => {
            if p.melee_cooldown == 0 && p.swing_ticks == 0 {
                p.swing_ticks = MELEE_SWING_TICKS;
                p.swing_struck.clear();
                p.melee_cooldown = MELEE_COOLDOWN;
            }
            Vec::new()
        }
        WeaponKind::Bow => {
            if p.ranged_cooldown > 0 {
                return Vec::new();
            }
            p.ranged_cooldown = RANGED_COOLDOWN;

            let base = normalize_or(p.facing, Vec2::new(0.0, 1.0));
            let mut dirs = vec![base];
            for i in 1..=p.spread_pairs {
                let angle = SPREAD_STEP * i as f32;
                dirs.push(rotate_vec(base, angle));
                dirs.push(rotate_vec(base, -angle));
            }

            dirs.into_iter()
                .map(|dir| Projectile {
                    kind: ProjectileKind::Arrow,
                    pos: p.pos,
                    vel: dir * ARROW_SPEED,
                    life: ARROW_LIFETIME,
                    damage: ARROW_DAMAGE,
                    radius: ARROW_RADIUS,
                    blast: 0.0,
                })
                .collect()
        }
        WeaponKind::Bomb => {
            if p.area_cooldown > 0 {
                return Vec::new();
            }
            p.area_cooldown = AREA_COOLDOWN;

            let dir = normalize_or(p.last_move, Vec2::new(0.0, 1.0));
            vec![Projectile {
                kind: ProjectileKind::Bomb,
                pos: p.pos,
                vel: dir * BOMB_SPEED,
                life: BOMB_FLIGHT_TICKS,
                damage: area_damage(p),
                radius: BOMB_RADIUS,
                blast: blast_radius(p),
            }]
        }
    }
}

/// Attempt a dodge roll. Rejected on cooldown, while already dodging, or mid swing.
pub fn dodge(p: &mut Player) -> bool {
    if p.dodge_cooldown > 0 || p.is_dodging() || p.swing_ticks > 0 {
        return false;
    }
    p.dodge_ticks = DODGE_TICKS;
    p.invuln_ticks = p.invuln_ticks.max(DODGE_TICKS);
    p.dodge_cooldown = DODGE_COOLDOWN;
    true
}

/// Apply incoming damage. No-op while invulnerable or dodging.
///
/// Returns whether damage actually landed. Invulnerability and flash are
/// independent counters; flash exists only so the renderer can reproduce it.
pub fn hurt(p: &mut Player, amount: i32) -> bool {
    if p.invuln_ticks > 0 || p.is_dodging() {
        return false;
    }
    p.health = (p.health - amount).max(0);
    p.invuln_ticks = INVULN_TICKS;
    p.flash_ticks = FLASH_TICKS;
    true
}

/// Heal, capped at max health
pub fn heal(p: &mut Player, amount: i32) {
    p.health = (p.health + amount).min(p.max_health);
}

/// Grant experience; may level up several times in one call.
///
/// Each level: threshold grows by [`EXP_THRESHOLD_GROWTH`], max health rises
/// by [`LEVEL_HEALTH_GAIN`] (refilled by the same amount), and the permanent
/// speed bonus grows. Returns the number of levels gained.
pub fn gain_exp(p: &mut Player, amount: u32) -> u32 {
    p.exp += amount;
    let mut levels = 0;
    while p.exp >= p.exp_to_next {
        p.exp -= p.exp_to_next;
        p.level += 1;
        p.exp_to_next = (p.exp_to_next as f32 * EXP_THRESHOLD_GROWTH) as u32;
        p.max_health += LEVEL_HEALTH_GAIN;
        p.health = (p.health + LEVEL_HEALTH_GAIN).min(p.max_health);
        p.speed_bonus += LEVEL_SPEED_GAIN;
        levels += 1;
    }
    levels
}

/// Apply a wave-clear upgrade. The catalog is a closed enum, so there is no
/// unknown-id case to silently ignore.
pub fn apply_upgrade(p: &mut Player, upgrade: Upgrade) {
    match upgrade {
        Upgrade::Swiftness => p.speed_bonus += UPGRADE_SPEED_BONUS,
        Upgrade::Vitality => {
            p.max_health = p.max_health.max(VITALITY_MAX_HEALTH);
            p.health = p.max_health;
        }
        Upgrade::MeleeMastery => p.melee_level += 1,
        Upgrade::SplitShot => p.spread_pairs += 1,
        Upgrade::GreaterBlast => p.area_level += 1,
    }
}
