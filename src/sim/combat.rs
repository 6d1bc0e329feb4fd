//! Combat resolution: melee arcs, projectiles, explosions, contact damage
//!
//! All passes skip dead enemies; every hp transition to zero runs death
//! handling exactly once (kill counters, score, experience, boss bookkeeping).

use glam::Vec2;
use rand::Rng;

use super::enemy;
use super::player;
use super::state::{EnemyKind, Food, GameState, ProjectileKind, WeaponKind};
use super::tick::GameEvent;
use super::waves;
use crate::consts::*;
use crate::out_of_bounds;

/// Particle palette indices handed to the renderer
pub const BURST_GHOST: u32 = 0;
pub const BURST_SKELETON: u32 = 1;
pub const BURST_BOSS: u32 = 2;
pub const BURST_EXPLOSION: u32 = 3;

/// Damage large enough to drop any non-boss enemy regardless of wave scaling
const OVERWHELMING: i32 = 1_000_000;

fn burst_color(kind: EnemyKind) -> u32 {
    match kind {
        EnemyKind::Ghost => BURST_GHOST,
        EnemyKind::Skeleton => BURST_SKELETON,
        EnemyKind::Boss => BURST_BOSS,
    }
}

/// A kill waiting for its one-time reward pass
struct Kill {
    kind: EnemyKind,
    pos: Vec2,
    exp: u32,
    score: u64,
}

/// One-time death handling for a resolved kill
fn grant_kill(state: &mut GameState, kill: Kill, events: &mut Vec<GameEvent>) {
    state.player.kills += 1;
    state.wave_kills += 1;
    state.score += kill.score;

    let levels = player::gain_exp(&mut state.player, kill.exp);
    if levels > 0 {
        state.show_message(format!("LEVEL UP! LV {}", state.player.level), 90);
        events.push(GameEvent::LevelUp {
            level: state.player.level,
        });
    }

    let burst = if kill.kind == EnemyKind::Boss { 20 } else { 8 };
    state.spawn_burst(kill.pos, burst_color(kill.kind), burst);
    events.push(GameEvent::EnemyKilled {
        kind: kill.kind,
        score: kill.score,
    });

    // Chance-based drop where the enemy fell; skeletons drop nothing
    let drop = match kill.kind {
        EnemyKind::Ghost => Some((GHOST_DROP_CHANCE, GHOST_DROP_HEAL)),
        EnemyKind::Boss => Some((BOSS_DROP_CHANCE, BOSS_DROP_HEAL)),
        EnemyKind::Skeleton => None,
    };
    if let Some((chance, heal)) = drop {
        if state.rng.random::<f32>() < chance {
            state.food.push(Food {
                pos: kill.pos,
                radius: FOOD_RADIUS,
                heal,
                consumed: false,
            });
        }
    }

    if kill.kind == EnemyKind::Boss {
        state.bosses_remaining = state.bosses_remaining.saturating_sub(1);
        if state.bosses_remaining == 0 {
            waves::complete_wave(state, events);
        } else {
            state.show_message(
                format!("BOSS DOWN! {} LEFT!", state.bosses_remaining),
                90,
            );
        }
    }
}

/// Periodic contact damage from overlapping enemies.
///
/// Lands only on ticks where `tick % CONTACT_DAMAGE_CADENCE == 0`, so actual
/// damage-per-second depends on how overlap aligns with the cadence phase.
/// That phase dependence is observable difficulty tuning, kept on purpose.
pub fn resolve_contact(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.tick % CONTACT_DAMAGE_CADENCE != 0 {
        return;
    }
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    // Iteration order decides who lands the hit: the first overlapping enemy
    // damages the player, and the invulnerability window gates the rest
    for e in &state.enemies {
        if e.dead {
            continue;
        }
        let combined = e.radius + player_radius;
        if player_pos.distance_squared(e.pos) < combined * combined {
            let damage = e.contact_damage;
            if player::hurt(&mut state.player, damage) {
                events.push(GameEvent::PlayerHurt { damage });
            }
        }
    }
}

/// Melee arc resolution while the swing window is open.
///
/// The arc point sits at `reach` along the facing vector; an enemy is hit when
/// its center is strictly inside the combined radius (the exact boundary is a
/// miss). Each enemy is struck at most once per swing, but one entering the
/// arc mid-window is still caught.
pub fn resolve_melee(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.player.weapon != Some(WeaponKind::Sword) || state.player.swing_ticks == 0 {
        return;
    }
    let arc = state.player.pos + state.player.facing * player::melee_reach(&state.player);
    let damage = player::melee_damage(&state.player);

    let mut kills = Vec::new();
    for i in 0..state.enemies.len() {
        let (id, hit, amount) = {
            let e = &state.enemies[i];
            if e.dead || state.player.swing_struck.contains(&e.id) {
                continue;
            }
            let combined = MELEE_HIT_RADIUS + e.radius;
            let bonus = if e.kind == EnemyKind::Boss {
                0
            } else {
                MELEE_SWARM_BONUS
            };
            (
                e.id,
                arc.distance_squared(e.pos) < combined * combined,
                damage + bonus,
            )
        };
        if !hit {
            continue;
        }
        state.player.swing_struck.push(id);
        let e = &mut state.enemies[i];
        if enemy::hurt(e, amount) {
            kills.push(Kill {
                kind: e.kind,
                pos: e.pos,
                exp: e.exp_reward,
                score: e.score_reward,
            });
        }
    }
    for kill in kills {
        grant_kill(state, kill, events);
    }
}

/// Advance projectiles and resolve arrow hits and bomb detonations.
///
/// Arrows are expended on their first hit (one enemy per arrow per tick, first
/// by iteration order); they drop bosses to full damage and everything else
/// outright. Bombs detonate when their fuse expires, hitting every live enemy
/// inside the blast with no distance falloff. Expired or out-of-bounds
/// projectiles are pruned by the run controller at end of tick.
pub fn resolve_projectiles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut kills = Vec::new();

    for pi in 0..state.projectiles.len() {
        let vel = state.projectiles[pi].vel;
        state.projectiles[pi].pos += vel;
        if state.projectiles[pi].life > 0 {
            state.projectiles[pi].life -= 1;
        }

        let (kind, pos, life, damage, radius, blast) = {
            let p = &state.projectiles[pi];
            (p.kind, p.pos, p.life, p.damage, p.radius, p.blast)
        };

        match kind {
            ProjectileKind::Arrow => {
                if life == 0 || out_of_bounds(pos) {
                    continue;
                }
                for ei in 0..state.enemies.len() {
                    let e = &state.enemies[ei];
                    if e.dead {
                        continue;
                    }
                    let combined = radius + e.radius;
                    if pos.distance_squared(e.pos) >= combined * combined {
                        continue;
                    }
                    let amount = if e.kind == EnemyKind::Boss {
                        damage
                    } else {
                        OVERWHELMING
                    };
                    let e = &mut state.enemies[ei];
                    if enemy::hurt(e, amount) {
                        kills.push(Kill {
                            kind: e.kind,
                            pos: e.pos,
                            exp: e.exp_reward,
                            score: e.score_reward,
                        });
                    }
                    state.projectiles[pi].life = 0;
                    break;
                }
            }
            ProjectileKind::Bomb => {
                if life > 0 {
                    continue;
                }
                // Fuse ran out this tick: detonate once against everything in the blast
                for ei in 0..state.enemies.len() {
                    let e = &state.enemies[ei];
                    if e.dead {
                        continue;
                    }
                    let reach = blast + e.radius;
                    if pos.distance_squared(e.pos) >= reach * reach {
                        continue;
                    }
                    let e = &mut state.enemies[ei];
                    if enemy::hurt(e, damage) {
                        kills.push(Kill {
                            kind: e.kind,
                            pos: e.pos,
                            exp: e.exp_reward,
                            score: e.score_reward,
                        });
                    }
                }
                state.spawn_burst(pos, BURST_EXPLOSION, 16);
            }
        }
    }

    for kill in kills {
        grant_kill(state, kill, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Projectile, WavePhase};

    fn armed_state(weapon: WeaponKind) -> GameState {
        let mut state = GameState::new(42);
        state.player.weapon = Some(weapon);
        state.phase = WavePhase::WaveActive;
        state.pedestals.clear();
        state
    }

    fn add_enemy(state: &mut GameState, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(enemy::spawn(id, kind, pos, 1));
        id
    }

    #[test]
    fn test_melee_boundary_is_exclusive() {
        let mut state = armed_state(WeaponKind::Sword);
        state.player.facing = Vec2::new(1.0, 0.0);
        state.player.swing_ticks = MELEE_SWING_TICKS;

        let arc = state.player.pos + Vec2::new(MELEE_REACH, 0.0);
        let enemy_radius = 6.0;
        // Exactly at reach + enemy radius from the arc point: a miss
        let exact = arc + Vec2::new(MELEE_HIT_RADIUS + enemy_radius, 0.0);
        add_enemy(&mut state, EnemyKind::Skeleton, exact);
        // A hair inside: a hit
        let inside = arc + Vec2::new(MELEE_HIT_RADIUS + enemy_radius - 0.01, 0.0);
        add_enemy(&mut state, EnemyKind::Skeleton, inside);

        let mut events = Vec::new();
        resolve_melee(&mut state, &mut events);
        assert!(!state.enemies[0].dead);
        assert!(state.enemies[1].dead);
    }

    #[test]
    fn test_melee_strikes_each_enemy_once_per_swing() {
        let mut state = armed_state(WeaponKind::Sword);
        state.player.facing = Vec2::new(1.0, 0.0);
        state.player.swing_ticks = MELEE_SWING_TICKS;
        let arc = state.player.pos + Vec2::new(MELEE_REACH, 0.0);
        add_enemy(&mut state, EnemyKind::Boss, arc);

        let mut events = Vec::new();
        resolve_melee(&mut state, &mut events);
        let hp_after_first = state.enemies[0].hp;
        assert!(hp_after_first < state.enemies[0].max_hp);
        resolve_melee(&mut state, &mut events);
        assert_eq!(state.enemies[0].hp, hp_after_first);
    }

    #[test]
    fn test_melee_swarm_bonus_spares_bosses() {
        let mut state = armed_state(WeaponKind::Sword);
        state.player.facing = Vec2::new(1.0, 0.0);
        state.player.swing_ticks = MELEE_SWING_TICKS;
        let arc = state.player.pos + Vec2::new(MELEE_REACH, 0.0);
        add_enemy(&mut state, EnemyKind::Boss, arc);

        let mut events = Vec::new();
        resolve_melee(&mut state, &mut events);
        // Boss takes base damage only, no swarm bonus
        assert_eq!(
            state.enemies[0].hp,
            state.enemies[0].max_hp - player::melee_damage(&state.player)
        );
    }

    #[test]
    fn test_arrow_expends_on_first_hit_only() {
        let mut state = armed_state(WeaponKind::Bow);
        let pos = state.player.pos;
        add_enemy(&mut state, EnemyKind::Skeleton, pos + Vec2::new(10.0, 0.0));
        add_enemy(&mut state, EnemyKind::Skeleton, pos + Vec2::new(10.0, 2.0));
        state.projectiles.push(Projectile {
            kind: ProjectileKind::Arrow,
            pos: pos + Vec2::new(4.0, 0.0),
            vel: Vec2::new(ARROW_SPEED, 0.0),
            life: ARROW_LIFETIME,
            damage: ARROW_DAMAGE,
            radius: ARROW_RADIUS,
            blast: 0.0,
        });

        let mut events = Vec::new();
        resolve_projectiles(&mut state, &mut events);
        // First enemy by iteration order dies instantly, second is untouched
        assert!(state.enemies[0].dead);
        assert!(!state.enemies[1].dead);
        assert_eq!(state.projectiles[0].life, 0);
    }

    #[test]
    fn test_arrow_full_damage_vs_boss() {
        let mut state = armed_state(WeaponKind::Bow);
        let pos = state.player.pos;
        add_enemy(&mut state, EnemyKind::Boss, pos + Vec2::new(8.0, 0.0));
        state.projectiles.push(Projectile {
            kind: ProjectileKind::Arrow,
            pos,
            vel: Vec2::new(ARROW_SPEED, 0.0),
            life: ARROW_LIFETIME,
            damage: ARROW_DAMAGE,
            radius: ARROW_RADIUS,
            blast: 0.0,
        });

        let mut events = Vec::new();
        resolve_projectiles(&mut state, &mut events);
        assert_eq!(state.enemies[0].hp, state.enemies[0].max_hp - ARROW_DAMAGE);
        assert!(!state.enemies[0].dead);
    }

    #[test]
    fn test_bomb_detonates_on_expiry_not_contact() {
        let mut state = armed_state(WeaponKind::Bomb);
        let pos = state.player.pos;
        // Enemy sitting right on the bomb's path
        add_enemy(&mut state, EnemyKind::Skeleton, pos + Vec2::new(4.0, 0.0));
        state.projectiles.push(Projectile {
            kind: ProjectileKind::Bomb,
            pos,
            vel: Vec2::ZERO,
            life: 2,
            damage: BOMB_BASE_DAMAGE,
            radius: BOMB_RADIUS,
            blast: BOMB_BASE_BLAST,
        });

        let mut events = Vec::new();
        resolve_projectiles(&mut state, &mut events);
        assert!(!state.enemies[0].dead, "no damage on contact");
        resolve_projectiles(&mut state, &mut events);
        assert!(state.enemies[0].dead, "detonates when the fuse expires");
    }

    #[test]
    fn test_bomb_splash_hits_all_enemies_in_blast() {
        let mut state = armed_state(WeaponKind::Bomb);
        let pos = state.player.pos;
        add_enemy(&mut state, EnemyKind::Skeleton, pos + Vec2::new(20.0, 0.0));
        add_enemy(&mut state, EnemyKind::Ghost, pos + Vec2::new(-30.0, 0.0));
        add_enemy(&mut state, EnemyKind::Skeleton, pos + Vec2::new(200.0, 0.0));
        state.projectiles.push(Projectile {
            kind: ProjectileKind::Bomb,
            pos,
            vel: Vec2::ZERO,
            life: 1,
            damage: BOMB_BASE_DAMAGE,
            radius: BOMB_RADIUS,
            blast: BOMB_BASE_BLAST,
        });

        let mut events = Vec::new();
        resolve_projectiles(&mut state, &mut events);
        assert!(state.enemies[0].dead);
        assert!(state.enemies[1].dead);
        assert!(!state.enemies[2].dead, "outside the blast radius");
    }

    #[test]
    fn test_kill_rewards_applied_once() {
        let mut state = armed_state(WeaponKind::Sword);
        state.player.facing = Vec2::new(1.0, 0.0);
        state.player.swing_ticks = MELEE_SWING_TICKS;
        let arc = state.player.pos + Vec2::new(MELEE_REACH, 0.0);
        add_enemy(&mut state, EnemyKind::Skeleton, arc);

        let mut events = Vec::new();
        resolve_melee(&mut state, &mut events);
        assert_eq!(state.player.kills, 1);
        assert_eq!(state.wave_kills, 1);
        assert_eq!(state.score, 10);
        assert_eq!(state.player.exp, 20);

        // Dead enemy still in the collection until pruning: no double reward
        resolve_melee(&mut state, &mut events);
        resolve_projectiles(&mut state, &mut events);
        assert_eq!(state.player.kills, 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_ghost_kills_sometimes_drop_food() {
        let mut state = armed_state(WeaponKind::Sword);
        let pos = state.player.pos;
        let mut events = Vec::new();
        for _ in 0..200 {
            grant_kill(
                &mut state,
                Kill {
                    kind: EnemyKind::Ghost,
                    pos,
                    exp: 0,
                    score: 0,
                },
                &mut events,
            );
        }
        let dropped = state.food.len() - INITIAL_FOOD;
        // 30% chance per kill: well away from both never and always
        assert!(dropped > 20, "expected some drops, got {dropped}");
        assert!(dropped < 140, "expected misses too, got {dropped}");
    }

    #[test]
    fn test_boss_kills_sometimes_drop_big_heal() {
        let mut state = armed_state(WeaponKind::Sword);
        // Keep the wave from completing mid-loop
        state.bosses_remaining = 10_000;
        let pos = state.player.pos;
        let mut events = Vec::new();
        for _ in 0..300 {
            grant_kill(
                &mut state,
                Kill {
                    kind: EnemyKind::Boss,
                    pos,
                    exp: 0,
                    score: 0,
                },
                &mut events,
            );
        }
        let dropped = state.food.len() - INITIAL_FOOD;
        assert!(dropped > 5, "expected some drops, got {dropped}");
        assert!(dropped < 90, "expected a 10% rate, got {dropped}");
        assert!(state
            .food
            .iter()
            .skip(INITIAL_FOOD)
            .all(|f| f.heal == BOSS_DROP_HEAL));
    }

    #[test]
    fn test_skeleton_kills_never_drop_food() {
        let mut state = armed_state(WeaponKind::Sword);
        let pos = state.player.pos;
        let mut events = Vec::new();
        for _ in 0..200 {
            grant_kill(
                &mut state,
                Kill {
                    kind: EnemyKind::Skeleton,
                    pos,
                    exp: 0,
                    score: 0,
                },
                &mut events,
            );
        }
        assert_eq!(state.food.len(), INITIAL_FOOD);
    }

    #[test]
    fn test_contact_damage_first_overlap_wins() {
        let mut state = armed_state(WeaponKind::Sword);
        let pos = state.player.pos;
        // Ghost first in iteration order, boss second
        add_enemy(&mut state, EnemyKind::Ghost, pos);
        add_enemy(&mut state, EnemyKind::Boss, pos);

        let mut events = Vec::new();
        state.tick = CONTACT_DAMAGE_CADENCE;
        resolve_contact(&mut state, &mut events);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH - 5);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::PlayerHurt { damage: 5 }));
    }

    #[test]
    fn test_contact_damage_respects_cadence() {
        let mut state = armed_state(WeaponKind::Sword);
        let pos = state.player.pos;
        add_enemy(&mut state, EnemyKind::Boss, pos);
        let mut events = Vec::new();

        state.tick = CONTACT_DAMAGE_CADENCE + 1; // off-phase
        resolve_contact(&mut state, &mut events);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);

        state.tick = CONTACT_DAMAGE_CADENCE * 2; // on-phase
        resolve_contact(&mut state, &mut events);
        assert!(state.player.health < PLAYER_MAX_HEALTH);
        assert_eq!(events.len(), 1);
    }
}
