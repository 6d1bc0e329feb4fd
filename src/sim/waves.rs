//! Spawn and wave director
//!
//! Drives the run's state machine: weapon choice gates everything, ordinary
//! waves trickle-spawn weak enemies and food, bosses arrive on a time or kill
//! trigger, and clearing them advances the wave (or ends the run in victory
//! after the final wave).

use glam::Vec2;
use rand::Rng;

use super::enemy;
use super::player;
use super::state::{EnemyKind, Food, GameState, Upgrade, WavePhase};
use super::tick::GameEvent;
use crate::consts::*;

/// Boss count for a wave: one more every two waves, capped
pub fn boss_count(wave: u32) -> u32 {
    (1 + wave.saturating_sub(1) / 2).min(BOSS_CAP)
}

/// Trickle-spawn interval for a wave, shrinking with a floor
pub fn enemy_spawn_interval(wave: u32) -> u64 {
    ENEMY_SPAWN_INTERVAL
        .saturating_sub(ENEMY_SPAWN_INTERVAL_STEP * wave.saturating_sub(1) as u64)
        .max(ENEMY_SPAWN_INTERVAL_MIN)
}

/// Live-enemy cap for a wave (bosses not counted)
pub fn max_enemies(wave: u32) -> usize {
    MAX_ENEMIES_BASE + MAX_ENEMIES_PER_WAVE * wave.saturating_sub(1) as usize
}

/// Resolve pedestal and food contact.
///
/// Touching a pedestal locks the weapon, removes every pedestal, starts the
/// first wave's timer and ends the weapon-choice gate in the same tick.
pub fn resolve_pickups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    if state.phase == WavePhase::AwaitingWeaponChoice {
        let touched = state.pedestals.iter().find(|p| {
            let combined = p.radius + player_radius;
            player_pos.distance_squared(p.pos) < combined * combined
        });
        if let Some(pedestal) = touched {
            let weapon = pedestal.weapon;
            state.player.weapon = Some(weapon);
            state.pedestals.clear();
            state.phase = WavePhase::WaveActive;
            state.wave_start_tick = state.tick;
            state.last_enemy_spawn = state.tick;
            state.last_food_spawn = state.tick;
            state.show_message(format!("{} CHOSEN!", weapon.name().to_uppercase()), 90);
            log::info!("Weapon locked: {} - wave 1 begins", weapon.name());
            events.push(GameEvent::WeaponChosen(weapon));
        }
    }

    for food in &mut state.food {
        if food.consumed {
            continue;
        }
        let combined = food.radius + player_radius;
        if player_pos.distance_squared(food.pos) < combined * combined {
            food.consumed = true;
            player::heal(&mut state.player, food.heal);
        }
    }
}

/// Cadenced enemy and food spawning
pub fn trickle_spawn(state: &mut GameState) {
    let interval = enemy_spawn_interval(state.wave);
    if state.tick - state.last_enemy_spawn >= interval {
        state.last_enemy_spawn = state.tick;
        let live = state
            .enemies
            .iter()
            .filter(|e| !e.dead && e.kind != EnemyKind::Boss)
            .count();
        if live < max_enemies(state.wave) {
            let kind = if state.rng.random::<f32>() < 0.6 {
                EnemyKind::Ghost
            } else {
                EnemyKind::Skeleton
            };
            let pos = state.random_perimeter_point();
            let id = state.next_entity_id();
            let wave = state.wave;
            state.enemies.push(enemy::spawn(id, kind, pos, wave));
        }
    }

    if state.tick - state.last_food_spawn >= FOOD_SPAWN_INTERVAL {
        state.last_food_spawn = state.tick;
        let live = state.food.iter().filter(|f| !f.consumed).count();
        if live < MAX_FOOD {
            let pos = state.random_interior_point();
            state.food.push(Food {
                pos,
                radius: FOOD_RADIUS,
                heal: FOOD_HEAL,
                consumed: false,
            });
        }
    }
}

/// Start the boss encounter once the time or kill trigger fires
pub fn check_boss_trigger(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase != WavePhase::WaveActive {
        return;
    }
    let elapsed = state.tick - state.wave_start_tick;
    if elapsed >= BOSS_TIME_TRIGGER_TICKS || state.wave_kills >= BOSS_KILL_TRIGGER {
        spawn_bosses(state, events);
    }
}

/// Spawn this wave's bosses side by side near the top of the arena
fn spawn_bosses(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let count = boss_count(state.wave);
    let spacing = 80.0;
    let y = ARENA_MARGIN + 40.0;
    let center_x = ARENA_WIDTH / 2.0;

    for i in 0..count {
        let offset = (i as f32 - (count as f32 - 1.0) / 2.0) * spacing;
        let id = state.next_entity_id();
        let wave = state.wave;
        let mut boss = enemy::spawn(id, EnemyKind::Boss, Vec2::new(center_x + offset, y), wave);
        boss.pos = crate::clamp_to_playfield(boss.pos, boss.radius);
        state.enemies.push(boss);
    }

    state.bosses_remaining = count;
    state.phase = WavePhase::BossEncounter;
    if count == 1 {
        state.show_message(format!("WAVE {}: BOSS SPAWNED!", state.wave), 150);
    } else {
        state.show_message(format!("WAVE {}: {} BOSSES!", state.wave, count), 150);
    }
    log::info!("Wave {}: boss encounter with {} boss(es)", state.wave, count);
    events.push(GameEvent::BossEncounterStarted {
        wave: state.wave,
        bosses: count,
    });
}

/// Wave completion: bonus food, one random upgrade, next wave or victory.
///
/// Called by the combat resolver when the last boss of the wave dies.
pub fn complete_wave(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let cleared = state.wave;
    events.push(GameEvent::WaveCompleted { wave: cleared });

    // Bonus heal near arena center
    let jitter = Vec2::new(
        state.rng.random_range(-30.0..30.0),
        state.rng.random_range(-30.0..30.0),
    );
    let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
    state.food.push(Food {
        pos: crate::clamp_to_playfield(center + jitter, FOOD_RADIUS),
        radius: FOOD_RADIUS,
        heal: FOOD_HEAL,
        consumed: false,
    });

    // One random reward from the catalog
    let upgrade = Upgrade::ALL[state.rng.random_range(0..Upgrade::ALL.len())];
    player::apply_upgrade(&mut state.player, upgrade);
    events.push(GameEvent::UpgradeGranted(upgrade));

    state.wave = cleared + 1;
    state.wave_kills = 0;
    state.wave_start_tick = state.tick;

    if state.wave > FINAL_WAVE {
        state.phase = WavePhase::Victory;
        state.show_message("VICTORY!", 600);
        log::info!("Final wave {} cleared - victory", cleared);
        events.push(GameEvent::Victory);
    } else {
        state.phase = WavePhase::WaveActive;
        state.show_message(
            format!("WAVE {} COMPLETE! {}", cleared, upgrade.label()),
            150,
        );
        log::info!("Wave {} complete, upgrade {:?}", cleared, upgrade);
    }
}
