//! Fixed-step run controller
//!
//! One [`tick`] call advances the whole simulation by a single logical frame
//! in a fixed order, so a renderer reading the state afterwards never sees a
//! partially updated frame. Terminal states are sticky; only a restart
//! request replaces the run state, atomically, before the next tick.

use rand::Rng;

use super::combat;
use super::player;
use super::state::{EnemyKind, GameState, MoveDir, Upgrade, WavePhase, WeaponKind};
use super::waves;
use crate::highscores::RunRecord;
use crate::out_of_bounds;

/// Input intents for a single tick.
///
/// `primary` and `dodge` are pressed edges, not held state. Pause is a host
/// concern: a paused host simply stops calling [`tick`].
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// One of the eight movement directions, or none
    pub move_dir: Option<MoveDir>,
    /// Fire the equipped weapon's primary action
    pub primary: bool,
    /// Start a dodge roll
    pub dodge: bool,
    /// Replace the whole run with a fresh one
    pub restart: bool,
}

/// Frame events emitted for the host's feedback and persistence collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    WeaponChosen(WeaponKind),
    LevelUp { level: u32 },
    UpgradeGranted(Upgrade),
    BossEncounterStarted { wave: u32, bosses: u32 },
    WaveCompleted { wave: u32 },
    EnemyKilled { kind: EnemyKind, score: u64 },
    PlayerHurt { damage: i32 },
    /// Emitted exactly once, on the transition into game over. The persistence
    /// collaborator merges the record into its leaderboard.
    RunEnded { record: RunRecord },
    Victory,
}

/// Advance the game state by one fixed logical frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart {
        let seed = state.rng.random();
        *state = GameState::new(seed);
        log::info!("Run restarted with seed {seed}");
        return events;
    }

    // Sticky terminal states
    if matches!(state.phase, WavePhase::GameOver | WavePhase::Victory) {
        return events;
    }

    state.tick += 1;

    // Player motion and timers; combat inputs are gated until a weapon is chosen
    player::update(&mut state.player, input.move_dir);
    if !state.awaiting_weapon_choice() {
        if input.primary {
            let spawned = player::use_primary(&mut state.player);
            state.projectiles.extend(spawned);
        }
        if input.dodge {
            player::dodge(&mut state.player);
        }
    }
    state.message_ticks = state.message_ticks.saturating_sub(1);

    waves::resolve_pickups(state, &mut events);
    if state.awaiting_weapon_choice() {
        return events;
    }

    waves::trickle_spawn(state);

    let player_pos = state.player.pos;
    for i in 0..state.enemies.len() {
        super::enemy::steer(&mut state.enemies[i], player_pos, &mut state.rng);
    }
    combat::resolve_contact(state, &mut events);

    combat::resolve_melee(state, &mut events);
    combat::resolve_projectiles(state, &mut events);

    // After combat, so a kill that reaches the wave target starts the
    // encounter on this very tick. A wave completed just above cannot
    // re-trigger: complete_wave resets the kill counter and wave timer.
    waves::check_boss_trigger(state, &mut events);

    for p in &mut state.particles {
        p.pos += p.vel;
        p.life = p.life.saturating_sub(1);
    }

    // End-of-tick pruning
    state.enemies.retain(|e| !e.dead);
    state
        .projectiles
        .retain(|p| p.life > 0 && !out_of_bounds(p.pos));
    state.food.retain(|f| !f.consumed);
    state.particles.retain(|p| p.life > 0);

    // Terminal condition: recorded once, then every later tick is a no-op.
    // Clearing the final wave and dying on the same tick counts as a win.
    if state.player.health <= 0 && state.phase != WavePhase::Victory {
        state.phase = WavePhase::GameOver;
        state.show_message("GAME OVER", 600);
        let record = RunRecord {
            score: state.score,
            time_secs: state.elapsed_secs(),
            wave: state.wave,
            weapon: state
                .player
                .weapon
                .map(|w| w.name().to_string())
                .unwrap_or_else(|| "None".to_string()),
        };
        log::info!(
            "Run over: score {} wave {} after {}s",
            record.score,
            record.wave,
            record.time_secs
        );
        events.push(GameEvent::RunEnded { record });
    }

    events
}
