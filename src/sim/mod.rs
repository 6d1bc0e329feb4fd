//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod combat;
pub mod enemy;
pub mod player;
pub mod state;
pub mod tick;
pub mod waves;

pub use state::{
    Enemy, EnemyKind, Food, GameState, MoveDir, Particle, Pedestal, Player, Projectile,
    ProjectileKind, Upgrade, WavePhase, WeaponKind,
};
pub use tick::{GameEvent, TickInput, tick};
