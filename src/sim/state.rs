//! Game state and core simulation types
//!
//! Entities are plain data records; their behavior lives in free functions in
//! the sibling modules (`player`, `enemy`, `combat`, `waves`). The run
//! controller ([`super::tick::tick`]) exclusively owns the entity collections.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Wave-progression state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavePhase {
    /// Run start: pedestals up, combat and spawning blocked until a weapon is chosen
    AwaitingWeaponChoice,
    /// Ordinary trickle spawning, no boss alive
    WaveActive,
    /// One or more bosses alive, wave advancement blocked
    BossEncounter,
    /// Terminal: player died
    GameOver,
    /// Terminal: final wave's bosses cleared
    Victory,
}

/// The player's locked-in weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponKind {
    Sword,
    Bow,
    Bomb,
}

impl WeaponKind {
    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Sword => "Sword",
            WeaponKind::Bow => "Bow",
            WeaponKind::Bomb => "Bomb",
        }
    }
}

/// Wave-clear reward catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upgrade {
    /// Permanent additive speed bonus
    Swiftness,
    /// One-shot max-health raise plus full heal
    Vitality,
    /// +1 melee level (damage and reach)
    MeleeMastery,
    /// +1 symmetric arrow pair
    SplitShot,
    /// +1 area level (damage and blast radius)
    GreaterBlast,
}

impl Upgrade {
    pub const ALL: [Upgrade; 5] = [
        Upgrade::Swiftness,
        Upgrade::Vitality,
        Upgrade::MeleeMastery,
        Upgrade::SplitShot,
        Upgrade::GreaterBlast,
    ];

    /// HUD message shown when the upgrade is granted
    pub fn label(&self) -> &'static str {
        match self {
            Upgrade::Swiftness => "SPEED BOOST!",
            Upgrade::Vitality => "VITALITY UP!",
            Upgrade::MeleeMastery => "SWORD UP!",
            Upgrade::SplitShot => "MULTI-ARROW!",
            Upgrade::GreaterBlast => "MEGA BOMB!",
        }
    }
}

/// One of the eight movement intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl MoveDir {
    /// Unit vector for the intent (+Y is down, matching screen space)
    pub fn as_vec(&self) -> Vec2 {
        use std::f32::consts::FRAC_1_SQRT_2 as D;
        match self {
            MoveDir::Up => Vec2::new(0.0, -1.0),
            MoveDir::Down => Vec2::new(0.0, 1.0),
            MoveDir::Left => Vec2::new(-1.0, 0.0),
            MoveDir::Right => Vec2::new(1.0, 0.0),
            MoveDir::UpLeft => Vec2::new(-D, -D),
            MoveDir::UpRight => Vec2::new(D, -D),
            MoveDir::DownLeft => Vec2::new(-D, D),
            MoveDir::DownRight => Vec2::new(D, D),
        }
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    pub base_speed: f32,
    /// Additive bonus from levels and the Swiftness upgrade
    pub speed_bonus: f32,
    /// Unit facing vector (follows the latest movement intent)
    pub facing: Vec2,
    /// Last nonzero movement direction; dodge and bomb throws use it
    pub last_move: Vec2,
    pub weapon: Option<WeaponKind>,
    pub melee_level: u32,
    /// Extra symmetric arrow pairs from SplitShot
    pub spread_pairs: u32,
    pub area_level: u32,
    pub melee_cooldown: u32,
    pub ranged_cooldown: u32,
    pub area_cooldown: u32,
    pub dodge_cooldown: u32,
    /// Remaining ticks of the open melee swing window
    pub swing_ticks: u32,
    /// Enemy ids already struck by the current swing
    pub swing_struck: Vec<u32>,
    pub dodge_ticks: u32,
    /// Damage is ignored while nonzero
    pub invuln_ticks: u32,
    /// Cosmetic damage-flash window, independent of invulnerability
    pub flash_ticks: u32,
    pub exp: u32,
    pub level: u32,
    pub exp_to_next: u32,
    pub kills: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            base_speed: PLAYER_BASE_SPEED,
            speed_bonus: 0.0,
            facing: Vec2::new(0.0, 1.0),
            last_move: Vec2::new(0.0, 1.0),
            weapon: None,
            melee_level: 0,
            spread_pairs: 0,
            area_level: 0,
            melee_cooldown: 0,
            ranged_cooldown: 0,
            area_cooldown: 0,
            dodge_cooldown: 0,
            swing_ticks: 0,
            swing_struck: Vec::new(),
            dodge_ticks: 0,
            invuln_ticks: 0,
            flash_ticks: 0,
            exp: 0,
            level: 1,
            exp_to_next: EXP_BASE_THRESHOLD,
            kills: 0,
        }
    }

    pub fn is_dodging(&self) -> bool {
        self.dodge_ticks > 0
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    /// Weak, fast, chases the player directly
    Skeleton,
    /// Weak, slow, drifts erratically
    Ghost,
    /// Heavy; blocks wave advancement while alive
    Boss,
}

/// An enemy entity
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hp: i32,
    /// Spawn-time hp, kept for boss health-bar fraction reporting
    pub max_hp: i32,
    pub contact_damage: i32,
    pub exp_reward: u32,
    pub score_reward: u64,
    /// Cosmetic hit-flash window
    pub flash_ticks: u32,
    /// Set on the hp <= 0 transition; dead enemies are skipped everywhere and pruned at end of tick
    pub dead: bool,
    /// Ghost wander state
    pub wander_dir: Vec2,
    pub wander_ticks: u32,
}

impl Enemy {
    /// Remaining health fraction for the renderer's boss bar
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            0.0
        } else {
            (self.hp.max(0) as f32) / (self.max_hp as f32)
        }
    }
}

/// Projectile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Damages the first enemy hit, then is expended
    Arrow,
    /// Flies until its fuse runs out, then detonates against everything in the blast
    Bomb,
}

/// A projectile entity
#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks; zero means expended/detonated
    pub life: u32,
    pub damage: i32,
    pub radius: f32,
    /// Explosion radius (bombs only)
    pub blast: f32,
}

/// A weapon-choice pedestal; present only before a weapon is locked in
#[derive(Debug, Clone)]
pub struct Pedestal {
    pub weapon: WeaponKind,
    pub pos: Vec2,
    pub radius: f32,
}

/// A healing pickup
#[derive(Debug, Clone)]
pub struct Food {
    pub pos: Vec2,
    pub radius: f32,
    pub heal: i32,
    pub consumed: bool,
}

/// A purely cosmetic particle; excluded from gameplay collision
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
    /// Palette index for the renderer
    pub color: u32,
}

/// Complete run state, owned by the run controller for the lifetime of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub tick: u64,
    /// Current wave number (1-based)
    pub wave: u32,
    /// Kills since the current wave started
    pub wave_kills: u32,
    /// Tick at which the current wave's timer started
    pub wave_start_tick: u64,
    pub bosses_remaining: u32,
    pub score: u64,
    pub phase: WavePhase,
    /// HUD message plus remaining display ticks
    pub message: String,
    pub message_ticks: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub pedestals: Vec<Pedestal>,
    pub food: Vec<Food>,
    pub particles: Vec<Particle>,
    pub(crate) last_enemy_spawn: u64,
    pub(crate) last_food_spawn: u64,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run: pedestals up, a few food pickups scattered, wave 1 pending
    pub fn new(seed: u64) -> Self {
        let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tick: 0,
            wave: 1,
            wave_kills: 0,
            wave_start_tick: 0,
            bosses_remaining: 0,
            score: 0,
            phase: WavePhase::AwaitingWeaponChoice,
            message: "CHOOSE YOUR WEAPON!".to_string(),
            message_ticks: 180,
            player: Player::new(center),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pedestals: vec![
                Pedestal {
                    weapon: WeaponKind::Sword,
                    pos: center + Vec2::new(-60.0, 0.0),
                    radius: PEDESTAL_RADIUS,
                },
                Pedestal {
                    weapon: WeaponKind::Bow,
                    pos: center + Vec2::new(60.0, 0.0),
                    radius: PEDESTAL_RADIUS,
                },
                Pedestal {
                    weapon: WeaponKind::Bomb,
                    pos: center + Vec2::new(0.0, 60.0),
                    radius: PEDESTAL_RADIUS,
                },
            ],
            food: Vec::new(),
            particles: Vec::new(),
            last_enemy_spawn: 0,
            last_food_spawn: 0,
            next_id: 1,
        };

        for _ in 0..INITIAL_FOOD {
            let pos = state.random_interior_point();
            state.food.push(Food {
                pos,
                radius: FOOD_RADIUS,
                heal: FOOD_HEAL,
                consumed: false,
            });
        }

        state
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn game_over(&self) -> bool {
        self.phase == WavePhase::GameOver
    }

    pub fn won(&self) -> bool {
        self.phase == WavePhase::Victory
    }

    pub fn awaiting_weapon_choice(&self) -> bool {
        self.phase == WavePhase::AwaitingWeaponChoice
    }

    /// Elapsed run time in whole seconds
    pub fn elapsed_secs(&self) -> u64 {
        self.tick / TICK_RATE
    }

    /// Show a HUD message for `ticks`
    pub fn show_message(&mut self, text: impl Into<String>, ticks: u32) {
        self.message = text.into();
        self.message_ticks = ticks;
    }

    /// Random point inside the playfield, away from the edge
    pub(crate) fn random_interior_point(&mut self) -> Vec2 {
        let x = self
            .rng
            .random_range(ARENA_MARGIN + 20.0..ARENA_WIDTH - ARENA_MARGIN - 20.0);
        let y = self
            .rng
            .random_range(ARENA_MARGIN + 20.0..ARENA_HEIGHT - ARENA_MARGIN - 20.0);
        Vec2::new(x, y)
    }

    /// Random point on the playfield perimeter (enemy entry point)
    pub(crate) fn random_perimeter_point(&mut self) -> Vec2 {
        let side = self.rng.random_range(0..4u32);
        match side {
            0 => Vec2::new(
                self.rng.random_range(ARENA_MARGIN..ARENA_WIDTH - ARENA_MARGIN),
                ARENA_MARGIN,
            ),
            1 => Vec2::new(
                self.rng.random_range(ARENA_MARGIN..ARENA_WIDTH - ARENA_MARGIN),
                ARENA_HEIGHT - ARENA_MARGIN,
            ),
            2 => Vec2::new(
                ARENA_MARGIN,
                self.rng.random_range(ARENA_MARGIN..ARENA_HEIGHT - ARENA_MARGIN),
            ),
            _ => Vec2::new(
                ARENA_WIDTH - ARENA_MARGIN,
                self.rng.random_range(ARENA_MARGIN..ARENA_HEIGHT - ARENA_MARGIN),
            ),
        }
    }

    /// Cosmetic burst of particles, capped at [`MAX_PARTICLES`]
    pub(crate) fn spawn_burst(&mut self, pos: Vec2, color: u32, count: usize) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                return;
            }
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed: f32 = self.rng.random_range(0.5..2.5);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: self.rng.random_range(20..40),
                color,
            });
        }
    }
}
