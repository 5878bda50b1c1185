//! Comet Breaker - a breakout arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, particles, game state)
//! - `highscores`: Completion-time leaderboard and the score store
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input polling and window setup live outside this crate; they
//! consume read-only snapshots of the simulation once per frame and feed a
//! `TickInput` back in.

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::{ScoreRecord, ScoreStore};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (origin top-left, +y down)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Ball defaults - side length of the square bounding box
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_START_VEL: (f32, f32) = (4.0, -4.0);
    /// Bonus balls drop straight down from the destroyed block
    pub const BONUS_BALL_VEL: (f32, f32) = (0.0, 4.0);

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_Y: f32 = PLAYFIELD_HEIGHT - 40.0;
    /// Horizontal speed imparted by an edge hit (angle factor of ±1)
    pub const MAX_ANGLE_SPEED: f32 = 6.0;
    /// Paddle motion contribution to the bounce
    pub const SPIN_FACTOR: f32 = 0.3;
    /// Hard cap on post-bounce horizontal speed
    pub const MAX_HORIZONTAL_SPEED: f32 = 8.0;
    /// Floor on speed² − dx² so a bounce always keeps a vertical component
    pub const MIN_SPEED_SQ: f32 = 16.0;

    /// Block grid defaults
    pub const BLOCK_WIDTH: f32 = 75.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    pub const BLOCK_PADDING: f32 = 5.0;
    pub const BLOCK_TOP_OFFSET: f32 = 50.0;

    /// Name entry length cap
    pub const NAME_MAX_LEN: usize = 12;
}
