//! Game session state and core entity types
//!
//! One `GameState` owns everything a session mutates: the mode machine,
//! the entity registry, the particle engine, the session timer and the
//! seeded RNG. Constructed at new-game, discarded at process exit.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::SessionTimer;
use super::collision::Rect;
use super::particles::ParticleEngine;
use super::registry::Registry;
use crate::consts::*;
use crate::highscores::ScoreRecord;
use crate::tuning::Tuning;

/// Current game mode. Exactly one is active at a time; the legal
/// transitions live in `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Active gameplay - the only mode in which the simulation advances
    Playing,
    /// Frozen, menu overlay showing
    Paused,
    /// Credits overlay, reached from the pause menu
    Credits,
    /// Leaderboard overlay, reached from the pause menu
    HighScores,
    /// Collecting the winner's name; exits only on a non-empty confirm
    NameEntry,
    /// All balls lost; terminal until new-game
    GameOver,
    /// All blocks cleared; auto-advances to NameEntry on the next update
    Won,
}

/// How the current run ended, if it has.
///
/// Kept alongside `Mode` because after name confirmation the mode returns
/// to `Paused` while the Won banner persists and resume stays blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    Lost,
    Won,
}

/// A ball entity. Position is the top-left of a square bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BALL_SIZE, BALL_SIZE)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(BALL_SIZE / 2.0)
    }
}

/// A destructible block. `alive` is the slot flag: destruction marks it
/// dead mid-tick and the registry compacts the slot at tick end.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub id: u32,
    pub rect: Rect,
    /// Row color index for the render collaborator
    pub color: u8,
    pub alive: bool,
}

/// The player's paddle. One per session, repositioned, never destroyed.
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    /// Left edge, clamped to the playfield
    pub x: f32,
    /// Velocity this tick (-speed, 0, +speed); only imparts spin
    pub vel: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (PLAYFIELD_WIDTH - PADDLE_WIDTH) / 2.0,
            vel: 0.0,
        }
    }
}

impl Paddle {
    /// Recompute velocity from held input and move, clamped to the field
    pub fn apply_input(&mut self, left: bool, right: bool, speed: f32) {
        self.vel = 0.0;
        if left {
            self.x -= speed;
            self.vel = -speed;
        }
        if right {
            self.x += speed;
            self.vel = speed;
        }
        self.x = self.x.clamp(0.0, PLAYFIELD_WIDTH - PADDLE_WIDTH);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, PADDLE_Y, PADDLE_WIDTH, PADDLE_HEIGHT)
    }

    pub fn recenter(&mut self) {
        *self = Self::default();
    }
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG (bonus-ball rolls, particle jitter)
    pub rng: Pcg32,
    pub mode: Mode,
    pub outcome: Outcome,
    pub paddle: Paddle,
    /// Balls and blocks, behind the deferred-mutation registry
    pub entities: Registry,
    pub particles: ParticleEngine,
    /// Session stopwatch; frozen spans excluded
    pub timer: SessionTimer,
    /// Ticks since construction. Advances every update, frozen modes
    /// included - this is the stamp source for the timer.
    pub wall_ticks: u64,
    /// Completion time in whole seconds, frozen at the win instant
    pub final_time_secs: u64,
    /// Pending name-entry buffer
    pub name_buffer: String,
    /// Leaderboard rows cached on entering HighScores, for the renderer
    pub visible_scores: Vec<ScoreRecord>,
    pub tuning: Tuning,
}

impl GameState {
    /// Create a session with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: Mode::Playing,
            outcome: Outcome::InProgress,
            paddle: Paddle::default(),
            entities: Registry::new(),
            particles: ParticleEngine::new(),
            timer: SessionTimer::start(0),
            wall_ticks: 0,
            final_time_secs: 0,
            name_buffer: String::new(),
            visible_scores: Vec::new(),
            tuning,
        };
        state.reset();
        state
    }

    /// Full new-game reset: fresh block grid, single centered ball, paddle
    /// recentered, particles cleared, timer restarted, flags cleared.
    pub fn reset(&mut self) {
        let rows = self.tuning.block_rows;
        let cols = self.tuning.block_cols;
        self.entities.reset(rows, cols);
        self.entities.spawn_ball(
            Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0),
            Vec2::new(BALL_START_VEL.0, BALL_START_VEL.1),
        );
        self.paddle.recenter();
        self.particles.clear();
        self.timer = SessionTimer::start(self.wall_ticks);
        self.mode = Mode::Playing;
        self.outcome = Outcome::InProgress;
        self.final_time_secs = 0;
        self.name_buffer.clear();
    }

    /// Elapsed play time in whole seconds, as shown on the HUD
    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs(self.wall_ticks)
    }
}
