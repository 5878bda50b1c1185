//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod particles;
pub mod registry;
pub mod state;
pub mod tick;

pub use clock::{FixedStep, SessionTimer};
pub use collision::{BounceResult, Rect, hits_paddle, paddle_bounce, reflect_walls};
pub use particles::{FIRE_COLORS, Particle, ParticleEngine, ParticleKind};
pub use registry::Registry;
pub use state::{Ball, Block, GameState, Mode, Outcome, Paddle};
pub use tick::{GameEvent, MenuAction, TickInput, tick};
