//! Fixed timestep simulation tick
//!
//! Advances the session one 60 Hz step. Within a tick the order is fixed:
//! paddle input, every ball stepped against the stable block set (events
//! emitted as they happen), deferred entity mutation, particle aging and
//! pruning, then win/loss evaluation. The render collaborator reads the
//! resulting state after the tick returns.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::state::{GameState, Mode, Outcome};
use crate::consts::*;
use crate::highscores::{MAX_HIGH_SCORES, ScoreRecord, ScoreStore, unix_now};

/// Menu actions produced by the external pointer/button layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewGame,
    ShowHighScores,
    ShowCredits,
    Back,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left key held
    pub left: bool,
    /// Right key held
    pub right: bool,
    /// One-shot pause toggle
    pub pause: bool,
    /// One-shot menu action
    pub menu: Option<MenuAction>,
    /// Printable character typed this frame (name entry only)
    pub text: Option<char>,
    pub backspace: bool,
    pub confirm: bool,
    /// Demo mode: the paddle tracks the lowest ball
    pub autopilot: bool,
}

/// Events produced by the physics pass and consumed within the same tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A ball hit a live block; carries the block's center for the
    /// explosion burst and the bonus-ball roll
    BlockDestroyed { id: u32, center: Vec2 },
    /// A ball exited the bottom edge
    BallLost { id: u32 },
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, store: &mut dyn ScoreStore) {
    state.wall_ticks += 1;
    let now = state.wall_ticks;

    match state.mode {
        Mode::Won => {
            // The win banner is visible for exactly one transition tick,
            // then the name prompt takes over
            state.name_buffer.clear();
            state.mode = Mode::NameEntry;
            return;
        }
        Mode::NameEntry => {
            name_entry(state, input, store);
            return;
        }
        Mode::Credits | Mode::HighScores => {
            match input.menu {
                Some(MenuAction::Back) => state.mode = Mode::Paused,
                Some(MenuAction::NewGame) => {
                    log::info!("new game (seed {})", state.seed);
                    state.reset();
                }
                _ => {}
            }
            return;
        }
        Mode::Paused | Mode::GameOver => {
            menu(state, input, store, now);
            return;
        }
        Mode::Playing => {}
    }

    if input.pause {
        state.timer.freeze(now);
        state.mode = Mode::Paused;
        log::debug!("paused at {}s", state.elapsed_secs());
        return;
    }

    // Paddle input; the autopilot derives held keys from the lowest ball
    let (mut left, mut right) = (input.left, input.right);
    if input.autopilot {
        if let Some(target_x) = autopilot_target(state) {
            let paddle_center = state.paddle.x + PADDLE_WIDTH / 2.0;
            left = target_x < paddle_center - 4.0;
            right = target_x > paddle_center + 4.0;
        }
    }
    let paddle_speed = state.tuning.paddle_speed;
    state.paddle.apply_input(left, right, paddle_speed);

    // Physics pass: every ball against walls, paddle, then the block set.
    // Destroyed blocks go dead in place so later balls this tick see the
    // removal without the scan order shifting under them.
    let mut events: Vec<GameEvent> = Vec::new();
    let paddle_x = state.paddle.x;
    let paddle_vel = state.paddle.vel;
    {
        let balls = &mut state.entities.balls;
        let blocks = &mut state.entities.blocks;

        for ball in balls.iter_mut() {
            ball.pos += ball.vel;

            // Comet trail behind the ball
            state
                .particles
                .spawn_trail(&mut state.rng, ball.center(), ball.vel);

            ball.vel = collision::reflect_walls(ball.pos, ball.vel, BALL_SIZE);

            // Paddle before blocks: the bounce flips dy and snaps y, which
            // changes what the block scan below can hit
            if collision::hits_paddle(ball.pos, BALL_SIZE, paddle_x) {
                let bounce =
                    collision::paddle_bounce(ball.pos, ball.vel, BALL_SIZE, paddle_x, paddle_vel);
                ball.vel = bounce.vel;
                ball.pos.y = bounce.snap_y;
            }

            // First live block hit wins; at most one block per ball per tick
            let bounds = ball.bounds();
            for block in blocks.iter_mut() {
                if !block.alive {
                    continue;
                }
                if bounds.overlaps(&block.rect) {
                    block.alive = false;
                    events.push(GameEvent::BlockDestroyed {
                        id: block.id,
                        center: block.rect.center(),
                    });
                    ball.vel.y = -ball.vel.y;
                    break;
                }
            }

            // Bottom edge: queue the loss; the ball is removed, never
            // recentered - a new game is the only way to get it back
            if ball.pos.y > PLAYFIELD_HEIGHT {
                events.push(GameEvent::BallLost { id: ball.id });
            }
        }
    }

    // Apply events: explosion bursts, bonus-ball rolls, queued removals
    let bonus_chance = state.tuning.bonus_ball_chance.max(1);
    for event in &events {
        match *event {
            GameEvent::BlockDestroyed { id, center } => {
                log::debug!("block {id} destroyed");
                state.particles.spawn_explosion(&mut state.rng, center);
                if state.rng.random_range(0..bonus_chance) == 0 {
                    log::debug!("bonus ball at ({:.0}, {:.0})", center.x, center.y);
                    state.entities.queue_bonus_ball(center);
                }
            }
            GameEvent::BallLost { id } => {
                log::debug!("ball {id} lost");
                state.entities.queue_ball_loss(id);
            }
        }
    }
    state.entities.end_tick();

    // Age and prune both particle populations before win/loss
    state.particles.update();

    // Loss wins the same-tick race: clearing the field needs a surviving
    // ball, so a ball that kills the last block and then drains does not
    // count as a win
    if state.entities.ball_count() == 0 {
        state.outcome = Outcome::Lost;
        state.mode = Mode::GameOver;
        state.timer.freeze(now);
        log::info!("game over after {}s", state.elapsed_secs());
    } else if state.entities.live_block_count() == 0 {
        state.outcome = Outcome::Won;
        state.mode = Mode::Won;
        state.timer.freeze(now);
        state.final_time_secs = state.timer.elapsed_secs(now);
        log::info!("field cleared in {}s", state.final_time_secs);
    }
}

/// Pause-family menu handling (Paused and GameOver share the overlay)
fn menu(state: &mut GameState, input: &TickInput, store: &mut dyn ScoreStore, now: u64) {
    match input.menu {
        Some(MenuAction::NewGame) => {
            log::info!("new game (seed {})", state.seed);
            state.reset();
            return;
        }
        // Credits and the leaderboard open from the pause menu only;
        // the game-over screen offers just a new game
        Some(MenuAction::ShowHighScores) if state.mode == Mode::Paused => {
            state.visible_scores = store.load_top(MAX_HIGH_SCORES);
            state.mode = Mode::HighScores;
            return;
        }
        Some(MenuAction::ShowCredits) if state.mode == Mode::Paused => {
            state.mode = Mode::Credits;
            return;
        }
        _ => {}
    }

    // Resume only applies to a run still in progress; a finished run
    // stays frozen until an explicit new game
    if input.pause && state.mode == Mode::Paused && state.outcome == Outcome::InProgress {
        state.timer.resume(now);
        state.mode = Mode::Playing;
        log::debug!("resumed at {}s", state.elapsed_secs());
    }
}

/// Name entry: alphanumerics and space, capped length, non-empty confirm
fn name_entry(state: &mut GameState, input: &TickInput, store: &mut dyn ScoreStore) {
    if let Some(ch) = input.text {
        if (ch.is_ascii_alphanumeric() || ch == ' ') && state.name_buffer.len() < NAME_MAX_LEN {
            state.name_buffer.push(ch);
        }
    }
    if input.backspace {
        state.name_buffer.pop();
    }
    if input.confirm && !state.name_buffer.is_empty() {
        let record = ScoreRecord {
            name: state.name_buffer.clone(),
            time_seconds: state.final_time_secs,
            date: unix_now(),
        };
        log::info!("saving score: {} in {}s", record.name, record.time_seconds);
        store.save(record);
        state.name_buffer.clear();
        // Back to the pause menu; the Won outcome keeps the banner up and
        // resume blocked
        state.mode = Mode::Paused;
    }
}

/// Horizontal position the autopilot should move under: the lowest ball
fn autopilot_target(state: &GameState) -> Option<f32> {
    state
        .entities
        .balls
        .iter()
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|b| b.center().x)
}
