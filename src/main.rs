//! Comet Breaker entry point
//!
//! Headless demo harness: runs one session at a fixed 60 Hz with the
//! autopilot steering the paddle, logging milestones until the run ends.
//! Rendering and input collaborators plug in at the same seams this loop
//! uses: fill a `TickInput` per frame, call `tick`, read the state back.

use std::time::{Duration, Instant};

use comet_breaker::highscores::{JsonFileStore, format_clock, unix_now};
use comet_breaker::sim::{FixedStep, GameState, Mode, Outcome, TickInput, tick};
use comet_breaker::tuning::Tuning;

/// Name the autopilot signs the leaderboard with
const DEMO_NAME: &[u8] = b"DEMO";

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(unix_now);
    log::info!("starting demo session (seed {seed})");

    let tuning = Tuning::load("tuning.json");
    let mut store = JsonFileStore::new("highscores.json");
    let mut state = GameState::with_tuning(seed, tuning);
    let mut clock = FixedStep::new();
    let mut input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut last_frame = Instant::now();
    let mut last_report = 0u64;

    loop {
        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f32();
        last_frame = now;

        for _ in 0..clock.advance(dt) {
            // The harness stands in for the name-entry collaborator
            if state.mode == Mode::NameEntry {
                if state.name_buffer.len() < DEMO_NAME.len() {
                    input.text = Some(DEMO_NAME[state.name_buffer.len()] as char);
                } else {
                    input.confirm = true;
                }
            }

            tick(&mut state, &input, &mut store);

            // Clear one-shot inputs after processing
            input.pause = false;
            input.menu = None;
            input.text = None;
            input.backspace = false;
            input.confirm = false;
        }

        // Once-a-second status line while playing
        let secs = state.elapsed_secs();
        if state.mode == Mode::Playing && secs != last_report {
            last_report = secs;
            log::info!(
                "t={} balls={} blocks={} particles={}",
                format_clock(secs),
                state.entities.ball_count(),
                state.entities.live_block_count(),
                state.particles.total()
            );
        }

        match (state.mode, state.outcome) {
            (Mode::GameOver, _) => {
                log::info!("demo run lost after {}", format_clock(secs));
                break;
            }
            // NameEntry has confirmed and dropped back to the pause menu
            (Mode::Paused, Outcome::Won) => {
                log::info!(
                    "demo run won in {} - score saved",
                    format_clock(state.final_time_secs)
                );
                break;
            }
            _ => {}
        }

        std::thread::sleep(Duration::from_millis(2));
    }
}
