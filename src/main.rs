//! Neon River headless demo
//!
//! Runs the simulation in attract mode for a few simulated minutes and
//! prints a JSON summary of the sessions played. Useful for smoke-testing
//! balance changes without a renderer:
//!
//! ```text
//! neon-river [SEED] [TUNING.json]
//! ```
//!
//! `TUNING.json` is a partial overlay over the built-in balance; anything
//! it does not mention keeps its default.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use neon_river::consts::SIM_DT;
use neon_river::Tuning;
use neon_river::sim::{GamePhase, GameState, TickInput, tick};

/// Simulated attract-mode play time
const DEMO_SECONDS: f32 = 180.0;

#[derive(Debug, Default, Serialize)]
struct DemoSummary {
    seed: u64,
    simulated_seconds: f32,
    sessions_finished: u32,
    wins: u32,
    losses: u32,
    shocks: u32,
    best_caught_lbs: u32,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed = match args.get(1) {
        Some(raw) => match raw.parse() {
            Ok(seed) => seed,
            Err(_) => {
                eprintln!("usage: neon-river [SEED] [TUNING.json]");
                std::process::exit(2);
            }
        },
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
    };

    let tuning = match args.get(2) {
        Some(path) => match load_tuning(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("failed to load tuning overlay {path}: {err}");
                std::process::exit(2);
            }
        },
        None => Tuning::default(),
    };

    let mut state = match GameState::new(tuning, seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("invalid tuning: {err}");
            std::process::exit(1);
        }
    };

    log::info!("neon river demo: seed {seed}, {DEMO_SECONDS}s of attract mode");

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut summary = DemoSummary {
        seed,
        ..Default::default()
    };
    let mut last_phase = state.phase;

    let ticks = (DEMO_SECONDS / SIM_DT) as u64;
    for _ in 0..ticks {
        tick(&mut state, &input, SIM_DT);

        if state.phase != last_phase {
            match state.phase {
                GamePhase::Win => {
                    summary.sessions_finished += 1;
                    summary.wins += 1;
                }
                GamePhase::GameOver => {
                    summary.sessions_finished += 1;
                    summary.losses += 1;
                    if state.was_shocked {
                        summary.shocks += 1;
                    }
                }
                GamePhase::Playing => {}
            }
            summary.best_caught_lbs = summary.best_caught_lbs.max(state.caught_weight);
            last_phase = state.phase;
        }
    }
    summary.best_caught_lbs = summary.best_caught_lbs.max(state.caught_weight);
    summary.simulated_seconds = ticks as f32 * SIM_DT;

    if let Ok(json) = serde_json::to_string_pretty(&summary) {
        println!("{json}");
    }
}

fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
