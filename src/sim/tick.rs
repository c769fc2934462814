//! Per-frame session driver
//!
//! `tick` advances one session by one frame: net steering, spawning,
//! collision outcomes and the win/lose transitions. All state changes are
//! synchronous inside the call, so the session is fully deterministic
//! under a fixed input sequence and seed. Callers cap `dt` (see
//! `consts::MAX_FRAME_DT`); the core honors whatever it is given.

use super::collision::overlaps;
use super::entity::Species;
use super::state::{GamePhase, GameState};
use crate::consts::GAME_WIDTH;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired left edge of the net in world units
    pub target_x: Option<f32>,
    /// Start a fresh session; only honored after a win or game over
    pub restart: bool,
    /// Attract mode: the autopilot steers the net and restarts by itself
    pub idle_mode: bool,
}

/// Advance the session by one frame
///
/// Precondition: `dt >= 0`; time is never re-derived internally.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::Playing => {
            state.time_elapsed += dt;

            if let Some(target) = input.target_x {
                state.net.steer_toward(target);
            }
            state.net.update();

            state.spawner.update(dt);

            let net_box = state.net.catch_box();

            // Fish in the net opening are landed
            let caught: Vec<(u32, Species, u32)> = state
                .spawner
                .fish()
                .iter()
                .filter(|fish| overlaps(net_box, fish.bounding_box()))
                .map(|fish| (fish.id, fish.kind, fish.weight))
                .collect();
            if !caught.is_empty() {
                for &(id, kind, weight) in &caught {
                    state.caught_weight += weight;
                    state.fish_caught += 1;
                    if kind == Species::GoldenKoi {
                        state.koi_caught += 1;
                    }
                    state.spawner.remove_fish(id);
                    log::debug!(
                        "caught a {} lb {:?} ({} lbs total)",
                        weight,
                        kind,
                        state.caught_weight
                    );
                }
                state.spawner.set_caught_weight(state.caught_weight);
            }

            // Eel contact is authoritative the moment it happens; any shock
            // animation is the renderer's business
            let shocked = state
                .spawner
                .eels()
                .iter()
                .any(|eel| overlaps(net_box, eel.bounding_box()));
            if shocked {
                state.was_shocked = true;
                state.phase = GamePhase::GameOver;
                log::info!(
                    "shocked after {:.1}s with {} lbs caught",
                    state.time_elapsed,
                    state.caught_weight
                );
            } else if state.caught_weight >= state.rules.win_weight {
                state.phase = GamePhase::Win;
                log::info!(
                    "win: {} lbs caught in {:.1}s",
                    state.caught_weight,
                    state.time_elapsed
                );
            } else if state.spawner.missed_weight() >= state.rules.max_missed_weight {
                state.phase = GamePhase::GameOver;
                log::info!(
                    "game over: {} lbs escaped after {:.1}s",
                    state.spawner.missed_weight(),
                    state.time_elapsed
                );
            }
        }

        GamePhase::Win | GamePhase::GameOver => {
            if input.restart {
                state.restart();
                log::info!("session restarted");
            }
        }
    }
}

/// Attract-mode steering: chase the most advanced catchable fish, keep
/// clear of eels hovering over the catch line, restart ended sessions
fn autopilot(state: &GameState, input: &mut TickInput) {
    if state.phase != GamePhase::Playing {
        input.restart = true;
        return;
    }

    let net = &state.net;
    // An eel this close to the catch line makes nearby lanes a trap
    let contested = |x: f32| {
        state
            .spawner
            .eels()
            .iter()
            .any(|eel| (eel.pos.y - net.y).abs() < 90.0 && (eel.pos.x - x).abs() < 70.0)
    };

    let quarry = state
        .spawner
        .fish()
        .iter()
        .filter(|fish| fish.path_t < 0.88 && !contested(fish.pos.x))
        .max_by(|a, b| {
            a.path_t
                .partial_cmp(&b.path_t)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(fish) = quarry {
        input.target_x = Some(fish.pos.x - net.width / 2.0);
    } else if let Some(eel) = state.spawner.eels().iter().min_by(|a, b| {
        (a.pos.y - net.y)
            .abs()
            .partial_cmp(&(b.pos.y - net.y).abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    }) {
        // Nothing safe to chase: wait on the far side of the river
        let refuge = if eel.pos.x > GAME_WIDTH / 2.0 {
            GAME_WIDTH * 0.2
        } else {
            GAME_WIDTH * 0.8
        };
        input.target_x = Some(refuge - net.width / 2.0);
    }
}
