//! Session state: phase, net, score
//!
//! `GameState` is the root of one play session. It validates the tuning
//! once at construction and owns the net and the spawner; `tick` drives
//! the transitions.

use serde::{Deserialize, Serialize};

use super::collision::BoundingBox;
use super::spawner::Spawner;
use crate::tuning::{NetTuning, RulesTuning, Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Caught the target weight
    Win,
    /// Shocked by an eel, or too much weight escaped
    GameOver,
}

/// The player's net, steered horizontally along a fixed catch line
#[derive(Debug, Clone)]
pub struct Net {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    target_x: f32,
    min_x: f32,
    max_x: f32,
    smoothing: f32,
}

impl Net {
    /// New net centered between the playfield walls
    pub fn new(tuning: &NetTuning) -> Self {
        let x = (tuning.min_x + tuning.max_x - tuning.width) / 2.0;
        Self {
            x,
            y: tuning.y,
            width: tuning.width,
            height: tuning.height,
            target_x: x,
            min_x: tuning.min_x,
            max_x: tuning.max_x,
            smoothing: tuning.smoothing,
        }
    }

    /// Ask the net to move its left edge toward `x`, clamped to the walls
    pub fn steer_toward(&mut self, x: f32) {
        self.target_x = x.clamp(self.min_x, self.max_x - self.width);
    }

    /// One smoothing step toward the target, with a hard wall clamp
    ///
    /// Covers a fixed fraction of the remaining distance per call; `tick`
    /// calls this once per frame.
    pub fn update(&mut self) {
        self.x += (self.target_x - self.x) * self.smoothing;
        self.x = self.x.clamp(self.min_x, self.max_x - self.width);
    }

    /// Hitbox for catching: only the front opening of the net counts,
    /// not the trailing mesh
    pub fn catch_box(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height * 0.35)
    }

    /// Full frame for the render collaborator
    pub fn frame(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }

    /// Back to the centered starting position
    pub fn reset(&mut self) {
        self.x = (self.min_x + self.max_x - self.width) / 2.0;
        self.target_x = self.x;
    }
}

/// Read-only session summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub caught_weight: u32,
    pub missed_weight: u32,
    pub fish_caught: u32,
    pub koi_caught: u32,
    pub time_elapsed_secs: u32,
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Pounds landed so far; also fed to the spawner for difficulty
    pub caught_weight: u32,
    pub fish_caught: u32,
    pub koi_caught: u32,
    pub time_elapsed: f32,
    /// The game ended on eel contact rather than missed weight
    pub was_shocked: bool,
    pub net: Net,
    pub spawner: Spawner,
    pub rules: RulesTuning,
}

impl GameState {
    /// Validate the tuning and build a fresh session
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let net = Net::new(&tuning.net);
        let rules = tuning.rules.clone();
        Ok(Self {
            phase: GamePhase::Playing,
            caught_weight: 0,
            fish_caught: 0,
            koi_caught: 0,
            time_elapsed: 0.0,
            was_shocked: false,
            net,
            spawner: Spawner::new(tuning, seed),
            rules,
        })
    }

    /// Fresh session after a win or game over; the spawner replays its
    /// seed, the net re-centers, all score is dropped
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.caught_weight = 0;
        self.fish_caught = 0;
        self.koi_caught = 0;
        self.time_elapsed = 0.0;
        self.was_shocked = false;
        self.net.reset();
        self.spawner.reset();
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            caught_weight: self.caught_weight,
            missed_weight: self.spawner.missed_weight(),
            fish_caught: self.fish_caught,
            koi_caught: self.koi_caught,
            time_elapsed_secs: self.time_elapsed as u32,
        }
    }
}
