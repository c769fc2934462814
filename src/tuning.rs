//! Data-driven game balance
//!
//! Every gameplay constant lives here: river geometry, per-species motion,
//! spawn pacing, difficulty tiers, net and win/lose rules. A session
//! validates its `Tuning` once at startup and treats it as immutable
//! afterwards. Partial JSON overlays deserialize over the defaults, so a
//! balance file only needs to mention what it changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::sim::entity::Species;

/// Fatal configuration problems, checked once at session startup
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("spawn kind weights sum to {sum}, expected 1.0")]
    WeightSum { sum: f64 },
    #[error("spawn kind weights must be non-negative")]
    NegativeWeight,
    #[error("difficulty tier {index} breaks ascending weight-threshold order")]
    UnsortedTiers { index: usize },
    #[error("spawn intervals must satisfy 0 < floor <= initial (got floor {floor}, initial {initial})")]
    InvalidInterval { floor: f32, initial: f32 },
    #[error("spawn interval decay must be in (0, 1], got {decay}")]
    InvalidDecay { decay: f32 },
    #[error("river width must not shrink downstream (start {start}, end {end})")]
    ShrinkingRiver { start: f32, end: f32 },
    #[error("wave size range {min}..={max} is empty or zero")]
    EmptyWaveRange { min: u32, max: u32 },
    #[error("initial wave size must be at least 1")]
    ZeroInitialWave,
    #[error("{kind:?} drift band is inverted (min {min}, max {max})")]
    InvertedDriftBand { kind: Species, min: f32, max: f32 },
    #[error("difficulty tier {index} multipliers must be positive (speed {speed}, spawn rate {rate})")]
    InvalidTierMultiplier { index: usize, speed: f32, rate: f32 },
}

/// River path geometry: a cubic Bezier from the source to the catch zone
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverTuning {
    /// Path source (t = 0)
    pub start: Vec2,
    /// First control handle
    pub handle1: Vec2,
    /// Second control handle
    pub handle2: Vec2,
    /// Catch-zone end of the path (t = 1)
    pub end: Vec2,
    /// Lane width at the source
    pub width_start: f32,
    /// Lane width at the catch zone
    pub width_end: f32,
    /// Off-screen holding point entities drift in from for t < 0
    pub pre_spawn: Vec2,
}

impl Default for RiverTuning {
    fn default() -> Self {
        Self {
            start: Vec2::new(GAME_WIDTH * 0.5, GAME_HEIGHT * 0.25),
            handle1: Vec2::new(GAME_WIDTH * 0.58, GAME_HEIGHT * 0.35),
            handle2: Vec2::new(GAME_WIDTH * 0.42, GAME_HEIGHT * 0.65),
            end: Vec2::new(GAME_WIDTH * 0.5, GAME_HEIGHT * 1.05),
            width_start: 35.0,
            width_end: 200.0,
            pre_spawn: Vec2::new(GAME_WIDTH * 0.56, GAME_HEIGHT * 0.18),
        }
    }
}

/// Spawn pacing, kind selection weights and eel fairness
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Seconds between spawns at the start of a session
    pub initial_interval: f32,
    /// Floor the interval decays toward
    pub min_interval: f32,
    /// Multiplicative decay applied to the interval after each spawn
    pub interval_decay: f32,
    /// Path progress entities spawn at (slightly negative = upstream queue)
    pub spawn_t: f32,
    /// World-space despawn line (safety fallback below the catch zone)
    pub despawn_y: f32,

    // === Kind selection (must sum to 1) ===
    pub bluegill_weight: f64,
    pub golden_koi_weight: f64,
    pub electric_eel_weight: f64,

    // === Eel fairness ===
    /// Minimum seconds between eel spawns
    pub eel_gap: f32,
    /// Extra eel probability once the player is doing well
    pub eel_boost: f64,
    /// Caught weight (lbs) at which the boost kicks in
    pub eel_boost_threshold: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            initial_interval: 2.0,
            min_interval: 0.5,
            interval_decay: 0.98,
            spawn_t: 0.0,
            despawn_y: GAME_HEIGHT + 40.0,

            bluegill_weight: 0.7,
            golden_koi_weight: 0.2,
            electric_eel_weight: 0.1,

            eel_gap: 4.0,
            eel_boost: 0.05,
            eel_boost_threshold: 100,
        }
    }
}

/// Wave sweep shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Lanes sweep across [-band, +band] (fraction of lane width)
    pub lane_band: f32,
    /// Hard clamp on an entity's drifting lateral offset
    pub lateral_limit: f32,
    /// Wave size is redrawn uniformly from min..=max at each reversal
    pub size_min: u32,
    pub size_max: u32,
    /// Size of the very first wave
    pub initial_size: u32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            lane_band: 0.35,
            lateral_limit: 0.4,
            size_min: 3,
            size_max: 5,
            initial_size: 4,
        }
    }
}

/// Per-species motion and body constants
///
/// One record per species drives the shared swimmer update: fish have zero
/// slither amplitude, the eel has zero wobble, so no per-kind code paths.
/// Overlays replace a species record wholesale; there is no meaningful
/// cross-species partial default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesTuning {
    /// Path progress per second
    pub speed: f32,
    /// Per-instance drift speed is drawn uniformly from this band
    pub drift_min: f32,
    pub drift_max: f32,
    /// Wobble phase advance (rad/s) and amplitude (fraction of lane width)
    pub wobble_rate: f32,
    pub wobble_amp: f32,
    /// Slither amplitude (fraction of lane width) and cycles over the path
    pub slither_amp: f32,
    pub slither_freq: f32,
    /// Sprite base size in world units, before perspective scaling
    pub sprite_size: Vec2,
    /// Base render scale at the perspective reference point
    pub base_scale: f32,
    /// Pounds scored when caught (or lost when missed); 0 for the eel
    pub weight: u32,
}

impl Species {
    /// Built-in balance for each species
    pub fn default_tuning(self) -> SpeciesTuning {
        match self {
            Species::Bluegill => SpeciesTuning {
                speed: 0.12,
                drift_min: 0.12,
                drift_max: 0.20,
                wobble_rate: 2.0,
                wobble_amp: 0.03,
                slither_amp: 0.0,
                slither_freq: 0.0,
                sprite_size: Vec2::new(16.0, 12.0),
                base_scale: 2.0,
                weight: 1,
            },
            Species::GoldenKoi => SpeciesTuning {
                speed: 0.20,
                drift_min: 0.18,
                drift_max: 0.28,
                wobble_rate: 2.5,
                wobble_amp: 0.025,
                slither_amp: 0.0,
                slither_freq: 0.0,
                sprite_size: Vec2::new(18.0, 14.0),
                base_scale: 2.0,
                weight: 5,
            },
            Species::ElectricEel => SpeciesTuning {
                speed: 0.08,
                drift_min: 0.10,
                drift_max: 0.16,
                wobble_rate: 0.0,
                wobble_amp: 0.0,
                slither_amp: 0.3,
                slither_freq: 3.0,
                sprite_size: Vec2::new(24.0, 8.0),
                base_scale: 2.0,
                weight: 0,
            },
        }
    }
}

/// One difficulty step, active once the player has caught enough weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    /// Cumulative caught weight (lbs) that activates this tier
    pub weight_threshold: u32,
    /// Entity speed multiplier, baked in at spawn time
    pub speed_mult: f32,
    /// Divides the effective spawn interval
    pub spawn_rate_mult: f32,
}

impl DifficultyTier {
    /// Baseline below the first configured threshold
    pub const BASE: DifficultyTier = DifficultyTier {
        weight_threshold: 0,
        speed_mult: 1.0,
        spawn_rate_mult: 1.0,
    };
}

/// Player net geometry and steering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetTuning {
    pub width: f32,
    pub height: f32,
    /// Vertical position of the catch line (net top edge)
    pub y: f32,
    /// Playfield walls the net's left edge is clamped between
    pub min_x: f32,
    pub max_x: f32,
    /// Fraction of the remaining distance to the target covered per tick
    pub smoothing: f32,
}

impl Default for NetTuning {
    fn default() -> Self {
        Self {
            width: 48.0,
            height: 32.0,
            y: GAME_HEIGHT - 100.0,
            min_x: 40.0,
            max_x: GAME_WIDTH - 40.0,
            smoothing: 0.25,
        }
    }
}

/// Session win/lose thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesTuning {
    /// Caught weight (lbs) needed to win
    pub win_weight: u32,
    /// Missed weight (lbs) that ends the session
    pub max_missed_weight: u32,
}

impl Default for RulesTuning {
    fn default() -> Self {
        Self {
            win_weight: 200,
            max_missed_weight: 20,
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub river: RiverTuning,
    pub spawn: SpawnTuning,
    pub waves: WaveTuning,
    pub bluegill: SpeciesTuning,
    pub golden_koi: SpeciesTuning,
    pub electric_eel: SpeciesTuning,
    /// Ascending by weight threshold; empty table means flat difficulty
    pub difficulty: Vec<DifficultyTier>,
    pub net: NetTuning,
    pub rules: RulesTuning,
}

impl Tuning {
    /// Balance record for one species
    pub fn species(&self, kind: Species) -> &SpeciesTuning {
        match kind {
            Species::Bluegill => &self.bluegill,
            Species::GoldenKoi => &self.golden_koi,
            Species::ElectricEel => &self.electric_eel,
        }
    }

    /// Highest tier whose threshold the caught weight has reached
    pub fn active_tier(&self, caught_weight: u32) -> DifficultyTier {
        self.difficulty
            .iter()
            .rev()
            .find(|tier| tier.weight_threshold <= caught_weight)
            .copied()
            .unwrap_or(DifficultyTier::BASE)
    }

    /// Validate once at startup; the simulation never re-checks
    pub fn validate(&self) -> Result<(), TuningError> {
        let s = &self.spawn;
        if s.bluegill_weight < 0.0 || s.golden_koi_weight < 0.0 || s.electric_eel_weight < 0.0 {
            return Err(TuningError::NegativeWeight);
        }
        let sum = s.bluegill_weight + s.golden_koi_weight + s.electric_eel_weight;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(TuningError::WeightSum { sum });
        }
        if !(s.min_interval > 0.0 && s.min_interval <= s.initial_interval) {
            return Err(TuningError::InvalidInterval {
                floor: s.min_interval,
                initial: s.initial_interval,
            });
        }
        if !(s.interval_decay > 0.0 && s.interval_decay <= 1.0) {
            return Err(TuningError::InvalidDecay {
                decay: s.interval_decay,
            });
        }
        if self.river.width_end < self.river.width_start {
            return Err(TuningError::ShrinkingRiver {
                start: self.river.width_start,
                end: self.river.width_end,
            });
        }
        let w = &self.waves;
        if w.size_min == 0 || w.size_max < w.size_min {
            return Err(TuningError::EmptyWaveRange {
                min: w.size_min,
                max: w.size_max,
            });
        }
        if w.initial_size == 0 {
            return Err(TuningError::ZeroInitialWave);
        }
        for kind in [Species::Bluegill, Species::GoldenKoi, Species::ElectricEel] {
            let band = self.species(kind);
            if !(band.drift_min <= band.drift_max) {
                return Err(TuningError::InvertedDriftBand {
                    kind,
                    min: band.drift_min,
                    max: band.drift_max,
                });
            }
        }
        for (index, tier) in self.difficulty.iter().enumerate() {
            if !(tier.speed_mult > 0.0 && tier.spawn_rate_mult > 0.0) {
                return Err(TuningError::InvalidTierMultiplier {
                    index,
                    speed: tier.speed_mult,
                    rate: tier.spawn_rate_mult,
                });
            }
        }
        for (index, pair) in self.difficulty.windows(2).enumerate() {
            if pair[1].weight_threshold <= pair[0].weight_threshold {
                return Err(TuningError::UnsortedTiers { index: index + 1 });
            }
        }
        Ok(())
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            river: RiverTuning::default(),
            spawn: SpawnTuning::default(),
            waves: WaveTuning::default(),
            bluegill: Species::Bluegill.default_tuning(),
            golden_koi: Species::GoldenKoi.default_tuning(),
            electric_eel: Species::ElectricEel.default_tuning(),
            difficulty: default_tiers(),
            net: NetTuning::default(),
            rules: RulesTuning::default(),
        }
    }
}

fn default_tiers() -> Vec<DifficultyTier> {
    vec![
        DifficultyTier {
            weight_threshold: 50,
            speed_mult: 1.15,
            spawn_rate_mult: 1.2,
        },
        DifficultyTier {
            weight_threshold: 100,
            speed_mult: 1.3,
            spawn_rate_mult: 1.4,
        },
        DifficultyTier {
            weight_threshold: 150,
            speed_mult: 1.45,
            spawn_rate_mult: 1.6,
        },
    ]
}
