//! Neon River - a casual arcade river-fishing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (river path, entities, spawner, game state)
//! - `tuning`: Data-driven game balance
//! - `render`: Draw contract for an external renderer (this crate never draws)

pub mod render;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (world units match the original 480x640 canvas)
    pub const GAME_WIDTH: f32 = 480.0;
    pub const GAME_HEIGHT: f32 = 640.0;

    /// Fixed simulation timestep used by the demo driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Frame delta cap applied by callers before ticking, so a stalled
    /// frame can't teleport entities through the net
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Quadratic ease-in: slow near 0, accelerating toward 1
#[inline]
pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}
