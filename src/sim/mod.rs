//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Frame-driven only: state changes happen inside `update`/`tick` calls
//! - Seeded RNG only, owned by the spawner
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod river;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{BoundingBox, overlaps};
pub use entity::{Species, Swimmer};
pub use river::RiverPath;
pub use spawner::Spawner;
pub use state::{GamePhase, GameState, Net, SessionStats};
pub use tick::{TickInput, tick};
