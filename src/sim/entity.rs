//! Fish and eel entities
//!
//! A single `Swimmer` struct covers every species; per-species behavior
//! comes entirely from its `SpeciesTuning` record. Fish have zero slither
//! amplitude and the eel zero wobble, so one update algorithm serves all
//! three kinds without branching.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::BoundingBox;
use super::river::RiverPath;
use crate::tuning::SpeciesTuning;

/// Entity species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Bluegill,
    GoldenKoi,
    ElectricEel,
}

impl Species {
    /// Lethal on contact instead of catchable
    pub fn is_hazard(&self) -> bool {
        matches!(self, Species::ElectricEel)
    }
}

/// One fish or eel swimming the river
#[derive(Debug, Clone)]
pub struct Swimmer {
    pub id: u32,
    pub kind: Species,
    /// Progress along the river path: 0 at the source, 1 at the catch zone
    pub path_t: f32,
    /// Signed offset from the centerline, as a fraction of local lane width
    pub lateral_offset: f32,
    /// Wave-shared sweep direction (+1/-1), flips on the clamp band
    pub move_direction: f32,
    /// Lateral sweep rate, drawn per instance from the species band
    pub drift_speed: f32,
    /// Phase of the cosmetic swim wobble
    pub wobble_phase: f32,
    /// Path progress per second, difficulty multiplier baked in at spawn
    pub speed: f32,
    /// Pounds scored when caught or lost when missed; 0 for the eel
    pub weight: u32,
    /// World position, recomputed every update
    pub pos: Vec2,
    /// Perspective render scale, recomputed every update
    pub scale: f32,
    /// Body size after perspective scaling
    pub size: Vec2,
}

impl Swimmer {
    /// Advance motion by `dt` and recompute the world transform
    ///
    /// `lateral_limit` is the hard drift band: the offset clamps to it and
    /// the sweep direction flips exactly on the hit, never overshooting.
    pub fn update(&mut self, dt: f32, river: &RiverPath, params: &SpeciesTuning, lateral_limit: f32) {
        self.path_t += self.speed * dt;

        self.lateral_offset += self.move_direction * self.drift_speed * dt;
        if self.lateral_offset > lateral_limit {
            self.lateral_offset = lateral_limit;
            self.move_direction = -1.0;
        } else if self.lateral_offset < -lateral_limit {
            self.lateral_offset = -lateral_limit;
            self.move_direction = 1.0;
        }

        self.wobble_phase += dt * params.wobble_rate;
        self.reproject(river, params);
    }

    /// Recompute world position, scale and size from the current progress
    ///
    /// Wobble and slither are fractions of the local lane width layered on
    /// the drifting offset. Slither rides on top of the clamped wave
    /// offset and is itself never clamped, so the eel can weave past the
    /// band edge. Neither affects body size. Scale grows downstream so
    /// bodies appear to approach the viewer.
    pub fn reproject(&mut self, river: &RiverPath, params: &SpeciesTuning) {
        let center = river.point_at(self.path_t);
        let lane = river.width_at(self.path_t);
        let wobble = self.wobble_phase.sin() * params.wobble_amp;
        let slither =
            (self.path_t * params.slither_freq * std::f32::consts::TAU).sin() * params.slither_amp;
        self.pos = Vec2::new(
            center.x + (self.lateral_offset + wobble + slither) * lane,
            center.y,
        );
        self.scale = params.base_scale * (0.8 + self.path_t.max(0.0) * 0.3);
        self.size = params.sprite_size * self.scale;
    }

    /// Axis-aligned hitbox centered on the body
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::centered_at(self.pos, self.size)
    }

    /// True once the entity has left the playable range
    ///
    /// Progress past the catch zone is the canonical exit; the world-space
    /// despawn line is a safety net for odd path configurations.
    pub fn is_off_range(&self, despawn_y: f32) -> bool {
        self.path_t >= 1.0 || self.pos.y > despawn_y
    }
}
