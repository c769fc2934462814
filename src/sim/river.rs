//! River path geometry
//!
//! The river is a fixed cubic Bezier running from a narrow source between
//! the hills down to the wide catch zone. One scalar progress parameter
//! `t` drives both the centerline point and the local lane width, so
//! motion and rendering always agree on where the river is:
//! - t = 0: source
//! - t = 1: catch zone / despawn boundary
//! - t < 0: off-screen holding area upstream of the source

use glam::Vec2;

use crate::ease_in_quad;
use crate::tuning::RiverTuning;

/// Fixed river centerline with a widening lane
#[derive(Debug, Clone)]
pub struct RiverPath {
    /// Source point (t = 0)
    pub start: Vec2,
    /// First Bezier control handle
    pub handle1: Vec2,
    /// Second Bezier control handle
    pub handle2: Vec2,
    /// Catch-zone end point (t = 1)
    pub end: Vec2,
    /// Lane width at the source
    pub width_start: f32,
    /// Lane width at the catch zone
    pub width_end: f32,
    /// Holding point entities interpolate from while t < 0
    pub pre_spawn: Vec2,
}

impl RiverPath {
    pub fn new(tuning: &RiverTuning) -> Self {
        Self {
            start: tuning.start,
            handle1: tuning.handle1,
            handle2: tuning.handle2,
            end: tuning.end,
            width_start: tuning.width_start,
            width_end: tuning.width_end,
            pre_spawn: tuning.pre_spawn,
        }
    }

    /// Centerline point at progress `t`
    ///
    /// Standard cubic Bezier for `t >= 0`, defined for all reals past the
    /// end. Negative `t` instead walks from the source toward the
    /// pre-spawn holding point, so queued entities drift in from upstream
    /// rather than folding back onto the curve.
    pub fn point_at(&self, t: f32) -> Vec2 {
        if t < 0.0 {
            return self.start.lerp(self.pre_spawn, (-t).min(1.0));
        }
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let t2 = t * t;
        self.start * (mt2 * mt)
            + self.handle1 * (3.0 * mt2 * t)
            + self.handle2 * (3.0 * mt * t2)
            + self.end * (t2 * t)
    }

    /// Lane width at progress `t`
    ///
    /// Quadratic ease keeps the river narrow near the source and opens it
    /// up fast toward the net. Upstream of the source the lane holds the
    /// source width.
    pub fn width_at(&self, t: f32) -> f32 {
        if t < 0.0 {
            return self.width_start;
        }
        self.width_start + (self.width_end - self.width_start) * ease_in_quad(t)
    }
}
