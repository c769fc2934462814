//! Axis-aligned collision checks
//!
//! The net, the fish and the eel are all plain rectangles in world space,
//! so contact detection is a strict AABB overlap test. Touching edges do
//! not count: a zero-area intersection never catches a fish.

use glam::Vec2;

/// Axis-aligned box: min corner plus extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size centered on a point
    pub fn centered_at(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            width: size.x,
            height: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Strict AABB overlap: true only for a positive-area intersection
#[inline]
pub fn overlaps(a: BoundingBox, b: BoundingBox) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
