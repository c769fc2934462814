//! Draw contract
//!
//! The simulation never draws. An external renderer implements `DrawSink`
//! and `queue_scene` feeds it the frame's draw calls in paint order: fish
//! first, eels above them, the net in front of everything. Positions are
//! sprite centers in world units; `scale` is the perspective factor the
//! sprite sheet should be blown up by.

use glam::Vec2;

use crate::sim::collision::BoundingBox;
use crate::sim::entity::Species;
use crate::sim::state::GameState;

/// Receiver for one frame's draw calls
pub trait DrawSink {
    /// Draw the sprite for `kind` centered at `pos`
    fn sprite(&mut self, kind: Species, pos: Vec2, scale: f32);
    /// Draw the player's net over the given frame
    fn net(&mut self, frame: BoundingBox);
}

/// Walk the live scene in paint order and emit draw calls
pub fn queue_scene(state: &GameState, sink: &mut impl DrawSink) {
    for fish in state.spawner.fish() {
        sink.sprite(fish.kind, fish.pos, fish.scale);
    }
    for eel in state.spawner.eels() {
        sink.sprite(eel.kind, eel.pos, eel.scale);
    }
    sink.net(state.net.frame());
}
