//! Pure layout geometry for both toys
//!
//! Everything here is a deterministic function of current state with no
//! feedback into the simulation.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::consts::{BASE_WIDTH, LEVEL_HEIGHT, TOP_WIDTH_MULTIPLIER};
use crate::sim::Tornado;

/// Vertical flattening applied to each glyph ring to suggest an ellipse
pub const RING_FLATTEN: f32 = 0.3;
/// The spiral offset accumulates at twice the tornado's rotation angle
pub const SPIRAL_FACTOR: f32 = 2.0;
/// Glyph fill opacity at the base level
pub const BASE_ALPHA: f32 = 0.9;
/// How much opacity fades toward the top of the stack
pub const ALPHA_FADE: f32 = 0.3;

/// Vertices of a star polygon: vertex `k` sits at angle `k·2π/sides` on a
/// circle around the click point.
pub fn polygon_points(center: Vec2, radius: f32, sides: u32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let angle = TAU * i as f32 / sides as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// One positioned tornado character, relative to the tornado's base anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub pos: Vec2,
    pub alpha: f32,
}

/// Lay out every character of a tornado.
///
/// Level `i` sits `i` level-heights above the base and widens linearly
/// toward the top. Its characters spread evenly around a ring of that
/// width, flattened vertically, offset by the accumulated spiral rotation,
/// and fading from `BASE_ALPHA` at the bottom.
pub fn tornado_glyphs(tornado: &Tornado) -> Vec<Glyph> {
    let level_count = tornado.levels.len();
    let mut glyphs = Vec::with_capacity(level_count * (level_count + 1) / 2);
    let spiral = tornado.rotation * SPIRAL_FACTOR;

    for (level_index, level) in tornado.levels.iter().enumerate() {
        let y = -(level_index as f32) * LEVEL_HEIGHT;
        let t = level_index as f32 / (level_count.saturating_sub(1)).max(1) as f32;
        let width = BASE_WIDTH + (BASE_WIDTH * TOP_WIDTH_MULTIPLIER - BASE_WIDTH) * t;
        let radius = width / 2.0;
        let angle_step = TAU / level.len() as f32;
        let alpha = BASE_ALPHA - t * ALPHA_FADE;

        for (char_index, &ch) in level.iter().enumerate() {
            let angle = char_index as f32 * angle_step + spiral;
            glyphs.push(Glyph {
                ch,
                pos: Vec2::new(
                    angle.cos() * radius,
                    y + angle.sin() * radius * RING_FLATTEN,
                ),
                alpha,
            });
        }
    }

    glyphs
}
