//! Sky Toys - two small canvas toys sharing one simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (constellation graph, tornado duel)
//! - `render`: Layout math and 2D canvas painters
//!
//! The binary hosts both toys: a constellation sketcher (click to place star
//! polygons, arrow keys to connect them, PNG export) and a two-player ASCII
//! tornado duel (WASD vs. arrow keys).

pub mod render;
pub mod sim;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; decay constants are per-frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas margin from the viewport edge (each side)
    pub const CANVAS_MARGIN: f64 = 10.0;

    /// Star polygon radius
    pub const STAR_RADIUS: f32 = 5.0;
    /// Glow ring radius around the current star
    pub const RING_RADIUS: f32 = 10.0;
    /// Polygon side count range (inclusive)
    pub const STAR_SIDES_MIN: u32 = 3;
    pub const STAR_SIDES_MAX: u32 = 9;

    /// Tornado level cap
    pub const MAX_LEVELS: usize = 10;
    /// Vertical extent of one tornado level
    pub const LEVEL_HEIGHT: f32 = 35.0;
    /// Tornado width at the base
    pub const BASE_WIDTH: f32 = 30.0;
    /// Width multiplier at the top of the stack
    pub const TOP_WIDTH_MULTIPLIER: f32 = 2.5;
    /// Spin speed change per spin action (signed by direction)
    pub const SPIN_IMPULSE: f32 = 0.05;
    /// Horizontal velocity change per spin action (signed by direction)
    pub const MOVE_IMPULSE: f32 = 2.0;
    /// Per-frame spin speed decay factor
    pub const SPIN_DECAY: f32 = 0.95;
    /// Per-frame horizontal velocity decay factor
    pub const VELOCITY_DECAY: f32 = 0.92;
    /// Velocity magnitude below which movement snaps to zero
    pub const VELOCITY_EPSILON: f32 = 0.1;
    /// Padding kept between a tornado and the canvas edge
    pub const BORDER_PADDING: f32 = 10.0;
    /// Ground strip height at the bottom of the duel canvas
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Projectile speed (pixels per frame)
    pub const PROJECTILE_SPEED: f32 = 8.0;
    /// Projectile collision radius
    pub const PROJECTILE_RADIUS: f32 = 8.0;
    /// Projectile lifetime budget in frames
    pub const PROJECTILE_LIFETIME: u32 = 300;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
