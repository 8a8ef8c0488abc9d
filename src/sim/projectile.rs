//! Projectiles and the tapered-cone collision test
//!
//! A projectile is a glyph fired from the top of one tornado toward the
//! other's base. It flies in a straight line for a fixed lifetime budget and
//! collides against the target's tapered silhouette: wide at the top of the
//! stack, base width at the ground.

use glam::Vec2;
use serde::Serialize;

use super::tornado::Tornado;
use crate::consts::{PROJECTILE_LIFETIME, PROJECTILE_RADIUS, PROJECTILE_SPEED};
use crate::distance;

/// One of the two duel players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerSlot {
    P1,
    P2,
}

impl PlayerSlot {
    /// The other player
    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::P1 => PlayerSlot::P2,
            PlayerSlot::P2 => PlayerSlot::P1,
        }
    }

    /// Index into the duel's tornado array
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::P1 => 0,
            PlayerSlot::P2 => 1,
        }
    }
}

/// A glyph in flight
#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Display character, drawn from the shooter's alphabet
    pub glyph: char,
    pub radius: f32,
    /// Remaining frames before the projectile evaporates
    pub lifetime: u32,
    pub shooter: PlayerSlot,
    pub target: PlayerSlot,
}

impl Projectile {
    /// Fire from the top of the shooter toward the target's base, at fixed
    /// speed. The aim is frozen at fire time; projectiles do not track.
    pub fn fire(slot: PlayerSlot, shooter: &Tornado, target: &Tornado, glyph: char) -> Self {
        let start = Vec2::new(shooter.x, shooter.top_y());
        let delta = Vec2::new(target.x, target.y) - start;
        Self {
            pos: start,
            vel: delta.normalize_or_zero() * PROJECTILE_SPEED,
            glyph,
            radius: PROJECTILE_RADIUS,
            lifetime: PROJECTILE_LIFETIME,
            shooter: slot,
            target: slot.opponent(),
        }
    }

    /// Integrate one frame of travel and spend one frame of lifetime
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    /// Lifetime budget exhausted
    pub fn expired(&self) -> bool {
        self.lifetime == 0
    }

    /// Left the canvas
    pub fn out_of_bounds(&self, bounds: Vec2) -> bool {
        self.pos.x < 0.0 || self.pos.x > bounds.x || self.pos.y < 0.0 || self.pos.y > bounds.y
    }

    /// Collision against the target tornado: the projectile must be within
    /// the stack's vertical extent, and within the tapered radius at its
    /// height (plus its own radius) of the target's base anchor.
    pub fn hits(&self, target: &Tornado) -> bool {
        if self.pos.y < target.top_y() || self.pos.y > target.y {
            return false;
        }
        let dist = distance(self.pos, Vec2::new(target.x, target.y));
        dist <= target.radius_at(self.pos.y) + self.radius
    }
}
