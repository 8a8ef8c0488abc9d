//! Per-frame duel advance
//!
//! Input arrives as explicit commands applied between frames; `tick`
//! advances the whole duel by exactly one frame. Both run deterministically
//! against the seeded RNG, so tests drive them directly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::projectile::{PlayerSlot, Projectile};
use super::tornado::{Alphabet, SpinDirection, Tornado};
use crate::consts::GROUND_HEIGHT;

/// A single input event for the duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Command {
    /// Spin the player's tornado (key-repeat spins again)
    Spin {
        slot: PlayerSlot,
        direction: SpinDirection,
    },
    /// Remove the player's top level defensively
    Duck { slot: PlayerSlot },
    /// Fire a projectile at the opponent (key-down edge only; the app layer
    /// suppresses key-repeat)
    Shoot { slot: PlayerSlot },
}

/// Complete tornado duel state
#[derive(Debug, Clone, Serialize)]
pub struct DuelState {
    /// RNG seed, kept for reproducibility
    pub seed: u64,
    /// Both tornadoes, indexed by `PlayerSlot::index`
    pub tornadoes: [Tornado; 2],
    /// Projectiles in flight
    pub projectiles: Vec<Projectile>,
    /// Canvas size in pixels
    pub bounds: Vec2,
    /// Frames advanced so far
    pub frame: u64,
    #[serde(skip)]
    rng: Pcg32,
}

impl DuelState {
    /// Create a fresh duel: player 1 on the left third, player 2 on the
    /// right third, both one level tall on the ground line.
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        let ground = bounds.y - GROUND_HEIGHT;
        Self {
            seed,
            tornadoes: [
                Tornado::new(Alphabet::Letters, bounds.x / 3.0, ground),
                Tornado::new(Alphabet::Digits, bounds.x * 2.0 / 3.0, ground),
            ],
            projectiles: Vec::new(),
            bounds,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The tornado belonging to a slot
    pub fn tornado(&self, slot: PlayerSlot) -> &Tornado {
        &self.tornadoes[slot.index()]
    }

    /// Apply one input command synchronously
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Spin { slot, direction } => {
                self.tornadoes[slot.index()].spin(direction, &mut self.rng);
            }
            Command::Duck { slot } => {
                self.tornadoes[slot.index()].pop_level();
            }
            Command::Shoot { slot } => {
                let shooter = &self.tornadoes[slot.index()];
                let target = &self.tornadoes[slot.opponent().index()];
                let glyph = shooter.alphabet.draw(&mut self.rng);
                let projectile = Projectile::fire(slot, shooter, target, glyph);
                log::debug!(
                    "{:?} fired '{}' from ({:.0}, {:.0})",
                    slot,
                    glyph,
                    projectile.pos.x,
                    projectile.pos.y
                );
                self.projectiles.push(projectile);
            }
        }
    }

    /// Advance the duel by one frame: tornado kinematics first, then
    /// projectile flight, culling, and collision.
    pub fn tick(&mut self) {
        self.frame += 1;

        for tornado in &mut self.tornadoes {
            tornado.step(self.bounds);
        }

        let mut i = 0;
        while i < self.projectiles.len() {
            self.projectiles[i].advance();

            let projectile = &self.projectiles[i];
            if projectile.expired() || projectile.out_of_bounds(self.bounds) {
                self.projectiles.remove(i);
                continue;
            }

            let target = projectile.target.index();
            if projectile.hits(&self.tornadoes[target]) {
                self.tornadoes[target].pop_level();
                self.projectiles.remove(i);
                continue;
            }

            i += 1;
        }
    }

    /// Adopt a new canvas size, keeping each tornado's offset from the
    /// horizontal center rather than its absolute position.
    pub fn resize(&mut self, bounds: Vec2) {
        for tornado in &mut self.tornadoes {
            let offset = tornado.x - self.bounds.x / 2.0;
            tornado.x = bounds.x / 2.0 + offset;
        }
        self.bounds = bounds;
    }
}
