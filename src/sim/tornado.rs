//! Tornado sprite state and kinematics
//!
//! A tornado is a stack of character levels: level `i` always holds exactly
//! `i + 1` glyphs. Spinning shifts every level circularly, injects one fresh
//! glyph per level, and may grow the stack; ducking (or being hit) removes
//! the top level but never the base.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{
    BASE_WIDTH, BORDER_PADDING, GROUND_HEIGHT, LEVEL_HEIGHT, MAX_LEVELS, MOVE_IMPULSE, SPIN_DECAY,
    SPIN_IMPULSE, TOP_WIDTH_MULTIPLIER, VELOCITY_DECAY, VELOCITY_EPSILON,
};

/// Glyph source for one player's tornado and projectiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alphabet {
    /// Lowercase a-z (player 1); rendered uppercase
    Letters,
    /// Digits 0-9 (player 2)
    Digits,
}

impl Alphabet {
    /// Draw one random glyph
    pub fn draw(self, rng: &mut Pcg32) -> char {
        match self {
            Alphabet::Letters => (b'a' + rng.random_range(0..26u8)) as char,
            Alphabet::Digits => (b'0' + rng.random_range(0..10u8)) as char,
        }
    }

    /// The fixed glyph a fresh tornado starts with
    pub fn seed_glyph(self) -> char {
        match self {
            Alphabet::Letters => 'a',
            Alphabet::Digits => '0',
        }
    }
}

/// Spin direction for a tornado action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpinDirection {
    Left,
    Right,
}

/// One player's tornado
#[derive(Debug, Clone, Serialize)]
pub struct Tornado {
    /// Character levels, base first; level `i` has `i + 1` glyphs
    pub levels: Vec<Vec<char>>,
    /// Glyph source for spins and projectiles
    pub alphabet: Alphabet,
    /// Horizontal position of the base center
    pub x: f32,
    /// Vertical position of the base (ground line)
    pub y: f32,
    /// Accumulated rotation angle in radians
    pub rotation: f32,
    /// Current spin speed (positive = right)
    pub spin_speed: f32,
    /// Horizontal velocity (positive = right)
    pub velocity_x: f32,
}

impl Tornado {
    /// Create a one-level tornado at the given base position
    pub fn new(alphabet: Alphabet, x: f32, y: f32) -> Self {
        Self {
            levels: vec![vec![alphabet.seed_glyph()]],
            alphabet,
            x,
            y,
            rotation: 0.0,
            spin_speed: 0.0,
            velocity_x: 0.0,
        }
    }

    /// Spin every level one step in the given direction.
    ///
    /// The glyph that wraps around the edge is replaced with a fresh random
    /// one, so lengths never change. While under the level cap, a new fully
    /// random level is appended (it does not take part in this spin). Spin
    /// speed and horizontal velocity get a fixed impulse signed by direction.
    pub fn spin(&mut self, direction: SpinDirection, rng: &mut Pcg32) {
        for level in &mut self.levels {
            match direction {
                SpinDirection::Left => {
                    level.rotate_left(1);
                    let last = level.len() - 1;
                    level[last] = self.alphabet.draw(rng);
                }
                SpinDirection::Right => {
                    level.rotate_right(1);
                    level[0] = self.alphabet.draw(rng);
                }
            }
        }

        if self.levels.len() < MAX_LEVELS {
            let new_len = self.levels.len() + 1;
            let level = (0..new_len).map(|_| self.alphabet.draw(rng)).collect();
            self.levels.push(level);
        }

        match direction {
            SpinDirection::Left => {
                self.spin_speed -= SPIN_IMPULSE;
                self.velocity_x -= MOVE_IMPULSE;
            }
            SpinDirection::Right => {
                self.spin_speed += SPIN_IMPULSE;
                self.velocity_x += MOVE_IMPULSE;
            }
        }
    }

    /// Remove the top level. The base level is never removed; returns whether
    /// a level came off.
    pub fn pop_level(&mut self) -> bool {
        if self.levels.len() > 1 {
            self.levels.pop();
            true
        } else {
            false
        }
    }

    /// Total vertical extent of the stack
    pub fn height(&self) -> f32 {
        self.levels.len() as f32 * LEVEL_HEIGHT
    }

    /// Vertical position of the top of the stack
    pub fn top_y(&self) -> f32 {
        self.y - self.height()
    }

    /// Maximum width used for boundary clamping. Matches the visual taper's
    /// widest ring and does not depend on the current level count.
    pub fn max_width(&self) -> f32 {
        if self.levels.is_empty() {
            return BASE_WIDTH;
        }
        let top_width = BASE_WIDTH + (BASE_WIDTH * TOP_WIDTH_MULTIPLIER - BASE_WIDTH);
        BASE_WIDTH.max(top_width)
    }

    /// Collision radius at a given vertical position: linear taper from the
    /// base width at the ground to the top width at the stack's top.
    pub fn radius_at(&self, probe_y: f32) -> f32 {
        let t = ((probe_y - self.top_y()) / self.height()).clamp(0.0, 1.0);
        let width = BASE_WIDTH + (BASE_WIDTH * TOP_WIDTH_MULTIPLIER - BASE_WIDTH) * (1.0 - t);
        width / 2.0
    }

    /// Passive per-frame step: integrate and clamp horizontal position,
    /// decay velocity and spin, re-pin the base to the ground line. Runs
    /// every frame regardless of input.
    pub fn step(&mut self, bounds: Vec2) {
        let half_width = self.max_width() / 2.0;

        self.x += self.velocity_x;
        self.x = self
            .x
            .min(bounds.x - half_width - BORDER_PADDING)
            .max(half_width + BORDER_PADDING);

        self.velocity_x *= VELOCITY_DECAY;
        if self.velocity_x.abs() < VELOCITY_EPSILON {
            self.velocity_x = 0.0;
        }

        self.y = bounds.y - GROUND_HEIGHT;

        self.rotation += self.spin_speed;
        self.spin_speed *= SPIN_DECAY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    fn tornado() -> Tornado {
        Tornado::new(Alphabet::Letters, 300.0, 550.0)
    }

    fn assert_level_lengths(t: &Tornado) {
        for (i, level) in t.levels.iter().enumerate() {
            assert_eq!(level.len(), i + 1, "level {i} length");
        }
    }

    #[test]
    fn test_new_tornado_has_one_seed_level() {
        let t = tornado();
        assert_eq!(t.levels, vec![vec!['a']]);
        assert_eq!(Tornado::new(Alphabet::Digits, 0.0, 0.0).levels, vec![vec!['0']]);
    }

    #[test]
    fn test_spin_left_rotates_and_replaces_tail() {
        let mut t = tornado();
        t.levels = vec![vec!['a'], vec!['b', 'c']];
        let mut rng = rng();
        t.spin(SpinDirection::Left, &mut rng);

        // Level 0 keeps length 1; level 1 rotated left with a fresh tail.
        assert_eq!(t.levels[0].len(), 1);
        assert_eq!(t.levels[1][0], 'c');
        assert_eq!(t.levels[1].len(), 2);

        // A new level of length 3 is appended below the cap.
        assert_eq!(t.levels.len(), 3);
        assert_eq!(t.levels[2].len(), 3);

        assert_eq!(t.spin_speed, -SPIN_IMPULSE);
        assert_eq!(t.velocity_x, -MOVE_IMPULSE);
    }

    #[test]
    fn test_spin_right_rotates_and_replaces_head() {
        let mut t = tornado();
        t.levels = vec![vec!['a'], vec!['b', 'c']];
        let mut rng = rng();
        t.spin(SpinDirection::Right, &mut rng);

        // Rotate right moves the tail to the front, then the front is replaced,
        // so the original head ends up at the back.
        assert_eq!(t.levels[1][1], 'b');
        assert_eq!(t.levels[1].len(), 2);
        assert_level_lengths(&t);
        assert_eq!(t.spin_speed, SPIN_IMPULSE);
        assert_eq!(t.velocity_x, MOVE_IMPULSE);
    }

    #[test]
    fn test_opposite_spins_cancel_impulses() {
        let mut t = tornado();
        let mut rng = rng();
        t.spin(SpinDirection::Left, &mut rng);
        t.spin(SpinDirection::Right, &mut rng);
        assert_eq!(t.spin_speed, 0.0);
        assert_eq!(t.velocity_x, 0.0);
        assert_eq!(t.levels[0].len(), 1);
    }

    #[test]
    fn test_level_count_capped() {
        let mut t = tornado();
        let mut rng = rng();
        for _ in 0..25 {
            t.spin(SpinDirection::Left, &mut rng);
        }
        assert_eq!(t.levels.len(), MAX_LEVELS);
        assert_level_lengths(&t);
    }

    #[test]
    fn test_pop_level_floors_at_base() {
        let mut t = tornado();
        let mut rng = rng();
        t.spin(SpinDirection::Right, &mut rng);
        assert!(t.pop_level());
        assert!(!t.pop_level());
        assert_eq!(t.levels.len(), 1);
    }

    #[test]
    fn test_radius_taper() {
        let mut t = tornado();
        t.levels = vec![vec!['a'], vec!['b', 'c']];
        t.y = 550.0;
        // Stack spans y 480..550; widest at the top, base width at the ground.
        assert!((t.radius_at(t.top_y()) - 37.5).abs() < 1e-4);
        assert!((t.radius_at(t.y) - 15.0).abs() < 1e-4);
        let mid = (t.top_y() + t.y) / 2.0;
        assert!((t.radius_at(mid) - 26.25).abs() < 1e-4);
        // Probes outside the stack clamp to the nearest end.
        assert!((t.radius_at(t.y + 100.0) - 15.0).abs() < 1e-4);
        assert!((t.radius_at(t.top_y() - 100.0) - 37.5).abs() < 1e-4);
    }

    #[test]
    fn test_step_decays_and_snaps_velocity() {
        let mut t = tornado();
        let bounds = Vec2::new(800.0, 600.0);
        t.velocity_x = 2.0;
        let x0 = t.x;
        t.step(bounds);
        assert_eq!(t.x, x0 + 2.0);
        assert!((t.velocity_x - 2.0 * VELOCITY_DECAY).abs() < 1e-6);

        t.velocity_x = 0.05;
        t.step(bounds);
        assert_eq!(t.velocity_x, 0.0);
    }

    #[test]
    fn test_step_clamps_to_bounds() {
        let bounds = Vec2::new(800.0, 600.0);
        let half = 37.5;

        let mut t = tornado();
        t.x = 5.0;
        t.velocity_x = -10.0;
        t.step(bounds);
        assert_eq!(t.x, half + BORDER_PADDING);

        t.x = 795.0;
        t.velocity_x = 10.0;
        t.step(bounds);
        assert_eq!(t.x, bounds.x - half - BORDER_PADDING);
    }

    #[test]
    fn test_step_integrates_rotation_and_pins_ground() {
        let mut t = tornado();
        let bounds = Vec2::new(800.0, 400.0);
        t.spin_speed = 0.2;
        t.step(bounds);
        assert!((t.rotation - 0.2).abs() < 1e-6);
        assert!((t.spin_speed - 0.2 * SPIN_DECAY).abs() < 1e-6);
        assert_eq!(t.y, 400.0 - GROUND_HEIGHT);
    }

    proptest! {
        #[test]
        fn prop_level_invariants_hold(ops in proptest::collection::vec(0u8..3, 0..60), seed in any::<u64>()) {
            let mut t = tornado();
            let mut rng = Pcg32::seed_from_u64(seed);
            for op in ops {
                match op {
                    0 => t.spin(SpinDirection::Left, &mut rng),
                    1 => t.spin(SpinDirection::Right, &mut rng),
                    _ => {
                        t.pop_level();
                    }
                }
                prop_assert!(!t.levels.is_empty());
                prop_assert!(t.levels.len() <= MAX_LEVELS);
                for (i, level) in t.levels.iter().enumerate() {
                    prop_assert_eq!(level.len(), i + 1);
                }
            }
        }
    }
}
