//! Constellation graph state
//!
//! Stars are append-only. Connections walk from the current star to its
//! nearest neighbor, excluding the star the walk just came from, so a
//! traversal never immediately backtracks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{STAR_SIDES_MAX, STAR_SIDES_MIN};
use crate::distance;

/// A placed star: click position plus the polygon shape chosen for it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Star {
    pub pos: Vec2,
    /// Polygon side count, drawn once at placement so repaints are stable
    pub sides: u32,
}

/// A connection between two stars (indices into the star list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
}

/// Complete constellation state
#[derive(Debug, Clone, Serialize)]
pub struct ConstellationState {
    /// Placed stars, in click order
    pub stars: Vec<Star>,
    /// Connections drawn so far
    pub connections: Vec<Connection>,
    /// Star the next connection starts from (the last placed or reached star)
    pub current: Option<usize>,
    /// Star the last connection came from; excluded from the neighbor search
    pub previous: Option<usize>,
    #[serde(skip)]
    rng: Pcg32,
}

impl ConstellationState {
    /// Create an empty constellation with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self {
            stars: Vec::new(),
            connections: Vec::new(),
            current: None,
            previous: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Place a star at a click point and make it the current star.
    ///
    /// Placing a star resets the traversal history, so the next connection
    /// may go anywhere except the new star itself.
    pub fn place_star(&mut self, pos: Vec2) -> Star {
        let star = Star {
            pos,
            sides: self.rng.random_range(STAR_SIDES_MIN..=STAR_SIDES_MAX),
        };
        self.stars.push(star);
        self.current = Some(self.stars.len() - 1);
        self.previous = None;
        star
    }

    /// Connect the current star to its nearest eligible neighbor.
    ///
    /// Eligible means: not the current star, not the star the previous
    /// connection came from. Ties break toward the earliest-placed star
    /// (strict `<` comparison). Returns `None` without changing state when
    /// there is no current star or no eligible neighbor; with exactly two
    /// stars this makes the second hop a no-op.
    pub fn connect_nearest(&mut self) -> Option<Connection> {
        let current = self.current?;

        let mut nearest: Option<usize> = None;
        let mut min_dist = f32::INFINITY;
        for (i, star) in self.stars.iter().enumerate() {
            if i == current || Some(i) == self.previous {
                continue;
            }
            let dist = distance(self.stars[current].pos, star.pos);
            if dist < min_dist {
                min_dist = dist;
                nearest = Some(i);
            }
        }

        let nearest = nearest?;
        let connection = Connection {
            from: current,
            to: nearest,
        };
        self.connections.push(connection);
        self.previous = Some(current);
        self.current = Some(nearest);
        Some(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ConstellationState {
        ConstellationState::new(7)
    }

    #[test]
    fn test_star_list_matches_click_order() {
        let mut s = state();
        let clicks = [
            Vec2::new(10.0, 10.0),
            Vec2::new(200.0, 50.0),
            Vec2::new(35.0, 300.0),
        ];
        for &pos in &clicks {
            s.place_star(pos);
        }
        assert_eq!(s.stars.len(), clicks.len());
        for (star, &pos) in s.stars.iter().zip(&clicks) {
            assert_eq!(star.pos, pos);
        }
    }

    #[test]
    fn test_placed_star_sides_in_range() {
        let mut s = state();
        for i in 0..50 {
            let star = s.place_star(Vec2::new(i as f32, 0.0));
            assert!((3..=9).contains(&star.sides), "sides = {}", star.sides);
        }
    }

    #[test]
    fn test_placing_resets_traversal() {
        let mut s = state();
        s.place_star(Vec2::new(0.0, 0.0));
        s.place_star(Vec2::new(10.0, 0.0));
        s.place_star(Vec2::new(20.0, 0.0));
        s.connect_nearest().unwrap();
        assert!(s.previous.is_some());

        s.place_star(Vec2::new(30.0, 0.0));
        assert_eq!(s.current, Some(3));
        assert_eq!(s.previous, None);
    }

    #[test]
    fn test_connect_with_no_stars_is_noop() {
        let mut s = state();
        assert_eq!(s.connect_nearest(), None);
        assert!(s.connections.is_empty());
    }

    #[test]
    fn test_connect_picks_nearest() {
        let mut s = state();
        s.place_star(Vec2::new(100.0, 0.0));
        s.place_star(Vec2::new(500.0, 0.0));
        s.place_star(Vec2::new(0.0, 0.0)); // current

        let conn = s.connect_nearest().unwrap();
        assert_eq!(conn, Connection { from: 2, to: 0 });
        assert_eq!(s.current, Some(0));
        assert_eq!(s.previous, Some(2));
    }

    #[test]
    fn test_connect_never_selects_current_or_previous() {
        let mut s = state();
        for i in 0..5 {
            s.place_star(Vec2::new(i as f32 * 50.0, 0.0));
        }
        for _ in 0..10 {
            let (current, previous) = (s.current, s.previous);
            if let Some(conn) = s.connect_nearest() {
                assert_ne!(Some(conn.to), current);
                assert_ne!(Some(conn.to), previous);
            }
        }
    }

    #[test]
    fn test_two_stars_second_hop_is_noop() {
        let mut s = state();
        s.place_star(Vec2::new(0.0, 0.0));
        s.place_star(Vec2::new(50.0, 0.0));

        // First hop connects back to star 0.
        let conn = s.connect_nearest().unwrap();
        assert_eq!(conn, Connection { from: 1, to: 0 });

        // Both stars are now excluded (current = 0, previous = 1).
        assert_eq!(s.connect_nearest(), None);
        assert_eq!(s.connections.len(), 1);
        assert_eq!(s.current, Some(0));
        assert_eq!(s.previous, Some(1));
    }

    #[test]
    fn test_tie_breaks_toward_insertion_order() {
        let mut s = state();
        s.place_star(Vec2::new(-50.0, 0.0));
        s.place_star(Vec2::new(50.0, 0.0));
        s.place_star(Vec2::new(0.0, 0.0)); // current, equidistant from 0 and 1

        let conn = s.connect_nearest().unwrap();
        assert_eq!(conn.to, 0);
    }
}
