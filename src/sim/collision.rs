//! Collision detection
//!
//! The engine asks a [`BroadPhase`] for overlapping pairs and handles events,
//! scoring and removal itself, so the pairwise scan can be swapped for a
//! spatial structure without touching gameplay code.

use crate::geometry::{Collidable, Point, have_collided};

/// A hit box snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

impl Circle {
    pub fn of<C: Collidable + ?Sized>(object: &C) -> Self {
        Self {
            center: object.coords(),
            radius: object.hit_box_radius(),
        }
    }
}

impl Collidable for Circle {
    fn coords(&self) -> Point {
        self.center
    }

    fn hit_box_radius(&self) -> f32 {
        self.radius
    }
}

/// Finds overlapping circles between two groups
pub trait BroadPhase {
    /// Every `(left_index, right_index)` whose circles overlap, sorted by
    /// left index then right index.
    fn overlapping_pairs(&self, left: &[Circle], right: &[Circle]) -> Vec<(usize, usize)>;
}

/// Brute-force O(left × right) scan; fine for tens of entities
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseScan;

impl BroadPhase for PairwiseScan {
    fn overlapping_pairs(&self, left: &[Circle], right: &[Circle]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in left.iter().enumerate() {
            for (j, b) in right.iter().enumerate() {
                if have_collided(a, b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn circle(x: f32, y: f32, radius: f32) -> Circle {
        Circle {
            center: Vec2::new(x, y),
            radius,
        }
    }

    #[test]
    fn test_pairwise_scan_finds_all_overlaps() {
        let left = [circle(0.0, 0.0, 10.0), circle(100.0, 0.0, 10.0)];
        let right = [
            circle(5.0, 0.0, 1.0),
            circle(50.0, 0.0, 1.0),
            circle(95.0, 0.0, 1.0),
            circle(3.0, 3.0, 1.0),
        ];
        let pairs = PairwiseScan.overlapping_pairs(&left, &right);
        assert_eq!(pairs, vec![(0, 0), (0, 3), (1, 2)]);
    }

    #[test]
    fn test_touching_is_not_overlapping() {
        let left = [circle(0.0, 0.0, 10.0)];
        let right = [circle(20.0, 0.0, 10.0)];
        assert!(PairwiseScan.overlapping_pairs(&left, &right).is_empty());
    }

    #[test]
    fn test_empty_groups() {
        assert!(PairwiseScan.overlapping_pairs(&[], &[circle(0.0, 0.0, 1.0)]).is_empty());
        assert!(PairwiseScan.overlapping_pairs(&[circle(0.0, 0.0, 1.0)], &[]).is_empty());
    }
}
