//! Axis-aligned rectangle geometry
//!
//! Every collision check in the game goes through these two functions:
//! a strict overlap test and the least-overlap resolution heuristic.

use glam::Vec2;

/// An axis-aligned rectangle in world coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Strict open-interval AABB overlap test - rectangles that merely touch
/// along an edge do not collide.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// The obstacle face an overlapping actor is pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Actor ends up resting on the obstacle (landing)
    Top,
    /// Actor ends up below the obstacle (head bump)
    Bottom,
    /// Actor ends up to the right of the obstacle
    Right,
    /// Actor ends up to the left of the obstacle
    Left,
}

/// Least-overlap resolution: given two overlapping rectangles, pick the
/// obstacle face whose signed penetration depth has the smallest magnitude.
///
/// Ties resolve in a fixed priority so corner contacts are deterministic:
/// Top, then Bottom, then Right, then Left. Landing exactly on a corner
/// therefore counts as landing on top.
pub fn min_penetration_side(actor: &Rect, obstacle: &Rect) -> Side {
    let from_top = obstacle.top() - actor.bottom();
    let from_bottom = obstacle.bottom() - actor.top();
    let from_right = obstacle.right() - actor.left();
    let from_left = obstacle.left() - actor.right();

    let min = from_top
        .abs()
        .min(from_bottom.abs())
        .min(from_right.abs())
        .min(from_left.abs());

    if min == from_top.abs() {
        Side::Top
    } else if min == from_bottom.abs() {
        Side::Bottom
    } else if min == from_right.abs() {
        Side::Right
    } else {
        Side::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_disjoint_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(100.0, 100.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_landing_resolves_to_top() {
        // Actor sunk 2px into the top of a platform, centered horizontally
        let actor = Rect::new(45.0, 88.0, 10.0, 14.0);
        let platform = Rect::new(0.0, 100.0, 100.0, 20.0);
        assert_eq!(min_penetration_side(&actor, &platform), Side::Top);
    }

    #[test]
    fn test_side_push_resolves_horizontally() {
        // Actor overlapping the left edge of a tall wall
        let wall = Rect::new(100.0, 0.0, 50.0, 200.0);
        let actor = Rect::new(95.0, 80.0, 10.0, 20.0);
        assert_eq!(min_penetration_side(&actor, &wall), Side::Left);

        let actor = Rect::new(145.0, 80.0, 10.0, 20.0);
        assert_eq!(min_penetration_side(&actor, &wall), Side::Right);
    }

    #[test]
    fn test_head_bump_resolves_to_bottom() {
        let ceiling = Rect::new(0.0, 0.0, 200.0, 50.0);
        let actor = Rect::new(95.0, 47.0, 10.0, 20.0);
        assert_eq!(min_penetration_side(&actor, &ceiling), Side::Bottom);
    }

    #[test]
    fn test_exact_corner_tie_prefers_top() {
        // Equal penetration on top and left faces
        let obstacle = Rect::new(10.0, 10.0, 20.0, 20.0);
        let actor = Rect::new(5.0, 5.0, 10.0, 10.0);
        // from_top = 10 - 15 = -5, from_left = 10 - 15 = -5
        assert_eq!(min_penetration_side(&actor, &obstacle), Side::Top);
    }
}
