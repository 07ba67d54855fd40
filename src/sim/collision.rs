//! Collision primitives shared by both games
//!
//! The arena shooter treats everything as circles; the wave game uses
//! axis-aligned boxes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::CONTACT_EPSILON;

/// Signed gap between two circles (negative when overlapping)
#[inline]
pub fn circle_gap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> f32 {
    a.distance(b) - ra - rb
}

/// Two circles collide when touching or overlapping (within `CONTACT_EPSILON`)
#[inline]
pub fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    circle_gap(a, ra, b, rb) < CONTACT_EPSILON
}

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
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

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap on both axes (shared edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Whether a point lies inside (inclusive of the top/left edge)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Clamp a circle's center so the whole circle stays inside a `width` x `height` surface.
///
/// A surface narrower than the circle pins it to the center line.
pub fn clamp_circle(pos: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    let clamp_axis = |v: f32, extent: f32| {
        if extent < radius * 2.0 {
            extent / 2.0
        } else {
            v.clamp(radius, extent - radius)
        }
    };
    Vec2::new(clamp_axis(pos.x, width), clamp_axis(pos.y, height))
}

/// True when a point has left the `[0, width] x [0, height]` rectangle
#[inline]
pub fn out_of_surface(p: Vec2, width: f32, height: f32) -> bool {
    p.x < 0.0 || p.x > width || p.y < 0.0 || p.y > height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_circles_collide() {
        // Exactly touching: gap 0 < epsilon
        assert!(circles_touch(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));
        // Within the 1px slack
        assert!(circles_touch(Vec2::ZERO, 10.0, Vec2::new(20.5, 0.0), 10.0));
        // Just outside
        assert!(!circles_touch(Vec2::ZERO, 10.0, Vec2::new(21.0, 0.0), 10.0));
    }

    #[test]
    fn aabb_overlap_needs_both_axes() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Aabb::new(5.0, 5.0, 10.0, 10.0)));
        // Overlaps in x only
        assert!(!a.overlaps(&Aabb::new(5.0, 20.0, 10.0, 10.0)));
        // Shared edge is not an overlap
        assert!(!a.overlaps(&Aabb::new(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn clamp_keeps_circle_inside() {
        let p = clamp_circle(Vec2::new(-50.0, 500.0), 20.0, 600.0, 400.0);
        assert_eq!(p, Vec2::new(20.0, 380.0));
    }

    #[test]
    fn clamp_on_tiny_surface_centers() {
        let p = clamp_circle(Vec2::new(3.0, 3.0), 20.0, 10.0, 400.0);
        assert_eq!(p.x, 5.0);
        assert_eq!(p.y, 20.0);
    }

    #[test]
    fn surface_bounds() {
        assert!(!out_of_surface(Vec2::new(0.0, 0.0), 100.0, 100.0));
        assert!(!out_of_surface(Vec2::new(100.0, 100.0), 100.0, 100.0));
        assert!(out_of_surface(Vec2::new(-0.1, 50.0), 100.0, 100.0));
        assert!(out_of_surface(Vec2::new(50.0, 100.1), 100.0, 100.0));
    }
}
