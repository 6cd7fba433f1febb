//! Overlap tests
//!
//! Everything is circle-circle except the solid boss body, which is an
//! axis-aligned box the player gets pushed out of.

use glam::Vec2;

/// Circle overlap using squared distance
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) < r * r
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Square box of side `size` around `center`
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::from_center(center, Vec2::splat(size / 2.0))
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Translation that moves `self` out of `solid` along the axis of least
    /// overlap, or `None` when they do not touch
    pub fn push_out_of(&self, solid: &Aabb) -> Option<Vec2> {
        if !self.overlaps(solid) {
            return None;
        }
        let overlap_x = (self.max.x - solid.min.x).min(solid.max.x - self.min.x);
        let overlap_y = (self.max.y - solid.min.y).min(solid.max.y - self.min.y);
        let delta = self.center() - solid.center();

        if overlap_x < overlap_y {
            let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
            Some(Vec2::new(overlap_x * sign, 0.0))
        } else {
            let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
            Some(Vec2::new(0.0, overlap_y * sign))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        // Touching is not overlapping
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::square(Vec2::ZERO, 10.0);
        assert!(a.overlaps(&Aabb::square(Vec2::new(8.0, 8.0), 10.0)));
        assert!(!a.overlaps(&Aabb::square(Vec2::new(20.0, 0.0), 10.0)));
    }

    #[test]
    fn test_push_out_along_smaller_axis() {
        let boss = Aabb::square(Vec2::new(100.0, 100.0), 80.0);
        // Player slightly left of the boss, mostly level with it
        let player = Aabb::square(Vec2::new(50.0, 95.0), 30.0);
        let push = player.push_out_of(&boss).unwrap();
        assert_eq!(push.y, 0.0);
        assert!((push.x + 5.0).abs() < 1e-4);

        let moved = Aabb::square(Vec2::new(50.0 + push.x, 95.0), 30.0);
        assert!(!moved.overlaps(&boss));
    }

    #[test]
    fn test_push_out_vertical() {
        let boss = Aabb::square(Vec2::new(100.0, 100.0), 80.0);
        let player = Aabb::square(Vec2::new(105.0, 152.0), 30.0);
        let push = player.push_out_of(&boss).unwrap();
        assert_eq!(push.x, 0.0);
        assert!(push.y > 0.0);
        assert!(player.push_out_of(&Aabb::square(Vec2::new(500.0, 500.0), 10.0)).is_none());
    }
}
