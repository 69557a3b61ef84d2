//! Slice detection
//!
//! The cursor is a point and every object is an axis-aligned square anchored
//! at its top-left corner, so a slice is a point-in-box test. Edges count as
//! inside.

use glam::IVec2;

/// Axis-aligned box in screen space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub min: IVec2,
    pub max: IVec2,
}

impl Aabb {
    /// Square with its top-left corner at `origin`
    #[inline]
    pub fn square(origin: IVec2, size: i32) -> Self {
        Self {
            min: origin,
            max: origin + IVec2::splat(size),
        }
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, p: IVec2) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }
}

/// Does the cursor at `point` slice a square object at `origin`?
#[inline]
pub fn point_hits_square(point: IVec2, origin: IVec2, size: i32) -> bool {
    Aabb::square(origin, size).contains(point)
}
