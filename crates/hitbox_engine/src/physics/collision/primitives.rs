//! Primitive collision volumes
//!
//! Provides the axis-aligned bounding box used both as the result of
//! [`Hitbox::bounding_box`](super::Hitbox::bounding_box) and as the
//! pre-filter of every collision query.

use serde::{Deserialize, Serialize};
use crate::foundation::math::Vec2;

/// An axis-aligned box in world space, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width (never negative for boxes built by this crate)
    pub w: f32,
    /// Height (never negative for boxes built by this crate)
    pub h: f32,
}

impl BoundingBox {
    /// Creates a new bounding box from its top-left corner and size
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
    
    /// Zero-size box sitting at `position`
    pub fn empty_at(position: Vec2) -> Self {
        Self::new(position.x, position.y, 0.0, 0.0)
    }
    
    /// Smallest box enclosing every point, or `None` for an empty slice
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        
        Some(Self::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
    
    /// Right edge
    pub fn max_x(&self) -> f32 {
        self.x + self.w
    }
    
    /// Bottom edge
    pub fn max_y(&self) -> f32 {
        self.y + self.h
    }
    
    /// Strict overlap test
    ///
    /// Boxes that only share an edge or a corner do NOT overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x < other.max_x()
            && self.max_x() > other.x
            && self.y < other.max_y()
            && self.max_y() > other.y
    }
    
    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
    
    /// Inclusive point containment (edges count as inside)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.max_x()
            && point.y >= self.y
            && point.y <= self.max_y()
    }
    
    /// Corners in winding order starting at the top-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.max_x(), self.y),
            Vec2::new(self.max_x(), self.max_y()),
            Vec2::new(self.x, self.max_y()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_shared_edge_is_not_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(10.0, 0.0, 10.0, 10.0);
        
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }
    
    #[test]
    fn test_shared_corner_is_not_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(10.0, 10.0, 5.0, 5.0);
        
        assert!(!a.overlaps(&b));
    }
    
    #[test]
    fn test_partial_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
        
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }
    
    #[test]
    fn test_union_encloses_both() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(-5.0, 20.0, 2.0, 2.0);
        
        assert_eq!(a.union(&b), BoundingBox::new(-5.0, 0.0, 15.0, 22.0));
    }
    
    #[test]
    fn test_from_points() {
        let points = [
            Vec2::new(3.0, -1.0),
            Vec2::new(-2.0, 4.0),
            Vec2::new(1.0, 1.0),
        ];
        
        assert_eq!(
            BoundingBox::from_points(&points),
            Some(BoundingBox::new(-2.0, -1.0, 5.0, 5.0))
        );
        assert_eq!(BoundingBox::from_points(&[]), None);
    }
    
    #[test]
    fn test_contains_point_includes_edges() {
        let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        
        assert!(b.contains_point(Vec2::new(10.0, 10.0)));
        assert!(b.contains_point(Vec2::new(5.0, 5.0)));
        assert!(!b.contains_point(Vec2::new(10.1, 5.0)));
    }
}
