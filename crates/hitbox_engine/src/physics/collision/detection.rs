//! Narrow-phase collision detection
//!
//! [`CollisionDetection::collides`] answers "do these two hitboxes overlap
//! right now". Every query first rejects on the strict AABB test, then
//! dispatches on the shape pair:
//!
//! | Pair                  | Algorithm                                   |
//! |-----------------------|---------------------------------------------|
//! | AABB × AABB           | strict box overlap                          |
//! | Circle × Circle       | squared center distance vs. radius sum      |
//! | Circle × AABB         | closest point on the box                    |
//! | Polygon × Polygon     | Separating Axis Theorem                     |
//! | AABB × Polygon        | SAT with the box as a 4-gon                 |
//! | Circle × Polygon      | point-in-polygon, then edge distance        |
//! | PixelMask × PixelMask | per-pixel scan of the footprint overlap     |
//! | PixelMask × other     | `true` (bounding box approximation)         |
//! | Compound × non-mask   | each part, with its own pre-filter          |
//!
//! Malformed input never panics: polygons with fewer than 3 vertices and
//! zero-length edges simply fail to collide or to separate.

use crate::foundation::math::{Vec2, Vec2Ext};
use super::primitives::BoundingBox;
use super::shape::{Hitbox, HitboxShape, PlacedShape};

/// Stateless collision queries
///
/// The shape-pair primitives are public for callers that already know
/// their shape kinds and want to skip the dispatch.
pub struct CollisionDetection;

impl CollisionDetection {
    /// Whether two hitboxes overlap
    pub fn collides(a: &Hitbox, b: &Hitbox) -> bool {
        Self::collides_placed(a.placed(), b.placed())
    }
    
    /// Strict axis-aligned box overlap; touching edges do not overlap
    pub fn aabb_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
        a.overlaps(b)
    }
    
    /// Circle vs circle, inclusive of the exact-contact distance
    pub fn circle_vs_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
        let distance_squared = (center_b - center_a).norm_squared();
        let radius_sum = radius_a + radius_b;
        distance_squared <= radius_sum * radius_sum
    }
    
    /// Circle vs axis-aligned box
    pub fn circle_vs_aabb(center: Vec2, radius: f32, rect: &BoundingBox) -> bool {
        // Closest point on the box to the circle center
        let closest = Vec2::new(
            center.x.min(rect.max_x()).max(rect.x),
            center.y.min(rect.max_y()).max(rect.y),
        );
        (center - closest).norm_squared() <= radius * radius
    }
    
    /// Convex polygon vs convex polygon (Separating Axis Theorem)
    ///
    /// Both polygons are in world space and need at least 3 vertices.
    pub fn polygon_vs_polygon(polygon_a: &[Vec2], polygon_b: &[Vec2]) -> bool {
        if polygon_a.len() < 3 || polygon_b.len() < 3 {
            return false;
        }
        
        let separated = edges(polygon_a)
            .chain(edges(polygon_b))
            .any(|(start, end)| Self::is_separating_axis((end - start).perpendicular(), polygon_a, polygon_b));
        
        !separated
    }
    
    /// Circle vs convex polygon (world space)
    pub fn circle_vs_polygon(center: Vec2, radius: f32, polygon: &[Vec2]) -> bool {
        if polygon.len() < 3 {
            return false;
        }
        
        if Self::point_in_polygon(center, polygon) {
            return true;
        }
        
        let radius_squared = radius * radius;
        edges(polygon).any(|(start, end)| {
            let closest = closest_point_on_segment(center, start, end);
            (center - closest).norm_squared() <= radius_squared
        })
    }
    
    /// Ray-casting (even-odd) point-in-polygon test
    pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
        if polygon.len() < 3 {
            return false;
        }
        
        let mut inside = false;
        let mut j = polygon.len() - 1;
        
        for i in 0..polygon.len() {
            let vi = polygon[i];
            let vj = polygon[j];
            
            // The straddle guard also skips horizontal edges, so the
            // division below never sees vj.y == vi.y
            if (vi.y > point.y) != (vj.y > point.y)
                && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
            {
                inside = !inside;
            }
            
            j = i;
        }
        
        inside
    }
    
    /// Local vertices to world space: rotate, then translate
    pub fn transform_vertices(vertices: &[Vec2], position: Vec2, rotation: f32) -> Vec<Vec2> {
        if rotation == 0.0 {
            return vertices.iter().map(|v| v + position).collect();
        }
        
        let (sin, cos) = rotation.sin_cos();
        vertices
            .iter()
            .map(|v| v.rotated_by(cos, sin) + position)
            .collect()
    }
    
    pub(crate) fn collides_placed(a: PlacedShape<'_>, b: PlacedShape<'_>) -> bool {
        if !Self::aabb_overlap(&a.bounding_box(), &b.bounding_box()) {
            return false;
        }
        Self::collides_shapes(a, b)
    }
    
    fn collides_shapes(a: PlacedShape<'_>, b: PlacedShape<'_>) -> bool {
        use HitboxShape as S;
        
        match (a.shape, b.shape) {
            (S::PixelMask { mask: mask_a }, S::PixelMask { mask: mask_b }) => {
                mask_a.collides(mask_b, a.position, b.position)
            }
            
            // The other shape is not rasterized against the mask; having
            // passed the bounding box test counts as a hit, compounds included
            (S::PixelMask { .. }, _) | (_, S::PixelMask { .. }) => true,
            
            // Every compound part gets its own pre-filter
            (S::Compound { parts }, _) => parts
                .iter()
                .any(|part| Self::collides_placed(a.part(part), b)),
            (_, S::Compound { parts }) => parts
                .iter()
                .any(|part| Self::collides_placed(a, b.part(part))),
            
            (S::Aabb { width: wa, height: ha }, S::Aabb { width: wb, height: hb }) => {
                Self::aabb_overlap(
                    &BoundingBox::new(a.position.x, a.position.y, *wa, *ha),
                    &BoundingBox::new(b.position.x, b.position.y, *wb, *hb),
                )
            }
            
            (S::Circle { radius: ra }, S::Circle { radius: rb }) => {
                Self::circle_vs_circle(a.position, *ra, b.position, *rb)
            }
            
            (S::Circle { radius }, S::Aabb { width, height }) => Self::circle_vs_aabb(
                a.position,
                *radius,
                &BoundingBox::new(b.position.x, b.position.y, *width, *height),
            ),
            (S::Aabb { width, height }, S::Circle { radius }) => Self::circle_vs_aabb(
                b.position,
                *radius,
                &BoundingBox::new(a.position.x, a.position.y, *width, *height),
            ),
            
            (S::Polygon { vertices: va }, S::Polygon { vertices: vb }) => {
                Self::polygon_vs_polygon(&a.transform(va), &b.transform(vb))
            }
            
            (S::Circle { radius }, S::Polygon { vertices }) => {
                Self::circle_vs_polygon(a.position, *radius, &b.transform(vertices))
            }
            (S::Polygon { vertices }, S::Circle { radius }) => {
                Self::circle_vs_polygon(b.position, *radius, &a.transform(vertices))
            }
            
            (S::Aabb { width, height }, S::Polygon { vertices }) => {
                let rect = BoundingBox::new(a.position.x, a.position.y, *width, *height);
                Self::polygon_vs_polygon(&rect.corners(), &b.transform(vertices))
            }
            (S::Polygon { vertices }, S::Aabb { width, height }) => {
                let rect = BoundingBox::new(b.position.x, b.position.y, *width, *height);
                Self::polygon_vs_polygon(&a.transform(vertices), &rect.corners())
            }
        }
    }
    
    fn is_separating_axis(axis: Vec2, polygon_a: &[Vec2], polygon_b: &[Vec2]) -> bool {
        let length = axis.norm();
        if length == 0.0 {
            // Degenerate edge, cannot separate anything
            return false;
        }
        let axis = axis / length;
        
        let (min_a, max_a) = project(polygon_a, &axis);
        let (min_b, max_b) = project(polygon_b, &axis);
        
        max_a < min_b || max_b < min_a
    }
}

/// Consecutive vertex pairs, closing back to the first vertex
fn edges(polygon: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(start, end)| (*start, *end))
}

/// Projection interval of a polygon onto a unit axis
fn project(polygon: &[Vec2], axis: &Vec2) -> (f32, f32) {
    polygon.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), v| {
        let projection = v.dot(axis);
        (min.min(projection), max.max(projection))
    })
}

fn closest_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> Vec2 {
    let segment = end - start;
    let length_squared = segment.norm_squared();
    
    if length_squared == 0.0 {
        return start;
    }
    
    let t = ((point - start).dot(&segment) / length_squared).clamp(0.0, 1.0);
    start + segment * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::physics::collision::PixelMask;
    use crate::foundation::math::constants::{HALF_PI, PI};
    
    fn triangle() -> Vec<Vec2> {
        vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(5.0, 10.0)]
    }
    
    fn square(size: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(size, 0.0),
            Vec2::new(size, size),
            Vec2::new(0.0, size),
        ]
    }
    
    fn solid_mask(width: i32, height: i32) -> Arc<PixelMask> {
        let pixels = vec![255u8; (width * height * 4) as usize];
        Arc::new(PixelMask::from_pixels(&pixels, width, height, 128))
    }
    
    fn assert_symmetric(a: &Hitbox, b: &Hitbox, expected: bool) {
        assert_eq!(CollisionDetection::collides(a, b), expected, "a vs b");
        assert_eq!(CollisionDetection::collides(b, a), expected, "b vs a");
    }
    
    #[test]
    fn test_aabb_vs_aabb() {
        let a = Hitbox::rect(0.0, 0.0, 10.0, 10.0);
        
        assert_symmetric(&a, &Hitbox::rect(5.0, 5.0, 10.0, 10.0), true);
        assert_symmetric(&a, &Hitbox::rect(20.0, 20.0, 10.0, 10.0), false);
        assert_symmetric(&a, &Hitbox::rect(10.0, 0.0, 10.0, 10.0), false);
    }
    
    #[test]
    fn test_circle_vs_circle() {
        let a = Hitbox::circle(0.0, 0.0, 10.0);
        
        assert_symmetric(&a, &Hitbox::circle(15.0, 0.0, 10.0), true);
        assert_symmetric(&a, &Hitbox::circle(25.0, 0.0, 10.0), false);
        // Exactly tangent
        assert_symmetric(&a, &Hitbox::circle(20.0, 0.0, 10.0), false);
    }
    
    #[test]
    fn test_circle_vs_circle_primitive_is_inclusive() {
        assert!(CollisionDetection::circle_vs_circle(
            Vec2::new(0.0, 0.0), 10.0,
            Vec2::new(20.0, 0.0), 10.0,
        ));
    }
    
    #[test]
    fn test_diagonal_circles_pass_prefilter_but_miss() {
        // Bounding boxes overlap at the corners, the circles do not
        let a = Hitbox::circle(0.0, 0.0, 10.0);
        let b = Hitbox::circle(16.0, 16.0, 10.0);
        
        assert!(a.bounding_box().overlaps(&b.bounding_box()));
        assert_symmetric(&a, &b, false);
    }
    
    #[test]
    fn test_circle_vs_aabb() {
        let rect = Hitbox::rect(0.0, 0.0, 10.0, 10.0);
        
        assert_symmetric(&Hitbox::circle(15.0, 5.0, 10.0), &rect, true);
        assert_symmetric(&Hitbox::circle(30.0, 30.0, 5.0), &rect, false);
        // Near the corner, inside the box's bounds but outside the radius
        assert_symmetric(&Hitbox::circle(13.0, 13.0, 4.0), &rect, false);
    }
    
    #[test]
    fn test_circle_inside_aabb() {
        let rect = Hitbox::rect(0.0, 0.0, 100.0, 100.0);
        assert_symmetric(&Hitbox::circle(50.0, 50.0, 5.0), &rect, true);
    }
    
    #[test]
    fn test_polygon_vs_polygon() {
        let a = Hitbox::polygon(0.0, 0.0, triangle());
        
        assert_symmetric(&a, &Hitbox::polygon(3.0, 0.0, triangle()), true);
        assert_symmetric(&a, &Hitbox::polygon(20.0, 0.0, triangle()), false);
    }
    
    #[test]
    fn test_polygon_separated_by_slanted_edge() {
        // Bounding boxes overlap; the triangle's right edge separates them
        let a = Hitbox::polygon(0.0, 0.0, triangle());
        let b = Hitbox::polygon(8.0, 8.0, square(2.0));
        
        assert!(a.bounding_box().overlaps(&b.bounding_box()));
        assert_symmetric(&a, &b, false);
    }
    
    #[test]
    fn test_rotated_polygon() {
        // Thin bar along +x; a quarter turn swings it onto the square above
        let bar = vec![
            Vec2::new(0.0, -1.0),
            Vec2::new(20.0, -1.0),
            Vec2::new(20.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let target = Hitbox::polygon(-2.0, 15.0, square(4.0));
        
        let flat = Hitbox::polygon(0.0, 0.0, bar.clone());
        let raised = Hitbox::polygon(0.0, 0.0, bar).with_rotation(HALF_PI);
        
        assert_symmetric(&flat, &target, false);
        assert_symmetric(&raised, &target, true);
    }
    
    #[test]
    fn test_degenerate_polygons_never_collide() {
        let line = vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)];
        
        assert!(!CollisionDetection::polygon_vs_polygon(&line, &square(10.0)));
        assert!(!CollisionDetection::circle_vs_polygon(Vec2::new(5.0, 5.0), 3.0, &line));
        assert!(!CollisionDetection::point_in_polygon(Vec2::new(5.0, 5.0), &line));
    }
    
    #[test]
    fn test_zero_length_edges_are_skipped() {
        // Repeated vertex yields a zero-length edge
        let a = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 10.0),
        ];
        let b: Vec<Vec2> = triangle().iter().map(|v| v + Vec2::new(3.0, 0.0)).collect();
        
        assert!(CollisionDetection::polygon_vs_polygon(&a, &b));
    }
    
    #[test]
    fn test_circle_vs_polygon() {
        let tri = Hitbox::polygon(0.0, 0.0, triangle());
        
        // Center inside
        assert_symmetric(&Hitbox::circle(5.0, 3.0, 1.0), &tri, true);
        // Center outside, touching the bottom edge region
        assert_symmetric(&Hitbox::circle(5.0, -1.0, 2.0), &tri, true);
        // Center outside, too far from every edge
        assert_symmetric(&Hitbox::circle(0.0, 9.0, 2.0), &tri, false);
    }
    
    #[test]
    fn test_aabb_vs_polygon() {
        let tri = Hitbox::polygon(0.0, 0.0, triangle());
        
        assert_symmetric(&Hitbox::rect(4.0, 4.0, 2.0, 2.0), &tri, true);
        assert_symmetric(&Hitbox::rect(0.0, 8.0, 2.0, 2.0), &tri, false);
    }
    
    #[test]
    fn test_aabb_vs_rotated_polygon() {
        // Diamond: the square turned 45 degrees about its corner
        let diamond = Hitbox::polygon(10.0, 0.0, square(10.0)).with_rotation(PI / 4.0);
        
        assert_symmetric(&Hitbox::rect(9.0, 6.0, 2.0, 2.0), &diamond, true);
        assert_symmetric(&Hitbox::rect(13.0, 0.0, 2.0, 2.0), &diamond, false);
    }
    
    #[test]
    fn test_point_in_polygon() {
        let sq = square(10.0);
        
        assert!(CollisionDetection::point_in_polygon(Vec2::new(5.0, 5.0), &sq));
        assert!(!CollisionDetection::point_in_polygon(Vec2::new(15.0, 5.0), &sq));
        assert!(!CollisionDetection::point_in_polygon(Vec2::new(5.0, -0.5), &sq));
    }
    
    #[test]
    fn test_point_in_concave_polygon() {
        // U shape: the notch is outside
        let u = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(9.0, 0.0),
            Vec2::new(9.0, 9.0),
            Vec2::new(6.0, 9.0),
            Vec2::new(6.0, 3.0),
            Vec2::new(3.0, 3.0),
            Vec2::new(3.0, 9.0),
            Vec2::new(0.0, 9.0),
        ];
        
        assert!(CollisionDetection::point_in_polygon(Vec2::new(1.5, 6.0), &u));
        assert!(!CollisionDetection::point_in_polygon(Vec2::new(4.5, 6.0), &u));
        assert!(CollisionDetection::point_in_polygon(Vec2::new(4.5, 1.5), &u));
    }
    
    #[test]
    fn test_transform_vertices() {
        let moved = CollisionDetection::transform_vertices(&square(1.0), Vec2::new(5.0, 5.0), 0.0);
        assert_eq!(moved[2], Vec2::new(6.0, 6.0));
        
        let turned = CollisionDetection::transform_vertices(&square(1.0), Vec2::zeros(), PI);
        assert!((turned[2] - Vec2::new(-1.0, -1.0)).norm() < 1e-5);
    }
    
    #[test]
    fn test_pixel_mask_vs_pixel_mask() {
        let a = Hitbox::pixel_mask(0.0, 0.0, solid_mask(4, 4));
        
        assert_symmetric(&a, &Hitbox::pixel_mask(2.0, 2.0, solid_mask(4, 4)), true);
        assert_symmetric(&a, &Hitbox::pixel_mask(4.0, 0.0, solid_mask(4, 4)), false);
    }
    
    #[test]
    fn test_transparent_masks_never_collide() {
        let a = Hitbox::pixel_mask(0.0, 0.0, Arc::new(PixelMask::new(4, 4)));
        let b = Hitbox::pixel_mask(1.0, 1.0, solid_mask(4, 4));
        
        assert_symmetric(&a, &b, false);
    }
    
    #[test]
    fn test_pixel_mask_vs_other_shape_is_optimistic() {
        // Fully transparent mask still reports a hit once the boxes overlap
        let mask = Hitbox::pixel_mask(0.0, 0.0, Arc::new(PixelMask::new(10, 10)));
        
        assert_symmetric(&mask, &Hitbox::circle(5.0, 5.0, 1.0), true);
        assert_symmetric(&mask, &Hitbox::rect(2.0, 2.0, 1.0, 1.0), true);
        assert_symmetric(&mask, &Hitbox::polygon(1.0, 1.0, triangle()), true);
        // Pre-filter still applies
        assert_symmetric(&mask, &Hitbox::circle(50.0, 50.0, 1.0), false);
    }
    
    #[test]
    fn test_compound_vs_shape() {
        let ship = Hitbox::compound(100.0, 100.0, [
            (Vec2::new(0.0, 0.0), HitboxShape::aabb(10.0, 4.0)),
            (Vec2::new(20.0, 0.0), HitboxShape::circle(3.0)),
        ]);
        
        // Hits the circle part
        assert_symmetric(&ship, &Hitbox::circle(121.0, 101.0, 1.0), true);
        // Inside the compound's bounding box but between the parts
        assert_symmetric(&ship, &Hitbox::rect(13.0 + 100.0, 100.0, 2.0, 2.0), false);
    }
    
    #[test]
    fn test_compound_vs_compound() {
        let a = Hitbox::compound(0.0, 0.0, [
            (Vec2::new(0.0, 0.0), HitboxShape::circle(2.0)),
            (Vec2::new(10.0, 0.0), HitboxShape::circle(2.0)),
        ]);
        let b = Hitbox::compound(9.0, 0.0, [
            (Vec2::new(0.0, 0.0), HitboxShape::aabb(1.0, 1.0)),
        ]);
        
        assert_symmetric(&a, &b, true);
    }
    
    #[test]
    fn test_nested_compound() {
        let inner = HitboxShape::compound([(Vec2::new(5.0, 0.0), HitboxShape::circle(1.0))]);
        let outer = Hitbox::compound(0.0, 0.0, [(Vec2::new(5.0, 0.0), inner)]);
        
        assert_symmetric(&outer, &Hitbox::circle(10.0, 0.0, 0.5), true);
        assert_symmetric(&outer, &Hitbox::circle(5.0, 0.0, 0.5), false);
    }
    
    #[test]
    fn test_compound_vs_pixel_mask_uses_overall_box() {
        // Neither part reaches the mask, but the compound's box does
        let ship = Hitbox::compound(0.0, 0.0, [
            (Vec2::new(0.0, 0.0), HitboxShape::aabb(2.0, 2.0)),
            (Vec2::new(20.0, 0.0), HitboxShape::aabb(2.0, 2.0)),
        ]);
        let sprite = Hitbox::pixel_mask(8.0, 0.0, Arc::new(PixelMask::new(4, 4)));
        
        assert_symmetric(&ship, &sprite, true);
        
        let far = Hitbox::pixel_mask(40.0, 0.0, Arc::new(PixelMask::new(4, 4)));
        assert_symmetric(&ship, &far, false);
    }
    
    #[test]
    fn test_collides_through_hitbox_method() {
        let a = Hitbox::rect(0.0, 0.0, 10.0, 10.0);
        let b = Hitbox::circle(12.0, 5.0, 3.0);
        
        assert!(a.collides(&b));
        assert!(b.collides(&a));
    }
}
