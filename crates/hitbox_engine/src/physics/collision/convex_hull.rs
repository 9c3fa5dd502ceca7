//! Convex hull generation from point clouds and pixel masks
//!
//! Hulls are built with Gift Wrapping (Jarvis march) and can then be
//! thinned with Douglas-Peucker to keep polygon hitboxes cheap to test.

use crate::foundation::math::{Vec2, Vec2Ext};
use super::pixel_mask::PixelMask;

/// Vertex budget used by [`ConvexHullGenerator::from_pixel_mask`]
pub const PIXEL_MASK_HULL_VERTICES: usize = 12;

/// Default vertex budget for [`ConvexHullGenerator::simplified_hull_default`]
pub const DEFAULT_MAX_HULL_VERTICES: usize = 16;

/// Stateless convex hull builder
pub struct ConvexHullGenerator;

impl ConvexHullGenerator {
    /// Convex hull of `points` via Gift Wrapping
    ///
    /// Starts at the leftmost point (lowest y on ties) and walks the hull,
    /// preferring the farther point when candidates are collinear. Fewer
    /// than 3 points are returned unchanged. The walk is capped at one step
    /// per input point so degenerate input cannot loop forever.
    pub fn gift_wrap(points: &[Vec2]) -> Vec<Vec2> {
        if points.len() < 3 {
            return points.to_vec();
        }
        
        let start = leftmost_index(points);
        let mut hull = Vec::new();
        let mut current = start;
        
        loop {
            hull.push(points[current]);
            let origin = points[current];
            
            let mut next = 0;
            for i in 1..points.len() {
                if next == current {
                    next = i;
                    continue;
                }
                
                let to_next = points[next] - origin;
                let to_candidate = points[i] - origin;
                let cross = to_next.perp_dot(&to_candidate);
                
                if cross < 0.0
                    || (cross == 0.0 && to_candidate.norm_squared() > to_next.norm_squared())
                {
                    next = i;
                }
            }
            
            current = next;
            
            if current == start {
                break;
            }
            if hull.len() > points.len() {
                log::warn!(
                    "Gift wrap exceeded {} steps on degenerate input; returning partial hull",
                    points.len()
                );
                break;
            }
        }
        
        hull
    }
    
    /// Convex hull reduced towards `max_vertices` with Douglas-Peucker
    ///
    /// Hulls already within budget are returned as-is. The tolerance grows
    /// with the required reduction ratio, so the budget is a target rather
    /// than a hard guarantee for unusual point sets.
    pub fn simplified_hull(points: &[Vec2], max_vertices: usize) -> Vec<Vec2> {
        let full_hull = Self::gift_wrap(points);
        
        if full_hull.len() <= max_vertices {
            return full_hull;
        }
        
        let epsilon = simplification_epsilon(&full_hull, max_vertices);
        let simplified = douglas_peucker(&full_hull, epsilon);
        
        log::trace!(
            "Simplified hull from {} to {} vertices (epsilon {:.3})",
            full_hull.len(),
            simplified.len(),
            epsilon
        );
        
        simplified
    }
    
    /// [`simplified_hull`](Self::simplified_hull) with the default budget of 16 vertices
    pub fn simplified_hull_default(points: &[Vec2]) -> Vec<Vec2> {
        Self::simplified_hull(points, DEFAULT_MAX_HULL_VERTICES)
    }
    
    /// Hull of a mask's solid pixels in the mask's local coordinates
    ///
    /// Masks with fewer than 3 edge pixels fall back to their full
    /// rectangle. When `simplified` is set the hull targets
    /// [`PIXEL_MASK_HULL_VERTICES`] vertices.
    pub fn from_pixel_mask(mask: &PixelMask, simplified: bool) -> Vec<Vec2> {
        let edge_points = mask.edge_pixel_coordinates();
        
        if edge_points.len() < 3 {
            log::trace!(
                "Only {} edge pixels in {}x{} mask, using bounding rectangle",
                edge_points.len(),
                mask.width(),
                mask.height()
            );
            let (w, h) = (mask.width() as f32, mask.height() as f32);
            return vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(w, 0.0),
                Vec2::new(w, h),
                Vec2::new(0.0, h),
            ];
        }
        
        let hull = if simplified {
            Self::simplified_hull(&edge_points, PIXEL_MASK_HULL_VERTICES)
        } else {
            Self::gift_wrap(&edge_points)
        };
        
        log::debug!(
            "Generated {}-vertex hull from {} edge pixels",
            hull.len(),
            edge_points.len()
        );
        
        hull
    }
}

fn leftmost_index(points: &[Vec2]) -> usize {
    let mut leftmost = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let best = points[leftmost];
        if p.x < best.x || (p.x == best.x && p.y < best.y) {
            leftmost = i;
        }
    }
    leftmost
}

/// Douglas-Peucker over an open polyline
fn douglas_peucker(points: &[Vec2], epsilon: f32) -> Vec<Vec2> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    
    let first = points[0];
    let last = points[points.len() - 1];
    
    let mut max_distance = 0.0;
    let mut max_index = 0;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let distance = perpendicular_distance(*p, first, last);
        if distance > max_distance {
            max_distance = distance;
            max_index = i;
        }
    }
    
    if max_distance > epsilon {
        let mut simplified = douglas_peucker(&points[..=max_index], epsilon);
        // Both halves contain the split point
        simplified.pop();
        simplified.extend(douglas_peucker(&points[max_index..], epsilon));
        simplified
    } else {
        vec![first, last]
    }
}

/// Distance from `point` to the infinite line through `start` and `end`
fn perpendicular_distance(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let line = end - start;
    let length = line.norm();
    
    if length == 0.0 {
        return (point - start).norm();
    }
    
    line.perp_dot(&(point - start)).abs() / length
}

/// Tolerance scaled by average edge length and the reduction ratio
fn simplification_epsilon(hull: &[Vec2], target_count: usize) -> f32 {
    if hull.len() <= 2 {
        return 0.0;
    }
    
    let perimeter: f32 = hull
        .iter()
        .zip(hull.iter().cycle().skip(1))
        .map(|(a, b)| (b - a).norm())
        .sum();
    
    let count = hull.len() as f32;
    let reduction_ratio = count / target_count.max(1) as f32;
    perimeter / count * (reduction_ratio - 1.0) * 0.5
}
