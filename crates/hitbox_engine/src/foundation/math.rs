//! Math utilities and types
//!
//! Provides the 2D math types used by hitboxes and collision queries.

pub use nalgebra::Vector2;

/// 2D vector type (positions, offsets, polygon vertices)
pub type Vec2 = Vector2<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;
    
    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;
    
    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Extension trait for Vec2 with the 2D operations nalgebra leaves out
pub trait Vec2Ext {
    /// Rotate counter-clockwise by `angle` radians
    fn rotated(&self, angle: f32) -> Vec2;
    
    /// Rotate using a precomputed cosine/sine pair
    ///
    /// Lets callers transforming many vertices pay for the trig once.
    fn rotated_by(&self, cos: f32, sin: f32) -> Vec2;
    
    /// Perpendicular vector `(-y, x)`
    ///
    /// Not `perp`: nalgebra's inherent `perp` is the 2D cross product.
    fn perpendicular(&self) -> Vec2;
    
    /// Z component of the 3D cross product (signed parallelogram area)
    fn perp_dot(&self, other: &Vec2) -> f32;
}

impl Vec2Ext for Vec2 {
    fn rotated(&self, angle: f32) -> Vec2 {
        if angle == 0.0 {
            return *self;
        }
        let (sin, cos) = angle.sin_cos();
        self.rotated_by(cos, sin)
    }
    
    fn rotated_by(&self, cos: f32, sin: f32) -> Vec2 {
        Vec2::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
        )
    }
    
    fn perpendicular(&self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }
    
    fn perp_dot(&self, other: &Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    
    const EPSILON: f32 = 1e-6;
    
    #[test]
    fn test_rotate_quarter_turn() {
        let v = Vec2::new(1.0, 0.0);
        let rotated = v.rotated(constants::HALF_PI);
        
        assert_relative_eq!(rotated.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(rotated.y, 1.0, epsilon = EPSILON);
    }
    
    #[test]
    fn test_zero_rotation_is_identity() {
        let v = Vec2::new(3.5, -2.25);
        assert_eq!(v.rotated(0.0), v);
    }
    
    #[test]
    fn test_perpendicular_is_orthogonal() {
        let v = Vec2::new(3.0, 4.0);
        let normal = v.perpendicular();
        
        assert_eq!(normal, Vec2::new(-4.0, 3.0));
        assert_relative_eq!(v.dot(&normal), 0.0, epsilon = EPSILON);
        assert_relative_eq!(normal.norm(), v.norm(), epsilon = EPSILON);
    }
    
    #[test]
    fn test_perp_dot_sign() {
        let x = Vec2::new(1.0, 0.0);
        let y = Vec2::new(0.0, 1.0);
        
        // Counter-clockwise turn is positive
        assert!(x.perp_dot(&y) > 0.0);
        assert!(y.perp_dot(&x) < 0.0);
    }
}
