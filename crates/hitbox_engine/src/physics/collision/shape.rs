//! Hitbox shapes and positioned hitboxes
//!
//! Shapes are stored in LOCAL space; a [`Hitbox`] places one in the world
//! with a position and rotation. World-space geometry is derived on demand
//! during queries and never cached.
//!
//! Rotation only affects polygon vertices and compound part offsets.
//! `Aabb`, `Circle` and `PixelMask` are always axis-aligned.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Vec2, Vec2Ext};
use super::detection::CollisionDetection;
use super::pixel_mask::PixelMask;
use super::primitives::BoundingBox;

/// Collision shape kinds, from cheapest to most precise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HitboxShape {
    /// Axis-aligned box; the hitbox position is its top-left corner
    Aabb {
        /// Box width
        width: f32,
        /// Box height
        height: f32,
    },
    /// Circle; the hitbox position is its center
    Circle {
        /// Circle radius
        radius: f32,
    },
    /// Convex polygon with vertices relative to the hitbox position
    Polygon {
        /// Local vertices, counter-clockwise for generated hulls
        vertices: Vec<Vec2>,
    },
    /// Pixel-exact mask; the hitbox position is its top-left pixel
    PixelMask {
        /// Shared immutable mask
        mask: Arc<PixelMask>,
    },
    /// Several shapes moving together
    Compound {
        /// Parts in test order
        parts: Vec<CompoundPart>,
    },
}

/// One member of a [`HitboxShape::Compound`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundPart {
    /// Offset from the parent position, rotated with the parent
    pub offset: Vec2,
    /// The part's shape
    pub shape: HitboxShape,
}

impl CompoundPart {
    /// Creates a compound part
    pub fn new(offset: Vec2, shape: HitboxShape) -> Self {
        Self { offset, shape }
    }
}

impl HitboxShape {
    /// Axis-aligned box shape
    pub fn aabb(width: f32, height: f32) -> Self {
        Self::Aabb { width, height }
    }
    
    /// Circle shape
    pub fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }
    
    /// Polygon shape from local vertices
    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        Self::Polygon { vertices }
    }
    
    /// Pixel mask shape
    pub fn pixel_mask(mask: Arc<PixelMask>) -> Self {
        Self::PixelMask { mask }
    }
    
    /// Compound shape from `(offset, shape)` parts
    pub fn compound(parts: impl IntoIterator<Item = (Vec2, HitboxShape)>) -> Self {
        Self::Compound {
            parts: parts
                .into_iter()
                .map(|(offset, shape)| CompoundPart::new(offset, shape))
                .collect(),
        }
    }
    
    /// Short human-readable kind name
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Aabb { .. } => "aabb",
            Self::Circle { .. } => "circle",
            Self::Polygon { .. } => "polygon",
            Self::PixelMask { .. } => "pixel_mask",
            Self::Compound { .. } => "compound",
        }
    }
}

/// A shape placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    /// World position (top-left or center depending on the shape)
    pub position: Vec2,
    /// The collision shape
    pub shape: HitboxShape,
    /// Rotation in radians (polygons and compound offsets only)
    #[serde(default)]
    pub rotation: f32,
}

impl Hitbox {
    /// Creates an unrotated hitbox
    pub fn new(position: Vec2, shape: HitboxShape) -> Self {
        Self {
            position,
            shape,
            rotation: 0.0,
        }
    }
    
    /// Creates an unrotated hitbox at `(x, y)`
    pub fn at(x: f32, y: f32, shape: HitboxShape) -> Self {
        Self::new(Vec2::new(x, y), shape)
    }
    
    /// Set rotation in radians
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
    
    /// Rectangle with its top-left corner at `(x, y)`
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::at(x, y, HitboxShape::aabb(width, height))
    }
    
    /// Circle centered at `(center_x, center_y)`
    pub fn circle(center_x: f32, center_y: f32, radius: f32) -> Self {
        Self::at(center_x, center_y, HitboxShape::circle(radius))
    }
    
    /// Polygon whose vertices are relative to `(x, y)`
    pub fn polygon(x: f32, y: f32, vertices: Vec<Vec2>) -> Self {
        Self::at(x, y, HitboxShape::polygon(vertices))
    }
    
    /// Pixel mask with its top-left pixel at `(x, y)`
    pub fn pixel_mask(x: f32, y: f32, mask: Arc<PixelMask>) -> Self {
        Self::at(x, y, HitboxShape::pixel_mask(mask))
    }
    
    /// Compound hitbox at `(x, y)`
    pub fn compound(x: f32, y: f32, parts: impl IntoIterator<Item = (Vec2, HitboxShape)>) -> Self {
        Self::at(x, y, HitboxShape::compound(parts))
    }
    
    /// Move to a new world position
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }
    
    /// Move by a delta
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
    
    /// World-space axis-aligned bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        self.placed().bounding_box()
    }
    
    /// Whether a world-space point lies inside the hitbox
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.placed().contains_point(point)
    }
    
    /// Whether this hitbox overlaps another
    pub fn collides(&self, other: &Hitbox) -> bool {
        CollisionDetection::collides(self, other)
    }
    
    /// World-space vertices of a polygon shape, `None` for other shapes
    pub fn world_vertices(&self) -> Option<Vec<Vec2>> {
        match &self.shape {
            HitboxShape::Polygon { vertices } => Some(self.placed().transform(vertices)),
            _ => None,
        }
    }
    
    pub(crate) fn placed(&self) -> PlacedShape<'_> {
        PlacedShape {
            position: self.position,
            shape: &self.shape,
            rotation: self.rotation,
        }
    }
}

/// Borrowed (position, shape, rotation) triple
///
/// Compound parts are walked as `PlacedShape`s so queries never clone the
/// part shapes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlacedShape<'a> {
    pub position: Vec2,
    pub shape: &'a HitboxShape,
    pub rotation: f32,
}

impl<'a> PlacedShape<'a> {
    /// Placement of a compound part under this parent
    pub fn part(&self, part: &'a CompoundPart) -> PlacedShape<'a> {
        PlacedShape {
            position: self.position + part.offset.rotated(self.rotation),
            shape: &part.shape,
            rotation: self.rotation,
        }
    }
    
    /// Local vertices to world space
    pub fn transform(&self, vertices: &[Vec2]) -> Vec<Vec2> {
        CollisionDetection::transform_vertices(vertices, self.position, self.rotation)
    }
    
    pub fn bounding_box(&self) -> BoundingBox {
        match self.shape {
            HitboxShape::Aabb { width, height } => {
                BoundingBox::new(self.position.x, self.position.y, *width, *height)
            }
            HitboxShape::Circle { radius } => BoundingBox::new(
                self.position.x - radius,
                self.position.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
            HitboxShape::Polygon { vertices } => BoundingBox::from_points(&self.transform(vertices))
                .unwrap_or_else(|| BoundingBox::empty_at(self.position)),
            HitboxShape::PixelMask { mask } => BoundingBox::new(
                self.position.x,
                self.position.y,
                mask.width() as f32,
                mask.height() as f32,
            ),
            HitboxShape::Compound { parts } => parts
                .iter()
                .map(|part| self.part(part).bounding_box())
                .reduce(|acc, b| acc.union(&b))
                .unwrap_or_else(|| BoundingBox::empty_at(self.position)),
        }
    }
    
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self.shape {
            HitboxShape::Aabb { width, height } => {
                BoundingBox::new(self.position.x, self.position.y, *width, *height)
                    .contains_point(point)
            }
            HitboxShape::Circle { radius } => {
                (point - self.position).norm_squared() <= radius * radius
            }
            HitboxShape::Polygon { vertices } => {
                CollisionDetection::point_in_polygon(point, &self.transform(vertices))
            }
            HitboxShape::PixelMask { mask } => {
                let local = point - self.position;
                mask.is_solid(local.x.floor() as i32, local.y.floor() as i32)
            }
            HitboxShape::Compound { parts } => parts
                .iter()
                .any(|part| self.part(part).contains_point(point)),
        }
    }
}
