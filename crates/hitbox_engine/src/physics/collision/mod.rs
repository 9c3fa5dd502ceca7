//! Narrow-phase collision detection for 2D hitboxes
//!
//! # Architecture
//!
//! - **Local Space Storage**: Shapes keep their geometry relative to the
//!   owning [`Hitbox`]'s position
//! - **On-Demand Transformation**: World-space vertices and boxes are derived
//!   per query and never cached
//! - **Total Queries**: Malformed shapes degrade to "no collision"; nothing
//!   in this module returns an error or panics on bad geometry
//!
//! # Module Organization
//!
//! - [`primitives`] - Axis-aligned bounding boxes
//! - [`shape`] - Hitbox shapes and positioned hitboxes
//! - [`detection`] - Shape-pair collision algorithms and dispatch
//! - [`pixel_mask`] - Bit-packed opacity masks
//! - [`convex_hull`] - Hull generation from points and masks

pub mod primitives;
pub mod shape;
pub mod detection;
pub mod pixel_mask;
pub mod convex_hull;

// Re-export commonly used types
pub use primitives::BoundingBox;
pub use shape::{CompoundPart, Hitbox, HitboxShape};
pub use detection::CollisionDetection;
pub use pixel_mask::PixelMask;
pub use convex_hull::ConvexHullGenerator;
