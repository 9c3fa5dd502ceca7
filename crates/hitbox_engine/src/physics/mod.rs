//! Physics module for 2D collision detection
//!
//! Answers "do these two shapes overlap right now" for already-paired
//! candidates. Broad-phase culling, contact manifolds and collision
//! response are left to the caller.

pub mod collision;

pub use collision::{
    BoundingBox,
    CollisionDetection,
    CompoundPart,
    ConvexHullGenerator,
    Hitbox,
    HitboxShape,
    PixelMask,
};
