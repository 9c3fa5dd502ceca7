//! # Hitbox Engine
//!
//! 2D collision geometry for sprite-based games.
//!
//! ## Features
//!
//! - **Shape Hitboxes**: AABBs, circles, convex polygons and compounds
//! - **Pixel Masks**: Bit-packed opacity masks with pixel-exact overlap tests
//! - **Hull Generation**: Convex hulls traced around sprite transparency
//! - **Configurable**: Generation parameters loadable from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use hitbox_engine::prelude::*;
//!
//! let ship = Hitbox::circle(10.0, 10.0, 5.0);
//! let rock = Hitbox::rect(12.0, 8.0, 4.0, 4.0);
//! assert!(ship.collides(&rock));
//!
//! let sprite = ImageData::solid_color(16, 16, [255, 255, 255, 255]);
//! let hull = sprite.generate_hitbox_with(&HitboxConfig::default());
//! assert!(hull.contains_point(Vec2::new(8.0, 8.0)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

pub mod foundation;
pub mod physics;
pub mod config;
pub mod assets;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::math::{Vec2, Vec2Ext},
        physics::collision::{
            BoundingBox, CollisionDetection, CompoundPart, ConvexHullGenerator, Hitbox,
            HitboxShape, PixelMask,
        },
        config::{Config, ConfigError, HitboxConfig},
        assets::{AssetError, ImageData},
    };
}
