//! Asset loading for hitbox generation
//!
//! Decodes images into raw RGBA so the collision core can derive pixel
//! masks and polygon hitboxes from transparency.

pub mod image_loader;

pub use image_loader::ImageData;

use thiserror::Error;

/// Asset system errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),
    
    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),
    
    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),
    
    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
