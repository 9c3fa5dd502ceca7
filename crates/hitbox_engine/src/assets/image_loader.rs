//! Image loading utilities for hitbox generation
//!
//! Provides PNG loading and the image-to-hitbox conversions used when a
//! sprite's collision shape should follow its transparency.

use std::path::Path;
use std::sync::Arc;

use image::ImageError;

use crate::assets::AssetError;
use crate::config::HitboxConfig;
use crate::foundation::math::Vec2;
use crate::physics::collision::{ConvexHullGenerator, Hitbox, HitboxShape, PixelMask};

/// Decoded RGBA image
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data, row-major
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        
        log::debug!("Loading image from: {:?}", path_ref);
        
        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }
        
        let img = image::open(path_ref).map_err(map_image_error)?;
        
        // Convert to RGBA8 so the alpha channel is always the 4th byte
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        
        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);
        
        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }
    
    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(map_image_error)?;
        
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        
        log::debug!("Loaded image {}x{} from memory", width, height);
        
        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }
    
    /// Wrap already-decoded RGBA bytes, checking the buffer size
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(AssetError::InvalidData(format!(
                "RGBA buffer for {}x{} image must be {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        
        Ok(Self { data, width, height })
    }
    
    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        
        Self {
            data: color.repeat(pixel_count),
            width,
            height,
        }
    }
    
    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
    
    /// Pixel mask of the pixels whose alpha is at least `alpha_threshold`
    pub fn generate_pixel_mask(&self, alpha_threshold: u8) -> PixelMask {
        PixelMask::from_pixels(
            &self.data,
            dimension(self.width),
            dimension(self.height),
            alpha_threshold,
        )
    }
    
    /// Polygon hitbox hugging the opaque pixels, placed at the origin
    ///
    /// Falls back to an AABB covering the whole image when no usable hull
    /// can be built.
    pub fn generate_hitbox(&self, alpha_threshold: u8, simplified: bool) -> Hitbox {
        let mask = self.generate_pixel_mask(alpha_threshold);
        let vertices = ConvexHullGenerator::from_pixel_mask(&mask, simplified);
        Self::hitbox_from_hull(&mask, vertices)
    }
    
    /// [`generate_hitbox`](Self::generate_hitbox) driven by a [`HitboxConfig`]
    pub fn generate_hitbox_with(&self, config: &HitboxConfig) -> Hitbox {
        let mask = self.generate_pixel_mask(config.alpha_threshold);
        
        let vertices = if config.simplify_hull {
            let edge_points = mask.edge_pixel_coordinates();
            if edge_points.len() < 3 {
                ConvexHullGenerator::from_pixel_mask(&mask, false)
            } else {
                ConvexHullGenerator::simplified_hull(&edge_points, config.max_hull_vertices)
            }
        } else {
            ConvexHullGenerator::from_pixel_mask(&mask, false)
        };
        
        Self::hitbox_from_hull(&mask, vertices)
    }
    
    /// Pixel-exact hitbox at the origin sharing a freshly built mask
    pub fn generate_mask_hitbox(&self, alpha_threshold: u8) -> Hitbox {
        Hitbox::pixel_mask(0.0, 0.0, Arc::new(self.generate_pixel_mask(alpha_threshold)))
    }
    
    fn hitbox_from_hull(mask: &PixelMask, vertices: Vec<Vec2>) -> Hitbox {
        if vertices.len() < 3 {
            log::debug!("Hull degenerate ({} vertices), falling back to AABB", vertices.len());
            return Hitbox::at(
                0.0,
                0.0,
                HitboxShape::aabb(mask.width() as f32, mask.height() as f32),
            );
        }
        
        log::debug!("Generated polygon hitbox with {} vertices", vertices.len());
        Hitbox::at(0.0, 0.0, HitboxShape::polygon(vertices))
    }
}

fn map_image_error(error: ImageError) -> AssetError {
    match error {
        ImageError::Unsupported(e) => AssetError::UnsupportedFormat(e.to_string()),
        ImageError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
            AssetError::NotFound(e.to_string())
        }
        other => AssetError::LoadFailed(format!("Failed to load image: {}", other)),
    }
}

/// Image dimensions beyond `i32::MAX` are clamped; no real sprite gets near
fn dimension(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
