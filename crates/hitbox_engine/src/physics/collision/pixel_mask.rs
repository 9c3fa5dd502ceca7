//! Bit-packed opacity masks for pixel-exact collision
//!
//! A [`PixelMask`] stores one bit per pixel in 64-bit words, addressed
//! row-major (`bit = y * width + x`). Masks are immutable once built, so a
//! single mask can be shared behind an `Arc` by any number of hitboxes and
//! threads.

use serde::{Deserialize, Serialize};
use crate::foundation::math::Vec2;

const BITS_PER_WORD: usize = 64;

/// Cap on [`PixelMask::solid_pixel_coordinates`] output for large images
pub const MAX_SOLID_COORDINATES: usize = 10_000;

/// Alpha threshold used when callers have no preference
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 128;

/// Immutable per-pixel opacity bitmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PixelMaskData")]
pub struct PixelMask {
    width: i32,
    height: i32,
    bits: Vec<u64>,
}

/// Serialized form of a [`PixelMask`], checked before it becomes one
#[derive(Deserialize)]
struct PixelMaskData {
    width: i32,
    height: i32,
    bits: Vec<u64>,
}

impl TryFrom<PixelMaskData> for PixelMask {
    type Error = String;
    
    fn try_from(data: PixelMaskData) -> Result<Self, Self::Error> {
        let (width, height) = Self::sanitize_dimensions(data.width, data.height);
        let expected = Self::words_for(width, height);
        
        if data.bits.len() != expected {
            return Err(format!(
                "{}x{} pixel mask needs {} words, got {}",
                width,
                height,
                expected,
                data.bits.len()
            ));
        }
        
        let mut mask = Self { width, height, bits: data.bits };
        mask.clear_padding();
        Ok(mask)
    }
}

impl PixelMask {
    /// Creates a fully transparent mask
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = Self::sanitize_dimensions(width, height);
        Self {
            width,
            height,
            bits: vec![0; Self::words_for(width, height)],
        }
    }
    
    /// Builds a mask from row-major RGBA bytes (4 bytes per pixel)
    ///
    /// A pixel is solid when its alpha byte is `>= alpha_threshold`. Pixels
    /// missing from a short buffer are left transparent.
    pub fn from_pixels(pixels: &[u8], width: i32, height: i32, alpha_threshold: u8) -> Self {
        let mut mask = Self::new(width, height);
        let pixel_count = mask.pixel_count();
        
        if pixels.len() < pixel_count * 4 {
            log::warn!(
                "RGBA buffer holds {} bytes, expected {} for a {}x{} mask; missing pixels treated as transparent",
                pixels.len(),
                pixel_count * 4,
                mask.width,
                mask.height
            );
        }
        
        for (bit_index, rgba) in pixels.chunks_exact(4).take(pixel_count).enumerate() {
            if rgba[3] >= alpha_threshold {
                mask.bits[bit_index / BITS_PER_WORD] |= 1u64 << (bit_index % BITS_PER_WORD);
            }
        }
        
        log::debug!(
            "Built {}x{} pixel mask ({} solid pixels, threshold {})",
            mask.width,
            mask.height,
            mask.solid_pixel_count(),
            alpha_threshold
        );
        
        mask
    }
    
    /// Width in pixels
    pub fn width(&self) -> i32 {
        self.width
    }
    
    /// Height in pixels
    pub fn height(&self) -> i32 {
        self.height
    }
    
    /// Number of 64-bit words backing the mask
    pub fn word_count(&self) -> usize {
        self.bits.len()
    }
    
    /// Whether the pixel at `(x, y)` is solid
    ///
    /// Out-of-range coordinates are simply not solid.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return false;
        }
        
        // Non-negative and in range after the guard above
        let bit_index = y as usize * self.width as usize + x as usize;
        self.bits
            .get(bit_index / BITS_PER_WORD)
            .is_some_and(|word| word & (1u64 << (bit_index % BITS_PER_WORD)) != 0)
    }
    
    /// Number of solid pixels
    pub fn solid_pixel_count(&self) -> usize {
        let total_bits = self.pixel_count();
        let Some((last, full_words)) = self.bits.split_last() else {
            return 0;
        };
        
        let full: u32 = full_words.iter().map(|word| word.count_ones()).sum();
        
        // Padding beyond width*height in the final word never counts
        let valid_in_last = total_bits % BITS_PER_WORD;
        let last = if valid_in_last == 0 {
            *last
        } else {
            last & ((1u64 << valid_in_last) - 1)
        };
        
        (full + last.count_ones()) as usize
    }
    
    /// Every solid pixel, row-major, capped at [`MAX_SOLID_COORDINATES`]
    pub fn solid_pixel_coordinates(&self) -> Vec<Vec2> {
        let mut coords = Vec::with_capacity(self.solid_pixel_count().min(MAX_SOLID_COORDINATES));
        
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_solid(x, y) {
                    coords.push(Vec2::new(x as f32, y as f32));
                    if coords.len() >= MAX_SOLID_COORDINATES {
                        return coords;
                    }
                }
            }
        }
        
        coords
    }
    
    /// Solid pixels with at least one non-solid 4-connected neighbor
    ///
    /// Pixels on the mask border always qualify since out-of-range
    /// neighbors are not solid. This is the seed set for hull generation.
    pub fn edge_pixel_coordinates(&self) -> Vec<Vec2> {
        let mut coords = Vec::new();
        
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_solid(x, y) && self.is_edge(x, y) {
                    coords.push(Vec2::new(x as f32, y as f32));
                }
            }
        }
        
        coords
    }
    
    /// Pixel-exact overlap test against another mask
    ///
    /// Both positions are the masks' top-left corners in world space and are
    /// floored to whole pixels before the footprints are intersected.
    pub fn collides(&self, other: &PixelMask, self_position: Vec2, other_position: Vec2) -> bool {
        // Positions saturate at the i32 range; footprint ends are computed
        // in i64 so adding the size cannot overflow
        let self_min_x = i64::from(self_position.x.floor() as i32);
        let self_min_y = i64::from(self_position.y.floor() as i32);
        let other_min_x = i64::from(other_position.x.floor() as i32);
        let other_min_y = i64::from(other_position.y.floor() as i32);
        
        let min_x = self_min_x.max(other_min_x);
        let min_y = self_min_y.max(other_min_y);
        let max_x = (self_min_x + i64::from(self.width)).min(other_min_x + i64::from(other.width));
        let max_y = (self_min_y + i64::from(self.height)).min(other_min_y + i64::from(other.height));
        
        if min_x >= max_x || min_y >= max_y {
            return false;
        }
        
        // Inside the intersection every local coordinate is below the
        // owning mask's width or height, so it fits in i32
        for y in min_y..max_y {
            for x in min_x..max_x {
                if self.is_solid((x - self_min_x) as i32, (y - self_min_y) as i32)
                    && other.is_solid((x - other_min_x) as i32, (y - other_min_y) as i32)
                {
                    return true;
                }
            }
        }
        
        false
    }
    
    fn is_edge(&self, x: i32, y: i32) -> bool {
        [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
            .into_iter()
            .any(|(nx, ny)| !self.is_solid(nx, ny))
    }
    
    /// Zeroes the unused high bits of the last word
    fn clear_padding(&mut self) {
        let used = self.pixel_count() % BITS_PER_WORD;
        if used != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }
    
    fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
    
    fn words_for(width: i32, height: i32) -> usize {
        (width as usize * height as usize).div_ceil(BITS_PER_WORD)
    }
    
    fn sanitize_dimensions(width: i32, height: i32) -> (i32, i32) {
        if width < 0 || height < 0 {
            log::warn!("Negative pixel mask dimensions {}x{} clamped to zero", width, height);
        }
        (width.max(0), height.max(0))
    }
}
