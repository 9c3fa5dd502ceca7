//! Configuration system

pub use serde::{Serialize, Deserialize};

use crate::physics::collision::convex_hull::PIXEL_MASK_HULL_VERTICES;
use crate::physics::collision::pixel_mask::DEFAULT_ALPHA_THRESHOLD;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;
        
        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }
    
    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };
        
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    
    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
    
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
    
    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    
    /// Values that parse but make no sense
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # Hitbox Generation Configuration
///
/// Controls how hitboxes are derived from image transparency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxConfig {
    /// Minimum alpha (0-255) for a pixel to count as solid
    pub alpha_threshold: u8,
    /// Whether generated hulls are reduced with Douglas-Peucker
    pub simplify_hull: bool,
    /// Vertex budget for hulls generated from images
    pub max_hull_vertices: usize,
}

impl HitboxConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            simplify_hull: true,
            max_hull_vertices: PIXEL_MASK_HULL_VERTICES,
        }
    }
    
    /// Set alpha threshold
    pub fn with_alpha_threshold(mut self, threshold: u8) -> Self {
        self.alpha_threshold = threshold;
        self
    }
    
    /// Enable or disable hull simplification
    pub fn with_simplification(mut self, enabled: bool) -> Self {
        self.simplify_hull = enabled;
        self
    }
    
    /// Set the vertex budget for image hulls
    pub fn with_max_hull_vertices(mut self, max_vertices: usize) -> Self {
        self.max_hull_vertices = max_vertices;
        self
    }
    
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hull_vertices < 3 {
            log::warn!("Rejecting hitbox config with max_hull_vertices = {}", self.max_hull_vertices);
            return Err(ConfigError::Invalid(format!(
                "max_hull_vertices must be at least 3, got {}",
                self.max_hull_vertices
            )));
        }
        
        if self.alpha_threshold == 0 {
            log::warn!("alpha_threshold of 0 marks every pixel solid, including fully transparent ones");
        }
        
        Ok(())
    }
}

impl Default for HitboxConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for HitboxConfig {}
