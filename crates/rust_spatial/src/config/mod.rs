//! Configuration system
//!
//! Settings are plain serde structs. Any type implementing [`Config`] can be
//! loaded from and saved to `.toml` or `.ron` files; missing fields fall back
//! to their defaults.

pub use serde::{Deserialize, Serialize};

use crate::culling::CullSpace;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

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

        log::debug!("Writing configuration to {path}");
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

    /// A value was read but makes no sense
    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Culling defaults
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    /// Algorithm used when the caller does not pick one
    pub space: CullSpace,
}

/// Picking defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingConfig {
    /// Furthest distance a picking ray reports a hit at
    pub max_distance: f32,
}

impl PickingConfig {
    /// Check the ray length is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_distance.is_nan() || self.max_distance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "Picking max distance must be positive, got {}",
                self.max_distance
            )));
        }
        Ok(())
    }
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self { max_distance: 1000.0 }
    }
}

/// Appearance of debug wireframes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugDrawConfig {
    /// Points sampled on each great circle of a sphere
    pub sphere_segments: u16,
    /// RGBA color of box outlines
    pub box_color: [f32; 4],
    /// RGBA color of frustum outlines
    pub frustum_color: [f32; 4],
    /// RGBA color of sphere outlines
    pub sphere_color: [f32; 4],
}

impl DebugDrawConfig {
    /// Check segment count and colors
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sphere_segments < 3 {
            return Err(ConfigError::Invalid(format!(
                "Sphere needs at least 3 segments per ring, got {}",
                self.sphere_segments
            )));
        }

        // Three rings of indices must fit a u16 index buffer
        if u32::from(self.sphere_segments) * 3 > u32::from(u16::MAX) {
            return Err(ConfigError::Invalid(format!(
                "Too many sphere segments: {}",
                self.sphere_segments
            )));
        }

        let colors = [
            ("box", self.box_color),
            ("frustum", self.frustum_color),
            ("sphere", self.sphere_color),
        ];
        for (name, color) in colors {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(ConfigError::Invalid(format!(
                    "{name} color components must lie in [0, 1], got {color:?}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for DebugDrawConfig {
    fn default() -> Self {
        Self {
            sphere_segments: 24,
            box_color: [0.0, 1.0, 0.0, 1.0],
            frustum_color: [1.0, 1.0, 0.0, 1.0],
            sphere_color: [0.0, 0.6, 1.0, 1.0],
        }
    }
}

/// Settings for the whole crate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
    /// Culling defaults
    pub culling: CullingConfig,
    /// Picking defaults
    pub picking: PickingConfig,
    /// Debug wireframe appearance
    pub debug_draw: DebugDrawConfig,
}

impl SpatialConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.picking.validate()?;
        self.debug_draw.validate()?;
        Ok(())
    }
}

impl Config for SpatialConfig {}
