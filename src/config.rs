//! Engine configuration and validation.
//!
//! All tunables live here so every mounted grid behaves consistently.
//! Validation runs once at engine construction; a bad value is a descriptive
//! error, never NaN propagating through the physics loop.

/// Configuration for one mounted sphere grid.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Sphere radius in layout units.
    pub sphere_radius: f32,
    /// Rotation degrees per pixel of drag.
    pub drag_sensitivity: f32,
    /// Multiplicative velocity decay per tick, in (0, 1).
    pub momentum_decay: f32,
    /// Per-axis rotation cap in degrees per tick.
    pub max_rotation_speed: f32,
    /// Base item footprint (diameter at scale 1.0) in layout units.
    pub base_image_scale: f32,
    /// Ambient yaw spin once momentum has fully decayed.
    pub auto_rotate: bool,
    /// Ambient spin increment in degrees per tick.
    pub auto_rotate_speed: f32,
    /// Seed for the deterministic layout jitter.
    pub jitter_seed: u64,
    /// Overlap-relaxation sweeps per frame. 1 preserves the classic greedy
    /// single pass; higher values re-run the sweep for tighter packing.
    pub relax_passes: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 200.0,
            drag_sensitivity: 0.25,
            momentum_decay: 0.92,
            max_rotation_speed: 12.0,
            base_image_scale: 60.0,
            auto_rotate: false,
            auto_rotate_speed: 0.15,
            jitter_seed: 0x9E37,
            relax_passes: 1,
        }
    }
}

/// A rejected configuration value.
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid config `{}`: {}", self.field, self.message)
    }
}

impl std::fmt::Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConfigError({}: {})", self.field, self.message)
    }
}

impl GridConfig {
    /// Validate every field. Called once by `SphereGrid::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sphere_radius.is_finite() || self.sphere_radius <= 0.0 {
            return Err(ConfigError {
                field: "sphere_radius",
                message: format!("must be a positive number, got {}", self.sphere_radius),
            });
        }
        if !self.drag_sensitivity.is_finite() || self.drag_sensitivity < 0.0 {
            return Err(ConfigError {
                field: "drag_sensitivity",
                message: format!("must be non-negative, got {}", self.drag_sensitivity),
            });
        }
        if !self.momentum_decay.is_finite()
            || self.momentum_decay <= 0.0
            || self.momentum_decay >= 1.0
        {
            return Err(ConfigError {
                field: "momentum_decay",
                message: format!("must lie in (0, 1), got {}", self.momentum_decay),
            });
        }
        if !self.max_rotation_speed.is_finite() || self.max_rotation_speed <= 0.0 {
            return Err(ConfigError {
                field: "max_rotation_speed",
                message: format!("must be positive, got {}", self.max_rotation_speed),
            });
        }
        if !self.base_image_scale.is_finite() || self.base_image_scale <= 0.0 {
            return Err(ConfigError {
                field: "base_image_scale",
                message: format!("must be positive, got {}", self.base_image_scale),
            });
        }
        if !self.auto_rotate_speed.is_finite() || self.auto_rotate_speed < 0.0 {
            return Err(ConfigError {
                field: "auto_rotate_speed",
                message: format!("must be non-negative, got {}", self.auto_rotate_speed),
            });
        }
        if self.relax_passes == 0 {
            return Err(ConfigError {
                field: "relax_passes",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
