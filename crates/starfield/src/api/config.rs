use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest buffer a config may request. Positions alone take 12 bytes per particle.
pub const MAX_PARTICLES_LIMIT: usize = 4_000_000;

/// Errors raised while loading a field configuration from the host page.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The buffer would hold no particles.
    #[error("max_particles must be greater than zero")]
    ZeroCapacity,

    /// The buffer would not fit in wasm memory.
    #[error("max_particles ({requested}) exceeds the limit of {limit}")]
    CapacityTooLarge { requested: usize, limit: usize },

    /// More particles requested at mount than the buffer can hold.
    #[error("initial_particles ({initial}) exceeds max_particles ({max})")]
    InitialExceedsCapacity { initial: usize, max: usize },

    /// Speed ceiling must be a positive finite number.
    #[error("speed_max must be positive, got {0}")]
    InvalidSpeedMax(f32),

    /// Gather speed range is empty or inverted.
    #[error("gather_speed_min ({min}) must not exceed gather_speed_max ({max})")]
    InvalidGatherSpeedRange { min: f32, max: f32 },

    /// A tuning constant was NaN or infinite.
    #[error("{0} must be finite")]
    NonFinite(&'static str),
}

/// Configuration for a particle field, provided by the host page on mount.
///
/// Every field has a default, so a partial JSON object (or `{}`) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Buffer capacity, allocated once (default: 300000).
    pub max_particles: usize,
    /// Particles scattered on mount (default: 1000).
    pub initial_particles: usize,
    /// Particles activated per engaged tick (default: 20).
    pub growth_increment: usize,
    /// Sphere radius used until the model reports its size (default: 1500).
    pub default_radius: f32,
    /// Multiplier from model dimension to particle radius (default: 1.5).
    pub radius_scale: f32,
    /// Half-angle of the sector cone at full scroll progress, radians (default: PI/3).
    pub sector_half_angle: f32,
    /// Gather jitter per axis, as a fraction of the model dimension (default: 0.02).
    pub gather_jitter: f32,
    /// Gather anchor, as fractions of the model dimension (default: [0, 0.2, 0.1]).
    pub gather_anchor: [f32; 3],
    /// Scroll progress gained per unit of wheel delta (default: 0.0001).
    pub progress_per_delta: f32,
    /// Rotation speed gained or lost per unit of wheel delta (default: 0.0001).
    pub speed_per_delta: f32,
    /// Rotation speed ceiling (default: 0.05).
    pub speed_max: f32,
    /// Per-axis velocity bound for freshly generated particles (default: 0.01).
    pub velocity_max: f32,
    /// Lower bound of the per-particle gather speed (default: 0.5).
    pub gather_speed_min: f32,
    /// Upper bound of the per-particle gather speed (default: 1.3).
    pub gather_speed_max: f32,
    /// Velocity multiplier applied while at rest (default: 100).
    pub drift_boost: f32,
    /// RNG seed (default: 42).
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_particles: 300_000,
            initial_particles: 1000,
            growth_increment: 20,
            default_radius: 1500.0,
            radius_scale: 1.5,
            sector_half_angle: std::f32::consts::FRAC_PI_3,
            gather_jitter: 0.02,
            gather_anchor: [0.0, 0.2, 0.1],
            progress_per_delta: 0.0001,
            speed_per_delta: 0.0001,
            speed_max: 0.05,
            velocity_max: 0.01,
            gather_speed_min: 0.5,
            gather_speed_max: 1.3,
            drift_boost: 100.0,
            seed: 42,
        }
    }
}

impl FieldConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check capacity and tuning constants for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_particles == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_particles > MAX_PARTICLES_LIMIT {
            return Err(ConfigError::CapacityTooLarge {
                requested: self.max_particles,
                limit: MAX_PARTICLES_LIMIT,
            });
        }
        if self.initial_particles > self.max_particles {
            return Err(ConfigError::InitialExceedsCapacity {
                initial: self.initial_particles,
                max: self.max_particles,
            });
        }

        let finite = [
            ("default_radius", self.default_radius),
            ("radius_scale", self.radius_scale),
            ("sector_half_angle", self.sector_half_angle),
            ("gather_jitter", self.gather_jitter),
            ("gather_anchor", self.gather_anchor[0]),
            ("gather_anchor", self.gather_anchor[1]),
            ("gather_anchor", self.gather_anchor[2]),
            ("progress_per_delta", self.progress_per_delta),
            ("speed_per_delta", self.speed_per_delta),
            ("velocity_max", self.velocity_max),
            ("gather_speed_min", self.gather_speed_min),
            ("gather_speed_max", self.gather_speed_max),
            ("drift_boost", self.drift_boost),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }

        if !(self.speed_max.is_finite() && self.speed_max > 0.0) {
            return Err(ConfigError::InvalidSpeedMax(self.speed_max));
        }
        if self.gather_speed_min > self.gather_speed_max {
            return Err(ConfigError::InvalidGatherSpeedRange {
                min: self.gather_speed_min,
                max: self.gather_speed_max,
            });
        }
        Ok(())
    }
}
