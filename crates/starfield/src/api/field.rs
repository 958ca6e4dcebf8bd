use glam::Vec3;

use crate::api::config::{ConfigError, FieldConfig};
use crate::api::types::{FieldPhase, TargetMode, WheelDirection};
use crate::core::buffer::ParticleBuffer;
use crate::core::rng::Rng;
use crate::input::queue::InputEvent;
use crate::input::wheel::{WheelGains, WheelState};
use crate::systems::{integrator, scatter, targets};
use crate::systems::targets::TargetParams;

/// Smallest model dimension the field accepts; tiny models would collapse the cloud.
pub const MIN_MODEL_DIMENSION: f32 = 10.0;
/// Largest model dimension the field accepts; anything bigger is clamped.
pub const MAX_MODEL_DIMENSION: f32 = 1.0e6;

/// The whole simulation state for one mounted visualization surface.
///
/// Owned by the mount lifecycle and passed by `&mut` to the wheel handler and
/// the per-frame tick; nothing else mutates it.
pub struct Field {
    config: FieldConfig,
    buffer: ParticleBuffer,
    wheel: WheelState,
    rng: Rng,
    target_mode: TargetMode,
    model_dimension: Option<f32>,
    particle_radius: f32,
    model_yaw: f32,
    regenerations: u64,
    frame: u64,
}

impl Field {
    /// Allocate the buffer and scatter the initial particles.
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut buffer = ParticleBuffer::with_capacity(config.max_particles);
        let mut rng = Rng::new(config.seed);
        let particle_radius = config.default_radius;

        buffer.activate(config.initial_particles);
        scatter::regenerate_all(&mut buffer, &mut rng, particle_radius, &config);

        log::info!(
            "field: mounted with {}/{} particles, radius {}",
            buffer.active_count(),
            buffer.capacity(),
            particle_radius
        );

        Ok(Self {
            config,
            buffer,
            wheel: WheelState::new(),
            rng,
            target_mode: TargetMode::default(),
            model_dimension: None,
            particle_radius,
            model_yaw: 0.0,
            regenerations: 0,
            frame: 0,
        })
    }

    /// Dispatch one queued host event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Wheel { delta } => self.on_wheel(delta),
            InputEvent::ModelResized { dimension } => self.set_model_dimension(dimension),
        }
    }

    /// Fold a wheel delta into the input state.
    ///
    /// An upward reversal snaps the field back to a fresh scatter; scrolling down
    /// switches to the gather policy and re-resolves targets immediately.
    pub fn on_wheel(&mut self, delta: f32) {
        if !delta.is_finite() {
            log::warn!("field: ignoring non-finite wheel delta {}", delta);
            return;
        }

        let gains = WheelGains {
            progress_per_delta: self.config.progress_per_delta,
            speed_per_delta: self.config.speed_per_delta,
            speed_max: self.config.speed_max,
        };
        let outcome = self.wheel.apply(delta, &gains);

        if outcome.rescatter() {
            self.regenerate_all();
        }

        match outcome.direction {
            WheelDirection::Down => {
                self.target_mode = TargetMode::Gather;
                self.update_targets(TargetMode::Gather);
            }
            WheelDirection::Up => {
                self.target_mode = TargetMode::Sector;
            }
        }
    }

    /// Late-bound model size. Rescales the cloud radius and re-resolves targets.
    pub fn set_model_dimension(&mut self, dimension: f32) {
        if !dimension.is_finite() || dimension <= 0.0 {
            log::warn!("field: ignoring invalid model dimension {}", dimension);
            return;
        }

        let dimension = dimension.clamp(MIN_MODEL_DIMENSION, MAX_MODEL_DIMENSION);
        let radius = dimension * self.config.radius_scale;
        let anchor = Vec3::from_array(self.config.gather_anchor) * dimension;
        let jitter = self.config.gather_jitter * dimension;
        if !radius.is_finite() || !anchor.is_finite() || !jitter.is_finite() {
            log::warn!(
                "field: ignoring model dimension {}, radius {} overflows",
                dimension,
                radius
            );
            return;
        }

        self.model_dimension = Some(dimension);
        self.particle_radius = radius;
        log::info!(
            "field: model dimension {}, particle radius {}",
            dimension,
            self.particle_radius
        );

        self.update_targets(self.target_mode);
    }

    /// Re-scatter every active particle (position and target coincide afterwards).
    pub fn regenerate_all(&mut self) {
        scatter::regenerate_all(&mut self.buffer, &mut self.rng, self.particle_radius, &self.config);
        self.regenerations += 1;
    }

    /// Recompute every active target under `mode`.
    pub fn update_targets(&mut self, mode: TargetMode) {
        let params = self.target_params();
        targets::update_targets(&mut self.buffer, &mut self.rng, mode, &params);
    }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self) {
        let speed = self.wheel.rotation_speed;

        if speed > 0.0 {
            // Gather targets only change on wheel events.
            if self.target_mode == TargetMode::Sector {
                self.update_targets(TargetMode::Sector);
            }
            if !self.buffer.is_full() {
                scatter::grow(&mut self.buffer, &mut self.rng, self.particle_radius, &self.config);
            }
        }

        integrator::integrate(&mut self.buffer, speed, self.config.drift_boost);

        self.model_yaw += speed;
        self.frame += 1;
    }

    fn target_params(&self) -> TargetParams {
        let dimension = self.model_dimension.unwrap_or(0.0);
        TargetParams {
            radius: self.particle_radius,
            scroll_progress: self.wheel.scroll_progress,
            sector_half_angle: self.config.sector_half_angle,
            anchor: Vec3::from_array(self.config.gather_anchor) * dimension,
            jitter: self.config.gather_jitter * dimension,
        }
    }

    // -- Accessors --

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    /// Read and clear the buffer's dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        self.buffer.take_dirty()
    }

    pub fn scroll_progress(&self) -> f32 {
        self.wheel.scroll_progress
    }

    pub fn rotation_speed(&self) -> f32 {
        self.wheel.rotation_speed
    }

    pub fn last_direction(&self) -> Option<WheelDirection> {
        self.wheel.last_direction
    }

    pub fn target_mode(&self) -> TargetMode {
        self.target_mode
    }

    pub fn phase(&self) -> FieldPhase {
        if self.wheel.rotation_speed <= 0.0 {
            FieldPhase::Dispersed
        } else if self.target_mode == TargetMode::Gather {
            FieldPhase::Engaging
        } else {
            FieldPhase::SectorTracking
        }
    }

    /// Full scatters since mount, not counting the initial one.
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    pub fn model_dimension(&self) -> Option<f32> {
        self.model_dimension
    }

    pub fn particle_radius(&self) -> f32 {
        self.particle_radius
    }

    /// Accumulated model spin in radians.
    pub fn model_yaw(&self) -> f32 {
        self.model_yaw
    }

    /// Ticks since mount.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
