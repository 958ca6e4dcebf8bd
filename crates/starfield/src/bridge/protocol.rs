//! Frame protocol read by the TypeScript renderer.
//! Must stay in sync with the page's `protocol.ts`.
//!
//! Two regions, both plain f32:
//! ```text
//! [Header: 16 floats]                 written once per frame
//! [Positions: max_particles × 3]      x, y, z per particle; [0, active_count) valid
//! ```
//!
//! The renderer sets its draw range to `active_count` and re-uploads the
//! positions only when the header's dirty flag is non-zero.

use bytemuck::{Pod, Zeroable};

use crate::api::config::FieldConfig;
use crate::api::field::Field;
use crate::api::types::FieldPhase;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Floats per particle position (wire format — never changes).
pub const POSITION_FLOATS: usize = 3;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Per-frame header. Field order is the wire order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameHeader {
    pub protocol_version: f32,
    pub frame_counter: f32,
    pub capacity: f32,
    pub active_count: f32,
    /// 1.0 when positions changed since the last upload.
    pub dirty: f32,
    pub scroll_progress: f32,
    pub rotation_speed: f32,
    /// Accumulated model spin, radians.
    pub model_yaw: f32,
    pub particle_radius: f32,
    /// 0 = dispersed, 1 = engaging, 2 = sector tracking.
    pub phase: f32,
    pub regenerations: f32,
    pub reserved: [f32; 5],
}

impl FrameHeader {
    pub const FLOATS: usize = HEADER_FLOATS;

    /// Snapshot the field's observable state. `dirty` is passed in because
    /// reading it from the field clears it.
    pub fn capture(field: &Field, dirty: bool) -> Self {
        let phase = match field.phase() {
            FieldPhase::Dispersed => 0.0,
            FieldPhase::Engaging => 1.0,
            FieldPhase::SectorTracking => 2.0,
        };
        Self {
            protocol_version: PROTOCOL_VERSION,
            frame_counter: field.frame() as f32,
            capacity: field.buffer().capacity() as f32,
            active_count: field.buffer().active_count() as f32,
            dirty: if dirty { 1.0 } else { 0.0 },
            scroll_progress: field.scroll_progress(),
            rotation_speed: field.rotation_speed(),
            model_yaw: field.model_yaw(),
            particle_radius: field.particle_radius(),
            phase,
            regenerations: field.regenerations() as f32,
            reserved: [0.0; 5],
        }
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}

/// Buffer sizes derived from the configured capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum particles.
    pub max_particles: usize,
    /// Size of the position section in floats.
    pub position_data_floats: usize,
}

impl ProtocolLayout {
    pub fn new(max_particles: usize) -> Self {
        Self {
            max_particles,
            position_data_floats: max_particles.saturating_mul(POSITION_FLOATS),
        }
    }

    pub fn from_config(config: &FieldConfig) -> Self {
        Self::new(config.max_particles)
    }
}
