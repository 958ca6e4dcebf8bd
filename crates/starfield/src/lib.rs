pub mod api;
pub mod core;
pub mod systems;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, FieldConfig, MAX_PARTICLES_LIMIT};
pub use api::field::{Field, MAX_MODEL_DIMENSION, MIN_MODEL_DIMENSION};
pub use api::types::{FieldPhase, TargetMode, WheelDirection};
pub use crate::core::buffer::{ActiveSlices, ParticleBuffer};
pub use crate::core::rng::Rng;
pub use input::queue::{InputEvent, InputQueue};
pub use input::wheel::{WheelGains, WheelOutcome, WheelState};
pub use bridge::protocol::{FrameHeader, ProtocolLayout, HEADER_FLOATS, POSITION_FLOATS, PROTOCOL_VERSION};
pub use systems::scatter::{scatter, regenerate_all, grow};
pub use systems::targets::{update_targets, TargetParams};
pub use systems::integrator::{integrate, blend_factor, swirl};
