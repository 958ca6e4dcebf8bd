pub mod queue;
pub mod wheel;
