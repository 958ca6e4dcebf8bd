pub mod integrator;
pub mod scatter;
pub mod targets;
