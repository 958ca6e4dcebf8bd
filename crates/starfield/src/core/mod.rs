pub mod buffer;
pub mod rng;
