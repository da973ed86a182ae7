//! Matching of new donations and projects against the open pool.

pub mod engine;
pub mod error;
pub mod pairing;

#[cfg(test)]
mod engine_props;

pub use engine::{AllocationEngine, AllocationOutcome, Transfer};
pub use error::AllocationError;
pub use pairing::Pairing;
