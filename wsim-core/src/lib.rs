//! Core types and synthetic series generators for well meter simulation.
//!
//! Everything here is a pure computation over its arguments. Randomness is
//! always passed in as an [`rand::Rng`], so a seeded generator reproduces a
//! run exactly.

pub mod date_range;
pub mod error;
pub mod meter;
pub mod month;
pub mod partition;
pub mod progression;
pub mod schedule;
pub mod selection;

pub use error::{Result, WsimError};
