//! Core data models for the analytics engine.

mod attack;
mod member;
mod stats;
mod war;

pub use attack::*;
pub use member::*;
pub use stats::*;
pub use war::*;
