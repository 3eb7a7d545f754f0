//! Step definitions for board column ordering scenarios.

pub mod world;

mod given;
mod when;
