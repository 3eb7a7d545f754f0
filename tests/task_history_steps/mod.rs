//! Step definitions for task change history scenarios.

pub mod world;

mod given;
mod when;
