//! Task ordering and change history for the Aalto board.
//!
//! This module keeps a board's tasks ordered inside their status buckets
//! and narrates every task change as an append-only history stream.
//! Positions are plain integers allocated in stride multiples so drag and
//! drop stays a single-document write; history entries denormalise the
//! acting member's name and the changed values so they remain renderable
//! after the referenced records are gone. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
