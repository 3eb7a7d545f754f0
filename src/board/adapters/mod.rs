//! Persistence and directory adapters for the board module.
//!
//! Adapters implement the port contracts against concrete infrastructure
//! while the domain stays pure. The in-memory family backs the test suites
//! and mirrors the flat document schema of the production store, including
//! its string-encoded follower column.

pub mod memory;
