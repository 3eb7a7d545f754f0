//! Aalto: task board ordering and history engine.
//!
//! This crate provides the ordering and change-tracking core of a team
//! task board: integer positions that keep each status bucket sorted
//! with single-document moves, presence-aware partial updates, and an
//! append-only history stream with display names resolved at write time.
//!
//! # Architecture
//!
//! Aalto follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (storage, directories)
//!
//! # Modules
//!
//! - [`board`]: Bucket ordering, task mutation, and change history

pub mod board;
