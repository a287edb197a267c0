//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the timeline data access contract.
//! - Keep SQLite query details out of the service layer.
//!
//! # Invariants
//! - Writes validate `NewEntry` before any SQL mutation.
//! - Reads validate `PageRequest` before any SQL query.
//! - Unknown persisted values surface as `InvalidData`, never silently skipped.

pub mod entry_repo;
