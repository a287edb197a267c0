//! Core use-case services.
//!
//! # Responsibility
//! - Validate caller input and delegate to repository implementations.
//! - Collapse storage failures into the error kinds callers act on.

pub mod entry_query_service;
