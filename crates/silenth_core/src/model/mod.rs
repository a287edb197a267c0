//! Domain model for the collective-entry timeline.
//!
//! # Responsibility
//! - Define the archived entry record and its fixed time-slot taxonomy.
//! - Define pagination request/response envelopes shared by repo and service.
//!
//! # Invariants
//! - Every entry carries exactly one `TimeSlot` and one `original_created_at`.
//! - Neither field changes after the entry is archived.

pub mod entry;
pub mod page;
pub mod time_slot;
