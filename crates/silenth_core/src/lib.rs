//! Core of the silenth collective timeline.
//! Stores archived entries and serves them by time slot, newest first.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{
    Entry, EntryId, EntryValidationError, NewEntry, MAX_ORIGINAL_CREATED_AT_MS,
};
pub use model::page::{Page, PageRequest, PageRequestError};
pub use model::time_slot::TimeSlot;
pub use repo::entry_repo::{EntryRepository, RepoError, RepoResult, SqliteEntryRepository};
pub use service::entry_query_service::{EntryQueryService, QueryError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
