//! Timeline query use-case.
//!
//! # Responsibility
//! - Validate time slot and pagination input from the calling layer.
//! - Return one page of entries for a slot, newest first.
//!
//! # Invariants
//! - Read-only: never mutates entries.
//! - Failures surface immediately as `InvalidArgument` or
//!   `StorageUnavailable`; nothing is retried here.
//! - Logs carry request metadata only, never entry content.

use crate::model::entry::Entry;
use crate::model::page::{Page, PageRequest};
use crate::model::time_slot::TimeSlot;
use crate::repo::entry_repo::{EntryRepository, RepoError};
use log::{debug, error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Error kinds returned to callers of the timeline query.
#[derive(Debug)]
pub enum QueryError {
    /// Caller input failed validation.
    InvalidArgument(String),
    /// Storage could not serve the query.
    StorageUnavailable(RepoError),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::StorageUnavailable(err) => Some(err),
        }
    }
}

impl From<RepoError> for QueryError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::InvalidPage(err) => Self::InvalidArgument(err.to_string()),
            other => Self::StorageUnavailable(other),
        }
    }
}

impl QueryError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::StorageUnavailable(_) => "storage_unavailable",
        }
    }
}

/// Stateless query facade over an `EntryRepository`.
pub struct EntryQueryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryQueryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns one page of entries in `time_slot`, ordered by
    /// `original_created_at` descending.
    ///
    /// A page index past the last page yields empty content, not an error.
    ///
    /// # Errors
    /// - `InvalidArgument` when `time_slot` is `None`, `page < 0` or `size <= 0`.
    /// - `StorageUnavailable` when the repository fails.
    pub fn find_by_time_slot(
        &self,
        time_slot: Option<TimeSlot>,
        request: &PageRequest,
    ) -> Result<Page<Entry>, QueryError> {
        let started_at = Instant::now();
        let result = validate(time_slot, request).and_then(|slot| {
            self.repo
                .find_by_time_slot(slot, request)
                .map_err(QueryError::from)
        });

        let slot_label = time_slot.map_or("none", TimeSlot::as_str);
        match &result {
            Ok(page) => debug!(
                "event=timeline_query module=service status=ok time_slot={slot_label} page={} size={} returned={} total={} duration_ms={}",
                request.page,
                request.size,
                page.number_of_elements,
                page.total_elements,
                started_at.elapsed().as_millis()
            ),
            Err(err @ QueryError::InvalidArgument(_)) => warn!(
                "event=timeline_query module=service status=rejected time_slot={slot_label} page={} size={} error_code={} error={err}",
                request.page,
                request.size,
                err.code()
            ),
            Err(err) => error!(
                "event=timeline_query module=service status=error time_slot={slot_label} page={} size={} duration_ms={} error_code={} error={err}",
                request.page,
                request.size,
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }

        result
    }

    /// Same as `find_by_time_slot`, taking the slot's wire name.
    ///
    /// Unknown or missing names fail with `InvalidArgument`.
    pub fn find_by_time_slot_name(
        &self,
        time_slot: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<Entry>, QueryError> {
        let slot = match time_slot {
            None => None,
            Some(name) => Some(TimeSlot::parse(name).ok_or_else(|| {
                QueryError::InvalidArgument(format!("unrecognized time slot `{}`", name.trim()))
            })?),
        };
        self.find_by_time_slot(slot, request)
    }
}

fn validate(time_slot: Option<TimeSlot>, request: &PageRequest) -> Result<TimeSlot, QueryError> {
    let slot = time_slot
        .ok_or_else(|| QueryError::InvalidArgument("time slot is required".to_string()))?;
    request
        .validate()
        .map_err(|err| QueryError::InvalidArgument(err.to_string()))?;
    Ok(slot)
}
