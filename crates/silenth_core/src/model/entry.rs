//! Collective entry domain model.
//!
//! # Responsibility
//! - Define the read model returned by timeline queries.
//! - Define the archive input accepted by the write path.
//!
//! # Invariants
//! - `id`, `era_year` and `era_month` are assigned by storage.
//! - `time_slot` and `original_created_at` are fixed at archive time.
//! - Archive input must carry non-empty content and non-blank tags.

use crate::model::time_slot::TimeSlot;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned entry identifier.
pub type EntryId = i64;

/// 9999-12-31T23:59:59.999Z, the last instant SQLite date functions accept.
pub const MAX_ORIGINAL_CREATED_AT_MS: i64 = 253_402_300_799_999;

/// One archived record in the collective timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Serialized as `entryId` to match the timeline payload.
    #[serde(rename = "entryId")]
    pub id: EntryId,
    pub time_slot: TimeSlot,
    /// Unix epoch milliseconds of the original write.
    pub original_created_at: i64,
    pub content: String,
    /// UTC calendar year of `original_created_at`.
    pub era_year: i32,
    /// UTC calendar month (1-12) of `original_created_at`.
    pub era_month: u32,
    /// Tag names in attachment order.
    pub tags: Vec<String>,
}

/// Archive request for a new timeline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub time_slot: TimeSlot,
    /// Unix epoch milliseconds of the original write.
    pub original_created_at: i64,
    pub content: String,
    pub tags: Vec<String>,
}

/// Validation failure for archive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyContent,
    BlankTag { position: usize },
    /// Outside `0..=MAX_ORIGINAL_CREATED_AT_MS`.
    TimestampOutOfRange(i64),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "entry content cannot be empty"),
            Self::BlankTag { position } => write!(f, "tag at position {position} is blank"),
            Self::TimestampOutOfRange(value) => write!(
                f,
                "original_created_at must be within 0..={MAX_ORIGINAL_CREATED_AT_MS}, got {value}"
            ),
        }
    }
}

impl Error for EntryValidationError {}

impl NewEntry {
    /// Creates archive input without tags.
    pub fn new(time_slot: TimeSlot, original_created_at: i64, content: impl Into<String>) -> Self {
        Self {
            time_slot,
            original_created_at,
            content: content.into(),
            tags: Vec::new(),
        }
    }

    /// Appends tags in the given order.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Checks archive invariants before persistence.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.content.trim().is_empty() {
            return Err(EntryValidationError::EmptyContent);
        }
        if !(0..=MAX_ORIGINAL_CREATED_AT_MS).contains(&self.original_created_at) {
            return Err(EntryValidationError::TimestampOutOfRange(
                self.original_created_at,
            ));
        }
        if let Some(position) = self.tags.iter().position(|tag| tag.trim().is_empty()) {
            return Err(EntryValidationError::BlankTag { position });
        }
        Ok(())
    }
}
