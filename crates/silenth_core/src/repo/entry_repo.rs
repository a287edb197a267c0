//! Collective entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Run the timeline query: filter on `time_slot`, newest
//!   `original_created_at` first, offset pagination with a total count.
//! - Archive new entries together with their tags.
//!
//! # Invariants
//! - Timeline order is `original_created_at DESC, id DESC`; the `id` tie-break
//!   keeps equal timestamps in a stable order across calls.
//! - Count and page rows are read inside one transaction: the caller's when
//!   one is open, otherwise a short-lived one owned by the query.
//! - There is no update or delete path for entries.

use crate::db::DbError;
use crate::model::entry::{Entry, EntryId, EntryValidationError, NewEntry};
use crate::model::page::{Page, PageRequest, PageRequestError};
use crate::model::time_slot::TimeSlot;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    time_slot,
    original_created_at,
    content,
    era_year,
    era_month
FROM collective_entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    InvalidPage(PageRequestError),
    InvalidEntry(EntryValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPage(err) => write!(f, "{err}"),
            Self::InvalidEntry(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPage(err) => Some(err),
            Self::InvalidEntry(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<PageRequestError> for RepoError {
    fn from(value: PageRequestError) -> Self {
        Self::InvalidPage(value)
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::InvalidEntry(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the collective timeline.
pub trait EntryRepository {
    /// Returns one page of entries in `time_slot`, newest first.
    fn find_by_time_slot(
        &self,
        time_slot: TimeSlot,
        request: &PageRequest,
    ) -> RepoResult<Page<Entry>>;
    /// Gets one entry by id.
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>>;
    /// Persists a new entry and returns its storage-assigned id.
    fn archive_entry(&self, entry: &NewEntry) -> RepoResult<EntryId>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn find_by_time_slot(
        &self,
        time_slot: TimeSlot,
        request: &PageRequest,
    ) -> RepoResult<Page<Entry>> {
        let offset = request.offset()?;

        // Inside a caller transaction the snapshot is already theirs.
        if !self.conn.is_autocommit() {
            return read_page(self.conn, time_slot, request, offset);
        }

        let tx = self.conn.unchecked_transaction()?;
        let page = read_page(&tx, time_slot, request, offset)?;
        tx.commit()?;
        Ok(page)
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(self.conn, row)?));
        }
        Ok(None)
    }

    fn archive_entry(&self, entry: &NewEntry) -> RepoResult<EntryId> {
        entry.validate()?;

        if !self.conn.is_autocommit() {
            return insert_entry(self.conn, entry);
        }

        let tx = self.conn.unchecked_transaction()?;
        let id = insert_entry(&tx, entry)?;
        tx.commit()?;
        Ok(id)
    }
}

fn read_page(
    conn: &Connection,
    time_slot: TimeSlot,
    request: &PageRequest,
    offset: i64,
) -> RepoResult<Page<Entry>> {
    let total: i64 = conn.query_row(
        "SELECT COUNT(*) FROM collective_entries WHERE time_slot = ?1;",
        [time_slot.as_str()],
        |row| row.get(0),
    )?;
    let total = u64::try_from(total)
        .map_err(|_| RepoError::InvalidData(format!("negative row count `{total}`")))?;

    let mut stmt = conn.prepare(&format!(
        "{ENTRY_SELECT_SQL}
         WHERE time_slot = ?1
         ORDER BY original_created_at DESC, id DESC
         LIMIT ?2 OFFSET ?3;"
    ))?;
    let mut rows = stmt.query(params![time_slot.as_str(), request.size, offset])?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next()? {
        entries.push(parse_entry_row(conn, row)?);
    }

    Ok(Page::new(entries, request, total))
}

fn insert_entry(conn: &Connection, entry: &NewEntry) -> RepoResult<EntryId> {
    conn.execute(
        "INSERT INTO collective_entries (
            time_slot,
            original_created_at,
            content,
            era_year,
            era_month
        ) VALUES (
            ?1,
            ?2,
            ?3,
            CAST(strftime('%Y', ?2 / 1000, 'unixepoch') AS INTEGER),
            CAST(strftime('%m', ?2 / 1000, 'unixepoch') AS INTEGER)
        );",
        params![
            entry.time_slot.as_str(),
            entry.original_created_at,
            entry.content.as_str(),
        ],
    )?;
    let id = conn.last_insert_rowid();

    let mut insert_tag = conn.prepare(
        "INSERT INTO collective_entry_tags (entry_id, position, name)
         VALUES (?1, ?2, ?3);",
    )?;
    for (position, tag) in entry.tags.iter().enumerate() {
        insert_tag.execute(params![id, position as i64, tag.trim()])?;
    }

    Ok(id)
}

fn parse_entry_row(conn: &Connection, row: &Row<'_>) -> RepoResult<Entry> {
    let id: EntryId = row.get("id")?;

    let slot_text: String = row.get("time_slot")?;
    let time_slot = parse_time_slot(&slot_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid time slot `{slot_text}` in collective_entries.time_slot"
        ))
    })?;

    let era_month: i64 = row.get("era_month")?;
    let era_month = u32::try_from(era_month)
        .ok()
        .filter(|month| (1..=12).contains(month))
        .ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid era month `{era_month}` in collective_entries.era_month"
            ))
        })?;

    Ok(Entry {
        id,
        time_slot,
        original_created_at: row.get("original_created_at")?,
        content: row.get("content")?,
        era_year: row.get("era_year")?,
        era_month,
        tags: load_tags(conn, id)?,
    })
}

fn load_tags(conn: &Connection, id: EntryId) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT name
         FROM collective_entry_tags
         WHERE entry_id = ?1
         ORDER BY position ASC;",
    )?;
    let tags = stmt
        .query_map([id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tags)
}

// Storage values are exact; `TimeSlot::parse` is lenient for caller input.
fn parse_time_slot(value: &str) -> Option<TimeSlot> {
    TimeSlot::ALL
        .into_iter()
        .find(|slot| slot.as_str() == value)
}
