use silenth_core::db::open_db_in_memory;
use silenth_core::{
    EntryRepository, EntryValidationError, NewEntry, RepoError, SqliteEntryRepository, TimeSlot,
    MAX_ORIGINAL_CREATED_AT_MS,
};

// 2024-03-15T07:30:00Z
const MARCH_15_2024_MS: i64 = 1_710_487_800_000;

#[test]
fn archive_and_get_roundtrip_assigns_id_and_era() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let id = repo
        .archive_entry(
            &NewEntry::new(TimeSlot::Morning, MARCH_15_2024_MS, "first light")
                .with_tags(["calm", "hope"]),
        )
        .unwrap();

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.time_slot, TimeSlot::Morning);
    assert_eq!(loaded.original_created_at, MARCH_15_2024_MS);
    assert_eq!(loaded.content, "first light");
    assert_eq!(loaded.era_year, 2024);
    assert_eq!(loaded.era_month, 3);
    assert_eq!(loaded.tags, vec!["calm".to_string(), "hope".to_string()]);
}

#[test]
fn archive_assigns_increasing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let first = repo
        .archive_entry(&NewEntry::new(TimeSlot::Evening, 1_000, "one"))
        .unwrap();
    let second = repo
        .archive_entry(&NewEntry::new(TimeSlot::Evening, 1_000, "two"))
        .unwrap();
    assert!(second > first);
}

#[test]
fn archive_trims_tags_and_keeps_their_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let id = repo
        .archive_entry(
            &NewEntry::new(TimeSlot::LateDawn, 0, "sleepless").with_tags([" tired ", "calm"]),
        )
        .unwrap();

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.tags, vec!["tired".to_string(), "calm".to_string()]);
}

#[test]
fn archive_rejects_invalid_input_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let err = repo
        .archive_entry(&NewEntry::new(TimeSlot::Morning, 0, "   "))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidEntry(EntryValidationError::EmptyContent)
    ));

    let err = repo
        .archive_entry(&NewEntry::new(TimeSlot::Morning, 0, "body").with_tags([""]))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidEntry(EntryValidationError::BlankTag { position: 0 })
    ));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM collective_entries;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn archive_rejects_timestamp_beyond_year_9999_as_invalid_entry() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let err = repo
        .archive_entry(&NewEntry::new(
            TimeSlot::Morning,
            MAX_ORIGINAL_CREATED_AT_MS + 1,
            "far future",
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidEntry(EntryValidationError::TimestampOutOfRange(_))
    ));
}

#[test]
fn archive_accepts_last_supported_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let id = repo
        .archive_entry(&NewEntry::new(
            TimeSlot::Evening,
            MAX_ORIGINAL_CREATED_AT_MS,
            "last night",
        ))
        .unwrap();

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.era_year, 9999);
    assert_eq!(loaded.era_month, 12);
}

#[test]
fn archive_inside_caller_transaction_follows_its_outcome() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    conn.execute_batch("BEGIN;").unwrap();
    let id = repo
        .archive_entry(&NewEntry::new(TimeSlot::Morning, 0, "draft").with_tags(["calm"]))
        .unwrap();
    assert!(repo.get_entry(id).unwrap().is_some());
    conn.execute_batch("ROLLBACK;").unwrap();

    assert!(repo.get_entry(id).unwrap().is_none());
}

#[test]
fn get_missing_entry_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    assert!(repo.get_entry(42).unwrap().is_none());
}

#[test]
fn corrupted_era_month_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);
    let id = repo
        .archive_entry(&NewEntry::new(TimeSlot::Afternoon, 0, "body"))
        .unwrap();

    // The CHECK constraint guards writes, so bypass it for this row.
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute(
        "UPDATE collective_entries SET era_month = 13 WHERE id = ?1;",
        [id],
    )
    .unwrap();

    let err = repo.get_entry(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("era_month")));
}

#[test]
fn entry_serializes_with_timeline_field_names() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);
    let id = repo
        .archive_entry(&NewEntry::new(TimeSlot::EarlyDawn, MARCH_15_2024_MS, "x").with_tags(["calm"]))
        .unwrap();

    let entry = repo.get_entry(id).unwrap().unwrap();
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["entryId"], id);
    assert_eq!(json["timeSlot"], "EARLY_DAWN");
    assert_eq!(json["originalCreatedAt"], MARCH_15_2024_MS);
    assert_eq!(json["eraYear"], 2024);
    assert_eq!(json["eraMonth"], 3);
    assert_eq!(json["tags"][0], "calm");
}
