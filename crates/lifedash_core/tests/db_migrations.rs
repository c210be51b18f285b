use lifedash_core::db::migrations::{apply_migrations, current_user_version, latest_version};
use lifedash_core::db::{open_db, open_db_in_memory, DbError};
use tempfile::tempdir;

#[test]
fn open_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    assert!(latest_version() >= 1);
}

#[test]
fn apply_migrations_is_idempotent() {
    let mut conn = open_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let future_version = latest_version() + 1;
    conn.execute_batch(&format!("PRAGMA user_version = {future_version};"))
        .unwrap();

    match apply_migrations(&mut conn) {
        Err(DbError::UnsupportedSchemaVersion { db_version, .. }) => {
            assert_eq!(db_version, future_version);
        }
        other => panic!("expected unsupported-schema error, got {other:?}"),
    }
}

#[test]
fn file_database_reopens_with_schema_intact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lifedash.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
}

#[test]
fn schema_exposes_items_and_history_tables() {
    let conn = open_db_in_memory().unwrap();
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name;")
        .unwrap();
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .map(Result::unwrap)
        .collect();

    assert!(tables.iter().any(|name| name == "items"));
    assert!(tables.iter().any(|name| name == "dump_history"));
}
