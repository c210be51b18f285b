use lifedash_core::db::open_db_in_memory;
use lifedash_core::repo::backup::{ImportMode, BACKUP_VERSION};
use lifedash_core::{
    BookItem, BookStatus, Category, HistoryRepository, Item, ItemListQuery, ItemPayload,
    ItemRepository, ItemSource, NoteItem, RepoError, SqliteItemRepository, TaskItem, TaskKind,
    TaskPriority, TaskStatus,
};
use rusqlite::Connection;
use uuid::Uuid;

fn note_payload(title: &str) -> ItemPayload {
    ItemPayload::Note(NoteItem {
        title: title.to_string(),
        body: format!("{title} body"),
        tags: Vec::new(),
        pinned: false,
    })
}

fn task_payload(title: &str) -> ItemPayload {
    ItemPayload::Task(TaskItem {
        kind: TaskKind::Task,
        title: title.to_string(),
        description: String::new(),
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        due_date: None,
        tags: Vec::new(),
        frequency: None,
        completions: Vec::new(),
    })
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let item = Item::manual(note_payload("first note"));
    let id = repo.create_item(&item).unwrap();

    let record = repo.get_item(id).unwrap().unwrap();
    assert_eq!(record.uuid, item.uuid);
    assert_eq!(record.category(), Category::Notes);
    assert_eq!(record.source, ItemSource::Manual);
    assert_eq!(record.raw_input, None);
    assert_eq!(record.payload, item.payload);
    assert!(record.created_at > 0);
    assert_eq!(record.updated_at, None);
}

#[test]
fn get_unknown_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    assert!(repo.get_item(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn list_filters_by_category() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let note = Item::manual(note_payload("a note"));
    let task = Item::manual(task_payload("a task"));
    repo.create_item(&note).unwrap();
    repo.create_item(&task).unwrap();

    let all = repo.list_items(&ItemListQuery::default()).unwrap();
    assert_eq!(all.len(), 2);

    let query = ItemListQuery {
        category: Some(Category::Tasks),
        ..ItemListQuery::default()
    };
    let only_tasks = repo.list_items(&query).unwrap();
    assert_eq!(only_tasks.len(), 1);
    assert_eq!(only_tasks[0].uuid, task.uuid);
}

#[test]
fn list_applies_limit_and_offset() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    for index in 0..5 {
        repo.create_item(&Item::manual(note_payload(&format!("note {index}"))))
            .unwrap();
    }

    let query = ItemListQuery {
        limit: Some(2),
        ..ItemListQuery::default()
    };
    assert_eq!(repo.list_items(&query).unwrap().len(), 2);

    let query = ItemListQuery {
        limit: Some(10),
        offset: 4,
        ..ItemListQuery::default()
    };
    assert_eq!(repo.list_items(&query).unwrap().len(), 1);
}

#[test]
fn update_replaces_payload_and_bumps_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let item = Item::manual(note_payload("draft"));
    repo.create_item(&item).unwrap();

    let updated = note_payload("final");
    repo.update_item_payload(item.uuid, &updated).unwrap();

    let record = repo.get_item(item.uuid).unwrap().unwrap();
    assert_eq!(record.payload, updated);
    assert!(record.updated_at.is_some());
}

#[test]
fn update_can_move_an_item_to_another_category() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let item = Item::manual(note_payload("actually a task"));
    repo.create_item(&item).unwrap();

    repo.update_item_payload(item.uuid, &task_payload("actually a task"))
        .unwrap();

    let record = repo.get_item(item.uuid).unwrap().unwrap();
    assert_eq!(record.category(), Category::Tasks);
}

#[test]
fn update_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let missing = Uuid::new_v4();
    let err = repo
        .update_item_payload(missing, &note_payload("nope"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn delete_removes_the_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let item = Item::manual(note_payload("short lived"));
    repo.create_item(&item).unwrap();
    repo.delete_item(item.uuid).unwrap();

    assert!(repo.get_item(item.uuid).unwrap().is_none());
    assert!(matches!(
        repo.delete_item(item.uuid),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn validation_failure_blocks_create() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let mut item = Item::from_dumpbox(note_payload("captured"), "captured body");
    item.raw_input = None;

    let err = repo.create_item(&item).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteItemRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            actual_version: 0, ..
        }) => {}
        other => panic!("expected uninitialized-connection error, got {other:?}"),
    }
}

#[test]
fn mismatched_category_column_is_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let item = Item::manual(note_payload("sneaky"));
    let payload_json = serde_json::to_string(&item.payload).unwrap();
    conn.execute(
        "INSERT INTO items (uuid, category, payload, source) VALUES (?1, 'tasks', ?2, 'manual');",
        rusqlite::params![item.uuid.to_string(), payload_json],
    )
    .unwrap();

    let err = repo.get_item(item.uuid).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn backup_roundtrips_through_replace_import() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let book = Item::manual(ItemPayload::Book(BookItem {
        title: "Dune".to_string(),
        autor: vec!["Frank Herbert".to_string()],
        estado: BookStatus::Leido,
        tipo: "Otro".to_string(),
        calificacion: String::new(),
        tags: Vec::new(),
    }));
    repo.create_item(&book).unwrap();
    repo.append_history(
        "finished Dune",
        Category::Books,
        lifedash_core::Confidence::High,
    )
    .unwrap();

    let backup = repo.export_backup().unwrap();
    assert_eq!(backup.meta.version, BACKUP_VERSION);
    assert_eq!(backup.items.len(), 1);
    assert_eq!(backup.history.len(), 1);

    let json = backup.to_json().unwrap();
    let parsed = lifedash_core::DashboardBackup::from_json(&json).unwrap();

    let other_conn = open_db_in_memory().unwrap();
    let other_repo = SqliteItemRepository::try_new(&other_conn).unwrap();
    let summary = other_repo
        .import_backup(&parsed, ImportMode::Replace)
        .unwrap();
    assert_eq!(summary.items_imported, 1);
    assert_eq!(summary.history_imported, 1);

    let restored = other_repo.get_item(book.uuid).unwrap().unwrap();
    assert_eq!(restored.payload, book.payload);
}

#[test]
fn merge_import_skips_known_items() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let existing = Item::manual(note_payload("kept"));
    repo.create_item(&existing).unwrap();
    let backup = repo.export_backup().unwrap();

    let incoming = Item::manual(note_payload("new"));
    repo.create_item(&incoming).unwrap();

    let summary = repo.import_backup(&backup, ImportMode::Merge).unwrap();
    assert_eq!(summary.items_imported, 0);
    assert_eq!(repo.list_items(&ItemListQuery::default()).unwrap().len(), 2);
}

#[test]
fn import_rejects_unknown_backup_version() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let mut backup = repo.export_backup().unwrap();
    backup.meta.version = BACKUP_VERSION + 1;

    let err = repo
        .import_backup(&backup, ImportMode::Replace)
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
