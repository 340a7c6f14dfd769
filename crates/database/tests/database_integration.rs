//! Integration tests for the database handle.
//!
//! Covers schema enforcement, index maintenance through the public API,
//! snapshot transactions and the closed-database guard.

use tessera_database::{
    fields, Database, DatabaseConfig, Error, LookupPolicy, Predicate, Record, RecordId, Value,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn person(id: i64, name: &str, city: &str) -> tessera_database::FieldMap {
    fields([
        ("id", Value::Int64(id)),
        ("name", Value::from(name)),
        ("city", Value::from(city)),
    ])
}

/// Helper to create a `people` table with an index on `city`.
fn people_db() -> Database {
    init_tracing();
    let mut db = Database::new();
    db.create_table("people", ["id", "name", "city"]).unwrap();
    db.table_mut("people").unwrap().create_index("city");
    db.insert("people", person(1, "Alice", "NY")).unwrap();
    db.insert("people", person(2, "Bob", "LA")).unwrap();
    db.insert("people", person(3, "Carol", "NY")).unwrap();
    db
}

fn contents(db: &Database, table: &str) -> Vec<Record> {
    db.table(table).unwrap().iter().cloned().collect()
}

fn names(db: &Database, pred: &Predicate) -> Vec<String> {
    db.table("people")
        .unwrap()
        .find(pred)
        .iter()
        .filter_map(|r| r.get("name").and_then(|v| v.as_str()).map(String::from))
        .collect()
}

#[test]
fn test_missing_column_rejected_without_side_effects() {
    let mut db = people_db();
    let result = db.insert("people", fields([("id", Value::Int64(4)), ("name", "Dan".into())]));
    assert_eq!(result, Err(Error::missing_field("people", "city")));
    assert_eq!(db.table("people").unwrap().len(), 3);
    assert!(db.verify_indexes().is_ok());
}

#[test]
fn test_indexed_and_scanned_find_agree() {
    let mut db = people_db();
    db.create_table("plain", ["id", "name", "city"]).unwrap();
    for record in contents(&db, "people") {
        db.insert("plain", record.fields().clone()).unwrap();
    }

    for city in ["NY", "LA", "SF"] {
        let pred = Predicate::eq("city", city);
        let indexed: Vec<_> = db
            .table("people")
            .unwrap()
            .find(&pred)
            .iter()
            .map(|r| r.fields().clone())
            .collect();
        let scanned: Vec<_> = db
            .table("plain")
            .unwrap()
            .find(&pred)
            .iter()
            .map(|r| r.fields().clone())
            .collect();
        assert_eq!(indexed, scanned);
    }
}

#[test]
fn test_update_refiles_index() {
    let mut db = people_db();
    let people = db.table_mut("people").unwrap();
    let updated = people.update(&Predicate::eq("name", "Alice"), &fields([("city", "LA")]));
    assert_eq!(updated, 1);

    assert_eq!(names(&db, &Predicate::eq("city", "NY")), ["Carol"]);
    assert_eq!(names(&db, &Predicate::eq("city", "LA")), ["Alice", "Bob"]);
    assert!(db.verify_indexes().is_ok());
}

#[test]
fn test_delete_returns_stale_records() {
    let mut db = people_db();
    let removed = db
        .table_mut("people")
        .unwrap()
        .delete(&Predicate::eq("city", "NY"));
    assert_eq!(removed.len(), 2);
    assert!(removed.iter().all(|r| !r.is_fresh()));
    assert!(names(&db, &Predicate::eq("city", "NY")).is_empty());
    assert_eq!(db.total_record_count(), 1);
}

#[test]
fn test_rollback_restores_exactly() {
    let mut db = people_db();
    db.create_table("orders", ["id"]).unwrap();
    let before_people = contents(&db, "people");
    let before_orders = contents(&db, "orders");

    db.begin_transaction().unwrap();
    db.insert("people", person(4, "Dan", "SF")).unwrap();
    db.insert("orders", fields([("id", 10i64)])).unwrap();
    let people = db.table_mut("people").unwrap();
    people.update(&Predicate::eq("city", "LA"), &fields([("city", "NY")]));
    people.delete(&Predicate::eq("name", "Alice"));
    people.create_index("name");
    db.drop_table("orders").unwrap();
    db.create_table("audit", ["id"]).unwrap();

    db.rollback().unwrap();

    assert_eq!(contents(&db, "people"), before_people);
    assert_eq!(contents(&db, "orders"), before_orders);
    assert!(!db.has_table("audit"));
    assert!(!db.table("people").unwrap().has_index("name"));
    assert_eq!(names(&db, &Predicate::eq("city", "NY")), ["Alice", "Carol"]);
    assert!(db.verify_indexes().is_ok());
}

#[test]
fn test_rollback_does_not_reissue_handles() {
    let mut db = people_db();
    db.begin_transaction().unwrap();
    let dropped: RecordId = db.insert("people", person(4, "Dan", "SF")).unwrap();
    db.rollback().unwrap();

    let fresh = db.insert("people", person(5, "Eve", "SF")).unwrap();
    assert!(fresh > dropped);
    assert!(db.table("people").unwrap().get(dropped).is_none());
}

#[test]
fn test_rollback_after_drop_does_not_reissue_handles() {
    init_tracing();
    let mut db = Database::new();
    db.create_table("t", ["id"]).unwrap();
    db.begin_transaction().unwrap();
    let inside = db.insert("t", fields([("id", 1i64)])).unwrap();
    db.drop_table("t").unwrap();
    db.rollback().unwrap();

    let after = db.insert("t", fields([("id", 2i64)])).unwrap();
    assert_ne!(inside, after);
    assert_eq!(db.table("t").unwrap().len(), 1);
}

#[test]
fn test_commit_keeps_live_state() {
    let mut db = people_db();
    db.begin_transaction().unwrap();
    db.insert("people", person(4, "Dan", "SF")).unwrap();
    db.commit().unwrap();

    assert_eq!(db.transaction_depth(), 0);
    assert_eq!(names(&db, &Predicate::eq("city", "SF")), ["Dan"]);
    assert_eq!(db.rollback(), Err(Error::NoActiveTransaction));
}

#[test]
fn test_nested_rollback_stays_at_inner_snapshot() {
    let mut db = people_db();
    db.begin_transaction().unwrap();
    db.insert("people", person(4, "Dan", "SF")).unwrap();
    db.begin_transaction().unwrap();
    db.insert("people", person(5, "Eve", "SF")).unwrap();

    db.rollback().unwrap();
    assert_eq!(names(&db, &Predicate::eq("city", "SF")), ["Dan"]);
    db.rollback().unwrap();
    assert_eq!(names(&db, &Predicate::eq("city", "SF")), ["Dan"]);
    assert_eq!(db.transaction_depth(), 2);
}

#[test]
fn test_nested_abort_unwinds_each_level() {
    let mut db = people_db();
    db.begin_transaction().unwrap();
    db.insert("people", person(4, "Dan", "SF")).unwrap();
    db.begin_transaction().unwrap();
    db.insert("people", person(5, "Eve", "SF")).unwrap();

    db.abort().unwrap();
    assert_eq!(names(&db, &Predicate::eq("city", "SF")), ["Dan"]);
    db.abort().unwrap();
    assert!(names(&db, &Predicate::eq("city", "SF")).is_empty());
    assert_eq!(db.transaction_depth(), 0);
}

#[test]
fn test_inner_commit_outer_rollback() {
    let mut db = people_db();
    db.begin_transaction().unwrap();
    db.begin_transaction().unwrap();
    db.insert("people", person(4, "Dan", "SF")).unwrap();
    db.commit().unwrap();
    db.rollback().unwrap();

    assert!(names(&db, &Predicate::eq("city", "SF")).is_empty());
    assert_eq!(db.transaction_depth(), 1);
}

#[test]
fn test_transaction_depth_limit() {
    init_tracing();
    let mut db = Database::with_config(DatabaseConfig::new().max_transaction_depth(2));
    db.begin_transaction().unwrap();
    db.begin_transaction().unwrap();
    assert_eq!(
        db.begin_transaction(),
        Err(Error::TransactionDepthExceeded { limit: 2 })
    );
    assert_eq!(db.transaction_depth(), 2);
}

#[test]
fn test_first_field_shortcut_policy() {
    init_tracing();
    let config = DatabaseConfig::new().lookup_policy(LookupPolicy::FirstFieldShortcut);
    let mut db = Database::with_config(config);
    db.create_table("people", ["id", "name", "city"]).unwrap();
    db.table_mut("people").unwrap().create_index("city");
    db.insert("people", person(1, "Alice", "NY")).unwrap();
    db.insert("people", person(2, "Bob", "NY")).unwrap();

    let pred = Predicate::eq("city", "NY").and("name", "Bob");
    assert_eq!(names(&db, &pred), ["Alice", "Bob"]);

    let conjunctive = people_db();
    assert_eq!(names(&conjunctive, &Predicate::eq("city", "NY").and("name", "Carol")), ["Carol"]);
}

#[test]
fn test_closed_database_rejects_everything() {
    let mut db = people_db();
    db.begin_transaction().unwrap();
    db.close();

    assert!(db.is_closed());
    assert_eq!(db.create_table("t", ["id"]), Err(Error::Closed));
    assert_eq!(db.table("people").unwrap_err(), Error::Closed);
    assert_eq!(db.table_mut("people").unwrap_err(), Error::Closed);
    assert_eq!(db.drop_table("people"), Err(Error::Closed));
    assert_eq!(db.insert("people", person(9, "Zed", "NY")), Err(Error::Closed));
    assert_eq!(db.begin_transaction(), Err(Error::Closed));
    assert_eq!(db.commit(), Err(Error::Closed));
    assert_eq!(db.rollback(), Err(Error::Closed));
    assert_eq!(db.abort(), Err(Error::Closed));
    assert!(db.table_names().is_empty());
    assert_eq!(db.total_record_count(), 0);

    db.close();
    assert!(db.is_closed());
}
