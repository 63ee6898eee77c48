mod common;

use common::at;
use opledger_core::db::migrations::{latest_version, schema_version};
use opledger_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection};

#[test]
fn fresh_store_gets_the_ledger_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_eq!(
        columns(&conn, "operation_types"),
        ["id", "name", "description", "is_income"]
    );
    assert_eq!(
        columns(&conn, "operations"),
        ["id", "name", "amount", "created", "description", "type_id"]
    );
}

#[test]
fn store_refuses_operations_without_a_stored_type() {
    let conn = open_db_in_memory().unwrap();

    let inserted = conn.execute(
        "INSERT INTO operations (id, name, amount, created, type_id)
         VALUES ('op-1', 'coffee', 3, ?1, 'no-such-type');",
        params![at(2023, 2, 1, 8, 30).to_string()],
    );
    assert!(inserted.is_err());
}

#[test]
fn reopening_a_ledger_file_keeps_its_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO operation_types (id, name, is_income) VALUES ('t-1', 'Salary', 1);",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second).unwrap(), latest_version());
    let name: String = second
        .query_row("SELECT name FROM operation_types WHERE id = 't-1';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "Salary");
}

#[test]
fn ledger_file_from_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.pragma_update(None, "user_version", 999).unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, known } => {
            assert_eq!(found, 999);
            assert_eq!(known, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}
