use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

mod common;

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[test]
fn test_migrations_create_person_tables() {
    let test_db = common::TestDb::new("test_migrations_create_person_tables.db");
    let mut conn = test_db.pool().get().expect("connection");

    let tables: Count = diesel::sql_query(
        "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' \
         AND name IN ('people', 'addresses', 'phones', 'emails')",
    )
    .get_result(&mut conn)
    .expect("count tables");

    assert_eq!(tables.count, 4);
}

#[test]
fn test_foreign_keys_are_enforced() {
    let test_db = common::TestDb::new("test_foreign_keys_are_enforced.db");
    let mut conn = test_db.pool().get().expect("connection");

    let orphan = conn.batch_execute(
        "INSERT INTO phones (person_id, phone_number, phone_type) VALUES (999, '123', 'Mobile');",
    );

    assert!(orphan.is_err());
}
