use std::fs;

use dompet_client::setup::ensure_initialized_at;
use rusqlite::Connection;
use tempfile::tempdir;

fn user_version(connection: &Connection) -> Option<i64> {
    connection
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .ok()
}

#[test]
fn setup_creates_ledger_db_at_home_override() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");

        let context = ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(setup_context) = context {
            assert!(setup_context.db_path.ends_with("ledger-home/ledger.db"));
            assert!(setup_context.db_path.exists());
            assert_eq!(setup_context.schema_version, "v1");

            let connection = Connection::open(&setup_context.db_path);
            assert!(connection.is_ok());
            if let Ok(conn) = connection {
                assert_eq!(user_version(&conn), Some(1));
            }
        }
    }
}

#[test]
fn setup_is_idempotent_for_existing_ledger() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");

        let first = ensure_initialized_at(&home);
        assert!(first.is_ok());
        let second = ensure_initialized_at(&home);
        assert!(second.is_ok());

        if let (Ok(first_context), Ok(second_context)) = (first, second) {
            assert_eq!(first_context.db_path, second_context.db_path);
            assert_eq!(first_context.schema_version, second_context.schema_version);
        }
    }
}

#[test]
fn setup_fails_when_template_table_is_missing() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");

        let context = ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(setup_context) = context {
            let connection = Connection::open(&setup_context.db_path);
            assert!(connection.is_ok());
            if let Ok(conn) = connection {
                let drop_result = conn.execute_batch("DROP TABLE recurring_templates;");
                assert!(drop_result.is_ok());
            }

            let failed = ensure_initialized_at(&home);
            assert!(failed.is_err());
            if let Err(error) = failed {
                assert_eq!(error.code, "ledger_corrupt");
            }
        }
    }
}

#[test]
fn setup_maps_locked_database_to_ledger_locked() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");

        let context = ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(setup_context) = context {
            let connection = Connection::open(&setup_context.db_path);
            assert!(connection.is_ok());
            if let Ok(conn) = connection {
                let begin_lock = conn.execute_batch("BEGIN EXCLUSIVE;");
                assert!(begin_lock.is_ok());

                let locked_error = ensure_initialized_at(&home);
                assert!(locked_error.is_err());
                if let Err(error) = locked_error {
                    assert_eq!(error.code, "ledger_locked");
                }

                let rollback = conn.execute_batch("ROLLBACK;");
                assert!(rollback.is_ok());
            }
        }
    }
}

#[test]
fn setup_maps_corrupt_database_to_ledger_corrupt() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");
        let create_home = fs::create_dir_all(&home);
        assert!(create_home.is_ok());

        let write_file = fs::write(home.join("ledger.db"), "not-a-sqlite-database");
        assert!(write_file.is_ok());

        let result = ensure_initialized_at(&home);
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "ledger_corrupt");
        }
    }
}

#[test]
fn setup_maps_conflicting_schema_to_migration_failed() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");
        let create_home = fs::create_dir_all(&home);
        assert!(create_home.is_ok());

        let connection = Connection::open(home.join("ledger.db"));
        assert!(connection.is_ok());
        if let Ok(conn) = connection {
            let create_conflict = conn.execute_batch("CREATE TABLE wallets(id TEXT);");
            assert!(create_conflict.is_ok());
        }

        let result = ensure_initialized_at(&home);
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "migration_failed");
        }
    }
}
