//! Temporary databases for repository tests.

use std::sync::Arc;

use tempfile::TempDir;

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    _dir: TempDir,
}

/// Creates a migrated database in a fresh temp directory. Must be called from
/// within a Tokio runtime because it spawns the writer actor.
pub fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();
    init(&db_path).expect("Failed to initialize database");
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());
    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}
