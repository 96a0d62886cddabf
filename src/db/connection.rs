use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use rusqlite::Connection;

use super::error::{StoreError, StoreResult};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-library-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "library.sqlite";
/// How long a statement waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Ensure the database file exists, run the lazy migration, and return a live
/// connection. The migration is a plain `CREATE TABLE IF NOT EXISTS`, so
/// opening an already provisioned catalog is a no-op and never touches
/// existing rows.
pub(super) fn ensure_schema(db_path: &Path) -> StoreResult<Connection> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            StoreError::unavailable(format!("failed to create data directory: {err}"))
        })?;
    }

    let conn = Connection::open(db_path)
        .map_err(|err| StoreError::unavailable(format!("failed to open SQLite database: {err}")))?;
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|err| StoreError::unavailable(format!("failed to set busy timeout: {err}")))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            genre TEXT NOT NULL,
            uploaded_at TEXT NOT NULL,
            document BLOB
        )",
        [],
    )
    .map_err(|err| StoreError::unavailable(format!("failed to create books table: {err}")))?;

    Ok(conn)
}

/// Resolve the absolute path to the SQLite database inside the user's home.
pub(super) fn default_db_path() -> StoreResult<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| StoreError::unavailable("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
