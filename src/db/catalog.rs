use std::path::Path;

use chrono::Local;
use rusqlite::{params, Connection, Error as SqlError};

use crate::models::Book;

use super::connection;
use super::error::{StoreError, StoreResult};

/// Timestamp layout written into `uploaded_at`, e.g. `2026-08-25 14:03:57`.
/// Lexicographic order on this format matches chronological order.
const UPLOADED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Handle to the book catalog. Owns the SQLite connection for the lifetime of
/// the program; every operation borrows the same connection instead of
/// reopening the file per call.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open the catalog at its default location under the user's home
    /// directory, creating the file and schema on first run.
    pub fn open() -> StoreResult<Self> {
        let path = connection::default_db_path()?;
        Self::open_at(path)
    }

    /// Open a catalog backed by an explicit file path. Tests use this to point
    /// the store at a scratch directory instead of the real home directory.
    pub fn open_at(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = connection::ensure_schema(path.as_ref())?;
        Ok(CatalogStore { conn })
    }

    /// Insert a new book row, returning the hydrated struct so the caller can
    /// push it straight into the in-memory list. The upload timestamp is taken
    /// from the local clock at the moment of the call.
    pub fn add_book(
        &self,
        title: &str,
        author: &str,
        genre: &str,
        document: Option<&[u8]>,
    ) -> StoreResult<Book> {
        require_field(title, "title")?;
        require_field(author, "author")?;
        require_field(genre, "genre")?;

        let uploaded_at = Local::now().format(UPLOADED_AT_FORMAT).to_string();

        self.conn
            .execute(
                "INSERT INTO books (title, author, genre, uploaded_at, document)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![title, author, genre, uploaded_at, document],
            )
            .map_err(|err| StoreError::write_failed(format!("failed to insert book: {err}")))?;

        let id = self.conn.last_insert_rowid();
        Ok(Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            uploaded_at,
        })
    }

    /// Retrieve every book in the order it was added. Ids are monotonic and
    /// never reused, so `ORDER BY id` reads back insertion order.
    pub fn list_books(&self) -> StoreResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, author, genre, uploaded_at FROM books ORDER BY id")
            .map_err(|err| {
                StoreError::query_failed(format!("failed to prepare book query: {err}"))
            })?;

        let books = stmt
            .query_map([], |row| {
                Ok(Book {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    genre: row.get(3)?,
                    uploaded_at: row.get(4)?,
                })
            })
            .map_err(|err| StoreError::query_failed(format!("failed to load books: {err}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| StoreError::query_failed(format!("failed to collect books: {err}")))?;

        Ok(books)
    }

    /// Load the stored document for one book. Returns `Ok(None)` both when the
    /// id is unknown and when the book was added without an attachment, so a
    /// missing document is never an error.
    pub fn fetch_document(&self, id: i64) -> StoreResult<Option<Vec<u8>>> {
        let result = self.conn.query_row(
            "SELECT document FROM books WHERE id = ?1",
            params![id],
            |row| row.get::<_, Option<Vec<u8>>>(0),
        );

        match result {
            Ok(document) => Ok(document),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(StoreError::query_failed(format!(
                "failed to load document: {err}"
            ))),
        }
    }

    /// Remove a book row along with its document. Deleting an id that is not
    /// present is a no-op, not an error.
    pub fn delete_book(&self, id: i64) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM books WHERE id = ?1", params![id])
            .map_err(|err| StoreError::write_failed(format!("failed to delete book: {err}")))?;

        Ok(())
    }
}

/// Reject blank required fields before they reach the database.
fn require_field(value: &str, field: &'static str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::EmptyField { field });
    }
    Ok(())
}
