//! Domain model that mirrors the SQLite schema and gets passed throughout the
//! TUI. The type stays a light-weight data holder so the other layers can
//! focus on presentation and persistence logic. The attached document is
//! deliberately not part of this struct: listings exclude it and a separate
//! fetch retrieves the bytes on demand.

use std::fmt;

#[derive(Debug, Clone)]
/// One catalog entry. Field values other than `id` and `uploaded_at` come
/// straight from the add-book form; none of them can change after creation
/// because the catalog has no update operation.
pub struct Book {
    /// Primary key assigned by the store. Ids are sequential and never reused,
    /// even after the row is deleted.
    pub id: i64,
    /// Title shown in the catalog table and the reading view header.
    pub title: String,
    /// Author, required at creation just like the title.
    pub author: String,
    /// Free-form genre text. Kept as the user typed it.
    pub genre: String,
    /// Wall-clock timestamp captured by the store when the book was added,
    /// formatted `YYYY-MM-DD HH:MM:SS` in local time.
    pub uploaded_at: String,
}

impl Book {
    /// Compose the `Title - Author` string shown in the reading view header.
    pub fn display_title(&self) -> String {
        format!("{} - {}", self.title, self.author)
    }
}

impl fmt::Display for Book {
    /// Write the book title to any formatter so status messages can
    /// interpolate a book directly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
