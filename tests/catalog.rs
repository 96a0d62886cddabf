//! Persistence tests for the book catalog store.
//!
//! These tests verify that books, their documents, and id allocation behave
//! across the full store lifecycle, including a close + reopen cycle.

use book_library_manager::{CatalogStore, StoreError};
use chrono::{Local, NaiveDateTime, Timelike};

fn catalog_store(dir: &std::path::Path) -> CatalogStore {
    CatalogStore::open_at(dir.join("library.sqlite")).unwrap()
}

#[test]
fn listing_an_empty_catalog_returns_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = catalog_store(dir.path());

    assert!(store.list_books().unwrap().is_empty());
}

#[test]
fn added_books_come_back_in_insertion_order() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = catalog_store(dir.path());

    let dune = store
        .add_book("Dune", "Frank Herbert", "Science Fiction", None)
        .unwrap();
    let emma = store.add_book("Emma", "Jane Austen", "Classic", None).unwrap();
    // A fresh catalog hands out ids starting at 1.
    assert_eq!(dune.id, 1);
    assert_eq!(emma.id, 2);

    let books = store.list_books().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].id, dune.id);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[0].author, "Frank Herbert");
    assert_eq!(books[0].genre, "Science Fiction");
    assert_eq!(books[1].id, emma.id);
    assert_eq!(books[1].title, "Emma");
}

#[test]
fn add_book_stamps_the_upload_time() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = catalog_store(dir.path());

    // Truncate to whole seconds since that is the stored precision.
    let before = Local::now().naive_local().with_nanosecond(0).unwrap();
    let book = store.add_book("Dune", "Frank Herbert", "Sci-Fi", None).unwrap();
    let after = Local::now().naive_local();

    let stamped = NaiveDateTime::parse_from_str(&book.uploaded_at, "%Y-%m-%d %H:%M:%S")
        .expect("upload timestamp should be formatted as YYYY-MM-DD HH:MM:SS");
    assert!(stamped >= before, "{stamped} should not predate {before}");
    assert!(stamped <= after, "{stamped} should not postdate {after}");

    // The listed row carries the same stamp the create call returned.
    let books = store.list_books().unwrap();
    assert_eq!(books[0].uploaded_at, book.uploaded_at);
}

#[test]
fn add_book_rejects_blank_required_fields() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = catalog_store(dir.path());

    let err = store.add_book("", "Frank Herbert", "Sci-Fi", None).unwrap_err();
    assert!(matches!(err, StoreError::EmptyField { field: "title" }));

    let err = store.add_book("Dune", "   ", "Sci-Fi", None).unwrap_err();
    assert!(matches!(err, StoreError::EmptyField { field: "author" }));

    let err = store.add_book("Dune", "Frank Herbert", "", None).unwrap_err();
    assert!(matches!(err, StoreError::EmptyField { field: "genre" }));

    // Nothing was written by any rejected call.
    assert!(store.list_books().unwrap().is_empty());
}

#[test]
fn documents_round_trip_byte_for_byte() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = catalog_store(dir.path());

    // Deliberately not valid UTF-8 so the blob path is exercised.
    let payload: Vec<u8> = vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xFF, 0x7F, 0x80, 0x0A];
    let book = store
        .add_book("Dune", "Frank Herbert", "Sci-Fi", Some(&payload))
        .unwrap();

    let fetched = store.fetch_document(book.id).unwrap();
    assert_eq!(fetched.as_deref(), Some(payload.as_slice()));
}

#[test]
fn missing_documents_are_not_errors() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = catalog_store(dir.path());

    // Unknown id.
    assert!(store.fetch_document(42).unwrap().is_none());

    // Book added without an attachment.
    let plain = store.add_book("Emma", "Jane Austen", "Classic", None).unwrap();
    assert!(store.fetch_document(plain.id).unwrap().is_none());

    // Book deleted after being added with an attachment.
    let attached = store
        .add_book("Dune", "Frank Herbert", "Sci-Fi", Some(b"%PDF-1.4"))
        .unwrap();
    store.delete_book(attached.id).unwrap();
    assert!(store.fetch_document(attached.id).unwrap().is_none());
}

#[test]
fn delete_is_idempotent() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = catalog_store(dir.path());

    // Deleting from an empty catalog succeeds.
    store.delete_book(7).unwrap();

    let dune = store.add_book("Dune", "Frank Herbert", "Sci-Fi", None).unwrap();
    let emma = store.add_book("Emma", "Jane Austen", "Classic", None).unwrap();

    store.delete_book(dune.id).unwrap();
    store.delete_book(dune.id).unwrap();

    let books = store.list_books().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, emma.id);
}

#[test]
fn ids_are_never_reused() {
    let dir = tempfile::TempDir::new().unwrap();

    let last_id_before;
    // First session: allocate ids, delete the newest, allocate again.
    {
        let store = catalog_store(dir.path());
        store.add_book("Dune", "Frank Herbert", "Sci-Fi", None).unwrap();
        let emma = store.add_book("Emma", "Jane Austen", "Classic", None).unwrap();
        store.delete_book(emma.id).unwrap();

        let next = store.add_book("Hamlet", "Shakespeare", "Drama", None).unwrap();
        assert!(
            next.id > emma.id,
            "new id {} should be > deleted id {}",
            next.id,
            emma.id
        );
        last_id_before = next.id;
    }

    // Second session: ids keep climbing after a reopen.
    {
        let store = catalog_store(dir.path());
        let book = store.add_book("Ulysses", "James Joyce", "Classic", None).unwrap();
        assert!(book.id > last_id_before);
    }
}

#[test]
fn catalog_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let payload = b"%PDF-1.4 fake document body".to_vec();

    // First session: populate.
    {
        let store = catalog_store(dir.path());
        store
            .add_book("Dune", "Frank Herbert", "Science Fiction", Some(&payload))
            .unwrap();
        store.add_book("Emma", "Jane Austen", "Classic", None).unwrap();
    }

    // Second session: everything is still there.
    {
        let store = catalog_store(dir.path());
        let books = store.list_books().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[1].title, "Emma");

        let fetched = store.fetch_document(books[0].id).unwrap();
        assert_eq!(fetched.as_deref(), Some(payload.as_slice()));
    }
}

#[test]
fn reopening_never_touches_existing_rows() {
    let dir = tempfile::TempDir::new().unwrap();

    let stamp;
    {
        let store = catalog_store(dir.path());
        let book = store.add_book("Dune", "Frank Herbert", "Sci-Fi", None).unwrap();
        stamp = book.uploaded_at;
    }

    // Opening the same file again runs the idempotent migration.
    {
        let store = catalog_store(dir.path());
        let books = store.list_books().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].uploaded_at, stamp);
    }
}
