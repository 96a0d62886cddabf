//! Core library surface for the Book Library Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces.
//! Keeping the glue logic documented makes it easy to recall why each re-export
//! exists when revisiting the project.
pub mod db;
pub mod models;
pub mod reader;
pub mod ui;

/// Convenience re-exports for the persistence layer. `main.rs` uses the store
/// to bring up the embedded SQLite catalog and preload data.
pub use db::{CatalogStore, StoreError};

/// The primary domain type that other layers manipulate.
pub use models::Book;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
