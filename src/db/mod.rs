//! Persistence module split across logical submodules.

mod catalog;
mod connection;
mod error;

pub use catalog::CatalogStore;
pub use error::{StoreError, StoreResult};
