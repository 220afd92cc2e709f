//! SQLite implementation of [`onbuddy_core::store::OnbuddyStore`].

pub mod encode;
pub mod error;
pub mod schema;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use store::SqliteStore;
