//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One parameterized statement per operation, no transactions
//! - Aggregation happens in SQL, not in Rust
//! - Driver errors pass through `Database::observe`

pub mod items;
pub mod profiles;
pub mod tables;

pub use items::ItemRepo;
pub use profiles::{ConfigRepo, ProfileRepo};
pub use tables::{ColumnSchema, DatabaseDescription, TableDescription, TableRepo};
