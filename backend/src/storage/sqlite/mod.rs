//! # SQLite Storage Module
//!
//! Default persistent backend. Uses an SQLx connection pool; each insert and
//! delete is a single statement and therefore atomic.

pub mod connection;
pub mod entry_repository;

pub use connection::DbConnection;
pub use entry_repository::SqliteEntryRepository;
