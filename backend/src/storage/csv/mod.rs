//! # CSV Storage Module
//!
//! Flat-file storage: one `milk_entries.csv` in the configured data directory.
//! Human readable and easy to back up or open in a spreadsheet.

pub mod connection;
pub mod entry_repository;

pub use connection::CsvConnection;
pub use entry_repository::CsvEntryRepository;
