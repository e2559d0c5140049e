//! # Domain Module
//!
//! Business rules for the milk ledger, independent of transport and storage.
//!
//! - **entry_service**: creating, listing and deleting entries; rate quotes
//! - **report_service**: dashboard totals, monthly totals and per-party billing
//! - **export_service**: CSV export of the ledger
//! - **calculation**: SNF, rate and amount formulas with half-up rounding
//! - **validation**: input checks that run before anything is derived
//!
//! Derived values (`snf`, `amount`) are only ever computed here, never taken
//! from a client.

pub mod calculation;
pub mod commands;
pub mod entry_service;
pub mod errors;
pub mod export_service;
pub mod models;
pub mod report_service;
pub mod validation;

pub use entry_service::EntryService;
pub use errors::{EntryError, EntryResult};
pub use export_service::ExportService;
pub use report_service::ReportService;
