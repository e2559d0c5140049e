//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Requests are
//! deserialized into the `shared` DTOs, mapped to domain commands, and the
//! results mapped back; domain errors become status codes here.

pub mod rest;

pub use rest::*;
