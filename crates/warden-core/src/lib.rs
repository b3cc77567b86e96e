//! Core domain types for the Warden facility records store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod access;
pub mod alert;
pub mod cell;
pub mod error;
pub mod identity;
pub mod log;
pub mod person;
pub mod report;
pub mod store;
pub mod task;
pub mod visit;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
