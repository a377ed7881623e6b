//! # CipherCert Common
//!
//! Shared models for the CipherCert client crates.
//!
//! * **[`scan`]**: targets, batches and the bookkeeping of a bulk run.
//! * **[`history`]**: scan records as returned by the backend, plus the
//!   summaries and exports built from them.
//! * **[`config`]**: runtime configuration.
//! * **[`error`]**: error taxonomy shared by the runner and its callers.

pub mod config;
pub mod error;
pub mod history;
pub mod log;
pub mod scan;
