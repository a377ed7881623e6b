//! # Scan History
//!
//! The backend stores every scan and hands them back through
//! `GET /api/history`. This module holds the record shape and the views built
//! on top of it: search, dashboard counters and CSV export.

pub mod record;
pub mod report;
