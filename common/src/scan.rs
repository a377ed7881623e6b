//! # Bulk Scan Models
//!
//! * [`target::Target`] / [`target::TargetList`]: what gets submitted.
//! * [`run::RunProgress`] / [`run::RunResult`]: how far a batch got and how
//!   each target fared.

pub mod run;
pub mod target;
