use thiserror::Error;

/// Reasons a bulk run refuses to start.
///
/// Failures of individual targets are never reported through this type; they
/// are recorded in the run's result instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
    /// The batch contained no targets.
    #[error("refusing to run an empty batch")]
    InvalidInput,

    /// Another batch is still in flight on the same runner.
    #[error("a batch is already running")]
    AlreadyRunning,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("target cannot be empty")]
    Empty,
}
