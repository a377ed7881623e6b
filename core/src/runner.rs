//! The bulk submission runner.
//!
//! Walks a [`TargetList`] front to back and submits one scan per target
//! through a [`ScanEndpoint`], strictly one at a time: attempt *i + 1* is only
//! issued once attempt *i* has completed. Every target is attempted; a failure
//! is recorded and the loop moves on.
//!
//! Only two things make a run refuse to start, both reported as [`RunError`]:
//! an empty batch, and a batch already in flight on the same runner.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use ciphercert_common::error::RunError;
use ciphercert_common::scan::run::{Outcome, RunProgress, RunResult};
use ciphercert_common::scan::target::{Target, TargetList};

/// Where attempts go.
///
/// Implementations must fold every failure mode (transport, timeout, rejected
/// status) into [`Outcome::Failed`].
#[async_trait]
pub trait ScanEndpoint: Send + Sync {
    async fn submit(&self, target: &Target) -> Outcome;
}

/// Receives progress pushed by the runner. All methods default to no-ops.
pub trait ProgressObserver: Send + Sync {
    fn on_start(&self, _total: usize) {}

    /// Called after each attempt with the already advanced progress.
    fn on_attempt(&self, _target: &Target, _outcome: &Outcome, _progress: RunProgress) {}

    fn on_finish(&self, _result: &RunResult) {}
}

impl ProgressObserver for () {}

/// Shared flag asking a run to stop issuing new attempts.
///
/// The attempt in flight when the flag is raised still completes and is
/// classified normally. Targets after it end up in [`RunResult::skipped`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct BulkRunner<E: ScanEndpoint> {
    endpoint: E,
    running: AtomicBool,
}

impl<E: ScanEndpoint> BulkRunner<E> {
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint,
            running: AtomicBool::new(false),
        }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Runs a batch without observer or cancellation.
    pub async fn run_batch(&self, targets: &TargetList) -> Result<RunResult, RunError> {
        self.run_batch_with(targets, &(), &CancelToken::new()).await
    }

    /// Runs a batch, pushing progress to `observer` and honouring `cancel`.
    #[tracing::instrument(name = "bulk_run", skip_all, fields(total = targets.len()))]
    pub async fn run_batch_with(
        &self,
        targets: &TargetList,
        observer: &dyn ProgressObserver,
        cancel: &CancelToken,
    ) -> Result<RunResult, RunError> {
        if targets.is_empty() {
            return Err(RunError::InvalidInput);
        }
        let _guard = RunningGuard::acquire(&self.running).ok_or(RunError::AlreadyRunning)?;

        let mut result = RunResult::new(targets.len());
        observer.on_start(targets.len());
        info!("Submitting {} targets", targets.len());

        let mut pending = targets.iter();
        while let Some(target) = pending.next() {
            if cancel.is_cancelled() {
                let skipped: Vec<Target> = std::iter::once(target)
                    .chain(pending.by_ref())
                    .cloned()
                    .collect();
                warn!("Run cancelled, {} targets left unattempted", skipped.len());
                result.skip(skipped);
                break;
            }

            let outcome = self.endpoint.submit(target).await;
            match &outcome {
                Outcome::Succeeded => debug!(domain = %target, "Scan accepted"),
                Outcome::Failed { reason } => warn!(domain = %target, %reason, "Scan failed"),
            }

            result.record(target.clone(), &outcome);
            observer.on_attempt(target, &outcome, result.progress);
        }

        info!(
            successful = result.successful.len(),
            failed = result.failed.len(),
            skipped = result.skipped.len(),
            "Run finished"
        );
        observer.on_finish(&result);
        Ok(result)
    }
}

/// Holds the runner's `running` flag for the lifetime of one run.
///
/// Dropping the run future early releases it too.
struct RunningGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
