use std::fmt;

use super::target::Target;

/// How far a batch has advanced.
///
/// `current` counts completed attempts and only ever grows, one step per
/// attempt, up to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunProgress {
    pub current: usize,
    pub total: usize,
}

impl RunProgress {
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Marks one more attempt as completed. Never moves past `total`.
    pub fn advance(&mut self) {
        debug_assert!(self.current < self.total, "progress advanced past total");
        if self.current < self.total {
            self.current += 1;
        }
    }

    pub fn remaining(&self) -> usize {
        self.total - self.current
    }

    pub fn is_complete(&self) -> bool {
        self.current == self.total
    }
}

impl fmt::Display for RunProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// Classification of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    /// `reason` is for logs and reports only. All failures count the same.
    Failed { reason: String },
}

impl Outcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Final partition of a batch.
///
/// Each target of the batch ends up in exactly one list, and each list keeps
/// the relative input order. `skipped` is only populated when a run is
/// cancelled before every target was attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub successful: Vec<Target>,
    pub failed: Vec<Target>,
    pub skipped: Vec<Target>,
    pub progress: RunProgress,
}

impl RunResult {
    pub fn new(total: usize) -> Self {
        Self {
            progress: RunProgress::new(total),
            ..Self::default()
        }
    }

    /// Files a completed attempt and advances the progress counter.
    pub fn record(&mut self, target: Target, outcome: &Outcome) {
        match outcome {
            Outcome::Succeeded => self.successful.push(target),
            Outcome::Failed { .. } => self.failed.push(target),
        }
        self.progress.advance();
    }

    /// Files targets that were never attempted. Progress is left untouched.
    pub fn skip<I>(&mut self, targets: I)
    where
        I: IntoIterator<Item = Target>,
    {
        self.skipped.extend(targets);
    }

    pub fn attempted(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    pub fn was_cancelled(&self) -> bool {
        !self.skipped.is_empty()
    }
}
