use ciphercert_common::scan::run::{Outcome, RunProgress};
use ciphercert_common::scan::target::Target;
use ciphercert_core::runner::ProgressObserver;
use colored::*;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

pub const CANCEL_TIP: &str = "Press Ctrl-C to stop after the current target";

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

pub fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} [{bar:32.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS)
        .progress_chars("█▉▊▋▌▍▎▏ ")
}

/// Drives the progress bar attached to a span from the runner's callbacks.
pub struct SpanProgress {
    span: Span,
}

impl SpanProgress {
    pub fn new(span: Span) -> Self {
        span.pb_set_style(&bar_style());
        span.pb_set_message(&format!("{}", CANCEL_TIP.italic().white()));
        Self { span }
    }
}

impl ProgressObserver for SpanProgress {
    fn on_start(&self, total: usize) {
        self.span.pb_set_length(total as u64);
        self.span.pb_set_position(0);
    }

    fn on_attempt(&self, target: &Target, outcome: &Outcome, progress: RunProgress) {
        self.span.pb_set_position(progress.current as u64);
        self.span.pb_set_message(&last_attempt_message(target, outcome));
    }
}

fn last_attempt_message(target: &Target, outcome: &Outcome) -> String {
    let mark: ColoredString = match outcome {
        Outcome::Succeeded => "✓".color(colors::SECURE).bold(),
        Outcome::Failed { .. } => "✗".color(colors::EXPIRED).bold(),
    };
    format!("{} {}", mark, target.as_str().color(colors::TEXT_DEFAULT))
}
