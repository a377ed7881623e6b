use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use ciphercert_common::error::RunError;
use ciphercert_common::scan::run::RunResult;
use ciphercert_common::{config::Config, scan::target::TargetList, success};
use ciphercert_core::api::CipherApi;
use ciphercert_core::runner::{BulkRunner, CancelToken};
use colored::*;
use tracing::{Instrument, error, info_span, warn};

use crate::terminal::{colors, print, progress::SpanProgress};

pub async fn bulk(file: PathBuf, cfg: &Config) -> anyhow::Result<()> {
    let targets = TargetList::from_file(&file)?;
    let runner = BulkRunner::new(CipherApi::connect(cfg));

    let span = info_span!("bulk", indicatif.pb_show = true);
    let observer = SpanProgress::new(span.clone());

    let cancel = CancelToken::new();
    let ctrl_c = tokio::spawn(watch_interrupts(cancel.clone()));

    let start = Instant::now();
    let result = runner
        .run_batch_with(&targets, &observer, &cancel)
        .instrument(span)
        .await;
    ctrl_c.abort();

    let result: RunResult = match result {
        Err(RunError::InvalidInput) => {
            anyhow::bail!("No targets found in {}", file.display())
        }
        other => other.with_context(|| format!("Failed to run batch from {}", file.display()))?,
    };

    success!(
        "Attempted {} of {} targets",
        result.progress.current,
        result.progress.total
    );
    print_partitions(&result, cfg.quiet);
    print_summary(&result, start.elapsed());
    Ok(())
}

/// Exit status for a run aborted by a second Ctrl-C.
const INTERRUPTED: i32 = 130;

/// First Ctrl-C cancels the run, the second one exits the process.
async fn watch_interrupts(cancel: CancelToken) {
    while tokio::signal::ctrl_c().await.is_ok() {
        if interrupt(&cancel) == Interrupt::Exit {
            std::process::exit(INTERRUPTED);
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Interrupt {
    Cancel,
    Exit,
}

fn interrupt(cancel: &CancelToken) -> Interrupt {
    if cancel.is_cancelled() {
        error!("Interrupted again, exiting without waiting for the current target");
        Interrupt::Exit
    } else {
        warn!("Stopping after the current target, press Ctrl-C again to exit now");
        cancel.cancel();
        Interrupt::Cancel
    }
}

fn print_partitions(result: &RunResult, q_level: u8) {
    let partitions = [
        ("successful", &result.successful, "✓".color(colors::SECURE).bold()),
        ("failed", &result.failed, "✗".color(colors::EXPIRED).bold()),
        ("skipped", &result.skipped, "-".color(colors::WARNING).bold()),
    ];

    for (title, targets, marker) in partitions {
        if targets.is_empty() {
            continue;
        }
        let names: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
        print::header(title, q_level);
        print::as_list(&names, marker);
    }
}

fn print_summary(result: &RunResult, elapsed: Duration) {
    let ok: ColoredString = result.successful.len().to_string().color(colors::SECURE).bold();
    let failed: ColoredString = result.failed.len().to_string().color(colors::EXPIRED).bold();
    let secs: ColoredString = format!("{:.2}s", elapsed.as_secs_f64()).color(colors::ACCENT);

    let mut line = format!("{ok} succeeded, {failed} failed");
    if result.was_cancelled() {
        let skipped = result.skipped.len().to_string().color(colors::WARNING).bold();
        line.push_str(&format!(", {skipped} skipped"));
    }
    line.push_str(&format!(" in {secs}"));

    print::fat_separator();
    print::centerln(&line);
    print::centerln(&format!(
        "{}",
        "Run `ciphercert history` to see the results".italic().bright_black()
    ));
}
