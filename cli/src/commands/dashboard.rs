use anyhow::Context;
use ciphercert_common::{config::Config, history::report::HistorySummary};
use ciphercert_core::{api::CipherApi, history::HistoryService};
use colored::*;

use crate::terminal::{colors, print};

const KEY_WIDTH: usize = 13;

pub async fn dashboard(cfg: &Config) -> anyhow::Result<()> {
    let summary: HistorySummary = HistoryService::new(CipherApi::connect(cfg))
        .summary()
        .await
        .context("Failed to fetch scan history")?;

    print::header("dashboard", cfg.quiet);

    if summary.total == 0 {
        print::no_results();
        return Ok(());
    }

    print::aligned_line(
        "Total scans",
        summary.total.to_string().color(colors::TEXT_DEFAULT),
        KEY_WIDTH,
    );
    print::aligned_line(
        "Secure",
        summary.secure.to_string().color(colors::SECURE).bold(),
        KEY_WIDTH,
    );
    print::aligned_line(
        "Warning",
        summary.warning.to_string().color(colors::WARNING).bold(),
        KEY_WIDTH,
    );
    print::aligned_line(
        "Expired",
        summary.expired.to_string().color(colors::EXPIRED).bold(),
        KEY_WIDTH,
    );
    print::aligned_line(
        "Average score",
        format!("{}/100", summary.average_score).color(colors::TEXT_DEFAULT),
        KEY_WIDTH,
    );
    Ok(())
}
