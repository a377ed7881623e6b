use std::path::{Path, PathBuf};

use anyhow::Context;
use ciphercert_common::{config::Config, history::record::ScanRecord, success};
use ciphercert_core::{api::CipherApi, history::HistoryService, http::ReqwestHttpClient};
use colored::*;

use crate::cprint;
use crate::terminal::{colors, format, print};

pub async fn history(
    search: Option<String>,
    export: Option<Option<PathBuf>>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let service = HistoryService::new(CipherApi::connect(cfg));

    match export {
        Some(path) => {
            let path = path.unwrap_or_else(default_export_path);
            export_csv(&service, search.as_deref(), &path).await
        }
        None => list(&service, search.as_deref(), cfg).await,
    }
}

async fn list(
    service: &HistoryService<ReqwestHttpClient>,
    search: Option<&str>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let records: Vec<ScanRecord> = service
        .records(search)
        .await
        .context("Failed to fetch scan history")?;

    if records.is_empty() {
        print::header("no scans found", cfg.quiet);
        print::no_results();
        return Ok(());
    }

    print::header("scan history", cfg.quiet);
    for (idx, record) in records.iter().enumerate() {
        match cfg.quiet {
            2 => print::print_status(format!("{} {}", record.domain, format::status_badge(record.status))),
            _ => {
                print::tree_head(idx, &record.domain);
                print::as_tree_one_level(format::record_to_details(record));
                if idx + 1 != records.len() {
                    cprint!();
                }
            }
        }
    }

    let count: ColoredString = records.len().to_string().color(colors::PRIMARY).bold();
    let noun: &str = if records.len() == 1 { "scan" } else { "scans" };
    print::fat_separator();
    print::centerln(&format!("Showing {count} {noun}"));
    Ok(())
}

async fn export_csv(
    service: &HistoryService<ReqwestHttpClient>,
    search: Option<&str>,
    path: &Path,
) -> anyhow::Result<()> {
    let (csv, rows) = service
        .export_csv(search)
        .await
        .context("Failed to fetch scan history")?;

    std::fs::write(path, csv)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    success!("{rows} records exported to {}", path.display());
    Ok(())
}

/// `ciphercert-history-YYYY-MM-DD.csv` in the working directory.
fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "ciphercert-history-{}.csv",
        chrono::Utc::now().format("%Y-%m-%d")
    ))
}
