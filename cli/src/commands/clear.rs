use anyhow::Context;
use ciphercert_common::{config::Config, success};
use ciphercert_core::{api::CipherApi, history::HistoryService};
use console::Term;
use tracing::warn;

use crate::terminal::print;

pub async fn clear(yes: bool, cfg: &Config) -> anyhow::Result<()> {
    if !yes && !confirm()? {
        warn!("Aborted, history left untouched");
        return Ok(());
    }

    HistoryService::new(CipherApi::connect(cfg))
        .clear()
        .await
        .context("Failed to clear scan history")?;

    success!("History cleared successfully");
    Ok(())
}

fn confirm() -> anyhow::Result<bool> {
    print::print_status("This deletes every stored scan. Type 'yes' to continue:");
    let answer = Term::stdout()
        .read_line()
        .context("Failed to read confirmation")?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
