use anyhow::Context;
use ciphercert_common::{config::Config, history::record::ScanRecord, scan::target::Target, success};
use ciphercert_core::api::CipherApi;
use tracing::{Instrument, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::{format, print, progress};

pub async fn scan(target: Target, cfg: &Config) -> anyhow::Result<()> {
    let api = CipherApi::connect(cfg);

    let span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_style(&progress::spinner_style());
    span.pb_set_message(&format!("Scanning {target}..."));

    let record: ScanRecord = api
        .scan(&target)
        .instrument(span)
        .await
        .with_context(|| format!("Error connecting to scan engine at {}", cfg.api_url))?;

    success!("Successfully scanned {}", record.domain);

    print::header("scan result", cfg.quiet);
    print::tree_head(0, &record.domain);
    print::as_tree_one_level(format::record_to_details(&record));
    Ok(())
}
