pub mod bulk;
pub mod clear;
pub mod dashboard;
pub mod history;
pub mod scan;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use ciphercert_common::config::Config;
use ciphercert_common::scan::target::Target;

#[derive(Parser, Debug)]
#[command(name = "ciphercert")]
#[command(version, about = "Command-line client for the CipherCert certificate scanner.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the scanning backend
    #[arg(long, global = true, env = "CIPHERCERT_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Read settings from this file instead of ~/.ciphercert/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print less (repeat for results only)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Log more (repeat for trace output)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Hide the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a single domain or IP address
    #[command(alias = "s")]
    Scan { target: Target },
    /// Scan every domain or IP listed in a text file, one per line
    #[command(alias = "b")]
    Bulk { file: PathBuf },
    /// List previous scans
    #[command(alias = "h")]
    History {
        /// Only show scans whose domain or issuer contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Write the listed scans to a CSV file instead of printing them
        #[arg(short, long, value_name = "PATH")]
        export: Option<Option<PathBuf>>,
    },
    /// Delete the whole scan history
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show counters over the scan history
    #[command(alias = "d")]
    Dashboard,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Loads the config file and applies command-line overrides on top.
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load().context("Failed to load the global config")?,
        };
        self.apply_overrides(&mut cfg);
        Ok(cfg)
    }

    fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(api_url) = &self.api_url {
            cfg.api_url = api_url.clone();
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout_secs = timeout;
        }
        cfg.quiet = cfg.quiet.max(self.quiet);
        cfg.no_banner |= self.no_banner;
    }
}
