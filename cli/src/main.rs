mod commands;
mod terminal;

use commands::{CommandLine, Commands, bulk, clear, dashboard, history, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.config()?;

    logging::init_logging(commands.verbose, cfg.quiet);
    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Scan { target } => {
            print::header("starting scan", cfg.quiet);
            scan::scan(target, &cfg).await
        }
        Commands::Bulk { file } => {
            print::header("starting bulk scan", cfg.quiet);
            bulk::bulk(file, &cfg).await
        }
        Commands::History { search, export } => history::history(search, export, &cfg).await,
        Commands::Clear { yes } => {
            print::header("clearing history", cfg.quiet);
            clear::clear(yes, &cfg).await
        }
        Commands::Dashboard => dashboard::dashboard(&cfg).await,
    }
}
