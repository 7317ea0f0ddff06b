//! SWB CLI - Command line tool for preprocessing and exploring
//! climate-scenario water-balance summary tables.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "swb-cli",
    version,
    about = "Minnesota SWB climate-scenario summary toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: swb_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    swb_cmd::run(cli.command)
}
