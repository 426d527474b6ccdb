mod commands;
mod logging;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use monthgrid_core::config::MonthgridConfig;

#[derive(Parser)]
#[command(name = "monthgrid")]
#[command(about = "A month-view calendar in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month grid and exit
    Show {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Print the calendar state as JSON instead of drawing it
        #[arg(long)]
        json: bool,
    },
    /// Browse months and manage events at a prompt (default)
    Interactive,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = MonthgridConfig::load().context("Could not load configuration")?;
    let _logger = logging::init(&config)?;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Show { month, json } => commands::show::run(month, json),
        Commands::Interactive => commands::interactive::run(&config),
    }
}
