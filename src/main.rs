mod core;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use crate::core::config::{self, CliOverrides, LogLevel};

#[derive(Parser)]
#[command(name = "tally", about = "A keypad calculator for the terminal")]
struct Args {
    /// Open the history panel at startup
    #[arg(long)]
    history: bool,

    /// Open the memory panel at startup
    #[arg(long)]
    memory: bool,

    /// Debug log path (defaults to tally.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Debug log verbosity
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("tally: {e}");
            std::process::exit(1);
        }
    };

    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            show_history: args.history,
            show_memory: args.memory,
            log_file: args.log_file,
            log_level: args.log_level,
        },
    );

    // File logger - stdout belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level.to_filter(), log_config, log_file);
    }

    log::info!("Tally starting up");

    tui::run(resolved)
}
