// pathfinder/src/main.rs
use std::process;

use clap::Parser;
use colored::Colorize;
use pathfinder_common::ScanConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::CliArgs;

fn main() {
    let cli_args = CliArgs::parse();

    let level_filter = cli_args.log_level();
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("PATHFINDER_LOG")
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .without_time()
        .try_init();

    let config = ScanConfig::load();

    match cli_args.run(config) {
        Ok(verdict) => {
            debug!("Scan completed, verdict: {}", verdict);
            let code = cli_args.exit_code(verdict);
            if code != 0 {
                process::exit(code);
            }
        }
        Err(e) => {
            debug!("Scan failed: {:?}", e);
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            process::exit(1);
        }
    }
}
