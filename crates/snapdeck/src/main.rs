mod app;
mod cli;
mod commands;
mod config;
mod deck;
mod hits;
mod input;
mod logo;
mod modal;
mod nav;
mod notes;
mod render;
mod scroll;
mod session;
mod theme;
mod watch;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose, cli.quiet, !cli.no_color);

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn verbosity_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// `RUST_LOG` takes precedence over the verbosity flags.
fn init_logging(verbose: u8, quiet: bool, ansi: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbose, quiet)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(verbose >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}
