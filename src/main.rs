use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[cfg(test)]
mod testutil;

mod config;
mod filespec;
mod layout;
mod money;
mod output;
mod revenue;
mod route;
mod rules;
mod sheet;

#[derive(Debug, Parser)]
/// Breaks down ledger revenue accounts by transit route.
struct Command {
    /// Log more detail to stderr. Repeat for more. RUST_LOG overrides this.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    subcmd: SubCommand,
}

#[derive(Debug, Subcommand)]
enum SubCommand {
    #[command(name = "classify")]
    /// Prints the route that each given summary text is assigned to.
    Classify(rules::cmd::Command),
    #[command(name = "default-config")]
    /// Writes the built-in configuration as RON, as a starting point for a
    /// config file.
    DefaultConfig(config::cmd::Command),
    #[command(name = "report")]
    /// Reads a ledger sheet and reports the net revenue of each category per
    /// route.
    Report(revenue::cmd::Command),
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "route_revenue=warn",
        1 => "route_revenue=info",
        2 => "route_revenue=debug",
        _ => "route_revenue=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cmd = Command::parse();
    init_tracing(cmd.verbose);
    use SubCommand::*;
    match cmd.subcmd {
        Classify(cmd) => cmd.run(),
        DefaultConfig(cmd) => cmd.run(),
        Report(cmd) => cmd.run(),
    }
}
