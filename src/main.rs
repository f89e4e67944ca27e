use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use media_manifest::cli::Cli;
use media_manifest::output::{self, Verbosity};
use media_manifest::{ManifestContext, commands, logging};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    output::set_verbosity(verbosity);
    logging::init(verbosity);

    let ctx = ManifestContext::from_cli(&cli)?;
    if let Some(path) = &ctx.config_path {
        output::verbose(&format!("Using configuration from {}", path.display()));
    }

    if cli.watch {
        commands::watch::execute(&ctx)
    } else {
        commands::generate::execute(&ctx)
    }
}
