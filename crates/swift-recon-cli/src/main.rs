use std::fs;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use swift_recon_core::{convert_file, remove_existing_output};

mod args;

use args::{is_interactive, Cli};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level follows -v/-d, RUST_LOG still takes precedence
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level())).init();

    let config = cli.resolve(is_interactive())?;

    if cli.overwrite {
        remove_existing_output(&config.output)?;
    }

    let summary = convert_file(&config)
        .with_context(|| format!("Failed to convert {}", config.input.display()))?;

    let location = fs::canonicalize(&summary.output).unwrap_or(summary.output);
    println!(
        "{} Converted {} sections to Reconstruct's frame of reference",
        "✓".green(),
        summary.sections
    );
    println!("Your new transformations are stored in:");
    println!("  {}", location.display().to_string().bold());
    Ok(())
}
