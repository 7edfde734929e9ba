use anyhow::{anyhow, Result};
use clap::Parser;

use zephyr::cli::CliArgs;
use zephyr::config::ZephyrConfig;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    zephyr::tracing::init(args.verbose);

    let config = match &args.config {
        Some(path) => ZephyrConfig::load_from(path),
        None => ZephyrConfig::load(),
    };
    let command = args.into_command().map_err(|e| anyhow!(e))?;

    let output = zephyr::commands::run(command, &config)?;
    println!("{}", output);
    Ok(())
}
