use clap::Parser;
use color_eyre::Result;

use sql_autocomplete::cli::{self, Cli};

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    // Fetch failures are reported at warn; RUST_LOG overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    cli::run(Cli::parse())
}
