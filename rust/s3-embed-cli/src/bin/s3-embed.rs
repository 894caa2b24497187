use std::io::Write;

use anyhow::Result;
use clap::Parser;
use s3_embed_cli::cli::S3EmbedCli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = S3EmbedCli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = s3_embed_cli::run(&cli)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}
