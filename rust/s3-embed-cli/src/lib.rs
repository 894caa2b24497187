//! Runs the `s3-embed` subcommands.

pub mod cli;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use s3_embed::{Config, render_page};
use s3_presign::{PresignedUrl, sign};

use crate::cli::{Command, S3EmbedCli};

/// Run a parsed command line, returning what to print.
pub fn run(cli: &S3EmbedCli) -> Result<String> {
    let config = cli.global.config()?;
    let now = cli.global.now();
    tracing::debug!(?config, %now, "loaded configuration");

    match &cli.command {
        Command::Render { file } => {
            let text = read_page(file.as_deref())?;
            let page = render_page(&text, &config, now);
            tracing::debug!(
                rendered = page.rendered,
                cacheable = page.cacheable,
                "rendered page"
            );
            Ok(page.html)
        }
        Command::Sign { location } => Ok(presign(location, &config, now)?.into_string()),
        Command::Parse { directive } => {
            let directive = s3_directive::parse(directive)
                .with_context(|| format!("parsing {directive:?}"))?;
            Ok(serde_json::to_string_pretty(&directive)?)
        }
    }
}

fn read_page(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

/// Presign an `s3://bucket/key` location.
pub fn presign(location: &str, config: &Config, now: DateTime<Utc>) -> Result<PresignedUrl> {
    let (bucket, key) = location
        .strip_prefix("s3://")
        .and_then(|rest| rest.split_once('/'))
        .filter(|(bucket, key)| !bucket.is_empty() && !key.is_empty())
        .ok_or_else(|| anyhow!("expected s3://bucket/key, got {location:?}"))?;

    Ok(sign(&config.signing_request(bucket, key, now))?)
}
