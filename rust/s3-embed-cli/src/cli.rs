//! Command line arguments and configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use s3_embed::Config;

#[derive(Debug, Parser)]
#[command(name = "s3-embed")]
#[command(bin_name = "s3-embed")]
#[command(version, about = "Render and presign {{s3://...}} wiki directives", long_about = None)]
pub struct S3EmbedCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render every directive in a page
    Render {
        /// Page to render; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print a presigned URL for an object
    Sign {
        /// Object location, e.g. s3://my-bucket/path/to/file.pdf
        location: String,
    },
    /// Print a directive as JSON
    Parse {
        /// Directive text, e.g. "{{s3://my-bucket/file.pdf|Title}}"
        directive: String,
    },
}

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// JSON file with region, access_key_id, secret_access_key and expires
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "S3_EMBED_REGION")]
    pub region: Option<String>,

    #[arg(long, global = true, env = "S3_EMBED_ACCESS_KEY_ID")]
    pub access_key_id: Option<String>,

    #[arg(long, global = true, env = "S3_EMBED_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// URL lifetime in seconds
    #[arg(long, global = true, env = "S3_EMBED_EXPIRES")]
    pub expires: Option<u64>,

    /// Sign as of this RFC 3339 time instead of now
    #[arg(long, global = true)]
    pub time: Option<DateTime<Utc>>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// The configuration file, if any, with command line values on top.
    pub fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(access_key_id) = &self.access_key_id {
            config.access_key_id = access_key_id.clone();
        }
        if let Some(secret_access_key) = &self.secret_access_key {
            config.secret_access_key = secret_access_key.clone();
        }
        if let Some(expires) = self.expires {
            config.expires = expires;
        }
        Ok(config)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.time.unwrap_or_else(Utc::now)
    }
}

fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}
