//! Process configuration, read once at startup.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use graph_client::{RetryPolicy, DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
use reconcile::ReconcilerConfig;

/// fu - keep your GitHub follows reciprocal
#[derive(Parser, Debug)]
#[command(name = "fu", version)]
#[command(
    about = "Follow back your followers and unfollow accounts that don't follow you",
    long_about = None
)]
pub struct Cli {
    /// Personal access token of the acting account
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    pub token: String,

    /// Username of the acting account
    #[arg(long, env = "USERNAME")]
    pub username: String,

    /// Discord webhook for notifications; messages are only logged without it
    #[arg(long, env = "DISCORD_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    /// API root
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Follow back, then unfollow non-reciprocal accounts (default)
    Run(RunArgs),

    /// Only follow back accounts that follow you
    FollowBack(RunArgs),

    /// Only unfollow accounts that don't follow you back
    Unfollow(RunArgs),

    /// Write follower/following CSV and JSON files for visualization
    Export {
        /// Directory to write the snapshot files into
        #[arg(long, default_value = "network_data")]
        out_dir: PathBuf,

        /// Accounts requested per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Attempts per account before giving up
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Accounts requested per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Seconds to wait between processed accounts
    #[arg(long, default_value_t = 2)]
    pub pace_secs: u64,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            max_retries: 3,
            page_size: DEFAULT_PAGE_SIZE,
            pace_secs: 2,
        }
    }
}

impl RunArgs {
    /// Turn parsed flags into driver settings for `account`.
    pub fn to_reconciler_config(&self, account: &str) -> ReconcilerConfig {
        let mut config = ReconcilerConfig::new(account);
        config.page_size = self.page_size;
        config.retry = RetryPolicy {
            max_retries: self.max_retries,
            ..RetryPolicy::default()
        };
        config.pace = Duration::from_secs(self.pace_secs);
        config
    }
}

/// Reject configuration that can't produce a meaningful run.
pub fn validate(cli: &Cli) -> Result<()> {
    if cli.token.trim().is_empty() {
        bail!("TOKEN must not be empty");
    }
    if cli.username.trim().is_empty() {
        bail!("USERNAME must not be empty");
    }
    if let Some(url) = &cli.webhook_url {
        if url.trim().is_empty() {
            bail!("DISCORD_WEBHOOK_URL must not be empty when set");
        }
    }

    let page_size = match &cli.command {
        Some(Commands::Run(args) | Commands::FollowBack(args) | Commands::Unfollow(args)) => {
            if args.max_retries == 0 {
                bail!("--max-retries must be greater than 0");
            }
            args.page_size
        }
        Some(Commands::Export { page_size, .. }) => *page_size,
        None => DEFAULT_PAGE_SIZE,
    };
    if page_size == 0 {
        bail!("--page-size must be greater than 0");
    }

    Ok(())
}
