mod config;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{error, info};

use config::{validate, Cli, Commands, RunArgs};
use graph_client::GitHubClient;
use notify::{DiscordWebhook, LogSink, NotificationSink};
use reconcile::{export_snapshot, Operation, OperationSummary, Reconciler, ReconcilerConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    validate(&cli)?;

    let api = GitHubClient::new(&cli.api_url, &cli.username, &cli.token)
        .context("Failed to build GitHub client")?;
    let sink = build_sink(cli.webhook_url.as_deref())?;
    info!("Acting as {} (notifications via {})", cli.username, sink.name());

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            handle_reconcile(
                api,
                sink,
                args.to_reconciler_config(&cli.username),
                &Operation::ALL,
            )
            .await
        }
        Commands::FollowBack(args) => {
            handle_reconcile(
                api,
                sink,
                args.to_reconciler_config(&cli.username),
                &[Operation::FollowBack],
            )
            .await
        }
        Commands::Unfollow(args) => {
            handle_reconcile(
                api,
                sink,
                args.to_reconciler_config(&cli.username),
                &[Operation::UnfollowNonReciprocal],
            )
            .await
        }
        Commands::Export { out_dir, page_size } => {
            handle_export(api, &cli.username, &out_dir, page_size).await
        }
    }
}

fn build_sink(webhook_url: Option<&str>) -> Result<Box<dyn NotificationSink>> {
    let sink: Box<dyn NotificationSink> = match webhook_url {
        Some(url) => Box::new(
            DiscordWebhook::new(url).context("Failed to build Discord webhook client")?,
        ),
        None => Box::new(LogSink),
    };
    Ok(sink)
}

/// Handle `run`, `follow-back` and `unfollow`
async fn handle_reconcile(
    api: GitHubClient,
    sink: Box<dyn NotificationSink>,
    config: ReconcilerConfig,
    operations: &[Operation],
) -> Result<()> {
    let start = Instant::now();
    let mut reconciler = Reconciler::new(api, sink, config);

    let mut summaries = Vec::with_capacity(operations.len());
    for operation in operations {
        summaries.push(reconciler.reconcile(*operation).await?);
    }

    print_summaries(&summaries);
    println!("{} Finished in {:.1?}", "✓".green(), start.elapsed());
    Ok(())
}

/// Handle the `export` command
async fn handle_export(
    api: GitHubClient,
    account: &str,
    out_dir: &Path,
    page_size: u32,
) -> Result<()> {
    let mut config = ReconcilerConfig::new(account);
    config.page_size = page_size;
    let reconciler = Reconciler::new(api, LogSink, config);

    let snapshot = reconciler.fetch_snapshot().await?;
    let paths = export_snapshot(out_dir, account, &snapshot)?;

    for path in paths {
        println!("{} Wrote {}", "✓".green(), path.display());
    }
    Ok(())
}

fn print_summaries(summaries: &[OperationSummary]) {
    for summary in summaries {
        if summary.targets == 0 {
            println!("{} {}: nothing to do", "•".cyan(), summary.operation);
            continue;
        }
        let report = match summary.report_delivered {
            Some(true) => "report sent".green(),
            Some(false) => "report not delivered".red(),
            None => "no report".normal(),
        };
        println!(
            "{} {}: {} processed, {} succeeded, {} failed ({})",
            "•".cyan(),
            summary.operation.to_string().bold(),
            summary.targets,
            summary.succeeded.to_string().green(),
            summary.failed.to_string().red(),
            report
        );
    }
}
