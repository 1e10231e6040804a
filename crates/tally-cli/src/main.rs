use anyhow::Context;
use clap::Parser;
use tally_core::window::DateWindow;
use tally_report::XlsxEncoder;
use tally_sources::{IssueTracker, TogglClient};

mod bootstrap;
mod cli;
mod pipeline;
mod progress;
mod ui;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("tally error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;
    ui::init(cli.quiet);

    let config = bootstrap::load_config()?;

    let window = DateWindow::resolve(
        cli.since.as_deref(),
        cli.until.as_deref(),
        &chrono::Local::now(),
    )
    .context("invalid reporting window")?;

    let plan = pipeline::ReportPlan::from_config(&config.report, cli.output.as_deref())?;

    let toggl = TogglClient::new(&config.toggl).context("failed to build Toggl client")?;
    let tracker =
        IssueTracker::from_config(&config.pivotal).context("failed to build Pivotal client")?;
    if !tracker.is_enabled() {
        tracing::warn!("Pivotal Tracker is not configured; estimates and links will be left empty");
    }

    let summary = pipeline::run(&toggl, &tracker, &XlsxEncoder, &plan, &window).await?;
    if summary.written.is_none() {
        anyhow::bail!("report could not be written to {}", plan.output.display());
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TALLY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
