//! `seatwatch` - run one zone availability scan and exit.
//!
//! Exit status is 0 when tickets were found and 1 otherwise, so the binary
//! can be driven by cron or a CI schedule.

use anyhow::Context;
use clap::Parser;
use seatwatch_browser::ChromiumLauncher;
use seatwatch_core::AppConfig;
use seatwatch_notify::WebhookChannel;
use seatwatch_scanner::{ScanOrchestrator, ScanOutcome};
use std::path::PathBuf;
use tracing::info;

/// Scan a ticketing page's seat selector for zones with open seats.
#[derive(Debug, Parser)]
#[command(name = "seatwatch", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Performance page to scan
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Show the browser window
    #[arg(long)]
    headful: bool,

    /// Directory for diagnostic screenshots
    #[arg(long, value_name = "DIR")]
    screenshot_dir: Option<PathBuf>,

    /// Print the outcome as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.url {
            config.target.url.clone_from(url);
        }
        if self.headful {
            config.browser.headless = false;
        }
        if let Some(dir) = &self.screenshot_dir {
            config.output.screenshot_dir.clone_from(dir);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,seatwatch=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<ScanOutcome> {
    let mut config =
        AppConfig::load_with_env(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("invalid command-line override")?;

    let channel =
        WebhookChannel::from_config(&config.notifications).context("failed to build webhook client")?;
    let orchestrator = ScanOrchestrator::new(&config, Box::new(channel))?;
    let launcher = ChromiumLauncher::new(config.browser.clone(), config.timings.action_timeout());

    Ok(orchestrator.scan(&launcher).await)
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    info!("Starting Seatwatch v{}", env!("CARGO_PKG_VERSION"));

    let code = match run(&cli).await {
        Ok(outcome) => {
            if cli.json {
                match serde_json::to_string_pretty(&outcome) {
                    Ok(json) => println!("{json}"),
                    Err(e) => tracing::warn!("Failed to serialize outcome: {}", e),
                }
            }
            if outcome.is_found() {
                info!("Tickets found");
            } else {
                info!("No tickets this run");
            }
            outcome.exit_code()
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            1
        }
    };

    std::process::exit(code);
}
