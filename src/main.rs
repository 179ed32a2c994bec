mod app;
mod config;
mod error;
mod logging;
mod models;
mod navigation;
mod queue;
mod session;
mod source;
mod tui;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use app::{run_inspect, run_tui, RunOptions};
use session::CampaignHoursPolicy;
use source::FileSource;

#[derive(Parser)]
#[command(name = "texter")]
#[command(version = "0.1.0")]
#[command(about = "Work through a texting assignment inside the campaign's texting hours")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Assignment JSON (the assignment with its campaign)
    #[arg(long, env = "TEXTER_ASSIGNMENT", default_value = "assignment.json", global = true)]
    assignment: PathBuf,

    /// Conversation list JSON for the assignment
    #[arg(long, env = "TEXTER_CONVERSATIONS", default_value = "conversations.json", global = true)]
    conversations: PathBuf,

    /// Organization id used in exit routes
    #[arg(long, global = true)]
    organization: Option<String>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the session outcome and conversation queue without opening the UI
    Inspect {
        /// Evaluate texting hours at this instant (RFC 3339) instead of now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match config::load() {
        Ok(config) => (config, None),
        Err(e) => (config::Config::default(), Some(e)),
    };
    let _log_guard = logging::init(&config.log_dir(), cli.verbose)?;
    if let Some(e) = config_error {
        warn!(error = %e, "could not load config, using defaults");
    }

    match cli.command {
        Some(Commands::Inspect { at }) => {
            let source = FileSource::new(cli.assignment, cli.conversations);
            let policy = match at {
                Some(at) => CampaignHoursPolicy::at(at),
                None => CampaignHoursPolicy::new(),
            };
            let organization = cli.organization.or(config.organization_id);
            run_inspect(&source, &source, &policy, organization.as_deref())?;
        }
        None => {
            let options = RunOptions {
                assignment: cli.assignment,
                conversations: cli.conversations,
                organization: cli.organization,
                config,
            };
            if let Some(route) = run_tui(options).await? {
                info!(%route, "exited to route");
                println!("{}", route);
            }
        }
    }

    Ok(())
}
