//! Command-line front end for the endpoint details panel
//!
//! Loads hosts from a JSON fixture file, opens the panel at the given URL
//! query, applies the requested commands and prints the resolved panel as
//! JSON on stdout. Logs go to stderr.

mod config;
mod fixtures;

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use endpoint_details_core::traits::{InMemoryNavigator, LogNotifier, NavigationEmitter};
use endpoint_details_core::types::{PanelView, TabId};
use endpoint_details_core::{PanelContext, PanelMessage, PanelRuntime};
use fixtures::Fixtures;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Resolve the endpoint details panel for a URL query
#[derive(Parser)]
#[command(name = "endpoint-details")]
#[command(version)]
#[command(about = "Resolve the endpoint details panel for a URL query", long_about = None)]
struct Cli {
    /// URL query, e.g. `selected_endpoint=e1&show=policy_response`
    query: String,

    /// JSON file with hosts, activity logs and policy responses
    #[arg(short, long)]
    fixtures: Option<PathBuf>,

    /// Config file (default: `<config dir>/endpoint-details/config.toml`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Commands applied in order after the initial load:
    /// `close`, `tab:<details|activity_log>`, `show:<view>`, `back`, `retry`
    #[arg(short = 'x', long = "then")]
    commands: Vec<Command>,
}

/// A user command given on the command line
#[derive(Debug, Clone, PartialEq)]
struct Command(PanelMessage);

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let msg = match s.split_once(':') {
            None => match s {
                "close" => PanelMessage::Close,
                "back" => PanelMessage::BackToDetails,
                "retry" => PanelMessage::Retry,
                _ => return Err(anyhow!("unknown command '{s}'")),
            },
            Some(("tab", tab)) => PanelMessage::SwitchTab(tab.parse::<TabId>()?),
            Some(("show", view)) => PanelMessage::ShowView(view.parse::<PanelView>()?),
            Some((name, _)) => return Err(anyhow!("unknown command '{name}'")),
        };
        Ok(Self(msg))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let file_config = match config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let default_level = file_config.log_level.as_deref().unwrap_or("info");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match run(cli, file_config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, file_config: config::FileConfig) -> anyhow::Result<()> {
    let fixtures = match &cli.fixtures {
        Some(path) => Fixtures::load(path).await?,
        None => {
            tracing::warn!("No fixtures given, every endpoint will be reported missing");
            Fixtures::default()
        }
    };
    tracing::info!("Loaded {} host(s) from fixtures", fixtures.hosts.len());

    let navigator = Arc::new(InMemoryNavigator::new(&cli.query));
    let ctx = Arc::new(PanelContext::new(
        navigator.clone(),
        Arc::new(fixtures.into_data_source().await),
        Arc::new(LogNotifier),
    ));

    let mut runtime = PanelRuntime::new(ctx, file_config.panel);
    runtime.run_until_idle().await;
    for Command(msg) in cli.commands {
        tracing::debug!("Apply {msg:?}");
        runtime.dispatch(msg);
        runtime.run_until_idle().await;
    }

    let output = serde_json::json!({
        "location": navigator.current_selection().to_query_string(),
        "panel": runtime.render(),
    });
    let rendered = serde_json::to_string_pretty(&output).context("failed to encode panel")?;
    println!("{rendered}");
    Ok(())
}
