use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use client_core::{Credential, Dashboard, DashboardViewState, HttpBackend};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, Overrides};
use render::{render_state, DateFormatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Logs into the sales backend and prints the genre sales dashboard.
#[derive(Parser, Debug)]
struct Args {
    /// TOML settings file; defaults to ./dashboard.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    password: Option<String>,
    /// strftime pattern for displayed dates.
    #[arg(long)]
    date_format: Option<String>,
    /// Give up waiting for the backend after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    settings.apply(Overrides {
        base_url: args.base_url,
        username: args.username,
        password: args.password,
        date_format: args.date_format,
        timeout_secs: args.timeout_secs,
    });
    let settings = settings.validate()?;
    info!(base_url = %settings.base_url, username = %settings.username, "loading dashboard");

    let dates = DateFormatter::new(settings.date_format.clone());
    let dashboard = Dashboard::new(HttpBackend::new(settings.base_url.clone()));

    let mut states = dashboard.subscribe_states();
    let progress = tokio::spawn(async move {
        while let Ok(state) = states.recv().await {
            if state.is_terminal() {
                break;
            }
            eprintln!("{}", render::LOADING);
        }
    });

    let credential = Credential::new(settings.username.clone(), settings.password.clone());
    let load = dashboard.load_dashboard(credential);
    let state = match settings.timeout {
        Some(limit) => match tokio::time::timeout(limit, load).await {
            Ok(state) => state,
            Err(_) => {
                warn!(timeout_secs = limit.as_secs(), "backend did not answer in time");
                progress.abort();
                DashboardViewState::Failed {
                    reason: format!("timed out after {}s waiting for the backend", limit.as_secs()),
                }
            }
        },
        None => load.await,
    };
    let _ = progress.await;

    match (&state, args.format) {
        (DashboardViewState::Ready(data), OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        (DashboardViewState::Ready(_), OutputFormat::Text) => {
            print!("{}", render_state(&state, &dates));
        }
        _ => eprintln!("{}", render_state(&state, &dates)),
    }

    Ok(match state {
        DashboardViewState::Ready(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
