//! # pelorus CLI entry point
//!
//! Operator tooling for the screening stack. `pelorus screen` runs a
//! vessel-only screening against the live providers and prints the
//! assembled verdict JSON — useful for spot checks without the service
//! or its database. `pelorus window` prints the default screening window.
//!
//! Provider credentials come from the same environment variables the
//! service reads (`PELORUS_LLOYDS_*`, `PELORUS_KPLER_*`). The local
//! datastore is not consulted: watchlist and counterparty checks report
//! clean, which the output marks clearly.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pelorus_core::{DateWindow, Imo};
use pelorus_intel::{
    prefetch_vessel_intel, KplerClient, KplerConfig, LloydsClient, LloydsConfig, SessionCache,
};
use pelorus_screening::session::{run_screening, ScreeningInputs, ScreeningRequest};
use pelorus_screening::verdict::OperatorInfo;
use pelorus_screening::Vertical;

/// Pelorus maritime screening CLI.
#[derive(Parser, Debug)]
#[command(name = "pelorus", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Screen one vessel against the live providers and print the verdict.
    Screen(ScreenArgs),

    /// Print the default screening date window.
    Window,
}

#[derive(clap::Args, Debug)]
struct ScreenArgs {
    /// Vessel IMO (7 digits).
    #[arg(long)]
    imo: String,

    /// Vessel name used in the verdict.
    #[arg(long, default_value = "")]
    name: String,

    /// Window start (YYYY-MM-DD). Defaults to one year before --to.
    #[arg(long)]
    from: Option<String>,

    /// Window end (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    to: Option<String>,

    /// Pretty-print the verdict JSON.
    #[arg(long)]
    pretty: bool,
}

fn env_var(name: &str) -> anyhow::Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("missing required environment variable {name}"))
}

fn resolve_window(args: &ScreenArgs) -> anyhow::Result<DateWindow> {
    match (&args.from, &args.to) {
        (Some(from), Some(to)) => Ok(DateWindow::parse(from, to)?),
        (None, Some(to)) => {
            let end = chrono::NaiveDate::parse_from_str(to, "%Y-%m-%d")
                .with_context(|| format!("invalid --to date {to:?}"))?;
            Ok(DateWindow::year_ending(end))
        }
        (Some(from), None) => {
            let window = DateWindow::last_year();
            Ok(DateWindow::parse(from, &window.end_iso())?)
        }
        (None, None) => Ok(DateWindow::last_year()),
    }
}

async fn run_screen(args: ScreenArgs) -> anyhow::Result<()> {
    let imo = Imo::new(args.imo.as_str())?;
    let window = resolve_window(&args)?;

    let lloyds = LloydsClient::new(LloydsConfig::new(
        env_var("PELORUS_LLOYDS_BASE_URL")?,
        env_var("PELORUS_LLOYDS_TOKEN")?,
    ))
    .map_err(|e| anyhow::anyhow!("lloyds client: {e}"))?;
    let kpler = KplerClient::new(KplerConfig::new(
        env_var("PELORUS_KPLER_BASE_URL")?,
        env_var("PELORUS_KPLER_RISKS_URL")?,
        env_var("PELORUS_KPLER_TOKEN")?,
    ))
    .map_err(|e| anyhow::anyhow!("kpler client: {e}"))?;

    let cache = SessionCache::new();
    eprintln!(
        "screening {imo} over {} (7 provider calls, coalesced)",
        window.as_range_param()
    );
    let intel = prefetch_vessel_intel(&lloyds, &kpler, &cache, &imo, window).await;

    let request = ScreeningRequest {
        vertical: Vertical::StsBunkering,
        uuid: format!("cli-{imo}"),
        voyage_number: String::new(),
        vessel_imo: Some(imo.clone()),
        vessel_name: if args.name.is_empty() {
            format!("IMO-{imo}")
        } else {
            args.name.clone()
        },
        cargo_origin: None,
        port_country: None,
        roles: Vertical::StsBunkering
            .roles()
            .iter()
            .map(|r| (r.key.to_string(), Vec::new()))
            .collect(),
        fleet: Vec::new(),
        operator: OperatorInfo::default(),
    };

    let inputs = ScreeningInputs::empty(intel);
    let verdict = run_screening(&request, &inputs, chrono::Utc::now());

    eprintln!(
        "overall: {} | vessel: {} (watchlist and counterparty stores not consulted)",
        verdict.project_risk_status, verdict.vessel_risk_status
    );
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&verdict)?
    } else {
        serde_json::to_string(&verdict)?
    };
    println!("{rendered}");
    Ok(())
}

fn run_window() {
    let window = DateWindow::last_year();
    println!("start_date: {}", window.start_iso());
    println!("end_date:   {}", window.end_iso());
    println!("range:      {}", window.as_range_param());
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Screen(args) => run_screen(args).await,
        Commands::Window => {
            run_window();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
