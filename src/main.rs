use analyzer::Screener;
use anyhow::{Context, Result};
use api_client::LixingerClient;
use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use configuration::{Config, OutputFormat, init_tracing, load_config};
use core_types::StockCode;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Instrument;
use uuid::Uuid;

mod render;
mod screening;

use screening::{ScreeningReport, ScreeningRequest, screen};

/// The main entry point for the white-horse screener.
///
/// Exit status is 0 for any verdict, pass or fail, and for a malformed stock
/// code; 1 only when configuration, logging or the data provider fails.
#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the token may come from elsewhere.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let code = match cli.code.parse::<StockCode>() {
        Ok(code) => code,
        Err(e) => {
            println!("{}", e);
            return ExitCode::SUCCESS;
        }
    };

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_tracing(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let format = cli.format.unwrap_or(config.output.format);
    let span = tracing::info_span!("screen", run_id = %Uuid::new_v4(), code = %code);

    match handle_screen(&cli, code, &config).instrument(span).await {
        Ok(report) => match print_report(&report, format) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = ?e, "Failed to render the report.");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            tracing::error!(error = ?e, "Screening aborted.");
            eprintln!("Error during screening: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Checks whether an A-share stock qualifies as a white-horse: cheap against
/// its own history, with revenue outgrowing receivables and inventory and a
/// healthy current ratio.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The stock code to screen (e.g., "000651").
    #[arg(long)]
    code: String,

    /// Lixinger Open API token.
    #[arg(long, env = "LIXINGER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// The first year of the statement series; the series starts on January 1st.
    #[arg(long, default_value_t = 2014, value_parser = clap::value_parser!(i32).range(1990..=2100))]
    year: i32,

    /// The valuation snapshot date (format: YYYY-MM-DD). Defaults to yesterday,
    /// the most recent day the provider has published.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Path to a TOML config file. Defaults to ./white-horse.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format; overrides `output.format` from the config.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

// ==============================================================================
// Screen Command Logic
// ==============================================================================

/// Resolves the token and dates, then runs the screening pipeline.
async fn handle_screen(cli: &Cli, code: StockCode, config: &Config) -> Result<ScreeningReport> {
    let token = cli
        .token
        .clone()
        .or_else(|| config.api.token.clone())
        .filter(|t| !t.trim().is_empty())
        .context("No API token: pass --token, set LIXINGER_TOKEN or configure api.token")?;

    let today = Local::now().date_naive();
    let request = build_request(code, cli.year, cli.date, today)?;
    tracing::info!(
        snapshot_date = %request.snapshot_date,
        start = %request.start_date,
        end = %request.end_date,
        "Starting screening."
    );

    let screener = Screener::new(&config.screener).context("Invalid screener configuration")?;
    let client = LixingerClient::new(&config.api, token).context("Failed to build the API client")?;

    let report = screen(&client, &screener, &request)
        .await
        .context("Failed to fetch data from Lixinger")?;

    tracing::info!(
        passed = report.verdict.passed,
        rule = ?report.verdict.failing_rule,
        "Screening finished."
    );
    Ok(report)
}

/// Works out the request dates. The statement series runs from January 1st of
/// `start_year` to `today`; the snapshot is `date` or, by default, yesterday.
fn build_request(
    code: StockCode,
    start_year: i32,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<ScreeningRequest> {
    let start_date = NaiveDate::from_ymd_opt(start_year, 1, 1)
        .with_context(|| format!("Invalid start year {}", start_year))?;
    let snapshot_date = match date {
        Some(date) => date,
        None => today
            .checked_sub_days(Days::new(1))
            .context("Cannot compute the day before today")?,
    };
    if start_date > today {
        anyhow::bail!("Start year {} lies in the future", start_year);
    }

    Ok(ScreeningRequest {
        code,
        snapshot_date,
        start_date,
        end_date: today,
    })
}

fn print_report(report: &ScreeningReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", render::render_table(report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
