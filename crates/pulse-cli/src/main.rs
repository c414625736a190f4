//! CLI entry point: dashboard reports over a local CSV file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use pulse_analytics::{
    categorical_constraint, date_bounds, filter_options, ChartReport, DashboardOutcome,
    DashboardReport, FilterSelection,
};
use pulse_core::PostRecord;
use pulse_insight::InsightClient;

#[derive(Debug, Parser)]
#[command(name = "pulse-cli")]
#[command(about = "Social post analytics from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a full dashboard report for a CSV file.
    Report(ReportArgs),
    /// Show the filter values a CSV file offers.
    Options(OptionsArgs),
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: PathBuf,

    /// Keep only posts from this platform
    #[arg(long)]
    platform: Option<String>,

    /// Keep only posts with this sentiment
    #[arg(long)]
    sentiment: Option<String>,

    /// Keep only posts with this media type
    #[arg(long)]
    media_type: Option<String>,

    /// Keep only posts from this location
    #[arg(long)]
    location: Option<String>,

    /// Start of the inclusive date range (YYYY-MM-DD); defaults to the
    /// earliest date in the file
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the inclusive date range (YYYY-MM-DD); defaults to the latest
    /// date in the file
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Print the report as JSON instead of a human-readable summary
    #[arg(long)]
    json: bool,

    /// Compute charts only; skip all generation-endpoint calls
    #[arg(long)]
    skip_insights: bool,
}

#[derive(Debug, Args)]
struct OptionsArgs {
    /// Path to the CSV file to inspect
    #[arg(short, long)]
    input: PathBuf,

    /// Print the options as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Report(args) => run_report(args).await,
        Commands::Options(args) => run_options(&args),
    }
}

fn load_table(path: &Path) -> anyhow::Result<Vec<PostRecord>> {
    let csv_text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows = pulse_ingest::read_posts(&csv_text).with_context(|| {
        format!(
            "failed to parse {}; required columns: 'Date', 'Engagements'",
            path.display()
        )
    })?;
    Ok(pulse_ingest::clean(rows))
}

fn selection_from_args(args: &ReportArgs, canonical: &[PostRecord]) -> FilterSelection {
    let (min_date, max_date) = date_bounds(canonical);
    let constraint = |value: &Option<String>| value.as_deref().and_then(categorical_constraint);

    FilterSelection {
        platform: constraint(&args.platform),
        sentiment: constraint(&args.sentiment),
        media_type: constraint(&args.media_type),
        location: constraint(&args.location),
        start_date: args.from.unwrap_or(min_date),
        end_date: args.to.unwrap_or(max_date),
    }
}

async fn run_report(args: ReportArgs) -> anyhow::Result<()> {
    let canonical = load_table(&args.input)?;
    let selection = selection_from_args(&args, &canonical);

    let client = if args.skip_insights {
        None
    } else {
        let config = pulse_core::load_app_config()?;
        Some(InsightClient::with_base_url(
            config.insight_api_key.as_deref(),
            config.insight_timeout_secs,
            &config.insight_base_url,
            &config.insight_model,
        )?)
    };

    let outcome =
        pulse_analytics::render_dashboard(&canonical, &selection, client.as_ref()).await;

    match outcome {
        DashboardOutcome::Report(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        DashboardOutcome::NoMatch { total_records } => {
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "status": "no_matching_data",
                        "total_records": total_records,
                    }))?
                );
            } else {
                println!("No data matches the selected filters ({total_records} records total).");
            }
        }
    }

    Ok(())
}

fn run_options(args: &OptionsArgs) -> anyhow::Result<()> {
    let canonical = load_table(&args.input)?;
    let options = filter_options(&canonical);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    println!("Records:     {}", canonical.len());
    println!("Date range:  {} to {}", options.start_date, options.end_date);
    println!("Platforms:   {}", options.platforms.join(", "));
    println!("Sentiments:  {}", options.sentiments.join(", "));
    println!("Media types: {}", options.media_types.join(", "));
    println!("Locations:   {}", options.locations.join(", "));
    Ok(())
}

fn print_report(report: &DashboardReport) {
    println!(
        "Dashboard report — {} of {} records match",
        report.matched_records, report.total_records
    );

    if let Some(summary) = &report.summary {
        println!("\nCampaign summary:");
        println!("{summary}");
    }

    for chart in &report.charts {
        print_chart(chart);
    }
}

fn print_chart(chart: &ChartReport) {
    println!("\n{}", chart.dataset.title);
    println!("{}", "-".repeat(chart.dataset.title.len()));
    for point in &chart.dataset.points {
        println!("  {:<24} {}", point.label, point.value);
    }
    if let Some(insight) = &chart.insight {
        println!("  Insight: {insight}");
    }
}
