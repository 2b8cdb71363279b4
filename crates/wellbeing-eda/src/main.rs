//! CLI entry point for the student wellbeing analysis.

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing::{error, info};
use wellbeing_eda::{AnalysisConfig, DEFAULT_DATASET_URL, DataSource, Pipeline};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory data analysis of student wellbeing and CGPA",
    long_about = "Loads the student wellbeing dataset, removes duplicates, fills missing \
                  numeric values with medians, analyzes CGPA drivers, and writes six insight \
                  charts plus a cleaned CSV.\n\n\
                  EXAMPLES:\n  \
                  # Analyze the published dataset into the current directory\n  \
                  wellbeing-eda\n\n  \
                  # Analyze a local copy, writing into results/\n  \
                  wellbeing-eda -i students.csv -o results/\n\n  \
                  # Machine-readable output only\n  \
                  wellbeing-eda -i students.csv --json | jq .insight_summaries"
)]
struct Args {
    /// CSV source: an http(s) URL or a local file path
    #[arg(short, long, default_value = DEFAULT_DATASET_URL)]
    input: String,

    /// Output directory for charts, the cleaned CSV and the report
    #[arg(short, long, default_value = ".")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress logs (only warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Skip rendering the six PNG charts
    #[arg(long)]
    no_charts: bool,

    /// Draw charts without titles or axis labels
    #[arg(long)]
    no_chart_text: bool,

    /// Print the JSON run report to stdout instead of console text
    ///
    /// Disables all logs so stdout only carries JSON.
    #[arg(long)]
    json: bool,

    /// Write eda_report.json to the output directory
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Number of rows shown in the head previews
    #[arg(long, default_value = "5")]
    head_rows: usize,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = AnalysisConfig::builder()
        .output_dir(&args.output)
        .head_rows(args.head_rows)
        .render_charts(!args.no_charts)
        .chart_text(!args.no_chart_text)
        .emit_report(args.emit_report)
        .print_console(!args.json)
        .build()?;

    let source = DataSource::parse(&args.input);
    info!("Reading dataset from: {}", source);

    let pipeline = Pipeline::builder().config(config).build()?;
    let outcome = match pipeline.run(&source) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Analysis failed: {}", e);
            if args.json {
                println!("{}", e.failure_json()?);
            }
            return Err(anyhow!("Analysis failed: {}", e));
        }
    };

    if args.json {
        println!("{}", outcome.to_report().to_json()?);
    } else {
        info!(
            "Done: {} file(s) written to {}",
            outcome.written_files.len(),
            args.output
        );
    }

    Ok(())
}
