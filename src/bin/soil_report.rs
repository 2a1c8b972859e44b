//! Print a soil analysis report for one soil test.
//!
//! Usage:
//!   cargo run --bin soil_report -- --ph 6.5 --nitrogen 180 --phosphorus 25 --potassium 150
//!   cargo run --bin soil_report -- --ph 5.0 -n 50 -p 10 -k 50 --format json
//!
//! Rejected samples exit non-zero. With `--format json` the error envelope
//! (`error`, `code`, `field`) is also printed to stdout.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use soil_analysis_rust::formatters::{JsonFormatter, MarkdownFormatter};
use soil_analysis_rust::{analyze_raw, RawSoilInputs, SoilAnalysisResult};

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "soil_report", about = "Analyze a soil test (pH and NPK in ppm)")]
struct Args {
    /// Soil pH (3-10)
    #[arg(long, allow_hyphen_values = true)]
    ph: String,

    /// Nitrogen in ppm
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    nitrogen: String,

    /// Phosphorus in ppm
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    phosphorus: String,

    /// Potassium in ppm
    #[arg(short = 'k', long, allow_hyphen_values = true)]
    potassium: String,

    #[arg(long, value_enum, default_value = "markdown")]
    format: OutputFormat,
}

impl Args {
    fn raw_inputs(&self) -> RawSoilInputs {
        RawSoilInputs::new(
            self.ph.as_str(),
            self.nitrogen.as_str(),
            self.phosphorus.as_str(),
            self.potassium.as_str(),
        )
    }
}

fn render(result: &SoilAnalysisResult, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Markdown => Ok(MarkdownFormatter::format(result)),
        OutputFormat::Json => Ok(format!("{}\n", JsonFormatter::format(result)?)),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soil_analysis_rust=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match analyze_raw(&args.raw_inputs()) {
        Ok(result) => print!("{}", render(&result, args.format)?),
        Err(e) => {
            if args.format == OutputFormat::Json {
                println!("{}", JsonFormatter::format_error(&e)?);
            }
            return Err(e).context("Soil sample rejected");
        }
    }

    Ok(())
}
