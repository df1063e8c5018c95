// src/main.rs

//! jobfinder CLI
//!
//! Searches public job platforms for quality and regulatory vacancies for
//! every company in an input list and writes the aggregate to CSV.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jobfinder::{
    error::Result,
    models::{Config, JobCategory},
    pipeline::{LogSink, Orchestrator, RunOptions},
    services::SearchPageFetcher,
    storage::{load_companies, CsvExporter, JsonExporter, ResultExporter},
};

/// Output serialization format.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Csv,
    Json,
}

/// jobfinder - company job vacancy search
#[derive(Parser, Debug)]
#[command(name = "jobfinder", version, about = "Finds job vacancies per company")]
struct Cli {
    /// Path to a TOML config file (taxonomy, platforms, cleaning rules)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search vacancies for every company in the input list
    Run {
        /// Input company list (CSV with a Company column)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = "job_vacancies_results.csv")]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Categories to search (quality, regulatory, custom)
        #[arg(long, value_delimiter = ',', default_values = ["quality", "regulatory"])]
        categories: Vec<JobCategory>,

        /// Title for the custom category search
        #[arg(long)]
        custom_title: Option<String>,

        /// Location filter, comma-separated alternatives are OR-combined
        #[arg(long)]
        location: Option<String>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    match cli.command {
        Command::Run {
            input,
            output,
            format,
            mut categories,
            custom_title,
            location,
        } => {
            let mut config = config;
            if let Some(title) = &custom_title {
                config.set_custom_title(title);
                if !categories.contains(&JobCategory::Custom) {
                    categories.push(JobCategory::Custom);
                }
            }
            config.validate()?;

            // Declared order, no duplicates; export columns follow this.
            categories.sort_unstable();
            categories.dedup();

            let companies = load_companies(&input)?;
            let options = RunOptions {
                categories,
                location_filter: location,
            };

            let orchestrator = Orchestrator::new(&config);
            let mut sink = LogSink;

            let fetcher = match SearchPageFetcher::new(&config.search) {
                Ok(fetcher) => fetcher,
                Err(e) => {
                    orchestrator.abort(&e, &mut sink);
                    return Err(e);
                }
            };

            let state = orchestrator
                .run(&companies, &options, &fetcher, &mut sink)
                .await?;

            let exporter: Box<dyn ResultExporter> = match format {
                OutputFormat::Csv => Box::new(CsvExporter::new(&output)),
                OutputFormat::Json => Box::new(JsonExporter::new(&output)),
            };
            let summary = exporter.export(&state.results, &options.categories)?;

            log::info!(
                "Wrote {} companies ({} postings) to {}",
                summary.row_count,
                summary.posting_count,
                summary.location
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!(
                "Config OK: {} categories, {} platforms",
                config.categories.len(),
                config.platforms.len()
            );
        }
    }

    log::info!("Done!");

    Ok(())
}
