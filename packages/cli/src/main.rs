#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the mortality dashboard engine.
//!
//! Loads the population, mortality and boundary files, drives the
//! recomputation controller with filter events, and prints the resulting
//! views. Without a subcommand it opens an interactive menu.
//!
//! Uses `indicatif-log-bridge` (via [`mortality_dash_cli_utils::init_logger`])
//! so that log lines and the load progress bar never fight for the terminal.

mod interactive;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mortality_dash_cli_utils::{IndicatifProgress, MultiProgress};
use mortality_dash_dashboard::{
    EngineConfig, FileLoader, FilterEvent, RecomputationController, RecordingSink, ViewSink,
};

#[derive(Parser)]
#[command(name = "mortality_dash", about = "Mortality dashboard aggregation engine")]
struct Cli {
    /// Config file (overrides `MORTALITY_DASH_CONFIG`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Population CSV (overrides the config)
    #[arg(long, global = true)]
    population: Option<PathBuf>,
    /// Mortality CSV (overrides the config)
    #[arg(long, global = true)]
    mortality: Option<PathBuf>,
    /// Boundary `GeoJSON` (overrides the config)
    #[arg(long, global = true)]
    boundaries: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the views for a filter and print them as JSON
    Views {
        /// First year (defaults to the earliest year in the data)
        #[arg(long)]
        from: Option<i32>,
        /// Last year (defaults to the latest year in the data)
        #[arg(long)]
        to: Option<i32>,
        /// Country for the country-scoped views
        #[arg(long)]
        country: Option<String>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// List the countries in the mortality table with their region codes
    Countries,
    /// Print the first and last year of the mortality table
    Years,
}

fn load_config(cli: &Cli) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = EngineConfig::resolve(cli.config.as_deref())?;

    if let Some(path) = &cli.population {
        config.data.population.clone_from(path);
    }
    if let Some(path) = &cli.mortality {
        config.data.mortality.clone_from(path);
    }
    if let Some(path) = &cli.boundaries {
        config.data.boundaries.clone_from(path);
    }

    Ok(config)
}

async fn load_controller(
    config: &EngineConfig,
    multi: &MultiProgress,
    sinks: Vec<Box<dyn ViewSink>>,
) -> Result<RecomputationController, Box<dyn std::error::Error>> {
    let progress = IndicatifProgress::load_bar(multi, "Loading datasets");
    let loader = FileLoader::new(config.sources(), progress);

    let mut controller = RecomputationController::from_config(config);
    for sink in sinks {
        controller.add_sink(sink);
    }
    controller.load(&loader).await?;
    log::debug!("Loaded {}", config.data.mortality.display());

    Ok(controller)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = mortality_dash_cli_utils::init_logger();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let Some(command) = cli.command else {
        let published = RecordingSink::new();
        let sinks: Vec<Box<dyn ViewSink>> = vec![
            Box::new(published.clone()),
            Box::new(output::SummarySink::new(config.views.ranking)),
        ];
        let mut controller = load_controller(&config, &multi, sinks).await?;

        return interactive::run(&mut controller, &published);
    };

    match command {
        Commands::Views {
            from,
            to,
            country,
            pretty,
        } => {
            let published = RecordingSink::new();
            let sinks: Vec<Box<dyn ViewSink>> = vec![Box::new(published.clone())];
            let mut controller = load_controller(&config, &multi, sinks).await?;

            if from.is_some() || to.is_some() {
                let current = controller.filter_state().map(|f| f.year_range);
                let from = from.or_else(|| current.map(|r| r.from())).unwrap_or_default();
                let to = to.or_else(|| current.map(|r| r.to())).unwrap_or_default();
                controller.dispatch(FilterEvent::YearRangeChanged { from, to })?;
            }
            if let Some(country) = country {
                controller.dispatch(FilterEvent::CountrySelected(country))?;
            }

            if let Some(update) = published.updates().last() {
                println!("{}", output::to_json(update, pretty)?);
            }
        }
        Commands::Countries => {
            let controller = load_controller(&config, &multi, Vec::new()).await?;
            let resolver = config.resolver();
            let countries = controller
                .store()
                .map(|store| store.countries())
                .unwrap_or_default();

            println!("{:<30} CODE", "COUNTRY");
            println!("{}", "-".repeat(36));
            for country in countries {
                let code = resolver
                    .resolve(country)
                    .map_or("-", |code| code.as_str());
                println!("{country:<30} {code}");
            }
        }
        Commands::Years => {
            let controller = load_controller(&config, &multi, Vec::new()).await?;
            match controller.store().and_then(|store| store.year_bounds()) {
                Some(range) => println!("{}\t{}", range.from(), range.to()),
                None => println!("No mortality records"),
            }
        }
    }

    Ok(())
}
