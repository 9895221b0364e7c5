use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use schoolsim::{Administrator, School, SchoolConfig, SchoolReport, SchoolSnapshot, SeededRandom};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Simulate a vocational school for a number of days.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// School configuration file
    config: PathBuf,
    /// Number of days to simulate
    days: u32,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
    /// Only print the state after the last day
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if std::env::var_os("POLARS_FMT_MAX_ROWS").is_none() {
        std::env::set_var("POLARS_FMT_MAX_ROWS", "1000");
    }

    let config = SchoolConfig::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let rng = match cli.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    let mut administrator = Administrator::new(School::from_config(config), rng);

    let mut printed = Ok(());
    administrator.run(cli.days, |school, outcome| {
        if printed.is_err() || (cli.quiet && outcome.day < cli.days) {
            return;
        }
        printed = print_day(&SchoolSnapshot::capture(school, outcome.day), cli.format);
    });
    printed
}

fn print_day(snapshot: &SchoolSnapshot, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Table => {
            let report = SchoolReport::new(snapshot).context("failed to build report tables")?;
            println!("Day: {}", snapshot.day);
            println!("{report}");
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(snapshot)?),
    }
    Ok(())
}
