use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use kittens_bench::config::BenchConfig;
use kittens_bench::logging::init_logging;
use kittens_bench::profile::{RivalSource, build_registry, write_registry};
use kittens_bench::scenario::{Scenario, run_scenario};

/// Offline tooling and decision harness for the kittens strategy bot.
#[derive(Debug, Parser)]
#[command(
    name = "kittens-bench",
    author,
    version,
    about = "Offline profiling and scenario harness for the kittens bot"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze rival sources and write a profile registry.
    Profile {
        /// Rival source as <id>=<path>; repeat for every rival.
        #[arg(long = "rival", value_name = "ID=PATH", required = true)]
        rivals: Vec<RivalSource>,

        /// Where to write the registry JSON.
        #[arg(long, value_name = "FILE", default_value = "bench/profiles.json")]
        out: PathBuf,
    },
    /// Build the configured bot and print its answer to a scenario as JSON.
    Decide {
        /// Path to the YAML configuration file.
        #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
        config: PathBuf,

        /// Path to the YAML scenario.
        #[arg(short, long, value_name = "FILE")]
        scenario: PathBuf,

        /// Override the run identifier.
        #[arg(long, value_name = "RUN_ID")]
        run_id: Option<String>,

        /// Override the placement RNG seed.
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Emit per-decision hand and foreknowledge details.
        #[arg(long)]
        log_decision_details: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Profile { rivals, out } => {
            let registry = build_registry(&rivals)?;
            write_registry(&registry, &out)?;
            println!(
                "Profiled {} rival{} into {}",
                registry.len(),
                if registry.len() == 1 { "" } else { "s" },
                out.display()
            );
        }
        Command::Decide {
            config,
            scenario,
            run_id,
            seed,
            log_decision_details,
        } => {
            let mut config = BenchConfig::from_path(&config)?;
            if let Some(run_id) = run_id {
                config.run_id = run_id;
            }
            if let Some(seed) = seed {
                config.bot.seed = seed;
            }
            if log_decision_details {
                config.logging.decision_details = true;
            }
            config.validate()?;

            let _logging_guard = init_logging(&config.logging, &config.output_dir())?;
            let profiles = config.bot.load_profiles()?;
            let scenario = Scenario::from_path(&scenario)?;

            let report = run_scenario(&config, profiles, &scenario);
            let json = serde_json::to_string_pretty(&report).context("encoding decision")?;
            println!("{json}");
        }
    }
    Ok(())
}
