use clap::{Args, Parser, Subcommand};
use corewall::core::structural::DriftLimit;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "corewall - preliminary sizing of reinforced-concrete core walls by genetic search over a simplified cantilever capacity model.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel fitness evaluation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for the per-story wall sections that best fit a story-force profile.
    Optimize(OptimizeArgs),
    /// Check one uniform wall section against a story-force profile.
    Evaluate(EvaluateArgs),
}

/// Arguments for the `optimize` subcommand.
#[derive(Args, Debug)]
pub struct OptimizeArgs {
    // --- Core Arguments ---
    /// Story-force CSV file with an `elevation,force` header (ft, kips).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Write the winning per-story schedule and its DCRs to this CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Optimizer configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Search Overrides ---
    /// Seed the random source for a reproducible run.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the population size.
    #[arg(long, value_name = "INT")]
    pub population_size: Option<usize>,

    /// Override the maximum number of generations.
    #[arg(long, value_name = "INT")]
    pub max_generations: Option<usize>,

    /// Override the number of generations without improvement before stopping.
    #[arg(long, value_name = "INT")]
    pub patience: Option<usize>,

    // --- Fitness Overrides ---
    /// Roof drift limit: 'seismic' (0.02), 'wind' (0.0025) or a ratio.
    #[arg(long, value_name = "LIMIT")]
    pub drift_limit: Option<DriftLimit>,

    /// Set a specific configuration value, overriding the config file and flags.
    /// Can be used multiple times. Example: -S search.mutation-rate=0.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Story-force CSV file with an `elevation,force` header (ft, kips).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Wall length in feet, applied to every story.
    #[arg(long, required = true, value_name = "FT")]
    pub length: u32,

    /// Wall thickness in feet, applied to every story.
    #[arg(long, required = true, value_name = "FT")]
    pub thickness: u32,

    /// Reinforcement ratio, applied to every story.
    #[arg(long, required = true, value_name = "RATIO")]
    pub ratio: f64,

    /// Roof drift limit: 'seismic' (0.02), 'wind' (0.0025) or a ratio.
    #[arg(long, value_name = "LIMIT", default_value = "seismic")]
    pub drift_limit: DriftLimit,
}
