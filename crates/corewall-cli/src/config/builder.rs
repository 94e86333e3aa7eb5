use super::file::{FileConfig, FileRange};
use super::models::AppConfig;
use crate::cli::OptimizeArgs;
use crate::error::{CliError, Result};
use corewall::core::structural::DriftLimit;
use corewall::engine::config::{OptimizerConfig, OptimizerConfigBuilder};

/// Resolves the optimizer configuration from, in increasing precedence: library
/// defaults, the TOML file, explicit flags and `-S` overrides.
pub fn build_config(args: &OptimizeArgs) -> Result<AppConfig> {
    let defaults = OptimizerConfig::default();

    let mut file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_cli_flags(&mut file_config, args);
    file_config.apply_set_values(&args.set_values)?;

    let search = file_config.search.unwrap_or_default();
    let bounds = file_config.bounds.unwrap_or_default();
    let fitness = file_config.fitness.unwrap_or_default();

    let (length_min, length_max) = resolve_range(
        bounds.length,
        defaults.bounds.length.min,
        defaults.bounds.length.max,
    );
    let (thickness_min, thickness_max) = resolve_range(
        bounds.thickness,
        defaults.bounds.thickness.min,
        defaults.bounds.thickness.max,
    );
    let (ratio_min, ratio_max) = resolve_range(
        bounds.reinforcement_ratio,
        defaults.bounds.reinforcement_ratio.min,
        defaults.bounds.reinforcement_ratio.max,
    );

    let drift_limit = match fitness.drift_limit {
        Some(text) => text
            .parse::<DriftLimit>()
            .map_err(|e| CliError::Config(e.to_string()))?,
        None => defaults.fitness.drift_limit,
    };

    let mut builder = OptimizerConfigBuilder::new()
        .population_size(
            search
                .population_size
                .unwrap_or(defaults.search.population_size),
        )
        .mutation_rate(search.mutation_rate.unwrap_or(defaults.search.mutation_rate))
        .crossover_rate(
            search
                .crossover_rate
                .unwrap_or(defaults.search.crossover_rate),
        )
        .max_generations(
            search
                .max_generations
                .unwrap_or(defaults.search.max_generations),
        )
        .patience(search.patience.unwrap_or(defaults.search.patience))
        .length_bounds(length_min, length_max)
        .thickness_bounds(thickness_min, thickness_max)
        .reinforcement_ratio_bounds(ratio_min, ratio_max)
        .concrete_impact_weight(
            fitness
                .concrete_impact_weight
                .unwrap_or(defaults.fitness.concrete_impact_weight),
        )
        .reinforcement_impact_weight(
            fitness
                .reinforcement_impact_weight
                .unwrap_or(defaults.fitness.reinforcement_impact_weight),
        )
        .drift_limit(drift_limit);
    if let Some(seed) = search.seed {
        builder = builder.seed(seed);
    }

    let optimizer = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        optimizer,
    })
}

fn apply_cli_flags(file_config: &mut FileConfig, args: &OptimizeArgs) {
    let search = file_config.search.get_or_insert_with(Default::default);
    search.seed = args.seed.or(search.seed);
    search.population_size = args.population_size.or(search.population_size);
    search.max_generations = args.max_generations.or(search.max_generations);
    search.patience = args.patience.or(search.patience);

    if let Some(limit) = args.drift_limit {
        let fitness = file_config.fitness.get_or_insert_with(Default::default);
        fitness.drift_limit = Some(drift_limit_text(limit));
    }
}

fn drift_limit_text(limit: DriftLimit) -> String {
    match limit {
        DriftLimit::Seismic => "seismic".to_string(),
        DriftLimit::Wind => "wind".to_string(),
        DriftLimit::Custom(value) => value.to_string(),
    }
}

fn resolve_range<T: Copy>(range: Option<FileRange<T>>, min: T, max: T) -> (T, T) {
    let range = range.unwrap_or(FileRange {
        min: None,
        max: None,
    });
    (range.min.unwrap_or(min), range.max.unwrap_or(max))
}
