use crate::core::materials::carbon::CarbonSummary;
use crate::core::materials::quantities::MaterialQuantities;
use crate::core::models::profile::StoryForceProfile;
use crate::core::models::section::SectionSchedule;
use crate::core::structural::CapacityResult;
use crate::engine::config::OptimizerConfig;
use crate::engine::context::OptimizationContext;
use crate::engine::error::EngineError;
use crate::engine::fitness;
use crate::engine::operators;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{GenerationSummary, Individual, Population};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use tracing::{debug, info, instrument};

/// Why the generation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    MaxGenerations,
    /// The best-ever fitness did not strictly improve for `patience` generations.
    EarlyStopped,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best schedule of the final population.
    pub schedule: SectionSchedule,
    pub fitness: f64,
    pub generations_run: usize,
    pub termination: Termination,
    pub capacity: CapacityResult,
    pub quantities: MaterialQuantities,
    pub carbon: CarbonSummary,
    pub history: Vec<GenerationSummary>,
}

/// Runs a full optimization, seeding the random source from `config.search.seed` or
/// from OS entropy when no seed is set.
pub fn run(
    profile: &StoryForceProfile,
    config: &OptimizerConfig,
    reporter: &ProgressReporter,
) -> Result<OptimizationResult, EngineError> {
    let mut rng = seeded_rng(config);
    run_with_rng(profile, config, reporter, None, &mut rng)
}

/// Like [`run`], but checks `cancel` between generations and returns the best design
/// found so far once it is raised.
pub fn run_with_cancel(
    profile: &StoryForceProfile,
    config: &OptimizerConfig,
    reporter: &ProgressReporter,
    cancel: &AtomicBool,
) -> Result<OptimizationResult, EngineError> {
    let mut rng = seeded_rng(config);
    run_with_rng(profile, config, reporter, Some(cancel), &mut rng)
}

fn seeded_rng(config: &OptimizerConfig) -> StdRng {
    match config.search.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[instrument(skip_all, name = "optimization_workflow", fields(stories = profile.len()))]
pub fn run_with_rng<R: Rng + ?Sized>(
    profile: &StoryForceProfile,
    config: &OptimizerConfig,
    reporter: &ProgressReporter,
    cancel: Option<&AtomicBool>,
    rng: &mut R,
) -> Result<OptimizationResult, EngineError> {
    config.validate()?;
    let context = OptimizationContext::new(profile, config, reporter, cancel);

    let population = initialize_population(&context, rng)?;
    let outcome = evolve(&context, population, rng)?;
    let result = finalize(&context, outcome)?;

    info!(
        fitness = result.fitness,
        generations = result.generations_run,
        termination = ?result.termination,
        "Optimization complete."
    );
    Ok(result)
}

fn initialize_population<R: Rng + ?Sized>(
    context: &OptimizationContext,
    rng: &mut R,
) -> Result<Population, EngineError> {
    let config = context.config;
    context.reporter.report(Progress::PhaseStart {
        name: "Initialization",
    });
    info!(
        population_size = config.search.population_size,
        "Generating initial population."
    );

    let schedules = (0..config.search.population_size)
        .map(|_| operators::random_schedule(context.profile.len(), &config.bounds, rng))
        .collect();
    let individuals = fitness::evaluate_all(schedules, context.profile, &config.fitness)?;

    context.reporter.report(Progress::PhaseFinish);
    Ok(Population::new(individuals))
}

struct EvolutionOutcome {
    population: Population,
    generations_run: usize,
    termination: Termination,
    history: Vec<GenerationSummary>,
}

fn evolve<R: Rng + ?Sized>(
    context: &OptimizationContext,
    mut population: Population,
    rng: &mut R,
) -> Result<EvolutionOutcome, EngineError> {
    let search = &context.config.search;
    let mut best_ever = population
        .best()
        .ok_or(EngineError::EmptyPopulation {
            phase: "initialization",
        })?
        .fitness;
    let mut stale = 0;
    let mut generations_run = 0;
    let mut termination = Termination::MaxGenerations;
    let mut history = Vec::with_capacity(search.max_generations);

    context.reporter.report(Progress::PhaseStart { name: "Evolution" });
    context.reporter.report(Progress::TaskStart {
        total: search.max_generations as u64,
    });

    for generation in 1..=search.max_generations {
        if context.is_cancelled() {
            info!(generation, "Cancellation requested; stopping.");
            context.reporter.report(Progress::Message(format!(
                "Cancelled after {} generation(s)",
                generations_run
            )));
            termination = Termination::Cancelled;
            break;
        }

        population = next_generation(context, population, rng)?;
        generations_run = generation;

        let best = population
            .best()
            .ok_or(EngineError::EmptyPopulation {
                phase: "reproduction",
            })?
            .fitness;
        if best < best_ever {
            best_ever = best;
            stale = 0;
        } else {
            stale += 1;
        }

        let summary = GenerationSummary {
            generation,
            population_size: population.len(),
            best_fitness: best,
            mean_fitness: population.mean_fitness(),
            best_ever_fitness: best_ever,
            generations_without_improvement: stale,
        };
        debug!(
            generation,
            best_fitness = best,
            mean_fitness = ?summary.mean_fitness,
            stale,
            "Generation complete."
        );
        history.push(summary);

        context
            .reporter
            .report(Progress::TaskIncrement { amount: 1 });
        context.reporter.report(Progress::StatusUpdate {
            text: format!("Best fitness {:.4}", best_ever),
        });

        if stale >= search.patience {
            info!(generation, patience = search.patience, "Converged; stopping early.");
            context.reporter.report(Progress::Message(format!(
                "No improvement for {} generation(s); stopped at generation {}",
                stale, generation
            )));
            termination = Termination::EarlyStopped;
            break;
        }
    }

    context.reporter.report(Progress::TaskFinish);
    context.reporter.report(Progress::PhaseFinish);

    Ok(EvolutionOutcome {
        population,
        generations_run,
        termination,
        history,
    })
}

/// Survivors carry their scores forward; only the children are evaluated.
fn next_generation<R: Rng + ?Sized>(
    context: &OptimizationContext,
    population: Population,
    rng: &mut R,
) -> Result<Population, EngineError> {
    let config = context.config;
    let mut individuals: Vec<Individual> = operators::select(population);
    let needed = config.search.population_size - individuals.len();

    let children = operators::reproduce(
        &individuals,
        needed,
        &config.bounds,
        config.search.crossover_rate,
        config.search.mutation_rate,
        rng,
    );
    individuals.extend(fitness::evaluate_all(
        children,
        context.profile,
        &config.fitness,
    )?);

    if individuals.len() != config.search.population_size {
        return Err(EngineError::Internal(format!(
            "population size drifted from {} to {}",
            config.search.population_size,
            individuals.len()
        )));
    }
    Ok(Population::new(individuals))
}

fn finalize(
    context: &OptimizationContext,
    outcome: EvolutionOutcome,
) -> Result<OptimizationResult, EngineError> {
    let best = outcome
        .population
        .best()
        .ok_or(EngineError::EmptyPopulation {
            phase: "finalization",
        })?;
    let breakdown =
        fitness::evaluate(context.profile, &best.schedule, &context.config.fitness)?;
    let carbon = CarbonSummary::from(&breakdown.quantities);

    Ok(OptimizationResult {
        schedule: best.schedule.clone(),
        fitness: breakdown.fitness,
        generations_run: outcome.generations_run,
        termination: outcome.termination,
        capacity: breakdown.capacity,
        quantities: breakdown.quantities,
        carbon,
        history: outcome.history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::structural::DriftLimit;
    use crate::engine::config::{ConfigError, DimensionBounds, OptimizerConfigBuilder, RatioBounds};
    use std::sync::Mutex;
    use std::sync::atomic::Ordering;

    fn reference_profile() -> StoryForceProfile {
        StoryForceProfile::new([
            (0.0, 0.0),
            (10.0, 100.0),
            (20.0, 200.0),
            (30.0, 300.0),
            (40.0, 400.0),
        ])
        .unwrap()
    }

    fn small_config(
        population_size: usize,
        max_generations: usize,
        patience: usize,
    ) -> OptimizerConfig {
        OptimizerConfigBuilder::new()
            .population_size(population_size)
            .mutation_rate(0.15)
            .crossover_rate(0.9)
            .max_generations(max_generations)
            .patience(patience)
            .seed(42)
            .length_bounds(20, 40)
            .thickness_bounds(1, 2)
            .reinforcement_ratio_bounds(0.0025, 0.02)
            .concrete_impact_weight(0.1)
            .reinforcement_impact_weight(1.0)
            .drift_limit(DriftLimit::Seismic)
            .build()
            .unwrap()
    }

    #[test]
    fn best_ever_fitness_never_increases() {
        let profile = reference_profile();
        let config = small_config(40, 30, 30);

        let result = run(&profile, &config, &ProgressReporter::new()).unwrap();

        assert!(!result.history.is_empty());
        for pair in result.history.windows(2) {
            assert!(pair[1].best_fitness <= pair[0].best_fitness);
            assert!(pair[1].best_ever_fitness <= pair[0].best_ever_fitness);
        }
        let last = result.history.last().unwrap();
        assert_eq!(result.fitness, last.best_fitness);
    }

    #[test]
    fn result_respects_bounds_and_covers_every_story() {
        let profile = reference_profile();
        let config = small_config(30, 10, 10);

        let result = run(&profile, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.schedule.len(), profile.len());
        for section in result.schedule.sections() {
            assert!(config.bounds.length.contains(section.length));
            assert!(config.bounds.thickness.contains(section.thickness));
            assert!(
                config
                    .bounds
                    .reinforcement_ratio
                    .contains(section.reinforcement_ratio)
            );
        }
        assert_eq!(result.capacity.shear_dcr.len(), profile.len());
    }

    #[test]
    fn same_seed_gives_same_result() {
        let profile = reference_profile();
        let config = small_config(20, 8, 8);

        let first = run(&profile, &config, &ProgressReporter::new()).unwrap();
        let second = run(&profile, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(first.schedule, second.schedule);
        assert_eq!(first.fitness, second.fitness);
        assert_eq!(first.generations_run, second.generations_run);
    }

    #[test]
    fn odd_and_minimal_population_sizes_run() {
        let profile = reference_profile();
        for population_size in [2, 3, 7] {
            let config = small_config(population_size, 5, 5);
            let result = run(&profile, &config, &ProgressReporter::new()).unwrap();
            assert_eq!(result.generations_run, 5);
        }
    }

    #[test]
    fn flat_landscape_stops_after_patience_generations() {
        // a single admissible value per gene makes every candidate identical
        let profile = reference_profile();
        let config = OptimizerConfigBuilder::new()
            .population_size(6)
            .mutation_rate(0.5)
            .crossover_rate(0.5)
            .max_generations(50)
            .patience(4)
            .seed(7)
            .length_bounds(30, 30)
            .thickness_bounds(2, 2)
            .reinforcement_ratio_bounds(0.02, 0.02)
            .concrete_impact_weight(0.1)
            .reinforcement_impact_weight(1.0)
            .drift_limit(DriftLimit::Seismic)
            .build()
            .unwrap();

        let result = run(&profile, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.termination, Termination::EarlyStopped);
        assert_eq!(result.generations_run, 4);
        assert_eq!(result.history.len(), 4);
        assert!((result.fitness - 1077.589976087134).abs() < 1e-6);
    }

    #[test]
    fn every_generation_keeps_size_and_bounds() {
        let profile = reference_profile();
        let config = small_config(9, 25, 25);
        let reporter = ProgressReporter::new();
        let context = OptimizationContext::new(&profile, &config, &reporter, None);
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = &config.bounds;

        let mut population = initialize_population(&context, &mut rng).unwrap();
        for _ in 0..25 {
            population = next_generation(&context, population, &mut rng).unwrap();
            assert_eq!(population.len(), 9);
            for individual in population.individuals() {
                assert_eq!(individual.schedule.len(), profile.len());
                for section in individual.schedule.sections() {
                    assert!(bounds.length.contains(section.length), "{:?}", section);
                    assert!(bounds.thickness.contains(section.thickness), "{:?}", section);
                    assert!(
                        bounds
                            .reinforcement_ratio
                            .contains(section.reinforcement_ratio),
                        "{:?}",
                        section
                    );
                }
            }
        }
    }

    #[test]
    fn history_records_constant_population_size() {
        let profile = reference_profile();
        let config = small_config(7, 12, 12);

        let result = run(&profile, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.history.len(), 12);
        assert!(result.history.iter().all(|s| s.population_size == 7));
    }

    #[test]
    fn early_stop_is_announced_as_message() {
        let profile = reference_profile();
        let mut config = small_config(6, 50, 3);
        config.bounds.length = DimensionBounds::new(30, 30);
        config.bounds.thickness = DimensionBounds::new(2, 2);
        config.bounds.reinforcement_ratio = RatioBounds::new(0.02, 0.02);
        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));

        let result = run(&profile, &config, &reporter).unwrap();
        drop(reporter);

        assert_eq!(result.termination, Termination::EarlyStopped);
        let messages = messages.into_inner().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("stopped at generation 3"));
    }

    #[test]
    fn raised_cancel_flag_stops_before_first_generation() {
        let profile = reference_profile();
        let config = small_config(10, 50, 50);
        let cancel = AtomicBool::new(true);

        let result =
            run_with_cancel(&profile, &config, &ProgressReporter::new(), &cancel).unwrap();

        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.generations_run, 0);
        assert!(result.history.is_empty());
        assert_eq!(result.schedule.len(), profile.len());
    }

    #[test]
    fn cancel_raised_mid_run_stops_at_next_generation() {
        let profile = reference_profile();
        let config = small_config(10, 50, 50);
        let cancel = AtomicBool::new(false);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::TaskIncrement { .. } = event {
                cancel.store(true, Ordering::Relaxed);
            }
        }));

        let result = run_with_cancel(&profile, &config, &reporter, &cancel).unwrap();

        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.generations_run, 1);
    }

    #[test]
    fn reports_phases_in_order() {
        let profile = reference_profile();
        let config = small_config(6, 3, 3);
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                events.lock().unwrap().push(name);
            }
        }));

        run(&profile, &config, &reporter).unwrap();
        drop(reporter);

        assert_eq!(events.into_inner().unwrap(), vec!["Initialization", "Evolution"]);
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let profile = reference_profile();
        let mut config = small_config(10, 5, 5);
        config.search.population_size = 1;

        let err = run(&profile, &config, &ProgressReporter::new()).unwrap_err();

        assert!(matches!(
            err,
            EngineError::Config {
                source: ConfigError::InvalidValue {
                    parameter: "population_size",
                    ..
                }
            }
        ));
    }
}
