use corewall::core::models::profile::StoryForceProfile;
use corewall::core::models::section::{SectionSchedule, WallSection};
use corewall::core::structural::DriftLimit;
use corewall::engine::config::OptimizerConfigBuilder;
use corewall::engine::progress::{Progress, ProgressReporter};
use corewall::workflows::{evaluate, optimize};
use std::sync::atomic::{AtomicU64, Ordering};

fn f64_approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn four_story_profile() -> StoryForceProfile {
    StoryForceProfile::new([
        (40.0, 400.0),
        (0.0, 0.0),
        (20.0, 200.0),
        (10.0, 100.0),
        (30.0, 300.0),
    ])
    .unwrap()
}

#[test]
fn optimizes_four_story_core_to_a_feasible_design() {
    let profile = four_story_profile();
    let config = OptimizerConfigBuilder::new()
        .population_size(60)
        .mutation_rate(0.15)
        .crossover_rate(0.9)
        .max_generations(25)
        .patience(10)
        .seed(2024)
        .length_bounds(20, 40)
        .thickness_bounds(1, 2)
        .reinforcement_ratio_bounds(0.0025, 0.02)
        .concrete_impact_weight(0.1)
        .reinforcement_impact_weight(1.0)
        .drift_limit(DriftLimit::Seismic)
        .build()
        .unwrap();

    let generations = AtomicU64::new(0);
    let reporter = ProgressReporter::with_callback(Box::new(|event| {
        if let Progress::TaskIncrement { amount } = event {
            generations.fetch_add(amount, Ordering::Relaxed);
        }
    }));

    let result = optimize::run(&profile, &config, &reporter).unwrap();
    drop(reporter);

    assert_eq!(generations.into_inner() as usize, result.generations_run);
    assert_eq!(result.history.len(), result.generations_run);
    assert_eq!(result.schedule.len(), profile.len());

    let capacity = &result.capacity;
    assert!(capacity.is_finite());
    assert!(capacity.passes(), "governing DCR {}", capacity.governing_dcr());
    assert!(f64_approx_equal(capacity.shear[0], 1000.0));
    assert!(f64_approx_equal(capacity.moment[0], 30000.0));
    assert_eq!(capacity.displacement[0], 0.0);

    assert!(result.quantities.concrete_volume > 0.0);
    assert!(result.quantities.reinforcement_volume > 0.0);
    assert!(result.carbon.total() > 0.0);
}

#[test]
fn evaluation_matches_known_ratios() {
    let profile = four_story_profile();
    let schedule = SectionSchedule::uniform(WallSection::new(20, 1, 0.01), profile.len());

    let result = evaluate::run(&profile, &schedule, DriftLimit::Seismic).unwrap();

    assert_eq!(result.capacity.shear_dcr, vec![0.47, 0.47, 0.42, 0.33, 0.19]);
    assert_eq!(result.capacity.moment_dcr, vec![1.34, 0.89, 0.49, 0.18, 0.0]);
    assert!(f64_approx_equal(result.capacity.drift_dcr, 1.861876792600809));
    assert!(!result.capacity.passes());
}
