use super::config::FitnessConfig;
use super::error::EngineError;
use super::state::Individual;
use crate::core::materials::quantities::MaterialQuantities;
use crate::core::models::profile::StoryForceProfile;
use crate::core::models::section::{SectionSchedule, WallSection};
use crate::core::structural::{self, CapacityResult};
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Multiplier applied to the governing DCR of an infeasible candidate, large enough
/// that any infeasible design ranks behind every feasible one.
pub const INFEASIBILITY_SCALE: f64 = 100_000.0;

/// Everything computed while scoring one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessBreakdown {
    pub capacity: CapacityResult,
    pub quantities: MaterialQuantities,
    pub penalty: f64,
    pub fitness: f64,
}

/// Scores a schedule; lower is better.
///
/// - Infeasible (any DCR above 1): `governing DCR × 100 000 + penalty`, so infeasible
///   candidates rank by how badly they fail, with volume as tiebreaker.
/// - Feasible: `|1 - shear| + |1 - moment| + |1 - drift| + penalty`, rewarding
///   designs that use their capacity efficiently.
/// - Degenerate (a section without a clear web, or a non-finite DCR or penalty): `+∞`.
///
/// The penalty is the impact-weighted sum of concrete and reinforcement volumes.
pub fn evaluate(
    profile: &StoryForceProfile,
    schedule: &SectionSchedule,
    config: &FitnessConfig,
) -> Result<FitnessBreakdown, EngineError> {
    let capacity = structural::evaluate(profile, schedule, config.drift_limit.value())?;
    let quantities = MaterialQuantities::compute(profile, schedule);
    let penalty = quantities.weighted_penalty(
        config.concrete_impact_weight,
        config.reinforcement_impact_weight,
    );
    let fitness = if schedule.sections().iter().all(WallSection::is_hollow) {
        combine(&capacity, penalty)
    } else {
        f64::INFINITY
    };

    Ok(FitnessBreakdown {
        capacity,
        quantities,
        penalty,
        fitness,
    })
}

pub fn score(
    profile: &StoryForceProfile,
    schedule: &SectionSchedule,
    config: &FitnessConfig,
) -> Result<f64, EngineError> {
    evaluate(profile, schedule, config).map(|breakdown| breakdown.fitness)
}

fn combine(capacity: &CapacityResult, penalty: f64) -> f64 {
    let shear = capacity.max_shear_dcr();
    let moment = capacity.max_moment_dcr();
    let drift = capacity.drift_dcr;

    if ![shear, moment, drift, penalty].iter().all(|v| v.is_finite()) {
        return f64::INFINITY;
    }

    if shear > 1.0 || moment > 1.0 || drift > 1.0 {
        shear.max(moment).max(drift) * INFEASIBILITY_SCALE + penalty
    } else {
        (1.0 - shear).abs() + (1.0 - moment).abs() + (1.0 - drift).abs() + penalty
    }
}

/// Scores a batch of schedules. Scoring is pure, so the optional parallel path yields
/// the same individuals in the same order.
#[instrument(level = "debug", skip_all, fields(count = schedules.len()))]
pub fn evaluate_all(
    schedules: Vec<SectionSchedule>,
    profile: &StoryForceProfile,
    config: &FitnessConfig,
) -> Result<Vec<Individual>, EngineError> {
    #[cfg(not(feature = "parallel"))]
    let iter = schedules.into_iter();

    #[cfg(feature = "parallel")]
    let iter = schedules.into_par_iter();

    iter.map(|schedule| {
        let fitness = score(profile, &schedule, config)?;
        Ok(Individual::new(schedule, fitness))
    })
    .collect()
}
