use crate::core::materials::carbon::CarbonSummary;
use crate::core::materials::quantities::MaterialQuantities;
use crate::core::models::profile::StoryForceProfile;
use crate::core::models::section::SectionSchedule;
use crate::core::structural::{self, CapacityResult, DriftLimit};
use crate::engine::error::EngineError;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub capacity: CapacityResult,
    pub quantities: MaterialQuantities,
    pub carbon: CarbonSummary,
}

/// Checks one schedule without searching: capacity ratios, material volumes and
/// embodied carbon.
#[instrument(skip_all, name = "evaluation_workflow", fields(stories = profile.len()))]
pub fn run(
    profile: &StoryForceProfile,
    schedule: &SectionSchedule,
    drift_limit: DriftLimit,
) -> Result<EvaluationResult, EngineError> {
    let capacity = structural::evaluate(profile, schedule, drift_limit.value())?;
    let quantities = MaterialQuantities::compute(profile, schedule);
    let carbon = CarbonSummary::from(&quantities);

    info!(
        governing_dcr = capacity.governing_dcr(),
        passes = capacity.passes(),
        "Evaluation complete."
    );
    Ok(EvaluationResult {
        capacity,
        quantities,
        carbon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::section::WallSection;

    #[test]
    fn evaluates_reference_design() {
        let profile = StoryForceProfile::new([
            (0.0, 0.0),
            (10.0, 100.0),
            (20.0, 200.0),
            (30.0, 300.0),
            (40.0, 400.0),
        ])
        .unwrap();
        let schedule = SectionSchedule::uniform(WallSection::new(30, 2, 0.02), profile.len());

        let result = run(&profile, &schedule, DriftLimit::Seismic).unwrap();

        assert!(result.capacity.passes());
        assert!((result.quantities.concrete_volume - 8960.0).abs() < 1e-9);
        assert!((result.quantities.reinforcement_volume - 179.2).abs() < 1e-9);
        assert!(result.carbon.total() > 0.0);
    }

    #[test]
    fn stricter_drift_limit_fails_same_design() {
        let profile = StoryForceProfile::new([(0.0, 0.0), (10.0, 100.0), (20.0, 200.0)]).unwrap();
        let schedule = SectionSchedule::uniform(WallSection::new(20, 1, 0.02), profile.len());

        let seismic = run(&profile, &schedule, DriftLimit::Seismic).unwrap();
        let wind = run(&profile, &schedule, DriftLimit::Wind).unwrap();

        assert!(wind.capacity.drift_dcr > seismic.capacity.drift_dcr);
        assert!((wind.capacity.drift_dcr / seismic.capacity.drift_dcr - 8.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_schedule_of_wrong_length() {
        let profile = StoryForceProfile::new([(0.0, 0.0), (10.0, 100.0)]).unwrap();
        let schedule = SectionSchedule::uniform(WallSection::new(20, 1, 0.02), 5);
        assert!(run(&profile, &schedule, DriftLimit::Seismic).is_err());
    }
}
