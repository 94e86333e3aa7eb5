use crate::core::models::profile::StoryForceProfile;
use crate::core::models::section::SectionSchedule;
use serde::Serialize;

/// Concrete and reinforcement volumes of a schedule, in ft³.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MaterialQuantities {
    pub concrete_volume: f64,
    pub reinforcement_volume: f64,
}

impl MaterialQuantities {
    /// Volumes over the full height of the building.
    ///
    /// The section at each story governs the segment below it, down to the previous
    /// story; the base section spans no height. The schedule is read positionally and
    /// must cover the profile.
    pub fn compute(profile: &StoryForceProfile, schedule: &SectionSchedule) -> Self {
        profile
            .segment_heights()
            .zip(schedule.sections())
            .fold(Self::default(), |mut acc, (height, section)| {
                let segment_volume = section.core_area() * height;
                acc.concrete_volume += segment_volume;
                acc.reinforcement_volume += section.reinforcement_ratio * segment_volume;
                acc
            })
    }

    /// The weighted volume penalty used by the optimizer's fitness function.
    #[inline]
    pub fn weighted_penalty(&self, concrete_weight: f64, reinforcement_weight: f64) -> f64 {
        concrete_weight * self.concrete_volume + reinforcement_weight * self.reinforcement_volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::section::WallSection;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn uniform_schedule_volume_is_area_times_height() {
        let profile = StoryForceProfile::new([
            (0.0, 0.0),
            (10.0, 100.0),
            (20.0, 200.0),
            (30.0, 300.0),
            (40.0, 400.0),
        ])
        .unwrap();
        let schedule = SectionSchedule::uniform(WallSection::new(30, 2, 0.02), profile.len());

        let quantities = MaterialQuantities::compute(&profile, &schedule);

        assert!(f64_approx_equal(quantities.concrete_volume, 224.0 * 40.0));
        assert!(f64_approx_equal(quantities.reinforcement_volume, 0.02 * 224.0 * 40.0));
    }

    #[test]
    fn base_section_contributes_no_volume() {
        let profile = StoryForceProfile::new([(0.0, 0.0), (12.0, 10.0)]).unwrap();
        let schedule = SectionSchedule::new(vec![
            WallSection::new(40, 3, 0.02),
            WallSection::new(20, 2, 0.01),
        ]);

        let quantities = MaterialQuantities::compute(&profile, &schedule);

        let upper_area = WallSection::new(20, 2, 0.01).core_area();
        assert!(f64_approx_equal(quantities.concrete_volume, upper_area * 12.0));
        assert!(f64_approx_equal(
            quantities.reinforcement_volume,
            0.01 * upper_area * 12.0
        ));
    }

    #[test]
    fn weighted_penalty_applies_each_weight() {
        let quantities = MaterialQuantities {
            concrete_volume: 8960.0,
            reinforcement_volume: 179.2,
        };
        assert!(f64_approx_equal(
            quantities.weighted_penalty(0.1, 1.0),
            896.0 + 179.2
        ));
    }
}
