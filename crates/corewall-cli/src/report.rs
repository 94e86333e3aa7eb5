use corewall::core::materials::carbon::CarbonSummary;
use corewall::core::materials::quantities::MaterialQuantities;
use corewall::core::models::section::SectionSchedule;
use corewall::core::structural::CapacityResult;
use corewall::workflows::optimize::{OptimizationResult, Termination};
use std::fmt::Write;

fn termination_label(termination: Termination) -> &'static str {
    match termination {
        Termination::MaxGenerations => "generation limit reached",
        Termination::EarlyStopped => "converged (no improvement within patience)",
        Termination::Cancelled => "cancelled",
    }
}

fn verdict(capacity: &CapacityResult) -> &'static str {
    if !capacity.is_finite() {
        "DEGENERATE"
    } else if capacity.passes() {
        "PASS"
    } else {
        "FAIL"
    }
}

/// The per-story table: section, demands and ratios, roof first.
pub fn story_table(schedule: &SectionSchedule, capacity: &CapacityResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>10} {:>8} {:>9} {:>7} {:>10} {:>12} {:>9} {:>10}",
        "Elev (ft)", "L (ft)", "t (ft)", "rho", "V (k)", "M (k-ft)", "V DCR", "M DCR"
    );
    for (index, section) in schedule.sections().iter().enumerate().rev() {
        let _ = writeln!(
            out,
            "{:>10.1} {:>8} {:>9} {:>7.4} {:>10.1} {:>12.1} {:>9.2} {:>10.2}",
            capacity.elevations[index],
            section.length,
            section.thickness,
            section.reinforcement_ratio,
            capacity.shear[index],
            capacity.moment[index],
            capacity.shear_dcr[index],
            capacity.moment_dcr[index],
        );
    }
    out
}

/// Governing ratios, volumes and embodied carbon.
pub fn capacity_summary(
    capacity: &CapacityResult,
    quantities: &MaterialQuantities,
    carbon: &CarbonSummary,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Max shear DCR:        {:.2}", capacity.max_shear_dcr());
    let _ = writeln!(out, "  Max moment DCR:       {:.2}", capacity.max_moment_dcr());
    let _ = writeln!(
        out,
        "  Drift DCR:            {:.3} (roof drift ratio {:.5})",
        capacity.drift_dcr, capacity.roof_drift_ratio
    );
    let _ = writeln!(out, "  Result:               {}", verdict(capacity));
    let _ = writeln!(
        out,
        "  Concrete volume:      {:.1} ft³",
        quantities.concrete_volume
    );
    let _ = writeln!(
        out,
        "  Reinforcement volume: {:.2} ft³",
        quantities.reinforcement_volume
    );
    let _ = writeln!(
        out,
        "  Embodied carbon:      {:.0} kgCO2e (concrete {:.0}, reinforcement {:.0})",
        carbon.total(),
        carbon.concrete,
        carbon.reinforcement
    );
    out
}

pub fn optimization_summary(result: &OptimizationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Generations run: {} ({})",
        result.generations_run,
        termination_label(result.termination)
    );
    let _ = writeln!(out, "Best fitness:    {:.4}", result.fitness);
    out.push('\n');
    out.push_str(&story_table(&result.schedule, &result.capacity));
    out.push('\n');
    out.push_str(&capacity_summary(
        &result.capacity,
        &result.quantities,
        &result.carbon,
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use corewall::core::models::profile::StoryForceProfile;
    use corewall::core::models::section::WallSection;
    use corewall::core::structural::{self, DriftLimit};

    fn evaluated(section: WallSection) -> (SectionSchedule, CapacityResult, MaterialQuantities) {
        let profile = StoryForceProfile::new([
            (0.0, 0.0),
            (10.0, 100.0),
            (20.0, 200.0),
            (30.0, 300.0),
            (40.0, 400.0),
        ])
        .unwrap();
        let schedule = SectionSchedule::uniform(section, profile.len());
        let capacity =
            structural::evaluate(&profile, &schedule, DriftLimit::Seismic.value()).unwrap();
        let quantities = MaterialQuantities::compute(&profile, &schedule);
        (schedule, capacity, quantities)
    }

    #[test]
    fn story_table_lists_roof_first() {
        let (schedule, capacity, _) = evaluated(WallSection::new(20, 1, 0.01));

        let table = story_table(&schedule, &capacity);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("V DCR"));
        assert!(lines[1].trim_start().starts_with("40.0"));
        assert!(lines[5].trim_start().starts_with("0.0"));
        assert!(lines[5].trim_end().ends_with("1.34"));
    }

    #[test]
    fn capacity_summary_reports_verdict() {
        let (_, failing, quantities) = evaluated(WallSection::new(20, 1, 0.01));
        let carbon = CarbonSummary::from(&quantities);
        assert!(capacity_summary(&failing, &quantities, &carbon).contains("FAIL"));

        let (_, passing, quantities) = evaluated(WallSection::new(30, 2, 0.02));
        let carbon = CarbonSummary::from(&quantities);
        let summary = capacity_summary(&passing, &quantities, &carbon);
        assert!(summary.contains("PASS"));
        assert!(summary.contains("8960.0 ft³"));
    }
}
