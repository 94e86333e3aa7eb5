use crate::error::{CliError, Result};
use corewall::core::models::profile::{StoryForce, StoryForceProfile};
use corewall::core::models::section::SectionSchedule;
use corewall::core::structural::CapacityResult;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Reads a story-force profile from a CSV file with an `elevation,force` header.
pub fn read_profile(path: &Path) -> Result<StoryForceProfile> {
    let parse_error = |source: anyhow::Error| CliError::FileParsing {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| parse_error(e.into()))?;
    let stories = reader
        .deserialize::<StoryForce>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| parse_error(e.into()))?;
    debug!(rows = stories.len(), "Read story-force rows from {:?}", path);

    let profile = StoryForceProfile::try_from(stories).map_err(|e| parse_error(e.into()))?;
    info!(
        stories = profile.len(),
        height = profile.height(),
        total_force = profile.total_force(),
        "Loaded story-force profile."
    );
    Ok(profile)
}

#[derive(Debug, Serialize)]
struct ScheduleRow {
    elevation: f64,
    length: u32,
    thickness: u32,
    reinforcement_ratio: f64,
    shear: f64,
    moment: f64,
    shear_dcr: f64,
    moment_dcr: f64,
    displacement: f64,
}

/// Writes one row per story: the section and the demands and ratios it carries.
pub fn write_schedule(
    path: &Path,
    schedule: &SectionSchedule,
    capacity: &CapacityResult,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    for (index, section) in schedule.sections().iter().enumerate() {
        let row = ScheduleRow {
            elevation: capacity.elevations[index],
            length: section.length,
            thickness: section.thickness,
            reinforcement_ratio: section.reinforcement_ratio,
            shear: capacity.shear[index],
            moment: capacity.moment[index],
            shear_dcr: capacity.shear_dcr[index],
            moment_dcr: capacity.moment_dcr[index],
            displacement: capacity.displacement[index],
        };
        writer.serialize(row).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    }
    writer.flush()?;

    info!(stories = schedule.len(), "Wrote section schedule to {:?}", path);
    Ok(())
}
