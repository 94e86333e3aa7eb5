//! # Structural Capacity Model
//!
//! A simplified multi-degree-of-freedom cantilever model of a concrete core wall.
//! Given a story-force profile and a per-story section schedule it produces shear,
//! moment and roof-drift demand-to-capacity ratios (DCRs).
//!
//! ## Pipeline
//!
//! 1. [`diagrams`] - shear and overturning-moment diagrams, integrated from the roof down
//! 2. [`capacity`] - per-story shear and flexural strength and their DCRs
//! 3. [`deflection`] - curvature, moment-area integration and roof drift
//!
//! Evaluation is a pure function of its inputs. Degenerate sections (zero or negative
//! capacity or stiffness) produce infinite DCRs instead of NaN, so downstream ranking
//! treats them as maximally infeasible.

pub mod capacity;
pub mod deflection;
pub mod diagrams;

use crate::core::models::profile::{ProfileError, StoryForceProfile};
use crate::core::models::section::SectionSchedule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

/// Roof drift limit (drift ratio) the drift DCR is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriftLimit {
    /// 0.02, typical seismic drift limit.
    #[default]
    Seismic,
    /// 0.0025 (H/400), typical wind serviceability limit.
    Wind,
    Custom(f64),
}

impl DriftLimit {
    pub const SEISMIC: f64 = 0.02;
    pub const WIND: f64 = 0.0025;

    pub fn value(&self) -> f64 {
        match self {
            DriftLimit::Seismic => Self::SEISMIC,
            DriftLimit::Wind => Self::WIND,
            DriftLimit::Custom(value) => *value,
        }
    }
}

impl fmt::Display for DriftLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftLimit::Seismic => write!(f, "seismic ({})", Self::SEISMIC),
            DriftLimit::Wind => write!(f, "wind ({})", Self::WIND),
            DriftLimit::Custom(value) => write!(f, "custom ({})", value),
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid drift limit '{0}': expected 'seismic', 'wind' or a positive number")]
pub struct ParseDriftLimitError(String);

impl FromStr for DriftLimit {
    type Err = ParseDriftLimitError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "seismic" => Ok(DriftLimit::Seismic),
            "wind" => Ok(DriftLimit::Wind),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(DriftLimit::Custom)
                .ok_or_else(|| ParseDriftLimitError(s.to_string())),
        }
    }
}

/// Outcome of one capacity evaluation. Every per-story vector is ascending by elevation
/// and aligned with the profile it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityResult {
    pub elevations: Vec<f64>,
    /// Story shear demand (kips).
    pub shear: Vec<f64>,
    /// Story overturning-moment demand (kip-ft).
    pub moment: Vec<f64>,
    pub shear_dcr: Vec<f64>,
    pub moment_dcr: Vec<f64>,
    /// Lateral displacement per story, zero at the base.
    pub displacement: Vec<f64>,
    pub roof_drift_ratio: f64,
    pub drift_dcr: f64,
}

impl CapacityResult {
    pub fn max_shear_dcr(&self) -> f64 {
        max_ratio(&self.shear_dcr)
    }

    pub fn max_moment_dcr(&self) -> f64 {
        max_ratio(&self.moment_dcr)
    }

    /// The largest of the shear, moment and drift ratios.
    pub fn governing_dcr(&self) -> f64 {
        self.max_shear_dcr()
            .max(self.max_moment_dcr())
            .max(self.drift_dcr)
    }

    /// `true` when every ratio is at most 1.
    pub fn passes(&self) -> bool {
        self.governing_dcr() <= 1.0
    }

    pub fn is_finite(&self) -> bool {
        self.governing_dcr().is_finite()
    }
}

fn max_ratio(ratios: &[f64]) -> f64 {
    ratios.iter().copied().fold(0.0, f64::max)
}

/// Evaluates a section schedule against a story-force profile.
///
/// `drift_limit` is the numeric roof drift ratio limit; see [`DriftLimit`] for the
/// common presets. The schedule must hold exactly one section per story.
pub fn evaluate(
    profile: &StoryForceProfile,
    schedule: &SectionSchedule,
    drift_limit: f64,
) -> Result<CapacityResult, ProfileError> {
    schedule.check_covers(profile)?;
    let sections = schedule.sections();

    let shear = diagrams::shear_diagram(profile);
    let moment = diagrams::moment_diagram(profile, &shear);

    let shear_dcr = shear
        .iter()
        .zip(sections)
        .map(|(&v, section)| capacity::demand_capacity_ratio(v, capacity::shear_capacity(section)))
        .collect();
    let moment_dcr = moment
        .iter()
        .zip(sections)
        .map(|(&m, section)| {
            capacity::demand_capacity_ratio(m, capacity::moment_capacity(section))
        })
        .collect();

    let curvatures = deflection::curvatures(&moment, sections);
    let displacement = deflection::displacements(profile, &curvatures);
    let roof_drift_ratio = deflection::roof_drift_ratio(profile, &displacement);
    let drift_dcr = if roof_drift_ratio.is_nan() {
        f64::INFINITY
    } else {
        roof_drift_ratio / drift_limit
    };

    trace!(roof_drift_ratio, drift_dcr, "Capacity evaluation complete.");

    Ok(CapacityResult {
        elevations: profile.elevations().to_vec(),
        shear,
        moment,
        shear_dcr,
        moment_dcr,
        displacement,
        roof_drift_ratio,
        drift_dcr,
    })
}
