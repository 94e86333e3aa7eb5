use super::capacity::CONCRETE_STRENGTH_PSI;
use crate::core::models::profile::StoryForceProfile;
use crate::core::models::section::WallSection;

/// Average stiffness reduction for a mix of cracked and uncracked wall segments.
const CRACKING_FACTOR: f64 = 0.5;

/// Concrete modulus of elasticity, `57√f'c` (ksi).
pub fn concrete_modulus() -> f64 {
    57.0 * CONCRETE_STRENGTH_PSI.sqrt()
}

/// Simplified I-shape moment of inertia of the core about its strong axis, in ft⁴:
/// the two webs bending about their own centroid plus the two flanges at a lever arm of
/// half the web length.
pub fn moment_of_inertia(section: &WallSection) -> f64 {
    let t = f64::from(section.thickness);
    let web = section.web_length();
    2.0 * t * web.powi(3) / 12.0 + 2.0 * section.flange_area() * web.powi(2) / 4.0
}

/// Curvature `M / (0.5 · I · Ec)` at every story.
///
/// Sections without positive stiffness produce an infinite curvature.
pub fn curvatures(moments: &[f64], sections: &[WallSection]) -> Vec<f64> {
    let modulus = concrete_modulus();
    moments
        .iter()
        .zip(sections)
        .map(|(&moment, section)| {
            let stiffness = CRACKING_FACTOR * moment_of_inertia(section) * modulus;
            if stiffness.is_finite() && stiffness > 0.0 {
                moment / stiffness
            } else {
                f64::INFINITY
            }
        })
        .collect()
}

/// Lateral displacement at every story by the moment-area method, base fixed at zero.
///
/// Going up from the base, the rotation grows by the trapezoidal area under the
/// curvature diagram and the displacement by the trapezoidal area under the rotation.
pub fn displacements(profile: &StoryForceProfile, curvatures: &[f64]) -> Vec<f64> {
    let elevations = profile.elevations();
    let mut displacements = vec![0.0; elevations.len()];
    let mut theta_previous = 0.0;
    let mut u_previous = 0.0;

    for i in 1..elevations.len() {
        let dz = elevations[i] - elevations[i - 1];
        let curvature_avg = (curvatures[i - 1] + curvatures[i]) / 2.0;
        let theta = theta_previous + curvature_avg * dz;
        let u = u_previous + (theta_previous + theta) / 2.0 * dz;

        displacements[i] = u;
        theta_previous = theta;
        u_previous = u;
    }

    displacements
}

/// Maximum displacement over building height. A profile with only the base has no
/// height and therefore no drift.
pub fn roof_drift_ratio(profile: &StoryForceProfile, displacements: &[f64]) -> f64 {
    let height = profile.height();
    if height <= 0.0 {
        return 0.0;
    }
    let max_displacement = displacements.iter().copied().fold(0.0, f64::max);
    max_displacement / height
}
