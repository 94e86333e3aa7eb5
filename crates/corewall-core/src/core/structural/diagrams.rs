use crate::core::models::profile::StoryForceProfile;

/// Story shear, ascending by elevation.
///
/// Walking down from the roof, the shear at a story is the sum of every story force at
/// or above it, so the base carries the full base shear.
pub fn shear_diagram(profile: &StoryForceProfile) -> Vec<f64> {
    let mut shears = vec![0.0; profile.len()];
    let mut cumulative = 0.0;
    for (i, &force) in profile.forces().iter().enumerate().rev() {
        cumulative += force;
        shears[i] = cumulative;
    }
    shears
}

/// Overturning moment, ascending by elevation.
///
/// Integrates the shear diagram from the roof down: between two consecutive stories
/// the moment grows by the shear of the upper story times the story height. The roof
/// moment is zero.
pub fn moment_diagram(profile: &StoryForceProfile, shears: &[f64]) -> Vec<f64> {
    let elevations = profile.elevations();
    let mut moments = vec![0.0; elevations.len()];
    let mut cumulative = 0.0;
    for i in (0..elevations.len().saturating_sub(1)).rev() {
        cumulative += shears[i + 1] * (elevations[i + 1] - elevations[i]);
        moments[i] = cumulative;
    }
    moments
}
