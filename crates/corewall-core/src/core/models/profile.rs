use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Story force profile is empty")]
    Empty,

    #[error("Story force profile must include a base at elevation 0 ft (lowest elevation is {lowest} ft)")]
    MissingBase { lowest: f64 },

    #[error("Elevations must be strictly increasing, but {elevation} ft appears more than once")]
    DuplicateElevation { elevation: f64 },

    #[error("Non-finite {field} in story {index}")]
    NonFinite { field: &'static str, index: usize },

    #[error("Section schedule has {found} stories but the force profile has {expected}")]
    ScheduleMismatch { expected: usize, found: usize },
}

/// A single row of a story-force profile: the lateral force applied at one elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoryForce {
    /// Story elevation above the base, in feet.
    pub elevation: f64,
    /// Lateral force applied at the story, in kips.
    pub force: f64,
}

/// Lateral story forces keyed by elevation, stored as parallel arrays sorted ascending.
///
/// The profile is validated once when it is built: elevations are finite, unique and
/// strictly increasing, and the lowest elevation is the base at 0 ft. Every consumer
/// (diagrams, volumes, the optimizer genome) can then rely on positional indexing
/// instead of elevation lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StoryForce>", into = "Vec<StoryForce>")]
pub struct StoryForceProfile {
    elevations: Vec<f64>,
    forces: Vec<f64>,
}

impl StoryForceProfile {
    /// Builds a profile from `(elevation, force)` pairs given in any order.
    pub fn new(stories: impl IntoIterator<Item = (f64, f64)>) -> Result<Self, ProfileError> {
        let mut stories: Vec<(f64, f64)> = stories.into_iter().collect();
        if stories.is_empty() {
            return Err(ProfileError::Empty);
        }

        for (index, &(elevation, force)) in stories.iter().enumerate() {
            if !elevation.is_finite() {
                return Err(ProfileError::NonFinite {
                    field: "elevation",
                    index,
                });
            }
            if !force.is_finite() {
                return Err(ProfileError::NonFinite {
                    field: "force",
                    index,
                });
            }
        }

        stories.sort_by(|a, b| a.0.total_cmp(&b.0));

        if let Some(window) = stories.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(ProfileError::DuplicateElevation {
                elevation: window[1].0,
            });
        }

        let lowest = stories[0].0;
        if lowest != 0.0 {
            return Err(ProfileError::MissingBase { lowest });
        }

        let (elevations, forces) = stories.into_iter().unzip();
        Ok(Self { elevations, forces })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }

    /// Story elevations in ascending order, starting with the base.
    pub fn elevations(&self) -> &[f64] {
        &self.elevations
    }

    /// Story forces, aligned with [`elevations`](Self::elevations).
    pub fn forces(&self) -> &[f64] {
        &self.forces
    }

    pub fn iter(&self) -> impl Iterator<Item = StoryForce> + '_ {
        self.elevations
            .iter()
            .zip(&self.forces)
            .map(|(&elevation, &force)| StoryForce { elevation, force })
    }

    /// Building height, taken as the roof (highest) elevation.
    pub fn height(&self) -> f64 {
        self.elevations.last().copied().unwrap_or(0.0)
    }

    pub fn total_force(&self) -> f64 {
        self.forces.iter().sum()
    }

    /// Height of the segment ending at each story: `e[i] - e[i-1]`, with the base
    /// segment having zero height.
    pub fn segment_heights(&self) -> impl Iterator<Item = f64> + '_ {
        let mut previous = 0.0;
        self.elevations.iter().map(move |&elevation| {
            let height = elevation - previous;
            previous = elevation;
            height
        })
    }
}

impl TryFrom<Vec<StoryForce>> for StoryForceProfile {
    type Error = ProfileError;

    fn try_from(stories: Vec<StoryForce>) -> Result<Self, Self::Error> {
        Self::new(stories.into_iter().map(|s| (s.elevation, s.force)))
    }
}

impl From<StoryForceProfile> for Vec<StoryForce> {
    fn from(profile: StoryForceProfile) -> Self {
        profile.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn new_sorts_stories_by_elevation() {
        let profile =
            StoryForceProfile::new([(20.0, 200.0), (0.0, 0.0), (10.0, 100.0)]).unwrap();
        assert_eq!(profile.elevations(), &[0.0, 10.0, 20.0]);
        assert_eq!(profile.forces(), &[0.0, 100.0, 200.0]);
    }

    #[test]
    fn new_rejects_empty_input() {
        let result = StoryForceProfile::new(Vec::<(f64, f64)>::new());
        assert_eq!(result, Err(ProfileError::Empty));
    }

    #[test]
    fn new_rejects_profile_without_base() {
        let result = StoryForceProfile::new([(10.0, 100.0), (20.0, 200.0)]);
        assert_eq!(result, Err(ProfileError::MissingBase { lowest: 10.0 }));
    }

    #[test]
    fn new_rejects_duplicate_elevations() {
        let result = StoryForceProfile::new([(0.0, 0.0), (10.0, 100.0), (10.0, 50.0)]);
        assert_eq!(
            result,
            Err(ProfileError::DuplicateElevation { elevation: 10.0 })
        );
    }

    #[test]
    fn new_rejects_non_finite_values() {
        let result = StoryForceProfile::new([(0.0, 0.0), (10.0, f64::NAN)]);
        assert_eq!(
            result,
            Err(ProfileError::NonFinite {
                field: "force",
                index: 1
            })
        );

        let result = StoryForceProfile::new([(0.0, 0.0), (f64::INFINITY, 1.0)]);
        assert!(matches!(
            result,
            Err(ProfileError::NonFinite {
                field: "elevation",
                ..
            })
        ));
    }

    #[test]
    fn height_is_roof_elevation() {
        assert_eq!(reference_profile().height(), 40.0);
    }

    #[test]
    fn total_force_sums_every_story() {
        assert_eq!(reference_profile().total_force(), 1000.0);
    }

    #[test]
    fn segment_heights_start_with_zero_height_base() {
        let heights: Vec<f64> = StoryForceProfile::new([(0.0, 0.0), (12.0, 1.0), (22.0, 2.0)])
            .unwrap()
            .segment_heights()
            .collect();
        assert_eq!(heights, vec![0.0, 12.0, 10.0]);
    }

    #[test]
    fn try_from_story_rows_validates() {
        let rows = vec![
            StoryForce {
                elevation: 10.0,
                force: 5.0,
            },
            StoryForce {
                elevation: 0.0,
                force: 0.0,
            },
        ];
        let profile = StoryForceProfile::try_from(rows).unwrap();
        assert_eq!(profile.elevations(), &[0.0, 10.0]);

        let rows = vec![StoryForce {
            elevation: 5.0,
            force: 1.0,
        }];
        assert!(StoryForceProfile::try_from(rows).is_err());
    }
}
