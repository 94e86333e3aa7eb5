use super::profile::{ProfileError, StoryForceProfile};
use serde::{Deserialize, Serialize};

/// Code-minimum reinforcement ratio used as the default lower search bound.
pub const REINFORCEMENT_RATIO_MIN: f64 = 0.0025;
/// Practical maximum reinforcement ratio used as the default upper search bound.
pub const REINFORCEMENT_RATIO_MAX: f64 = 0.02;

/// The core wall section at one story.
///
/// The core is idealized as a hollow rectangle: two flanges of `length × thickness`
/// and two webs spanning the clear distance `length - 2 × thickness` between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSection {
    /// Wall length in feet.
    pub length: u32,
    /// Wall thickness in feet.
    pub thickness: u32,
    /// Longitudinal reinforcement ratio (steel area / flange concrete area).
    pub reinforcement_ratio: f64,
}

impl WallSection {
    pub fn new(length: u32, thickness: u32, reinforcement_ratio: f64) -> Self {
        Self {
            length,
            thickness,
            reinforcement_ratio,
        }
    }

    /// Plan area of one flange, in ft².
    #[inline]
    pub fn flange_area(&self) -> f64 {
        f64::from(self.length) * f64::from(self.thickness)
    }

    /// Clear length of a web between the two flanges, in ft. Negative when the
    /// flanges overlap, which makes the section degenerate.
    #[inline]
    pub fn web_length(&self) -> f64 {
        f64::from(self.length) - 2.0 * f64::from(self.thickness)
    }

    /// Whether the flanges leave a positive clear web between them. Sections that fail
    /// this have no physical hollow core and negative derived areas.
    #[inline]
    pub fn is_hollow(&self) -> bool {
        self.web_length() > 0.0
    }

    /// Plan area of the hollow rectangular core (two flanges plus two webs), in ft².
    #[inline]
    pub fn core_area(&self) -> f64 {
        let t = f64::from(self.thickness);
        2.0 * self.flange_area() + 2.0 * self.web_length() * t
    }
}

/// One [`WallSection`] per story, stored by story position.
///
/// A schedule is paired with a [`StoryForceProfile`]: section `i` belongs to the story
/// at `profile.elevations()[i]`. Use [`check_covers`](Self::check_covers) before pairing
/// a schedule that did not come from the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSchedule {
    sections: Vec<WallSection>,
}

impl SectionSchedule {
    pub fn new(sections: Vec<WallSection>) -> Self {
        Self { sections }
    }

    /// The same section at every story.
    pub fn uniform(section: WallSection, stories: usize) -> Self {
        Self {
            sections: vec![section; stories],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[WallSection] {
        &self.sections
    }

    pub(crate) fn sections_mut(&mut self) -> &mut [WallSection] {
        &mut self.sections
    }

    /// Verifies the schedule has exactly one section per profile story.
    pub fn check_covers(&self, profile: &StoryForceProfile) -> Result<(), ProfileError> {
        if self.sections.len() != profile.len() {
            return Err(ProfileError::ScheduleMismatch {
                expected: profile.len(),
                found: self.sections.len(),
            });
        }
        Ok(())
    }

    /// Pairs every section with its story elevation, ascending.
    pub fn with_elevations<'a>(
        &'a self,
        profile: &'a StoryForceProfile,
    ) -> impl Iterator<Item = (f64, &'a WallSection)> + 'a {
        profile.elevations().iter().copied().zip(&self.sections)
    }
}

impl FromIterator<WallSection> for SectionSchedule {
    fn from_iter<I: IntoIterator<Item = WallSection>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
