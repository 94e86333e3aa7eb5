//! # Core Models Module
//!
//! The input data structures shared by the structural model, material accounting and
//! the optimizer.
//!
//! ## Key Components
//!
//! - [`profile`] - The story-force profile: lateral force applied at each story
//!   elevation, validated once at construction
//! - [`section`] - Wall sections and the per-story section schedule
//!
//! ## Usage
//!
//! ```ignore
//! use corewall::core::models::{profile::StoryForceProfile, section::{SectionSchedule, WallSection}};
//!
//! let profile = StoryForceProfile::new([(0.0, 0.0), (10.0, 100.0), (20.0, 200.0)])?;
//! let schedule = SectionSchedule::uniform(WallSection::new(20, 1, 0.01), profile.len());
//! ```

pub mod profile;
pub mod section;
