use super::config::OptimizerConfig;
use super::progress::ProgressReporter;
use crate::core::models::profile::StoryForceProfile;
use std::sync::atomic::{AtomicBool, Ordering};

/// Read-only inputs shared by every phase of one optimization run.
#[derive(Clone, Copy)]
pub struct OptimizationContext<'a> {
    pub profile: &'a StoryForceProfile,
    pub config: &'a OptimizerConfig,
    pub reporter: &'a ProgressReporter<'a>,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> OptimizationContext<'a> {
    pub fn new(
        profile: &'a StoryForceProfile,
        config: &'a OptimizerConfig,
        reporter: &'a ProgressReporter<'a>,
        cancel: Option<&'a AtomicBool>,
    ) -> Self {
        Self {
            profile,
            config,
            reporter,
            cancel,
        }
    }

    /// `true` once the caller has raised the cancellation flag.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
