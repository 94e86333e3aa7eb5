use super::config::ConfigError;
use crate::core::models::profile::ProfileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid story force profile: {source}")]
    Profile {
        #[from]
        source: ProfileError,
    },

    #[error("Invalid optimizer configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Population is empty after {phase}")]
    EmptyPopulation { phase: &'static str },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
