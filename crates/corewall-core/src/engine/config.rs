use crate::core::models::section::{REINFORCEMENT_RATIO_MAX, REINFORCEMENT_RATIO_MIN};
use crate::core::structural::DriftLimit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },

    #[error("Invalid bounds for '{parameter}': minimum {min} exceeds maximum {max}")]
    InvertedBounds {
        parameter: &'static str,
        min: f64,
        max: f64,
    },
}

/// Inclusive search bounds for a wall dimension, in whole feet.
///
/// New individuals draw only even values from the range; mutation steps of ±2 ft are
/// clamped to it, so a clamped gene may land on an odd bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionBounds {
    pub min: u32,
    pub max: u32,
}

impl DimensionBounds {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Lowest even value in the range.
    #[inline]
    pub fn first_even(&self) -> u32 {
        self.min + self.min % 2
    }

    /// Number of even values in the range.
    pub fn even_count(&self) -> u32 {
        let first = self.first_even();
        if first > self.max {
            0
        } else {
            (self.max - first) / 2 + 1
        }
    }

    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Moves `value` by `step` feet, clamped to the range.
    pub fn step_clamped(&self, value: u32, step: i64) -> u32 {
        let stepped = i64::from(value) + step;
        stepped.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }

    fn validate(&self, parameter: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedBounds {
                parameter,
                min: f64::from(self.min),
                max: f64::from(self.max),
            });
        }
        if self.min == 0 {
            return Err(ConfigError::InvalidValue {
                parameter,
                reason: "minimum must be at least 1 ft".to_string(),
            });
        }
        if self.even_count() == 0 {
            return Err(ConfigError::InvalidValue {
                parameter,
                reason: format!("range {}..={} contains no even value", self.min, self.max),
            });
        }
        Ok(())
    }
}

/// Inclusive bounds for the reinforcement ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioBounds {
    pub min: f64,
    pub max: f64,
}

impl RatioBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn validate(&self, parameter: &'static str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(ConfigError::InvalidValue {
                parameter,
                reason: "bounds must be finite".to_string(),
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedBounds {
                parameter,
                min: self.min,
                max: self.max,
            });
        }
        if self.min <= 0.0 || self.max > 1.0 {
            return Err(ConfigError::InvalidValue {
                parameter,
                reason: format!("bounds must lie within (0, 1], got {}..={}", self.min, self.max),
            });
        }
        Ok(())
    }
}

impl Default for RatioBounds {
    fn default() -> Self {
        Self::new(REINFORCEMENT_RATIO_MIN, REINFORCEMENT_RATIO_MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub population_size: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub max_generations: usize,
    /// Generations without strict improvement of the best-ever fitness before stopping.
    pub patience: usize,
    /// Seed for the random source; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundsConfig {
    pub length: DimensionBounds,
    pub thickness: DimensionBounds,
    pub reinforcement_ratio: RatioBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessConfig {
    pub concrete_impact_weight: f64,
    pub reinforcement_impact_weight: f64,
    pub drift_limit: DriftLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub search: SearchConfig,
    pub bounds: BoundsConfig,
    pub fitness: FitnessConfig,
}

impl OptimizerConfig {
    /// Checks every parameter before a run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let search = &self.search;
        if search.population_size < 2 {
            return Err(ConfigError::InvalidValue {
                parameter: "population_size",
                reason: format!("must be at least 2, got {}", search.population_size),
            });
        }
        if search.max_generations == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "max_generations",
                reason: "must be at least 1".to_string(),
            });
        }
        if search.patience == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "patience",
                reason: "must be at least 1".to_string(),
            });
        }
        validate_probability("mutation_rate", search.mutation_rate)?;
        validate_probability("crossover_rate", search.crossover_rate)?;

        self.bounds.length.validate("length")?;
        self.bounds.thickness.validate("thickness")?;
        let widest_flanges = u64::from(self.bounds.thickness.max) * 2;
        if u64::from(self.bounds.length.min) <= widest_flanges {
            return Err(ConfigError::InvalidValue {
                parameter: "length",
                reason: format!(
                    "minimum {} ft must exceed twice the maximum thickness ({} ft)",
                    self.bounds.length.min, widest_flanges
                ),
            });
        }
        self.bounds
            .reinforcement_ratio
            .validate("reinforcement_ratio")?;

        validate_weight("concrete_impact_weight", self.fitness.concrete_impact_weight)?;
        validate_weight(
            "reinforcement_impact_weight",
            self.fitness.reinforcement_impact_weight,
        )?;

        let drift_limit = self.fitness.drift_limit.value();
        if !(drift_limit.is_finite() && drift_limit > 0.0) {
            return Err(ConfigError::InvalidValue {
                parameter: "drift_limit",
                reason: format!("must be a positive number, got {}", drift_limit),
            });
        }
        Ok(())
    }
}

fn validate_probability(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidValue {
            parameter,
            reason: format!("must be between 0.0 and 1.0, got {}", value),
        });
    }
    Ok(())
}

fn validate_weight(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ConfigError::InvalidValue {
            parameter,
            reason: format!("must be a non-negative number, got {}", value),
        });
    }
    Ok(())
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                population_size: 1000,
                mutation_rate: 0.15,
                crossover_rate: 0.9,
                max_generations: 100,
                patience: 20,
                seed: None,
            },
            bounds: BoundsConfig {
                length: DimensionBounds::new(10, 40),
                thickness: DimensionBounds::new(1, 3),
                reinforcement_ratio: RatioBounds::default(),
            },
            fitness: FitnessConfig {
                concrete_impact_weight: 0.1,
                reinforcement_impact_weight: 1.0,
                drift_limit: DriftLimit::Seismic,
            },
        }
    }
}

#[derive(Default)]
pub struct OptimizerConfigBuilder {
    population_size: Option<usize>,
    mutation_rate: Option<f64>,
    crossover_rate: Option<f64>,
    max_generations: Option<usize>,
    patience: Option<usize>,
    seed: Option<u64>,
    length_bounds: Option<DimensionBounds>,
    thickness_bounds: Option<DimensionBounds>,
    reinforcement_ratio_bounds: Option<RatioBounds>,
    concrete_impact_weight: Option<f64>,
    reinforcement_impact_weight: Option<f64>,
    drift_limit: Option<DriftLimit>,
}

impl OptimizerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate);
        self
    }
    pub fn crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = Some(rate);
        self
    }
    pub fn max_generations(mut self, generations: usize) -> Self {
        self.max_generations = Some(generations);
        self
    }
    pub fn patience(mut self, generations: usize) -> Self {
        self.patience = Some(generations);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn length_bounds(mut self, min: u32, max: u32) -> Self {
        self.length_bounds = Some(DimensionBounds::new(min, max));
        self
    }
    pub fn thickness_bounds(mut self, min: u32, max: u32) -> Self {
        self.thickness_bounds = Some(DimensionBounds::new(min, max));
        self
    }
    pub fn reinforcement_ratio_bounds(mut self, min: f64, max: f64) -> Self {
        self.reinforcement_ratio_bounds = Some(RatioBounds::new(min, max));
        self
    }
    pub fn concrete_impact_weight(mut self, weight: f64) -> Self {
        self.concrete_impact_weight = Some(weight);
        self
    }
    pub fn reinforcement_impact_weight(mut self, weight: f64) -> Self {
        self.reinforcement_impact_weight = Some(weight);
        self
    }
    pub fn drift_limit(mut self, limit: DriftLimit) -> Self {
        self.drift_limit = Some(limit);
        self
    }

    /// Assembles the configuration. Every parameter except the seed is required; the
    /// result is validated before it is returned.
    pub fn build(self) -> Result<OptimizerConfig, ConfigError> {
        let search = SearchConfig {
            population_size: self
                .population_size
                .ok_or(ConfigError::MissingParameter("population_size"))?,
            mutation_rate: self
                .mutation_rate
                .ok_or(ConfigError::MissingParameter("mutation_rate"))?,
            crossover_rate: self
                .crossover_rate
                .ok_or(ConfigError::MissingParameter("crossover_rate"))?,
            max_generations: self
                .max_generations
                .ok_or(ConfigError::MissingParameter("max_generations"))?,
            patience: self
                .patience
                .ok_or(ConfigError::MissingParameter("patience"))?,
            seed: self.seed,
        };
        let bounds = BoundsConfig {
            length: self
                .length_bounds
                .ok_or(ConfigError::MissingParameter("length_bounds"))?,
            thickness: self
                .thickness_bounds
                .ok_or(ConfigError::MissingParameter("thickness_bounds"))?,
            reinforcement_ratio: self
                .reinforcement_ratio_bounds
                .ok_or(ConfigError::MissingParameter("reinforcement_ratio_bounds"))?,
        };
        let fitness = FitnessConfig {
            concrete_impact_weight: self
                .concrete_impact_weight
                .ok_or(ConfigError::MissingParameter("concrete_impact_weight"))?,
            reinforcement_impact_weight: self
                .reinforcement_impact_weight
                .ok_or(ConfigError::MissingParameter("reinforcement_impact_weight"))?,
            drift_limit: self
                .drift_limit
                .ok_or(ConfigError::MissingParameter("drift_limit"))?,
        };

        let config = OptimizerConfig {
            search,
            bounds,
            fitness,
        };
        config.validate()?;
        Ok(config)
    }
}
