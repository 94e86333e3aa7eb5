use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSearchConfig {
    pub population_size: Option<usize>,
    pub mutation_rate: Option<f64>,
    pub crossover_rate: Option<f64>,
    pub max_generations: Option<usize>,
    pub patience: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileRange<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileBoundsConfig {
    pub length: Option<FileRange<u32>>,
    pub thickness: Option<FileRange<u32>>,
    pub reinforcement_ratio: Option<FileRange<f64>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileFitnessConfig {
    pub concrete_impact_weight: Option<f64>,
    pub reinforcement_impact_weight: Option<f64>,
    /// `"seismic"`, `"wind"` or a numeric ratio as a string.
    pub drift_limit: Option<String>,
}

/// The optimizer section of a TOML configuration file. Every key is optional; missing
/// keys fall back to the library defaults.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub search: Option<FileSearchConfig>,
    pub bounds: Option<FileBoundsConfig>,
    pub fitness: Option<FileFitnessConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn search_mut(&mut self) -> &mut FileSearchConfig {
        self.search.get_or_insert_with(Default::default)
    }

    fn bounds_mut(&mut self) -> &mut FileBoundsConfig {
        self.bounds.get_or_insert_with(Default::default)
    }

    fn fitness_mut(&mut self) -> &mut FileFitnessConfig {
        self.fitness.get_or_insert_with(Default::default)
    }

    /// Applies `KEY=VALUE` overrides, where `KEY` is the dotted path of a file key.
    pub fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            self.apply_set_value(kv_pair)
                .map_err(|e| CliError::Config(e.to_string()))?;
        }
        Ok(())
    }

    fn apply_set_value(&mut self, kv_pair: &str) -> std::result::Result<(), ParseError> {
        let (key, value) = parser::parse_key_value(kv_pair)?;
        debug!(key, value, "Applying configuration override.");

        match key {
            "search.population-size" => {
                self.search_mut().population_size = Some(parser::parse_value(key, value, "integer")?)
            }
            "search.mutation-rate" => {
                self.search_mut().mutation_rate = Some(parser::parse_value(key, value, "float")?)
            }
            "search.crossover-rate" => {
                self.search_mut().crossover_rate = Some(parser::parse_value(key, value, "float")?)
            }
            "search.max-generations" => {
                self.search_mut().max_generations = Some(parser::parse_value(key, value, "integer")?)
            }
            "search.patience" => {
                self.search_mut().patience = Some(parser::parse_value(key, value, "integer")?)
            }
            "search.seed" => {
                self.search_mut().seed = Some(parser::parse_value(key, value, "integer")?)
            }
            "bounds.length.min" | "bounds.length.max" => {
                let range = self.bounds_mut().length.get_or_insert_with(Default::default);
                set_range_end(range, key, value, "integer")?;
            }
            "bounds.thickness.min" | "bounds.thickness.max" => {
                let range = self
                    .bounds_mut()
                    .thickness
                    .get_or_insert_with(Default::default);
                set_range_end(range, key, value, "integer")?;
            }
            "bounds.reinforcement-ratio.min" | "bounds.reinforcement-ratio.max" => {
                let range = self
                    .bounds_mut()
                    .reinforcement_ratio
                    .get_or_insert_with(Default::default);
                set_range_end(range, key, value, "float")?;
            }
            "fitness.concrete-impact-weight" => {
                self.fitness_mut().concrete_impact_weight =
                    Some(parser::parse_value(key, value, "float")?)
            }
            "fitness.reinforcement-impact-weight" => {
                self.fitness_mut().reinforcement_impact_weight =
                    Some(parser::parse_value(key, value, "float")?)
            }
            "fitness.drift-limit" => self.fitness_mut().drift_limit = Some(value.to_string()),
            _ => {
                return Err(ParseError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    expected: "supported configuration key",
                });
            }
        }
        Ok(())
    }
}

fn set_range_end<T: std::str::FromStr>(
    range: &mut FileRange<T>,
    key: &str,
    value: &str,
    expected: &'static str,
) -> std::result::Result<(), ParseError> {
    let parsed = parser::parse_value(key, value, expected)?;
    if key.ends_with(".min") {
        range.min = Some(parsed);
    } else {
        range.max = Some(parsed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_full_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("corewall.toml");
        fs::write(
            &path,
            r#"
            [search]
            population-size = 200
            mutation-rate = 0.2
            crossover-rate = 0.8
            max-generations = 50
            patience = 10
            seed = 42

            [bounds]
            length = { min = 12, max = 36 }
            thickness = { min = 1, max = 2 }
            reinforcement-ratio = { min = 0.005, max = 0.015 }

            [fitness]
            concrete-impact-weight = 0.2
            reinforcement-impact-weight = 2.0
            drift-limit = "wind"
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();

        let search = config.search.unwrap();
        assert_eq!(search.population_size, Some(200));
        assert_eq!(search.seed, Some(42));
        let bounds = config.bounds.unwrap();
        assert_eq!(
            bounds.length,
            Some(FileRange {
                min: Some(12),
                max: Some(36)
            })
        );
        assert_eq!(bounds.reinforcement_ratio.unwrap().max, Some(0.015));
        assert_eq!(config.fitness.unwrap().drift_limit.as_deref(), Some("wind"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("typo.toml");
        fs::write(&path, "[search]\npopulation = 10\n").unwrap();

        let result = FileConfig::from_file(&path);

        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = FileConfig::from_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn set_values_override_nested_keys() {
        let mut config = FileConfig::default();
        config
            .apply_set_values(&[
                "search.patience=7".to_string(),
                "bounds.length.max=30".to_string(),
                "bounds.reinforcement-ratio.min=0.004".to_string(),
                "fitness.drift-limit=0.01".to_string(),
            ])
            .unwrap();

        assert_eq!(config.search.as_ref().unwrap().patience, Some(7));
        let bounds = config.bounds.as_ref().unwrap();
        assert_eq!(
            bounds.length,
            Some(FileRange {
                min: None,
                max: Some(30)
            })
        );
        assert_eq!(bounds.reinforcement_ratio.unwrap().min, Some(0.004));
        assert_eq!(
            config.fitness.unwrap().drift_limit.as_deref(),
            Some("0.01")
        );
    }

    #[test]
    fn set_values_reject_bad_input() {
        let mut config = FileConfig::default();
        for bad in ["search.patience", "search.patience=soon", "search.speed=3"] {
            let result = config.apply_set_values(&[bad.to_string()]);
            assert!(matches!(result, Err(CliError::Config(_))), "{}", bad);
        }
    }
}
