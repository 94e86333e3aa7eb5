use corewall::engine::config::OptimizerConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub optimizer: OptimizerConfig,
}
