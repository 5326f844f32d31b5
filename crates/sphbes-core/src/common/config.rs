//! JSON run configuration for quadrature calls.
//!
//! Every field is optional in the file; missing entries fall back to the same
//! defaults the command line uses.

use super::constants::DEFAULT_CROSSOVER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuadratureConfig {
    pub mode: String,
    pub wave_number: Option<f64>,
    pub order: usize,
    pub power: u32,
    pub crossover: f64,
    pub ibegin: usize,
    pub iend: Option<usize>,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            mode: "trapezoidal".to_string(),
            wave_number: None,
            order: 0,
            power: 0,
            crossover: DEFAULT_CROSSOVER,
            ibegin: 0,
            iend: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read quadrature config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse quadrature config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_quadrature_config(
    config_path: impl AsRef<Path>,
) -> Result<QuadratureConfig, ConfigError> {
    let config_path = config_path.as_ref();
    let source = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| ConfigError::Parse {
        path: config_path.to_path_buf(),
        source,
    })
}
